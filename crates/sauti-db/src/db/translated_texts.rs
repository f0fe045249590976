//! Translated text repository: append-only inserts of English pivot text.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sauti_core::models::TranslatedTextEntry;
use sauti_core::{AppError, TranslatedTextStore};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
struct TranslatedTextRow {
    id: Uuid,
    user_id: Uuid,
    content: String,
    created_at: DateTime<Utc>,
}

impl TranslatedTextRow {
    fn into_entry(self) -> TranslatedTextEntry {
        TranslatedTextEntry {
            id: self.id,
            user_id: self.user_id,
            content: self.content,
            created_at: self.created_at,
        }
    }
}

/// Repository for the translated_text_entries table.
#[derive(Clone)]
pub struct TranslatedTextRepository {
    pool: PgPool,
}

impl TranslatedTextRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TranslatedTextStore for TranslatedTextRepository {
    #[tracing::instrument(skip(self, content), fields(db.table = "translated_text_entries"))]
    async fn create(&self, user_id: Uuid, content: &str) -> Result<TranslatedTextEntry, AppError> {
        let row: TranslatedTextRow = sqlx::query_as::<Postgres, TranslatedTextRow>(
            r#"
            INSERT INTO translated_text_entries (user_id, content)
            VALUES ($1, $2)
            RETURNING id, user_id, content, created_at
            "#,
        )
        .bind(user_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into_entry())
    }
}
