//! Audio upload repository: quota-guarded inserts into the audio_uploads table.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use sauti_core::models::AudioUpload;
use sauti_core::{AppError, UploadStore};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

/// Row type for the audio_uploads table (audio bytes are not read back).
#[derive(Debug, sqlx::FromRow)]
struct AudioUploadRow {
    id: Uuid,
    user_id: Uuid,
    byte_len: i64,
    language: String,
    created_at: DateTime<Utc>,
}

impl AudioUploadRow {
    fn into_upload(self) -> AudioUpload {
        AudioUpload {
            id: self.id,
            user_id: self.user_id,
            byte_len: self.byte_len,
            language: self.language,
            created_at: self.created_at,
        }
    }
}

/// Repository for the audio_uploads table.
#[derive(Clone)]
pub struct AudioUploadRepository {
    pool: PgPool,
}

impl AudioUploadRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UploadStore for AudioUploadRepository {
    #[tracing::instrument(skip(self), fields(db.table = "audio_uploads"))]
    async fn count_for_user(&self, user_id: Uuid) -> Result<i64, AppError> {
        let count: i64 =
            sqlx::query_scalar("SELECT count(*) FROM audio_uploads WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        Ok(count)
    }

    /// Atomic count-and-insert: a per-user advisory lock serializes
    /// concurrent uploads so two requests at exactly the ceiling cannot both
    /// pass. Returns `None` when the ceiling was hit.
    #[tracing::instrument(
        skip(self, audio),
        fields(db.table = "audio_uploads", byte_len = audio.len())
    )]
    async fn create_guarded(
        &self,
        user_id: Uuid,
        audio: Bytes,
        language: &str,
        limit: i64,
    ) -> Result<Option<AudioUpload>, AppError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("SELECT pg_advisory_xact_lock(hashtext($1::text))")
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await?;

        let count: i64 =
            sqlx::query_scalar("SELECT count(*) FROM audio_uploads WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&mut *tx)
                .await?;
        if count >= limit {
            tx.rollback().await.ok();
            return Ok(None);
        }

        let row: AudioUploadRow = sqlx::query_as::<Postgres, AudioUploadRow>(
            r#"
            INSERT INTO audio_uploads (user_id, audio, byte_len, language)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, byte_len, language, created_at
            "#,
        )
        .bind(user_id)
        .bind(audio.as_ref())
        .bind(audio.len() as i64)
        .bind(language)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(Some(row.into_upload()))
    }
}
