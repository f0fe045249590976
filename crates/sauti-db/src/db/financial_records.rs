//! Financial record repository: batch inserts and per-user listing.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sauti_core::models::{FinancialRecord, NewFinancialRecord, TransactionType};
use sauti_core::{AppError, FinancialRecordStore};
use sqlx::{PgPool, Postgres};
use uuid::Uuid;

#[derive(Debug, sqlx::FromRow)]
struct FinancialRecordRow {
    id: Uuid,
    user_id: Uuid,
    translated_text_id: Uuid,
    product_name: String,
    quantity: i32,
    unit_price: Decimal,
    total_price: Decimal,
    transaction_type: String,
    created_at: DateTime<Utc>,
}

impl FinancialRecordRow {
    fn into_record(self) -> Result<FinancialRecord, AppError> {
        let transaction_type: TransactionType = self
            .transaction_type
            .parse()
            .map_err(|_| {
                AppError::Internal(format!(
                    "Unknown transaction_type in row {}: {}",
                    self.id, self.transaction_type
                ))
            })?;
        Ok(FinancialRecord {
            id: self.id,
            user_id: self.user_id,
            translated_text_id: self.translated_text_id,
            product_name: self.product_name,
            quantity: self.quantity,
            unit_price: self.unit_price,
            total_price: self.total_price,
            transaction_type,
            created_at: self.created_at,
        })
    }
}

/// Repository for the financial_records table.
#[derive(Clone)]
pub struct FinancialRecordRepository {
    pool: PgPool,
}

impl FinancialRecordRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FinancialRecordStore for FinancialRecordRepository {
    /// Inserts the whole batch in one transaction so a failed run never
    /// leaves half the records behind.
    #[tracing::instrument(
        skip(self, records),
        fields(db.table = "financial_records", count = records.len())
    )]
    async fn insert_many(
        &self,
        user_id: Uuid,
        translated_text_id: Uuid,
        records: &[NewFinancialRecord],
    ) -> Result<Vec<FinancialRecord>, AppError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await?;
        let mut inserted = Vec::with_capacity(records.len());
        for record in records {
            let row: FinancialRecordRow = sqlx::query_as::<Postgres, FinancialRecordRow>(
                r#"
                INSERT INTO financial_records
                    (user_id, translated_text_id, product_name, quantity,
                     unit_price, total_price, transaction_type)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id, user_id, translated_text_id, product_name, quantity,
                          unit_price, total_price, transaction_type, created_at
                "#,
            )
            .bind(user_id)
            .bind(translated_text_id)
            .bind(&record.product_name)
            .bind(record.quantity)
            .bind(record.unit_price)
            .bind(record.total_price)
            .bind(record.transaction_type.as_str())
            .fetch_one(&mut *tx)
            .await?;
            inserted.push(row.into_record()?);
        }
        tx.commit().await?;
        Ok(inserted)
    }

    #[tracing::instrument(skip(self), fields(db.table = "financial_records"))]
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<FinancialRecord>, AppError> {
        let rows: Vec<FinancialRecordRow> = sqlx::query_as::<Postgres, FinancialRecordRow>(
            r#"
            SELECT id, user_id, translated_text_id, product_name, quantity,
                   unit_price, total_price, transaction_type, created_at
            FROM financial_records
            WHERE user_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        rows.into_iter().map(FinancialRecordRow::into_record).collect()
    }
}
