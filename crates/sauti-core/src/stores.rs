//! Persistence capability traits.
//!
//! The pipeline orchestrator is injected with these interfaces rather than
//! concrete repositories, so tests can run against in-memory implementations
//! and the transactional quota enforcement stays behind a seam.

use crate::error::AppError;
use crate::models::{AudioUpload, FinancialRecord, NewFinancialRecord, TranslatedTextEntry};
use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

/// Store for accepted audio uploads. Owns the per-user upload counter.
#[async_trait]
pub trait UploadStore: Send + Sync {
    /// Current number of uploads ever accepted for the user.
    async fn count_for_user(&self, user_id: Uuid) -> Result<i64, AppError>;

    /// Insert the upload only if the user's count is still under `limit`.
    ///
    /// The count-and-insert must be atomic: two concurrent requests at
    /// exactly the ceiling must not both succeed. Returns `None` when the
    /// ceiling was hit.
    async fn create_guarded(
        &self,
        user_id: Uuid,
        audio: Bytes,
        language: &str,
        limit: i64,
    ) -> Result<Option<AudioUpload>, AppError>;
}

/// Store for translated (English pivot) text entries.
#[async_trait]
pub trait TranslatedTextStore: Send + Sync {
    async fn create(&self, user_id: Uuid, content: &str) -> Result<TranslatedTextEntry, AppError>;
}

/// Store for extracted financial records.
#[async_trait]
pub trait FinancialRecordStore: Send + Sync {
    /// Persist all records from one run, linked to the triggering
    /// translated-text entry. All-or-nothing within the batch.
    async fn insert_many(
        &self,
        user_id: Uuid,
        translated_text_id: Uuid,
        records: &[NewFinancialRecord],
    ) -> Result<Vec<FinancialRecord>, AppError>;

    /// The user's records, newest first.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<FinancialRecord>, AppError>;
}
