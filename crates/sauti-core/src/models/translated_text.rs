use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// English pivot text produced by the translation stage.
///
/// Append-only: one entry per successful intake, never updated or deleted by
/// the pipeline. The raw (source-language) transcription is transient and is
/// only returned in the response payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslatedTextEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
