use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A raw audio upload accepted for processing.
///
/// Created exactly once per accepted request and immutable thereafter. The
/// audio bytes live in the row; this struct carries only the byte length so
/// the payload is not dragged through the pipeline after persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioUpload {
    pub id: Uuid,
    pub user_id: Uuid,
    pub byte_len: i64,
    pub language: String,
    pub created_at: DateTime<Utc>,
}
