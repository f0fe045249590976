//! Direct text intake: persist a text entry and extract records from it,
//! skipping the audio stages.

use crate::auth::UserContext;
use crate::error::HttpAppError;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use sauti_core::models::FinancialRecordResponse;
use sauti_core::AppError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct VoiceTextRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct VoiceTextResponse {
    pub message: String,
    pub records: Vec<FinancialRecordResponse>,
}

/// `POST /api/v0/voice-texts` - JSON `{text}`. Always a list of zero or more
/// records in the response, mirroring the audio endpoint.
#[tracing::instrument(skip(state, request), fields(user_id = %user.user_id))]
pub async fn create_voice_text(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    Json(request): Json<VoiceTextRequest>,
) -> Result<(StatusCode, Json<VoiceTextResponse>), HttpAppError> {
    if request.text.trim().is_empty() {
        return Err(AppError::InvalidInput("Please provide 'text'.".to_string()).into());
    }

    let (_entry, records) = state
        .pipeline
        .ingest_text(user.user_id, &request.text)
        .await?;

    let message = if records.is_empty() {
        "Text saved successfully".to_string()
    } else {
        "Text saved and financial records extracted".to_string()
    };
    Ok((
        StatusCode::CREATED,
        Json(VoiceTextResponse { message, records }),
    ))
}
