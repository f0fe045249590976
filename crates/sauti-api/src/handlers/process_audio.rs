//! Audio processing endpoint: transcribe, translate, extract, persist.

use crate::auth::UserContext;
use crate::error::HttpAppError;
use crate::pipeline::PipelineResponse;
use crate::state::AppState;
use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use bytes::Bytes;
use sauti_core::{AppError, UploadValidationError};
use std::sync::Arc;

/// `POST /api/v0/audio/process` - multipart form with an `audio` file part
/// and a `language` text part. Responds 201 with the transcription, the
/// translated text, and the extracted financial records.
#[tracing::instrument(skip(state, headers, multipart), fields(user_id = %user.user_id))]
pub async fn process_audio(
    State(state): State<Arc<AppState>>,
    user: UserContext,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<PipelineResponse>), HttpAppError> {
    let declared_len = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|value| value.to_str().ok())
        .and_then(|raw| raw.parse::<usize>().ok());
    let max_bytes = state.config.max_audio_bytes;

    let mut audio = Bytes::new();
    let mut language = String::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| read_error(e, "Malformed multipart body", declared_len, max_bytes))?
    {
        match field.name() {
            Some("audio") => {
                audio = field
                    .bytes()
                    .await
                    .map_err(|e| read_error(e, "Unreadable audio part", declared_len, max_bytes))?;
            }
            Some("language") => {
                language = field.text().await.map_err(|e| {
                    read_error(e, "Unreadable language part", declared_len, max_bytes)
                })?;
            }
            // Unknown parts are ignored; the validator decides what is missing.
            _ => {}
        }
    }

    let response = state.pipeline.run(user.user_id, audio, &language).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// A body read that trips the transport-level size limit reports the same
/// outcome as the validator's own ceiling check, so oversized uploads always
/// get the documented `file_too_large` body regardless of how far over they
/// are. The exact byte count is gone once the limited body bails, so the
/// declared Content-Length stands in where the client sent one.
fn read_error(
    error: MultipartError,
    context: &str,
    declared_len: Option<usize>,
    max_bytes: usize,
) -> AppError {
    if error.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return UploadValidationError::FileTooLarge {
            size: declared_len.unwrap_or(max_bytes + 1),
            max: max_bytes,
        }
        .into();
    }
    AppError::InvalidInput(format!("{}: {}", context, error))
}
