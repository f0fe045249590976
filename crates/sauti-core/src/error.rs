//! Error types module
//!
//! All errors in the application are unified under the [`AppError`] enum.
//! The pipeline-stage failures (`QuotaExceeded`, `InvalidUpload`,
//! `Transcription`, `Translation`, `Extraction`) map one-to-one onto the
//! client-visible outcomes; the remaining variants cover database and
//! internal failures.

use crate::validation::UploadValidationError;
use sqlx::Error as SqlxError;

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like validation failures
    Debug,
    /// Warning level - for recoverable issues like resource limits
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata for error responses - defines how an error should be presented.
/// This trait allows errors to self-describe their HTTP response characteristics.
pub trait ErrorMetadata {
    /// HTTP status code to return
    fn http_status_code(&self) -> u16;

    /// Machine-readable error code (e.g., "quota_exceeded")
    fn error_code(&self) -> &'static str;

    /// Whether the caller may retry / resubmit
    fn is_recoverable(&self) -> bool;

    /// Client-facing message (may differ from internal error message)
    fn client_message(&self) -> String;

    /// Whether details should be hidden in production
    fn is_sensitive(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[source] SqlxError),

    #[error("Maximum number of audio uploads reached: {used}/{limit}")]
    QuotaExceeded { used: i64, limit: i64 },

    #[error(transparent)]
    InvalidUpload(#[from] UploadValidationError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Failed to transcribe audio")]
    Transcription(#[source] anyhow::Error),

    #[error("Failed to translate text")]
    Translation(#[source] anyhow::Error),

    #[error("Failed to extract financial records")]
    Extraction(#[source] anyhow::Error),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<SqlxError> for AppError {
    fn from(err: SqlxError) -> Self {
        AppError::Database(err)
    }
}

impl AppError {
    /// Full diagnostic message including the source chain. Goes into the
    /// `details` field of error responses, never into control flow.
    pub fn detailed_message(&self) -> String {
        match self {
            AppError::Transcription(source)
            | AppError::Translation(source)
            | AppError::Extraction(source) => format!("{:#}", source),
            AppError::Database(source) => source.to_string(),
            other => other.to_string(),
        }
    }
}

/// Static metadata per variant: (http_status, error_code, recoverable, sensitive, log_level).
/// client_message stays per-variant for dynamic content.
fn app_error_static_metadata(err: &AppError) -> (u16, &'static str, bool, bool, LogLevel) {
    match err {
        AppError::Database(_) => (500, "database_error", true, true, LogLevel::Error),
        AppError::QuotaExceeded { .. } => (429, "quota_exceeded", false, false, LogLevel::Warn),
        AppError::InvalidUpload(reason) => {
            (400, reason.reason_code(), true, false, LogLevel::Debug)
        }
        AppError::InvalidInput(_) => (400, "invalid_input", true, false, LogLevel::Debug),
        AppError::Transcription(_) => (500, "transcription_failed", true, false, LogLevel::Error),
        AppError::Translation(_) => (500, "translation_failed", true, false, LogLevel::Error),
        AppError::Extraction(_) => (500, "extraction_failed", true, false, LogLevel::Error),
        AppError::Unauthorized(_) => (401, "unauthorized", false, false, LogLevel::Warn),
        AppError::Internal(_) => (500, "internal_error", true, true, LogLevel::Error),
    }
}

impl ErrorMetadata for AppError {
    fn http_status_code(&self) -> u16 {
        app_error_static_metadata(self).0
    }

    fn error_code(&self) -> &'static str {
        app_error_static_metadata(self).1
    }

    fn is_recoverable(&self) -> bool {
        app_error_static_metadata(self).2
    }

    fn client_message(&self) -> String {
        match self {
            AppError::Database(_) => "A database error occurred".to_string(),
            AppError::QuotaExceeded { .. } => {
                "Maximum number of audio uploads reached.".to_string()
            }
            AppError::Internal(_) => "An internal error occurred".to_string(),
            other => other.to_string(),
        }
    }

    fn is_sensitive(&self) -> bool {
        app_error_static_metadata(self).3
    }

    fn log_level(&self) -> LogLevel {
        app_error_static_metadata(self).4
    }
}
