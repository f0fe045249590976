//! Upload validation.
//!
//! Rules are applied in order and the first failure wins: the language code
//! must be non-empty, the audio payload must be present, and the payload must
//! not exceed the configured size ceiling. Validation runs before any
//! external call or persistence, so a rejected request leaves no state.

/// Default payload ceiling: 10 MiB.
pub const DEFAULT_MAX_AUDIO_BYTES: usize = 10 * 1024 * 1024;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UploadValidationError {
    #[error("Please provide a 'language' code.")]
    MissingLanguage,

    #[error("Please provide an 'audio' file.")]
    MissingAudio,

    #[error("Audio file is too large (max 10MB).")]
    FileTooLarge { size: usize, max: usize },
}

impl UploadValidationError {
    /// Machine-readable reason code for the error response.
    pub fn reason_code(&self) -> &'static str {
        match self {
            UploadValidationError::MissingLanguage => "missing_language",
            UploadValidationError::MissingAudio => "missing_audio",
            UploadValidationError::FileTooLarge { .. } => "file_too_large",
        }
    }
}

/// Validate an incoming audio payload and its declared source language.
pub fn validate_upload(
    audio: &[u8],
    language: &str,
    max_bytes: usize,
) -> Result<(), UploadValidationError> {
    if language.trim().is_empty() {
        return Err(UploadValidationError::MissingLanguage);
    }
    if audio.is_empty() {
        return Err(UploadValidationError::MissingAudio);
    }
    if audio.len() > max_bytes {
        return Err(UploadValidationError::FileTooLarge {
            size: audio.len(),
            max: max_bytes,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_valid_upload() {
        let audio = vec![0u8; 2 * 1024 * 1024];
        assert!(validate_upload(&audio, "lug", DEFAULT_MAX_AUDIO_BYTES).is_ok());
    }

    #[test]
    fn rejects_missing_language_first() {
        // Language is checked before audio, so an empty request reports the language.
        let err = validate_upload(&[], "", DEFAULT_MAX_AUDIO_BYTES).unwrap_err();
        assert_eq!(err, UploadValidationError::MissingLanguage);
        assert_eq!(err.reason_code(), "missing_language");

        let err = validate_upload(&[1, 2, 3], "   ", DEFAULT_MAX_AUDIO_BYTES).unwrap_err();
        assert_eq!(err, UploadValidationError::MissingLanguage);
    }

    #[test]
    fn rejects_missing_audio() {
        let err = validate_upload(&[], "lug", DEFAULT_MAX_AUDIO_BYTES).unwrap_err();
        assert_eq!(err, UploadValidationError::MissingAudio);
        assert_eq!(err.reason_code(), "missing_audio");
    }

    #[test]
    fn rejects_oversized_audio() {
        let audio = vec![0u8; DEFAULT_MAX_AUDIO_BYTES + 1];
        let err = validate_upload(&audio, "lug", DEFAULT_MAX_AUDIO_BYTES).unwrap_err();
        assert_eq!(
            err,
            UploadValidationError::FileTooLarge {
                size: DEFAULT_MAX_AUDIO_BYTES + 1,
                max: DEFAULT_MAX_AUDIO_BYTES,
            }
        );
        assert_eq!(err.reason_code(), "file_too_large");
    }

    #[test]
    fn accepts_payload_exactly_at_limit() {
        let audio = vec![0u8; DEFAULT_MAX_AUDIO_BYTES];
        assert!(validate_upload(&audio, "lug", DEFAULT_MAX_AUDIO_BYTES).is_ok());
    }
}
