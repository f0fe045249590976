//! External-service capability traits.
//!
//! Each stage of the pipeline talks to one external service through one of
//! these interfaces. Implementations live in `sauti-clients`; they return
//! `anyhow` errors with full context, and the orchestrator wraps those into
//! the stage-specific [`crate::AppError`] variants.

use crate::models::RecordCandidate;
use async_trait::async_trait;
use bytes::Bytes;

/// Speech-to-text service: raw audio bytes + language hint -> plain text.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn transcribe(&self, audio: Bytes, language: &str) -> anyhow::Result<String>;
}

/// Translation service: source-language text -> pivot-language text.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> anyhow::Result<String>;
}

/// Language-model structured extraction: free-form text -> zero or more raw
/// record candidates. Candidates are validated (and possibly dropped) by the
/// caller; only a failure of the overall call is an error here.
#[async_trait]
pub trait RecordExtractor: Send + Sync {
    async fn extract(&self, text: &str) -> anyhow::Result<Vec<RecordCandidate>>;
}
