//! Sunbird AI client: speech-to-text and NLLB translation.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use sauti_core::{SpeechToText, Translator};
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Deserialize)]
struct SttResponse {
    audio_transcription: Option<String>,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    source_language: &'a str,
    target_language: &'a str,
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    output: Option<TranslateOutput>,
}

#[derive(Debug, Deserialize)]
struct TranslateOutput {
    translated_text: Option<String>,
}

/// Client for the Sunbird AI task endpoints (`/tasks/stt`,
/// `/tasks/nllb_translate`).
#[derive(Clone)]
pub struct SunbirdClient {
    base_url: String,
    auth_token: String,
    client: reqwest::Client,
}

impl SunbirdClient {
    pub fn new(base_url: impl Into<String>, auth_token: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client for Sunbird AI")?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: auth_token.into(),
            client,
        })
    }
}

#[async_trait]
impl SpeechToText for SunbirdClient {
    #[tracing::instrument(skip(self, audio), fields(byte_len = audio.len(), language))]
    async fn transcribe(&self, audio: Bytes, language: &str) -> Result<String> {
        let url = format!("{}/tasks/stt", self.base_url);

        let audio_part = Part::bytes(audio.to_vec())
            .file_name("audio.wav")
            .mime_str("audio/wav")
            .context("Failed to build audio multipart part")?;
        let form = Form::new()
            .text("language", language.to_string())
            .text("adapter", language.to_string())
            .text("whisper", "true")
            .part("audio", audio_part);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.auth_token)
            .multipart(form)
            .send()
            .await
            .context("Failed to send speech-to-text request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow!(
                "Speech-to-text request failed: {} - {}",
                status,
                error_text
            ));
        }

        let parsed: SttResponse = response
            .json()
            .await
            .context("Failed to parse speech-to-text response")?;

        parsed
            .audio_transcription
            .ok_or_else(|| anyhow!("Speech-to-text response missing 'audio_transcription' field"))
    }
}

#[async_trait]
impl Translator for SunbirdClient {
    #[tracing::instrument(skip(self, text), fields(source_language, target_language))]
    async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String> {
        let url = format!("{}/tasks/nllb_translate", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.auth_token)
            .json(&TranslateRequest {
                source_language,
                target_language,
                text,
            })
            .send()
            .await
            .context("Failed to send translation request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow!(
                "Translation request failed: {} - {}",
                status,
                error_text
            ));
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .context("Failed to parse translation response")?;

        parsed
            .output
            .and_then(|o| o.translated_text)
            .ok_or_else(|| anyhow!("Translation response missing 'output.translated_text' field"))
    }
}
