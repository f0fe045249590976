//! OpenRouter structured-extraction client.
//!
//! Sends the translated text to a chat-completions endpoint with a system
//! prompt pinning the record schema, then parses the model's reply as a JSON
//! array of record candidates. Elements that fail to parse are dropped here;
//! range/type validation of the surviving candidates happens in the pipeline.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use sauti_core::models::RecordCandidate;
use sauti_core::RecordExtractor;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const EXTRACTION_PROMPT: &str = "You are a bookkeeping assistant for small businesses. \
Extract every financial transaction mentioned in the user's text and reply with ONLY a JSON \
array (no prose, no markdown). Each element must have exactly these fields: \
\"product_name\" (string), \"quantity\" (positive integer), \"unit_price\" (non-negative number), \
\"total_price\" (non-negative number), \"transaction_type\" (either \"sale\" or \"purchase\"). \
Reply with [] if the text contains no transactions.";

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// Client for an OpenRouter-compatible chat-completions endpoint.
#[derive(Clone)]
pub struct OpenRouterExtractor {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenRouterExtractor {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client for OpenRouter")?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            client,
        })
    }

    /// Parse the model's reply into candidates. A reply that is not valid
    /// JSON (after stripping an optional markdown fence) is a hard failure;
    /// unparseable elements inside a valid array are dropped.
    fn parse_content(content: &str) -> Result<Vec<RecordCandidate>> {
        let stripped = strip_code_fence(content);
        let value: serde_json::Value = serde_json::from_str(stripped)
            .context("Extraction response is not valid JSON")?;

        let elements = match value {
            serde_json::Value::Array(items) => items,
            // A bare object is treated as a single-record reply.
            obj @ serde_json::Value::Object(_) => vec![obj],
            other => {
                return Err(anyhow!(
                    "Extraction response must be a JSON array, got {}",
                    json_type_name(&other)
                ))
            }
        };

        let total = elements.len();
        let candidates: Vec<RecordCandidate> = elements
            .into_iter()
            .filter_map(RecordCandidate::from_value)
            .collect();
        if candidates.len() < total {
            tracing::debug!(
                dropped = total - candidates.len(),
                "Dropped malformed extraction candidates"
            );
        }
        Ok(candidates)
    }
}

#[async_trait]
impl RecordExtractor for OpenRouterExtractor {
    #[tracing::instrument(skip(self, text), fields(model = %self.model))]
    async fn extract(&self, text: &str) -> Result<Vec<RecordCandidate>> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: EXTRACTION_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .context("Failed to send extraction request")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(anyhow!(
                "Extraction request failed: {} - {}",
                status,
                error_text
            ));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("Failed to parse extraction response")?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| anyhow!("Extraction response contained no message content"))?;

        Self::parse_content(&content)
    }
}

/// Strip a surrounding markdown code fence, with or without a language tag.
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
