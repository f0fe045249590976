//! Configuration module
//!
//! Environment-driven configuration for the API and the external-service
//! clients. `.env` files are honoured in development via `dotenvy`.

use std::env;

use crate::quota::DEFAULT_UPLOAD_LIMIT;
use crate::validation::DEFAULT_MAX_AUDIO_BYTES;

const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 20;
const DEFAULT_DB_TIMEOUT_SECS: u64 = 30;
// Every external call must be bounded; one knob covers all three services.
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_SUNBIRD_API_URL: &str = "https://api.sunbird.ai";
const DEFAULT_OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1";
const DEFAULT_EXTRACTION_MODEL: &str = "meta-llama/llama-3.1-8b-instruct";

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub request_timeout_seconds: u64,
    /// Per-user ceiling on total audio uploads ever accepted.
    pub max_audio_uploads: i64,
    /// Payload size ceiling in bytes.
    pub max_audio_bytes: usize,
    pub sunbird_api_url: String,
    pub sunbird_auth_token: String,
    pub openrouter_api_url: String,
    pub openrouter_api_key: String,
    pub extraction_model: String,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;
        let sunbird_auth_token = env::var("SUNBIRD_AUTH_TOKEN")
            .map_err(|_| anyhow::anyhow!("SUNBIRD_AUTH_TOKEN environment variable is required"))?;
        let openrouter_api_key = env::var("OPENROUTER_API_KEY")
            .map_err(|_| anyhow::anyhow!("OPENROUTER_API_KEY environment variable is required"))?;

        Ok(Config {
            server_port: parse_env("SERVER_PORT", DEFAULT_SERVER_PORT)?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            database_url,
            db_max_connections: parse_env("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS)?,
            db_timeout_seconds: parse_env("DB_TIMEOUT_SECS", DEFAULT_DB_TIMEOUT_SECS)?,
            request_timeout_seconds: parse_env(
                "REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?,
            max_audio_uploads: parse_env("MAX_AUDIO_UPLOADS", DEFAULT_UPLOAD_LIMIT)?,
            max_audio_bytes: parse_env("MAX_AUDIO_BYTES", DEFAULT_MAX_AUDIO_BYTES)?,
            sunbird_api_url: env::var("SUNBIRD_API_URL")
                .unwrap_or_else(|_| DEFAULT_SUNBIRD_API_URL.to_string()),
            sunbird_auth_token,
            openrouter_api_url: env::var("OPENROUTER_API_URL")
                .unwrap_or_else(|_| DEFAULT_OPENROUTER_API_URL.to_string()),
            openrouter_api_key,
            extraction_model: env::var("EXTRACTION_MODEL")
                .unwrap_or_else(|_| DEFAULT_EXTRACTION_MODEL.to_string()),
        })
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, default: T) -> Result<T, anyhow::Error>
where
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("Invalid value for {}: {}", key, e)),
        Err(_) => Ok(default),
    }
}
