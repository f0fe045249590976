//! Application wiring: database pool, repositories, service clients, router,
//! and the server loop.

pub mod routes;

use crate::state::AppState;
use anyhow::Context;
use axum::Router;
use sauti_clients::{OpenRouterExtractor, SunbirdClient};
use sauti_core::{Config, SpeechToText, Translator};
use sauti_db::{AudioUploadRepository, FinancialRecordRepository, TranslatedTextRepository};
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Connect to Postgres, run migrations, build the real clients, and return
/// the shared state plus the configured router.
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, Router), anyhow::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_timeout_seconds))
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .context("Failed to run database migrations")?;

    let timeout = Duration::from_secs(config.request_timeout_seconds);
    let sunbird = Arc::new(SunbirdClient::new(
        &config.sunbird_api_url,
        &config.sunbird_auth_token,
        timeout,
    )?);
    let extractor = Arc::new(OpenRouterExtractor::new(
        &config.openrouter_api_url,
        &config.openrouter_api_key,
        &config.extraction_model,
        timeout,
    )?);

    let state = Arc::new(AppState::new(
        config,
        Arc::new(AudioUploadRepository::new(pool.clone())),
        Arc::new(TranslatedTextRepository::new(pool.clone())),
        Arc::new(FinancialRecordRepository::new(pool)),
        sunbird.clone() as Arc<dyn SpeechToText>,
        sunbird as Arc<dyn Translator>,
        extractor,
    ));

    let router = routes::build_router(state.clone());
    Ok((state, router))
}

/// Bind and serve until shutdown.
pub async fn start_server(config: &Config, router: Router) -> Result<(), anyhow::Error> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(%addr, "Sauti API listening");
    axum::serve(listener, router)
        .await
        .context("Server error")?;
    Ok(())
}
