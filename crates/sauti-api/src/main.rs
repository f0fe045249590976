use sauti_api::{setup, telemetry};
use sauti_core::Config;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    telemetry::init_telemetry().map_err(|e| anyhow::anyhow!("Failed to init telemetry: {}", e))?;

    let config = Config::from_env()?;
    let (state, router) = setup::initialize_app(config).await?;
    setup::start_server(&state.config, router).await?;

    Ok(())
}
