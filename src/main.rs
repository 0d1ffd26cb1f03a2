use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use langchain_translate_server::config::Config;
use langchain_translate_server::routes;
use langchain_translate_server::state::AppState;

const DEFAULT_LOG_FILTER: &str = "langchain_translate_server=debug,tower_http=debug";

#[tokio::main]
async fn main() -> Result<()> {
    // .env first: it may carry RUST_LOG and the provider key
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    let config_path = std::env::var("CONFIG_PATH").ok();
    let config = Config::load(config_path.as_deref())?;
    info!("Loaded configuration: {:?}", config);

    if config.llm.api_key.is_none() {
        warn!(
            "{} is not set; requests will fail until it is provided",
            config.llm.api_key_env
        );
    }

    let addr = config.socket_addr()?;
    let app_state = AppState::new(config)?;
    let app = routes::create_app(app_state);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
