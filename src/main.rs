//! HTTP server for the Webtranet engine.
//!
//! Reads the configuration directory from `WEBTRANET_CONFIG_DIR` (default
//! `./config/default`) and binds `WEBTRANET_ADDR` (default `0.0.0.0:8080`).
//! Log filtering follows `RUST_LOG`.

use std::env;

use tracing::info;
use tracing_subscriber::EnvFilter;
use webtranet_engine::api::{AppState, create_router};
use webtranet_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/default";
const DEFAULT_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_dir = env::var("WEBTRANET_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.into());
    let addr = env::var("WEBTRANET_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.into());

    let config = ConfigLoader::load(&config_dir)?;
    info!(
        config_dir = %config_dir,
        name = %config.settings().name,
        version = %config.settings().version,
        "Configuration loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(addr = %addr, "Listening");

    axum::serve(listener, router).await?;
    Ok(())
}
