//! AI Code Explainer Server
//!
//! Runs the explanation relay as a standalone HTTP server.

use anyhow::Result;
use clap::Parser;
use code_explainer::{run_server, ServerConfig};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional; real environment variables take precedence
    let dotenv = dotenvy::dotenv();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("code_explainer=debug,info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match dotenv {
        Ok(path) => debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => warn!("Failed to load .env: {}", e),
    }

    let config = ServerConfig::parse();

    info!("Starting AI Code Explainer backend");
    info!("  Listening on: {}", config.bind_addr());

    run_server(config).await
}
