//! Code Explainer HTTP Server
//!
//! ```text
//! client ──POST /explain──► relay ──GET /models──────────► Groq
//!                             └────POST /chat/completions─► Groq
//! ```
//!
//! Cross-origin access is restricted to the configured origins by the CORS
//! layer; the handlers never see rejected preflights.

use crate::api::routes::{explain, health_check};
use crate::api::AppState;
use crate::config::ServerConfig;
use crate::llm_client::GroqClient;
use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

/// Largest accepted request body. Bigger `/explain` bodies get 413.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

pub fn cors_layer(allowed_origins: &[String]) -> anyhow::Result<CorsLayer> {
    let origins = allowed_origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o.trim()).with_context(|| format!("Invalid CORS origin: {}", o))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]))
}

pub fn build_router(state: Arc<AppState>, allowed_origins: &[String]) -> anyhow::Result<Router> {
    let app = Router::new()
        .route("/", get(health_check))
        .route("/explain", post(explain))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(allowed_origins)?)
                .layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        )
        .with_state(state);

    Ok(app)
}

pub async fn run_server(config: ServerConfig) -> anyhow::Result<()> {
    if config.groq_api_key.is_empty() {
        warn!("GROQ_API_KEY is not set; upstream calls will be rejected");
    }

    let provider = Arc::new(GroqClient::new(config.llm_config())?);
    let state = Arc::new(AppState::new(
        provider,
        config.preferred_models.clone(),
        config.model_cache_ttl(),
    ));
    let app = build_router(state, &config.allowed_origins)?;

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("Server listening at http://localhost:{}", config.port);
    info!("  Groq API: {}", config.groq_api_base);
    info!("  Allowed origins: {}", config.allowed_origins.join(", "));
    info!("  Endpoints:");
    info!("    GET  /        - Health check");
    info!("    POST /explain - Explain a code snippet");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
