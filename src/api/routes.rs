//! API route handlers.

use super::state::AppState;
use super::types::{ExplainRequest, ExplainResponse};
use crate::relay::ExplainError;
use crate::server::MAX_BODY_BYTES;
use axum::{
    extract::rejection::JsonRejection,
    extract::State,
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use tracing::{debug, warn};

pub const HEALTH_MESSAGE: &str = "AI Code Explainer backend is running";

/// GET / - liveness check
pub async fn health_check() -> &'static str {
    HEALTH_MESSAGE
}

/// POST /explain - explain a code snippet
///
/// A body that is not JSON, or whose `code` is not a string, counts as a
/// request without code. A body that could not be read at all is reported as
/// such.
pub async fn explain(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ExplainRequest>, JsonRejection>,
) -> Result<Json<ExplainResponse>, ExplainError> {
    let req = match body {
        Ok(Json(req)) => req,
        Err(JsonRejection::BytesRejection(rejection)) => {
            warn!("Failed to read /explain body: {}", rejection);
            return Err(if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                ExplainError::PayloadTooLarge {
                    limit: MAX_BODY_BYTES,
                }
            } else {
                ExplainError::UnreadableBody(rejection.body_text())
            });
        }
        Err(rejection) => {
            debug!("Rejected /explain body: {}", rejection);
            ExplainRequest::default()
        }
    };

    let explanation = state.relay.explain(req.code.as_deref()).await?;
    Ok(Json(ExplainResponse { explanation }))
}
