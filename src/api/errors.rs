//! HTTP mapping for relay errors.

use super::types::ErrorResponse;
use crate::relay::ExplainError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

impl ExplainError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput | Self::UnreadableBody(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NoModelAvailable | Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ExplainError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ExplainError::InvalidInput.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ExplainError::NoModelAvailable.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ExplainError::Upstream("boom".to_string()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ExplainError::PayloadTooLarge { limit: 10 }.status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ExplainError::UnreadableBody("reset".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_into_response_status() {
        let resp = ExplainError::InvalidInput.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
