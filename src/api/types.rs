//! Request and response bodies.

use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Deserialize)]
pub struct ExplainRequest {
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub explanation: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}
