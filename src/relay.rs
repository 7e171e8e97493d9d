//! Explanation Relay
//!
//! One linear pipeline per request: validate, resolve a model, build the
//! prompt, call the provider, return the text. Nothing is retried.

use crate::config::GenerationParams;
use crate::llm_client::{ChatProvider, ChatRequest};
use crate::model_resolver::{ModelResolver, Resolution};
use crate::prompt::build_messages;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};

/// Returned when the provider gives no completion text
pub const NO_RESPONSE: &str = "No response";

#[derive(Debug, Error)]
pub enum ExplainError {
    #[error("No code provided")]
    InvalidInput,

    #[error("Could not get valid model from Groq")]
    NoModelAvailable,

    #[error("{0}")]
    Upstream(String),

    #[error("Request body too large (limit {limit} bytes)")]
    PayloadTooLarge { limit: usize },

    #[error("Failed to read request body: {0}")]
    UnreadableBody(String),
}

/// Blank after trimming whitespace and byte-order marks
pub fn is_blank(code: &str) -> bool {
    code.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
        .is_empty()
}

pub struct ExplanationRelay {
    provider: Arc<dyn ChatProvider>,
    resolver: ModelResolver,
    params: GenerationParams,
}

impl ExplanationRelay {
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        resolver: ModelResolver,
        params: GenerationParams,
    ) -> Self {
        Self {
            provider,
            resolver,
            params,
        }
    }

    pub async fn explain(&self, code: Option<&str>) -> Result<String, ExplainError> {
        let code = match code {
            Some(c) if !is_blank(c) => c,
            _ => return Err(ExplainError::InvalidInput),
        };

        let model = match self.resolver.resolve().await {
            Resolution::Selected(m) => m,
            Resolution::Empty => return Err(ExplainError::NoModelAvailable),
            Resolution::TransportFailure(e) => {
                error!("Model catalog unavailable: {}", e);
                return Err(ExplainError::NoModelAvailable);
            }
        };

        info!("Using model: {}", model);

        let request = ChatRequest {
            model,
            messages: build_messages(code),
            max_tokens: self.params.max_tokens,
            temperature: self.params.temperature,
        };

        let response = self.provider.chat_completion(request).await.map_err(|e| {
            error!("Error /explain: {}", e);
            ExplainError::Upstream(e.to_string())
        })?;

        Ok(response
            .first_content()
            .unwrap_or(NO_RESPONSE)
            .to_string())
    }
}
