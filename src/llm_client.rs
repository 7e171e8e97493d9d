//! Groq LLM Client
//!
//! Thin client for Groq's OpenAI-compatible API. Only the two operations the
//! relay needs are exposed: listing available models and creating a chat
//! completion. The [`ChatProvider`] trait is the seam the relay depends on, so
//! the HTTP surface can be exercised against a stub provider.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Default Groq API base URL (OpenAI-compatible surface)
pub const DEFAULT_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Provider client configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_base: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Request to Groq failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Groq API error ({status}): {body}")]
    Status { status: StatusCode, body: String },

    #[error("Malformed response from Groq: {0}")]
    Decode(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: &str) -> Self {
        Self {
            role: "system".to_string(),
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: "user".to_string(),
            content: content.to_string(),
        }
    }
}

/// A chat completion request as sent to `/chat/completions`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatResponse {
    /// Text of the first choice, if the provider returned any
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.as_ref())
            .and_then(|m| m.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ModelList {
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}

/// The two upstream operations the relay depends on
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Model identifiers currently offered, in provider order
    async fn list_models(&self) -> Result<Vec<String>, ProviderError>;

    /// Create a chat completion
    async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError>;
}

/// Groq API client
pub struct GroqClient {
    client: Client,
    config: LlmConfig,
}

impl GroqClient {
    pub fn new(config: LlmConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.api_base.trim_end_matches('/'), path)
    }

    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(ProviderError::Status { status, body })
    }
}

#[async_trait]
impl ChatProvider for GroqClient {
    async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let resp = self
            .client
            .get(self.url("models"))
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;
        let resp = Self::check_status(resp).await?;

        let list: ModelList = resp
            .json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))?;

        Ok(list.data.into_iter().map(|m| m.id).collect())
    }

    async fn chat_completion(&self, request: ChatRequest) -> Result<ChatResponse, ProviderError> {
        debug!(
            "Calling Groq: model={} messages={}",
            request.model,
            request.messages.len()
        );

        let resp = self
            .client
            .post(self.url("chat/completions"))
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?;
        let resp = Self::check_status(resp).await?;

        resp.json()
            .await
            .map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> GroqClient {
        GroqClient::new(LlmConfig {
            api_base: server.base_url(),
            api_key: "test-key".to_string(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    #[tokio::test]
    async fn test_list_models_preserves_order() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/models")
                .header("authorization", "Bearer test-key");
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"object":"list","data":[{"id":"b","object":"model"},{"id":"a","object":"model"}]}"#);
        });

        let models = client_for(&server).list_models().await.unwrap();
        mock.assert();
        assert_eq!(models, vec!["b".to_string(), "a".to_string()]);
    }

    #[tokio::test]
    async fn test_list_models_auth_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/models");
            then.status(401).body("invalid api key");
        });

        let err = client_for(&server).list_models().await.unwrap_err();
        assert!(matches!(err, ProviderError::Status { status, .. } if status == StatusCode::UNAUTHORIZED));
        assert!(err.to_string().contains("invalid api key"));
    }

    #[tokio::test]
    async fn test_list_models_invalid_json() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/models");
            then.status(200)
                .header("content-type", "application/json")
                .body("not valid json");
        });

        let err = client_for(&server).list_models().await.unwrap_err();
        assert!(matches!(err, ProviderError::Decode(_)));
    }

    #[tokio::test]
    async fn test_list_models_connection_error() {
        let client = GroqClient::new(LlmConfig {
            api_base: "http://127.0.0.1:65534".to_string(),
            api_key: String::new(),
            timeout_secs: 2,
        })
        .unwrap();

        let err = client.list_models().await.unwrap_err();
        assert!(matches!(err, ProviderError::Transport(_)));
    }

    #[tokio::test]
    async fn test_chat_completion_sends_generation_params() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer test-key")
                .json_body_partial(r#"{"model":"m","max_tokens":1200}"#);
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"hello"}}]}"#);
        });

        let resp = client_for(&server)
            .chat_completion(ChatRequest {
                model: "m".to_string(),
                messages: vec![ChatMessage::system("s"), ChatMessage::user("u")],
                max_tokens: 1200,
                temperature: 0.2,
            })
            .await
            .unwrap();

        mock.assert();
        assert_eq!(resp.first_content(), Some("hello"));
    }

    #[test]
    fn test_first_content_missing() {
        let resp: ChatResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert_eq!(resp.first_content(), None);

        let resp: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#)
                .unwrap();
        assert_eq!(resp.first_content(), None);
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let client = GroqClient::new(LlmConfig {
            api_base: format!("{}/", DEFAULT_API_BASE),
            api_key: String::new(),
            timeout_secs: 60,
        })
        .unwrap();
        assert_eq!(client.url("models"), "https://api.groq.com/openai/v1/models");
    }
}
