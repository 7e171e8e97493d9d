//! Server Configuration
//!
//! Everything is read once at startup, from CLI flags or the environment
//! (a `.env` file in the working directory is loaded first by the binary).

use crate::llm_client::{LlmConfig, DEFAULT_API_BASE};
use crate::model_resolver::DEFAULT_PREFERRED_MODELS;
use clap::Parser;
use std::time::Duration;

pub const DEFAULT_ALLOWED_ORIGINS: &[&str] = &[
    "https://ai-code-explainer-716e6.web.app",
    "http://localhost:3000",
];

#[derive(Parser, Debug, Clone)]
#[command(name = "explain-server")]
#[command(about = "AI Code Explainer backend - relays code to Groq for explanations")]
pub struct ServerConfig {
    /// Server port
    #[arg(short, long, default_value = "5000", env = "PORT")]
    pub port: u16,

    /// Server host
    #[arg(long, default_value = "0.0.0.0", env = "HOST")]
    pub host: String,

    /// Groq API key
    #[arg(long, env = "GROQ_API_KEY", default_value = "", hide_env_values = true)]
    pub groq_api_key: String,

    /// Groq API base URL
    #[arg(long, env = "GROQ_API_BASE", default_value = DEFAULT_API_BASE)]
    pub groq_api_base: String,

    /// Origins allowed to call the API (comma-separated)
    #[arg(
        long,
        env = "ALLOWED_ORIGINS",
        value_delimiter = ',',
        default_values_t = DEFAULT_ALLOWED_ORIGINS.iter().map(|s| s.to_string()).collect::<Vec<_>>()
    )]
    pub allowed_origins: Vec<String>,

    /// Preferred models in priority order (comma-separated)
    #[arg(
        long,
        env = "PREFERRED_MODELS",
        value_delimiter = ',',
        default_values_t = DEFAULT_PREFERRED_MODELS.iter().map(|s| s.to_string()).collect::<Vec<_>>()
    )]
    pub preferred_models: Vec<String>,

    /// Upstream request timeout in seconds
    #[arg(long, default_value = "60", env = "LLM_TIMEOUT_SECS")]
    pub llm_timeout_secs: u64,

    /// Model catalog cache TTL in seconds (0 disables caching)
    #[arg(long, default_value = "0", env = "MODEL_CACHE_TTL_SECS")]
    pub model_cache_ttl_secs: u64,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn llm_config(&self) -> LlmConfig {
        LlmConfig {
            api_base: self.groq_api_base.clone(),
            api_key: self.groq_api_key.clone(),
            timeout_secs: self.llm_timeout_secs,
        }
    }

    pub fn model_cache_ttl(&self) -> Duration {
        Duration::from_secs(self.model_cache_ttl_secs)
    }
}

/// Fixed generation parameters for explanation requests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            max_tokens: 1200,
            temperature: 0.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::try_parse_from(["explain-server"]).unwrap();
        assert_eq!(config.port, 5000);
        assert_eq!(config.groq_api_base, DEFAULT_API_BASE);
        assert_eq!(config.allowed_origins.len(), 2);
        assert_eq!(config.preferred_models[0], "groq/llama-3.1-8b-instant");
        assert_eq!(config.preferred_models.len(), 4);
        assert_eq!(config.model_cache_ttl(), Duration::ZERO);
    }

    #[test]
    fn test_comma_separated_lists() {
        let config = ServerConfig::try_parse_from([
            "explain-server",
            "--port",
            "8080",
            "--allowed-origins",
            "http://a.test,http://b.test",
            "--preferred-models",
            "llama-3.1-8b-instant",
        ])
        .unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.allowed_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.preferred_models, vec!["llama-3.1-8b-instant"]);
    }

    #[test]
    fn test_llm_config() {
        let config = ServerConfig::try_parse_from([
            "explain-server",
            "--groq-api-key",
            "gsk_test",
            "--llm-timeout-secs",
            "10",
        ])
        .unwrap();
        let llm = config.llm_config();
        assert_eq!(llm.api_key, "gsk_test");
        assert_eq!(llm.timeout_secs, 10);
    }

    #[test]
    fn test_generation_params() {
        let params = GenerationParams::default();
        assert_eq!(params.max_tokens, 1200);
        assert_eq!(params.temperature, 0.2);
    }
}
