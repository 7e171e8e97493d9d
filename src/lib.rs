//! AI Code Explainer backend
//!
//! A small HTTP relay that keeps the Groq API key off the browser. Clients
//! POST a code snippet to `/explain`; the server picks an available model,
//! wraps the code in a fixed teaching prompt and returns the completion.
//!
//! ## Module Structure
//!
//! - `config`: CLI/environment configuration and generation parameters
//! - `llm_client`: Groq client and the `ChatProvider` seam
//! - `catalog_cache`: optional TTL cache for the model catalog
//! - `model_resolver`: model selection with preference fallback
//! - `prompt`: system/user prompt construction
//! - `relay`: the explain pipeline and its error type
//! - `api`: axum handlers, request/response bodies, shared state
//! - `server`: router assembly, CORS and startup

pub mod api;
pub mod catalog_cache;
pub mod config;
pub mod llm_client;
pub mod model_resolver;
pub mod prompt;
pub mod relay;
pub mod server;

pub use api::AppState;
pub use config::{GenerationParams, ServerConfig};
pub use llm_client::{
    ChatMessage, ChatProvider, ChatRequest, ChatResponse, GroqClient, ProviderError,
};
pub use model_resolver::{select_model, ModelResolver, Resolution};
pub use relay::{ExplainError, ExplanationRelay};
pub use server::{build_router, run_server};
