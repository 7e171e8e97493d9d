//! API state.
//!
//! Built once at startup and shared immutably by every request handler.

use crate::catalog_cache::CatalogCache;
use crate::config::GenerationParams;
use crate::llm_client::ChatProvider;
use crate::model_resolver::ModelResolver;
use crate::relay::ExplanationRelay;
use std::sync::Arc;
use std::time::Duration;

pub struct AppState {
    pub relay: ExplanationRelay,
}

impl AppState {
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        preferred_models: Vec<String>,
        catalog_ttl: Duration,
    ) -> Self {
        let resolver = ModelResolver::with_cache(
            provider.clone(),
            preferred_models,
            CatalogCache::new(catalog_ttl),
        );
        Self {
            relay: ExplanationRelay::new(provider, resolver, GenerationParams::default()),
        }
    }
}
