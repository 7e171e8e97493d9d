//! Model Resolver
//!
//! Picks the model used for a request: the first preferred identifier present
//! in the provider's catalog, otherwise the first catalog entry.

use crate::catalog_cache::CatalogCache;
use crate::llm_client::{ChatProvider, ProviderError};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// Default preference order, checked against the provider catalog
pub const DEFAULT_PREFERRED_MODELS: &[&str] = &[
    "groq/llama-3.1-8b-instant",
    "groq/mixtral-8x7b-32768",
    "groq/qwen/qwen3-32b",
    "groq/gemma2-9b-it",
];

pub fn default_preferences() -> Vec<String> {
    DEFAULT_PREFERRED_MODELS
        .iter()
        .map(|m| m.to_string())
        .collect()
}

/// Outcome of resolving a model for one request
#[derive(Debug)]
pub enum Resolution {
    Selected(String),
    /// Catalog was fetched but lists no models
    Empty,
    /// Catalog could not be fetched
    TransportFailure(ProviderError),
}

/// First preference contained in `catalog`, else the first catalog entry
pub fn select_model(preferences: &[String], catalog: &[String]) -> Option<String> {
    preferences
        .iter()
        .find(|p| catalog.contains(p))
        .or_else(|| catalog.first())
        .cloned()
}

pub struct ModelResolver {
    provider: Arc<dyn ChatProvider>,
    preferences: Vec<String>,
    cache: CatalogCache,
}

impl ModelResolver {
    pub fn new(provider: Arc<dyn ChatProvider>, preferences: Vec<String>) -> Self {
        Self::with_cache(provider, preferences, CatalogCache::disabled())
    }

    pub fn with_cache(
        provider: Arc<dyn ChatProvider>,
        preferences: Vec<String>,
        cache: CatalogCache,
    ) -> Self {
        Self {
            provider,
            preferences,
            cache,
        }
    }

    async fn catalog(&self) -> Result<Vec<String>, ProviderError> {
        if let Some(models) = self.cache.get() {
            debug!("Using cached model catalog ({} models)", models.len());
            return Ok(models);
        }
        let models = self.provider.list_models().await?;
        self.cache.store(&models);
        Ok(models)
    }

    pub async fn resolve(&self) -> Resolution {
        let catalog = match self.catalog().await {
            Ok(c) => c,
            Err(e) => {
                error!("Error fetching model list: {}", e);
                return Resolution::TransportFailure(e);
            }
        };

        debug!("Available models from Groq: {:?}", catalog);

        match select_model(&self.preferences, &catalog) {
            Some(model) => {
                if !self.preferences.contains(&model) {
                    info!("No preferred model available, falling back to {}", model);
                }
                Resolution::Selected(model)
            }
            None => {
                warn!("Groq returned an empty model catalog");
                Resolution::Empty
            }
        }
    }
}
