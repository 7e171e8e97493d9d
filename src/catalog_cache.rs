//! Model Catalog Cache
//!
//! Optional time-bounded cache of the provider's model list. With a zero TTL
//! the cache never holds anything and every request re-fetches the catalog.

use parking_lot::RwLock;
use std::time::{Duration, Instant};

struct Snapshot {
    models: Vec<String>,
    fetched_at: Instant,
}

pub struct CatalogCache {
    ttl: Duration,
    snapshot: RwLock<Option<Snapshot>>,
}

impl CatalogCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            snapshot: RwLock::new(None),
        }
    }

    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }

    pub fn is_enabled(&self) -> bool {
        !self.ttl.is_zero()
    }

    /// Cached catalog if it is still fresh
    pub fn get(&self) -> Option<Vec<String>> {
        if !self.is_enabled() {
            return None;
        }
        let snapshot = self.snapshot.read();
        match &*snapshot {
            Some(s) if s.fetched_at.elapsed() < self.ttl => Some(s.models.clone()),
            _ => None,
        }
    }

    /// Store a freshly fetched catalog. Empty catalogs are not kept.
    pub fn store(&self, models: &[String]) {
        if !self.is_enabled() || models.is_empty() {
            return;
        }
        *self.snapshot.write() = Some(Snapshot {
            models: models.to_vec(),
            fetched_at: Instant::now(),
        });
    }
}
