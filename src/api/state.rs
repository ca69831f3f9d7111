use std::sync::Arc;

use crate::engine::cache::StandingsCache;
use crate::storage::StorageConfig;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<StorageConfig>,
    pub standings_cache: Arc<StandingsCache>,
}

impl AppState {
    pub fn new(storage: StorageConfig) -> Self {
        Self::with_cache(storage, StandingsCache::default())
    }

    pub fn with_cache(storage: StorageConfig, cache: StandingsCache) -> Self {
        Self {
            storage: Arc::new(storage),
            standings_cache: Arc::new(cache),
        }
    }
}
