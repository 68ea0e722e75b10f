//! Application state for the web layer.

use std::sync::Arc;

use crate::cache::{CacheConfig, ClusterCache};
use crate::domain::StationCatalog;
use crate::planner::SearchConfig;
use crate::stations::StationNames;

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// The loaded catalog, never modified after startup
    pub catalog: Arc<StationCatalog>,

    /// Cluster partitions by threshold
    pub clusters: Arc<ClusterCache>,

    /// Station name lookup for autocomplete
    pub names: Arc<StationNames>,

    /// Route planner configuration
    pub config: Arc<SearchConfig>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(catalog: StationCatalog, cache_config: &CacheConfig, config: SearchConfig) -> Self {
        let names = StationNames::from_catalog(&catalog);
        Self {
            catalog: Arc::new(catalog),
            clusters: Arc::new(ClusterCache::new(cache_config)),
            names: Arc::new(names),
            config: Arc::new(config),
        }
    }
}
