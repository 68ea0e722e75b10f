//! Caching layer for transfer cluster partitions.
//!
//! Building clusters compares every pair of occurrences, which dominates
//! the cost of a query on a large catalog. Partitions only depend on the
//! catalog, the threshold and the strategy, so they are cached under that
//! key and shared between requests.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache as MokaCache;
use tracing::debug;

use crate::domain::StationCatalog;
use crate::planner::ClusterProvider;
use crate::walkable::{ClusterStrategy, TransferClusterBuilder, TransferClusters};

/// Cache key: (catalog version, threshold bit pattern, strategy).
type PartitionKey = (u64, u64, ClusterStrategy);

/// Configuration for the cache.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached partitions.
    pub max_capacity: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(60 * 60),
            max_capacity: 64,
        }
    }
}

/// Cache of cluster partitions, shareable across threads.
pub struct ClusterCache {
    partitions: MokaCache<PartitionKey, Arc<TransferClusters>>,
}

impl ClusterCache {
    /// Create a new cache with the given configuration.
    pub fn new(config: &CacheConfig) -> Self {
        let partitions = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { partitions }
    }

    fn key(catalog: &StationCatalog, threshold_m: f64, strategy: ClusterStrategy) -> PartitionKey {
        // -0.0 and 0.0 build the same partition
        let threshold_m = if threshold_m == 0.0 { 0.0 } else { threshold_m };
        (catalog.version(), threshold_m.to_bits(), strategy)
    }

    /// Number of cached partitions (approximate until pending work runs).
    pub fn entry_count(&self) -> u64 {
        self.partitions.entry_count()
    }
}

impl ClusterProvider for ClusterCache {
    fn clusters(
        &self,
        catalog: &StationCatalog,
        threshold_m: f64,
        strategy: ClusterStrategy,
    ) -> Arc<TransferClusters> {
        let key = Self::key(catalog, threshold_m, strategy);

        self.partitions.get_with(key, || {
            debug!(threshold_m, %strategy, cached = self.entry_count(), "Cluster cache miss");
            Arc::new(TransferClusterBuilder::new(catalog).build(threshold_m, strategy))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{FreshClusters, Planner, SearchConfig};
    use crate::test_support::named_catalog;

    #[test]
    fn default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(3600));
        assert_eq!(config.max_capacity, 64);
    }

    #[test]
    fn cache_creation() {
        let cache = ClusterCache::new(&CacheConfig::default());
        assert_eq!(cache.entry_count(), 0);
    }

    #[test]
    fn repeated_lookup_shares_partition() {
        let catalog = named_catalog(&[("A", &["a", "b"]), ("B", &["b", "c"])]);
        let cache = ClusterCache::new(&CacheConfig::default());

        let first = cache.clusters(&catalog, 300.0, ClusterStrategy::Transitive);
        let second = cache.clusters(&catalog, 300.0, ClusterStrategy::Transitive);
        assert!(Arc::ptr_eq(&first, &second));

        let negative_zero = cache.clusters(&catalog, -0.0, ClusterStrategy::Transitive);
        let zero = cache.clusters(&catalog, 0.0, ClusterStrategy::Transitive);
        assert!(Arc::ptr_eq(&negative_zero, &zero));
    }

    #[test]
    fn key_separates_threshold_strategy_and_catalog() {
        let catalog = named_catalog(&[("A", &["a", "b"])]);
        let other = named_catalog(&[("A", &["a", "b"])]);
        let cache = ClusterCache::new(&CacheConfig::default());

        let base = cache.clusters(&catalog, 300.0, ClusterStrategy::Transitive);

        let threshold = cache.clusters(&catalog, 301.0, ClusterStrategy::Transitive);
        assert!(!Arc::ptr_eq(&base, &threshold));
        assert_eq!(threshold.threshold_m(), 301.0);

        let strategy = cache.clusters(&catalog, 300.0, ClusterStrategy::Seeded);
        assert!(!Arc::ptr_eq(&base, &strategy));
        assert_eq!(strategy.strategy(), ClusterStrategy::Seeded);

        let catalog_b = cache.clusters(&other, 300.0, ClusterStrategy::Transitive);
        assert!(!Arc::ptr_eq(&base, &catalog_b));
    }

    #[test]
    fn cached_planner_matches_fresh_planner() {
        let catalog = named_catalog(&[
            ("A", &["start", "p", "m", "q"]),
            ("B", &["p", "n", "q", "end"]),
        ]);
        let config = SearchConfig::default();
        let cache = ClusterCache::new(&CacheConfig::default());

        let fresh = Planner::new(&catalog, &FreshClusters, &config);
        let cached = Planner::new(&catalog, &cache, &config);

        for _ in 0..2 {
            assert_eq!(
                cached.find_all("start", "end", 300.0),
                fresh.find_all("start", "end", 300.0)
            );
        }
    }
}
