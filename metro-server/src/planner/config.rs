//! Search configuration for the route planner.

use crate::walkable::ClusterStrategy;

/// Configuration parameters for route search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Threshold used when a request does not name one (meters).
    pub default_threshold_m: f64,

    /// Largest threshold accepted (meters).
    /// The distance metric is only meaningful at metro scale.
    pub max_threshold_m: f64,

    /// How occurrences are grouped into interchanges.
    pub strategy: ClusterStrategy,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(default_threshold_m: f64, max_threshold_m: f64, strategy: ClusterStrategy) -> Self {
        Self {
            default_threshold_m,
            max_threshold_m,
            strategy,
        }
    }

    /// Returns true if `threshold_m` is usable with this configuration.
    pub fn accepts_threshold(&self, threshold_m: f64) -> bool {
        threshold_m.is_finite() && threshold_m >= 0.0 && threshold_m <= self.max_threshold_m
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_threshold_m: 300.0,
            max_threshold_m: 5_000.0,
            strategy: ClusterStrategy::Transitive,
        }
    }
}
