//! Walkable interchanges between station occurrences.
//!
//! Stations on different lines are the same interchange when they share a
//! name or stand close enough to walk between. This module measures the
//! distances and groups occurrences into transfer clusters.

mod clusters;
mod metric;

pub use clusters::{
    ClusterId, ClusterStrategy, TransferCluster, TransferClusterBuilder, TransferClusters,
    UnknownStrategy,
};
pub use metric::{EARTH_MEAN_RADIUS_M, Equirectangular, ProximityMetric};
