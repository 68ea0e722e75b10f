//! Minimum-transfer route planner.
//!
//! This module answers: "how do I get from this station to that one while
//! changing lines as few times as possible?"
//!
//! Stations are grouped into transfer clusters first. A ride along a line
//! moves between clusters for free; leaving a cluster on a different line
//! than the one ridden in costs one transfer.

mod adjacency;
mod batch;
mod bfs;
mod config;
mod rank;
mod search;
mod trail;


pub use adjacency::{LineAdjacency, Neighbors};
pub use batch::PairRoutes;
pub use config::SearchConfig;
pub use rank::{deduplicate, rank_routes};
pub use search::{
    ClusterProvider, FreshClusters, Planner, SearchError, SearchMode, SearchRequest, SearchResult,
    UnknownMode,
};
pub use trail::PathTrail;
