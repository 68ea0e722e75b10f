//! Minimum-transfer route search.
//!
//! Finds routes between two named stations that change lines as few times
//! as possible, exploring the transfer clusters reachable along lines.

use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::domain::{LineId, PathStep, Route, StationCatalog, StationOccurrence};
use crate::walkable::{ClusterId, ClusterStrategy, TransferClusterBuilder, TransferClusters};

use super::adjacency::LineAdjacency;
use super::bfs::all_minimum_routes;
use super::config::SearchConfig;
use super::rank::{deduplicate, rank_routes};
use super::trail::PathTrail;

/// Error from route search.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SearchError {
    /// One or both station names are not in the catalog
    #[error("station not found (from found: {from_found}, to found: {to_found})")]
    StationNotFound { from_found: bool, to_found: bool },

    /// Both stations exist but no sequence of lines connects them
    #[error("no route found")]
    NoRouteFound,

    /// Threshold is negative, non-finite or above the configured maximum
    #[error("invalid threshold: {0} meters")]
    InvalidThreshold(f64),
}

/// Whether to return one route or every minimum-transfer route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchMode {
    #[default]
    #[serde(rename = "one")]
    Single,
    #[serde(rename = "all")]
    AllMinimum,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Single => "one",
            SearchMode::AllMinimum => "all",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown search mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search mode: {0} (expected 'one' or 'all')")]
pub struct UnknownMode(String);

impl FromStr for SearchMode {
    type Err = UnknownMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "one" => Ok(SearchMode::Single),
            "all" => Ok(SearchMode::AllMinimum),
            _ => Err(UnknownMode(s.to_string())),
        }
    }
}

/// Request for route search.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Origin station name.
    pub from: String,

    /// Destination station name.
    pub to: String,

    /// Clustering threshold in meters; the configured default when absent.
    pub threshold_m: Option<f64>,

    pub mode: SearchMode,
}

impl SearchRequest {
    /// Create a new search request.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            threshold_m: None,
            mode: SearchMode::Single,
        }
    }

    pub fn with_threshold(mut self, threshold_m: f64) -> Self {
        self.threshold_m = Some(threshold_m);
        self
    }

    pub fn with_mode(mut self, mode: SearchMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Result of route search.
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Found routes, shortest first. Never empty.
    pub routes: Vec<Route>,

    /// Transfer count shared by every route.
    pub transfers: usize,

    /// Threshold the search ran at.
    pub threshold_m: f64,
}

/// Supplies transfer clusters for a catalog at a threshold.
///
/// This abstraction lets the planner either rebuild clusters per call or
/// reuse a cached partition.
pub trait ClusterProvider {
    fn clusters(
        &self,
        catalog: &StationCatalog,
        threshold_m: f64,
        strategy: ClusterStrategy,
    ) -> Arc<TransferClusters>;
}

/// Builds a fresh partition on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct FreshClusters;

impl ClusterProvider for FreshClusters {
    fn clusters(
        &self,
        catalog: &StationCatalog,
        threshold_m: f64,
        strategy: ClusterStrategy,
    ) -> Arc<TransferClusters> {
        Arc::new(TransferClusterBuilder::new(catalog).build(threshold_m, strategy))
    }
}

/// Origin and destination clusters of a query.
#[derive(Debug, Clone, Copy)]
pub(super) struct Endpoints {
    pub from: ClusterId,
    pub to: ClusterId,
}

/// A ride along a line from an occurrence in one cluster to the adjacent
/// occurrence, which lies in another cluster.
#[derive(Debug, Clone, Copy)]
pub(super) struct Hop {
    pub departure: StationOccurrence,
    pub arrival: StationOccurrence,
    pub cluster: ClusterId,
}

/// Every hop leaving `cluster`, in member order, predecessor before
/// successor.
pub(super) fn hops_from(
    adjacency: LineAdjacency<'_>,
    clusters: &TransferClusters,
    cluster: ClusterId,
) -> Vec<Hop> {
    let mut hops = Vec::new();
    for &departure in clusters.get(cluster).members() {
        for arrival in adjacency.neighbors(departure).iter() {
            let next = clusters.cluster_of(arrival);
            if next != cluster {
                hops.push(Hop {
                    departure,
                    arrival,
                    cluster: next,
                });
            }
        }
    }
    hops
}

/// Search frontier record. Records are never mutated; children are built
/// from their parent.
#[derive(Debug, Clone)]
pub(super) struct Record {
    pub cluster: ClusterId,
    /// Line ridden into this cluster; `None` at the origin.
    pub line: Option<LineId>,
    pub transfers: usize,
    pub trail: PathTrail,
}

impl Record {
    pub fn origin(cluster: ClusterId) -> Self {
        Self {
            cluster,
            line: None,
            transfers: 0,
            trail: PathTrail::new(),
        }
    }

    /// The record reached by taking `hop` from here.
    ///
    /// Leaving on a different line than the one ridden in costs a transfer.
    /// When the departure is not where the trail ends, the change of
    /// platform within the cluster is recorded as its own step.
    pub fn extend(&self, hop: Hop) -> Self {
        let changes_line = self.line.is_some_and(|l| l != hop.departure.line);

        let mut trail = self.trail.clone();
        if trail.last().map(|s| s.occurrence) != Some(hop.departure) {
            trail = trail.push(PathStep::new(hop.departure));
        }

        Self {
            cluster: hop.cluster,
            line: Some(hop.departure.line),
            transfers: self.transfers + usize::from(changes_line),
            trail: trail.push(PathStep::new(hop.arrival)),
        }
    }

    pub fn to_route(&self) -> Option<Route> {
        Route::new(self.trail.to_vec()).ok()
    }
}

/// Route planner over a station catalog.
pub struct Planner<'a, P: ClusterProvider> {
    catalog: &'a StationCatalog,
    provider: &'a P,
    config: &'a SearchConfig,
}

impl<'a, P: ClusterProvider> Planner<'a, P> {
    /// Create a new planner.
    pub fn new(catalog: &'a StationCatalog, provider: &'a P, config: &'a SearchConfig) -> Self {
        Self {
            catalog,
            provider,
            config,
        }
    }

    /// Run a search in the requested mode.
    pub fn search(&self, request: &SearchRequest) -> Result<SearchResult, SearchError> {
        let threshold_m = request
            .threshold_m
            .unwrap_or(self.config.default_threshold_m);

        let routes = match request.mode {
            SearchMode::Single => vec![self.find_one(&request.from, &request.to, threshold_m)?],
            SearchMode::AllMinimum => self.find_all(&request.from, &request.to, threshold_m)?,
        };

        let transfers = routes.first().map_or(0, Route::transfers);
        debug!(
            from = %request.from,
            to = %request.to,
            threshold_m,
            mode = %request.mode,
            routes = routes.len(),
            transfers,
            "Search complete"
        );

        Ok(SearchResult {
            routes,
            transfers,
            threshold_m,
        })
    }

    /// One route with the fewest transfers.
    ///
    /// A direct ride on a line serving both stations always wins, even
    /// when a route through a transfer would visit fewer stations.
    pub fn find_one(&self, from: &str, to: &str, threshold_m: f64) -> Result<Route, SearchError> {
        let clusters = self.clusters_at(threshold_m)?;
        self.find_one_in(&clusters, from, to)
    }

    /// Every route with the fewest transfers, shortest first.
    pub fn find_all(
        &self,
        from: &str,
        to: &str,
        threshold_m: f64,
    ) -> Result<Vec<Route>, SearchError> {
        let clusters = self.clusters_at(threshold_m)?;
        self.find_all_in(&clusters, from, to)
    }

    pub(super) fn clusters_at(&self, threshold_m: f64) -> Result<Arc<TransferClusters>, SearchError> {
        if !self.config.accepts_threshold(threshold_m) {
            return Err(SearchError::InvalidThreshold(threshold_m));
        }
        Ok(self
            .provider
            .clusters(self.catalog, threshold_m, self.config.strategy))
    }

    pub(super) fn find_one_in(
        &self,
        clusters: &TransferClusters,
        from: &str,
        to: &str,
    ) -> Result<Route, SearchError> {
        let ends = self.resolve(clusters, from, to)?;

        if let Some(route) = self.direct_routes(from, to).into_iter().min_by_key(Route::len) {
            return Ok(route);
        }
        if ends.from == ends.to {
            return self.stay(clusters, ends.from, from);
        }

        self.fewest_transfers(clusters, ends)
            .ok_or(SearchError::NoRouteFound)
    }

    pub(super) fn find_all_in(
        &self,
        clusters: &TransferClusters,
        from: &str,
        to: &str,
    ) -> Result<Vec<Route>, SearchError> {
        let ends = self.resolve(clusters, from, to)?;

        let direct = self.direct_routes(from, to);
        if !direct.is_empty() {
            return Ok(rank_routes(deduplicate(direct)));
        }
        if ends.from == ends.to {
            return Ok(vec![self.stay(clusters, ends.from, from)?]);
        }

        let optimum = self
            .fewest_transfers(clusters, ends)
            .ok_or(SearchError::NoRouteFound)?;

        let adjacency = LineAdjacency::new(self.catalog);
        let routes = all_minimum_routes(adjacency, clusters, ends, optimum.transfers());
        if routes.is_empty() {
            return Ok(vec![optimum]);
        }

        Ok(rank_routes(deduplicate(routes)))
    }

    fn resolve(
        &self,
        clusters: &TransferClusters,
        from: &str,
        to: &str,
    ) -> Result<Endpoints, SearchError> {
        match (
            clusters.find_named(self.catalog, from),
            clusters.find_named(self.catalog, to),
        ) {
            (Some(from), Some(to)) => Ok(Endpoints { from, to }),
            (from, to) => Err(SearchError::StationNotFound {
                from_found: from.is_some(),
                to_found: to.is_some(),
            }),
        }
    }

    /// Zero-transfer routes along a single line, one per pair of
    /// occurrences named `from` and `to` that share a line, oriented from
    /// `from` to `to`. Asking for a station to itself yields the single
    /// first occurrence.
    fn direct_routes(&self, from: &str, to: &str) -> Vec<Route> {
        if from == to {
            return self
                .catalog
                .occurrences_named(from)
                .next()
                .and_then(|occ| Route::new(vec![PathStep::new(occ)]).ok())
                .into_iter()
                .collect();
        }

        let mut routes = Vec::new();
        for a in self.catalog.occurrences_named(from) {
            for b in self.catalog.occurrences_named(to) {
                if a.line != b.line {
                    continue;
                }
                if let Some(route) = self.ride(a, b) {
                    routes.push(route);
                }
            }
        }
        routes
    }

    /// The contiguous run of stations from `a` to `b` on their shared line.
    fn ride(&self, a: StationOccurrence, b: StationOccurrence) -> Option<Route> {
        let indices: Vec<usize> = if a.index <= b.index {
            (a.index..=b.index).collect()
        } else {
            (b.index..=a.index).rev().collect()
        };

        let steps = indices
            .into_iter()
            .map(|i| self.catalog.occurrence(a.line, i).map(PathStep::new))
            .collect::<Option<Vec<_>>>()?;

        Route::new(steps).ok()
    }

    /// Both names are already the same interchange.
    fn stay(
        &self,
        clusters: &TransferClusters,
        cluster: ClusterId,
        from: &str,
    ) -> Result<Route, SearchError> {
        clusters
            .get(cluster)
            .members()
            .iter()
            .find(|m| self.catalog.station(**m).name == from)
            .and_then(|&occ| Route::new(vec![PathStep::new(occ)]).ok())
            .ok_or(SearchError::NoRouteFound)
    }

    /// 0-1 breadth-first search over (cluster, line ridden in) states.
    ///
    /// Children that stay on the same line go to the front of the worklist
    /// and children that change line go to the back, so records leave the
    /// worklist in non-decreasing transfer order and the first record to
    /// reach the destination has the fewest transfers.
    fn fewest_transfers(&self, clusters: &TransferClusters, ends: Endpoints) -> Option<Route> {
        let adjacency = LineAdjacency::new(self.catalog);

        let mut best: HashMap<(ClusterId, Option<LineId>), usize> = HashMap::new();
        let mut worklist = VecDeque::new();

        best.insert((ends.from, None), 0);
        worklist.push_back(Record::origin(ends.from));

        let mut explored = 0usize;

        while let Some(record) = worklist.pop_front() {
            // Superseded by a cheaper record for the same state
            if best
                .get(&(record.cluster, record.line))
                .is_some_and(|&t| t < record.transfers)
            {
                continue;
            }
            explored += 1;

            if record.cluster == ends.to {
                debug!(explored, transfers = record.transfers, "Reached destination");
                return record.to_route();
            }

            for hop in hops_from(adjacency, clusters, record.cluster) {
                let child = record.extend(hop);
                let key = (child.cluster, child.line);

                if best.get(&key).is_some_and(|&t| t <= child.transfers) {
                    continue;
                }
                best.insert(key, child.transfers);

                trace!(
                    cluster = child.cluster.0,
                    transfers = child.transfers,
                    "Queued record"
                );

                if child.transfers == record.transfers {
                    worklist.push_front(child);
                } else {
                    worklist.push_back(child);
                }
            }
        }

        debug!(explored, "Destination unreachable");
        None
    }
}
