//! Transfer clusters: which station occurrences form one interchange.

use std::fmt;
use std::str::FromStr;

use petgraph::unionfind::UnionFind;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::{StationCatalog, StationOccurrence};

use super::metric::{Equirectangular, ProximityMetric};

/// How occurrences are grouped into clusters.
///
/// Two occurrences are *linked* when they share a name or lie strictly
/// closer than the threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClusterStrategy {
    /// Each unassigned occurrence, in catalog order, seeds a cluster and
    /// absorbs every later unassigned occurrence linked to the seed itself.
    /// Links between non-seed members are ignored, so a chain A–B–C with
    /// A and C unlinked may or may not end up together depending on which
    /// of them comes first in the catalog.
    Seeded,

    /// Connected components of the link relation. A chain A–B–C is always
    /// one cluster, regardless of order.
    #[default]
    Transitive,
}

impl ClusterStrategy {
    /// Lowercase name, as accepted by `FromStr`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ClusterStrategy::Seeded => "seeded",
            ClusterStrategy::Transitive => "transitive",
        }
    }
}

impl fmt::Display for ClusterStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown strategy name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown clustering strategy: {0} (expected 'seeded' or 'transitive')")]
pub struct UnknownStrategy(String);

impl FromStr for ClusterStrategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "seeded" => Ok(ClusterStrategy::Seeded),
            "transitive" => Ok(ClusterStrategy::Transitive),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

/// Position of a cluster within its [`TransferClusters`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClusterId(pub usize);

/// Occurrences treated as a single physical interchange.
#[derive(Debug, Clone)]
pub struct TransferCluster {
    id: ClusterId,
    members: Vec<StationOccurrence>,
}

impl TransferCluster {
    pub fn id(&self) -> ClusterId {
        self.id
    }

    /// Members in catalog order.
    pub fn members(&self) -> &[StationOccurrence] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

/// A partition of every occurrence of a catalog into clusters, at one
/// threshold.
///
/// # Invariants
///
/// - Every occurrence of the catalog is in exactly one cluster
/// - Cluster ids are dense and ordered by each cluster's first member
#[derive(Debug, Clone)]
pub struct TransferClusters {
    clusters: Vec<TransferCluster>,
    /// Cluster of each occurrence, indexed by `OccurrenceId`.
    assignment: Vec<ClusterId>,
    threshold_m: f64,
    strategy: ClusterStrategy,
}

impl TransferClusters {
    /// The cluster an occurrence belongs to.
    pub fn cluster_of(&self, occ: StationOccurrence) -> ClusterId {
        self.assignment[occ.id.0]
    }

    /// Looks up a cluster by id.
    pub fn get(&self, id: ClusterId) -> &TransferCluster {
        &self.clusters[id.0]
    }

    /// The lowest-id cluster containing an occurrence with this name.
    pub fn find_named(&self, catalog: &StationCatalog, name: &str) -> Option<ClusterId> {
        catalog
            .occurrences_named(name)
            .map(|occ| self.cluster_of(occ))
            .min()
    }

    /// All clusters in id order.
    pub fn iter(&self) -> impl Iterator<Item = &TransferCluster> {
        self.clusters.iter()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Distance threshold these clusters were built at, in meters.
    pub fn threshold_m(&self) -> f64 {
        self.threshold_m
    }

    pub fn strategy(&self) -> ClusterStrategy {
        self.strategy
    }
}

/// Builds [`TransferClusters`] for a catalog.
///
/// Every pair of occurrences may be compared, so a build costs O(n²)
/// distance evaluations in the number of occurrences.
pub struct TransferClusterBuilder<'a, M = Equirectangular> {
    catalog: &'a StationCatalog,
    metric: M,
}

impl<'a> TransferClusterBuilder<'a> {
    /// Create a builder using the equirectangular metric.
    pub fn new(catalog: &'a StationCatalog) -> Self {
        Self {
            catalog,
            metric: Equirectangular,
        }
    }
}

impl<'a, M: ProximityMetric> TransferClusterBuilder<'a, M> {
    /// Replace the distance metric.
    pub fn with_metric<N: ProximityMetric>(self, metric: N) -> TransferClusterBuilder<'a, N> {
        TransferClusterBuilder {
            catalog: self.catalog,
            metric,
        }
    }

    /// Partition every occurrence at `threshold_m` meters.
    ///
    /// A threshold of zero (or less) links occurrences by name only.
    pub fn build(&self, threshold_m: f64, strategy: ClusterStrategy) -> TransferClusters {
        let occurrences: Vec<StationOccurrence> = self.catalog.occurrences().collect();

        let groups = match strategy {
            ClusterStrategy::Seeded => self.seeded_groups(&occurrences, threshold_m),
            ClusterStrategy::Transitive => self.transitive_groups(&occurrences, threshold_m),
        };

        let mut assignment = vec![ClusterId(0); occurrences.len()];
        let clusters: Vec<TransferCluster> = groups
            .into_iter()
            .enumerate()
            .map(|(i, members)| {
                for m in &members {
                    assignment[m.id.0] = ClusterId(i);
                }
                TransferCluster {
                    id: ClusterId(i),
                    members,
                }
            })
            .collect();

        debug!(
            occurrences = occurrences.len(),
            clusters = clusters.len(),
            threshold_m,
            %strategy,
            "Built transfer clusters"
        );

        TransferClusters {
            clusters,
            assignment,
            threshold_m,
            strategy,
        }
    }

    /// Whether two occurrences denote the same interchange.
    fn linked(&self, a: StationOccurrence, b: StationOccurrence, threshold_m: f64) -> bool {
        let sa = self.catalog.station(a);
        let sb = self.catalog.station(b);
        sa.name == sb.name || self.metric.distance_meters(sa.position, sb.position) < threshold_m
    }

    fn seeded_groups(
        &self,
        occurrences: &[StationOccurrence],
        threshold_m: f64,
    ) -> Vec<Vec<StationOccurrence>> {
        let mut assigned = vec![false; occurrences.len()];
        let mut groups = Vec::new();

        for (i, &seed) in occurrences.iter().enumerate() {
            if assigned[i] {
                continue;
            }
            assigned[i] = true;

            let mut group = vec![seed];
            for (j, &other) in occurrences.iter().enumerate().skip(i + 1) {
                if !assigned[j] && self.linked(seed, other, threshold_m) {
                    assigned[j] = true;
                    group.push(other);
                }
            }
            groups.push(group);
        }

        groups
    }

    fn transitive_groups(
        &self,
        occurrences: &[StationOccurrence],
        threshold_m: f64,
    ) -> Vec<Vec<StationOccurrence>> {
        let n = occurrences.len();
        let mut uf = UnionFind::<usize>::new(n);

        for i in 0..n {
            for j in (i + 1)..n {
                // Already connected through someone else
                if uf.find_mut(i) == uf.find_mut(j) {
                    continue;
                }
                if self.linked(occurrences[i], occurrences[j], threshold_m) {
                    uf.union(i, j);
                }
            }
        }

        // Number groups by their first member so ids follow catalog order
        let mut group_of_root: Vec<Option<usize>> = vec![None; n];
        let mut groups: Vec<Vec<StationOccurrence>> = Vec::new();

        for (i, &occ) in occurrences.iter().enumerate() {
            let root = uf.find_mut(i);
            let g = *group_of_root[root].get_or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[g].push(occ);
        }

        groups
    }
}
