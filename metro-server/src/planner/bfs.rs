//! Branch-and-bound search for every minimum-transfer route.
//!
//! Unlike the single-route search there is no global visited set. Each
//! branch remembers the clusters it has passed through, so two branches
//! may reach the same cluster by different lines and both survive. A shared
//! best transfer count prunes branches that can no longer tie.

use std::cmp::Ordering;
use std::collections::{HashSet, VecDeque};

use tracing::{debug, trace};

use crate::domain::Route;
use crate::walkable::{ClusterId, TransferClusters};

use super::adjacency::LineAdjacency;
use super::search::{Endpoints, Record, hops_from};

/// A frontier record together with the clusters on its path.
#[derive(Debug, Clone)]
struct Branch {
    record: Record,
    visited: HashSet<ClusterId>,
}

/// Every route from `ends.from` to `ends.to` that visits no cluster twice
/// and has the fewest transfers, in discovery order.
///
/// `bound` must be at least the true minimum; the single-route optimum is
/// the tightest such bound and lets the search discard hopeless branches
/// from the start. Routes cheaper than `bound` still replace the result
/// set, so a loose bound only costs time.
pub(super) fn all_minimum_routes(
    adjacency: LineAdjacency<'_>,
    clusters: &TransferClusters,
    ends: Endpoints,
    bound: usize,
) -> Vec<Route> {
    let mut best = bound;
    let mut found = Vec::new();
    let mut explored = 0usize;

    let mut queue = VecDeque::new();
    queue.push_back(Branch {
        record: Record::origin(ends.from),
        visited: HashSet::from([ends.from]),
    });

    while let Some(branch) = queue.pop_front() {
        // The bound may have dropped since this branch was queued
        if branch.record.transfers > best {
            continue;
        }
        explored += 1;

        if branch.record.cluster == ends.to {
            let Some(route) = branch.record.to_route() else {
                continue;
            };
            match branch.record.transfers.cmp(&best) {
                Ordering::Less => {
                    best = branch.record.transfers;
                    found.clear();
                    found.push(route);
                }
                Ordering::Equal => found.push(route),
                Ordering::Greater => {}
            }
            continue;
        }

        for hop in hops_from(adjacency, clusters, branch.record.cluster) {
            if branch.visited.contains(&hop.cluster) {
                continue;
            }

            let record = branch.record.extend(hop);
            if record.transfers > best {
                trace!(cluster = hop.cluster.0, "Pruned branch over bound");
                continue;
            }

            let mut visited = branch.visited.clone();
            visited.insert(hop.cluster);
            queue.push_back(Branch { record, visited });
        }
    }

    debug!(explored, routes = found.len(), transfers = best, "Enumerated routes");
    found
}
