//! Route search between every pair of a set of stations.

use rayon::prelude::*;
use tracing::debug;

use crate::domain::Route;

use super::search::{ClusterProvider, Planner, SearchError};

/// Outcome for one unordered pair of the selection.
#[derive(Debug, Clone)]
pub struct PairRoutes {
    pub from: String,
    pub to: String,
    pub outcome: Result<Vec<Route>, SearchError>,
}

impl<P: ClusterProvider + Sync> Planner<'_, P> {
    /// Every minimum-transfer route for each pair `(i, j)`, `i < j`, of
    /// `stations`, in selection order.
    ///
    /// Repeated names are dropped after their first appearance. A failed
    /// pair carries its error and does not affect the others. Pairs share
    /// one cluster partition and are searched in parallel.
    ///
    /// # Errors
    ///
    /// Returns `Err` only when the threshold itself is invalid.
    pub fn find_all_pairs(
        &self,
        stations: &[String],
        threshold_m: f64,
    ) -> Result<Vec<PairRoutes>, SearchError> {
        let mut names: Vec<&str> = Vec::with_capacity(stations.len());
        for name in stations {
            if !names.contains(&name.as_str()) {
                names.push(name.as_str());
            }
        }

        let clusters = self.clusters_at(threshold_m)?;

        let pairs: Vec<(usize, usize)> = (0..names.len())
            .flat_map(|i| ((i + 1)..names.len()).map(move |j| (i, j)))
            .collect();

        let results: Vec<PairRoutes> = pairs
            .par_iter()
            .map(|&(i, j)| PairRoutes {
                from: names[i].to_string(),
                to: names[j].to_string(),
                outcome: self.find_all_in(&clusters, names[i], names[j]),
            })
            .collect();

        debug!(
            stations = names.len(),
            pairs = results.len(),
            failed = results.iter().filter(|r| r.outcome.is_err()).count(),
            "Batch search complete"
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::{FreshClusters, SearchConfig};
    use crate::test_support::named_catalog;

    fn owned(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn pairs_in_selection_order() {
        let catalog = named_catalog(&[("A", &["a", "b", "c", "d"])]);
        let config = SearchConfig::default();
        let planner = Planner::new(&catalog, &FreshClusters, &config);

        let results = planner
            .find_all_pairs(&owned(&["c", "a", "d"]), 300.0)
            .unwrap();

        let pairs: Vec<_> = results
            .iter()
            .map(|r| (r.from.as_str(), r.to.as_str()))
            .collect();
        assert_eq!(pairs, vec![("c", "a"), ("c", "d"), ("a", "d")]);
        assert!(results.iter().all(|r| r.outcome.is_ok()));
    }

    #[test]
    fn failures_do_not_stop_the_batch() {
        let catalog = named_catalog(&[("A", &["a", "b"]), ("B", &["x", "y"])]);
        let config = SearchConfig::default();
        let planner = Planner::new(&catalog, &FreshClusters, &config);

        let results = planner
            .find_all_pairs(&owned(&["a", "b", "x", "Nowhere"]), 300.0)
            .unwrap();

        // C(4, 2)
        assert_eq!(results.len(), 6);

        assert!(results[0].outcome.is_ok());
        assert_eq!(results[1].outcome, Err(SearchError::NoRouteFound));
        assert_eq!(
            results[2].outcome,
            Err(SearchError::StationNotFound {
                from_found: true,
                to_found: false
            })
        );
    }

    #[test]
    fn duplicate_names_ignored() {
        let catalog = named_catalog(&[("A", &["a", "b"])]);
        let config = SearchConfig::default();
        let planner = Planner::new(&catalog, &FreshClusters, &config);

        let results = planner
            .find_all_pairs(&owned(&["a", "b", "a"]), 300.0)
            .unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn fewer_than_two_stations() {
        let catalog = named_catalog(&[("A", &["a", "b"])]);
        let config = SearchConfig::default();
        let planner = Planner::new(&catalog, &FreshClusters, &config);

        assert!(planner.find_all_pairs(&owned(&["a"]), 300.0).unwrap().is_empty());
        assert!(planner.find_all_pairs(&[], 300.0).unwrap().is_empty());
    }

    #[test]
    fn invalid_threshold_fails_whole_batch() {
        let catalog = named_catalog(&[("A", &["a", "b"])]);
        let config = SearchConfig::default();
        let planner = Planner::new(&catalog, &FreshClusters, &config);

        let err = planner
            .find_all_pairs(&owned(&["a", "b"]), -5.0)
            .unwrap_err();
        assert_eq!(err, SearchError::InvalidThreshold(-5.0));
    }
}
