//! Route ranking for search results.

use std::collections::HashSet;

use crate::domain::Route;

/// Rank routes by preference.
///
/// Routes from one search share a transfer count, so they are ordered by
/// number of stations (fewer is better). Ties keep their discovery order.
pub fn rank_routes(mut routes: Vec<Route>) -> Vec<Route> {
    routes.sort_by_key(Route::len);
    routes
}

/// Drop routes that repeat an earlier route step for step.
pub fn deduplicate(routes: Vec<Route>) -> Vec<Route> {
    if routes.len() <= 1 {
        return routes;
    }

    let mut seen = HashSet::with_capacity(routes.len());
    routes
        .into_iter()
        .filter(|route| seen.insert(route.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{LineId, OccurrenceId, PathStep, StationOccurrence};

    fn route(ids: &[usize]) -> Route {
        let steps = ids
            .iter()
            .map(|&id| {
                PathStep::new(StationOccurrence {
                    id: OccurrenceId(id),
                    line: LineId(0),
                    index: id,
                })
            })
            .collect();
        Route::new(steps).unwrap()
    }

    #[test]
    fn rank_by_station_count() {
        let ranked = rank_routes(vec![route(&[0, 1, 2, 3]), route(&[5, 6]), route(&[7, 8, 9])]);
        let lens: Vec<_> = ranked.iter().map(Route::len).collect();
        assert_eq!(lens, vec![2, 3, 4]);
    }

    #[test]
    fn rank_is_stable() {
        let first = route(&[0, 1]);
        let second = route(&[2, 3]);
        let ranked = rank_routes(vec![first.clone(), second.clone()]);
        assert_eq!(ranked, vec![first, second]);
    }

    #[test]
    fn deduplicate_keeps_first_occurrence() {
        let a = route(&[0, 1]);
        let b = route(&[1, 2]);
        let deduped = deduplicate(vec![a.clone(), b.clone(), a.clone()]);
        assert_eq!(deduped, vec![a, b]);
    }

    #[test]
    fn deduplicate_empty_and_single() {
        assert!(deduplicate(vec![]).is_empty());
        assert_eq!(deduplicate(vec![route(&[0])]).len(), 1);
    }
}
