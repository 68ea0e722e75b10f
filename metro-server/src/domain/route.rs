//! Route types.
//!
//! A `Route` is the answer to a query: the ordered stations travelled
//! through, each tagged with the line it was reached on, plus the number
//! of line changes.

use super::{DomainError, LineId, StationOccurrence};

/// One entry in a route: an occurrence, travelled on its own line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PathStep {
    pub occurrence: StationOccurrence,
}

impl PathStep {
    /// Creates a step at an occurrence.
    pub fn new(occurrence: StationOccurrence) -> Self {
        Self { occurrence }
    }

    /// Line identity of this step.
    pub fn line(&self) -> LineId {
        self.occurrence.line
    }
}

/// A maximal run of consecutive steps on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSegment<'a> {
    pub line: LineId,
    /// Index of the first step of this segment within the route.
    pub start: usize,
    pub steps: &'a [PathStep],
}

/// A complete route between two stations.
///
/// # Invariants
///
/// - At least one step
/// - `transfers` equals the number of adjacent step pairs whose line differs
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    steps: Vec<PathStep>,
    transfers: usize,
}

impl Route {
    /// Builds a route, counting its transfers.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `steps` is empty.
    pub fn new(steps: Vec<PathStep>) -> Result<Self, DomainError> {
        if steps.is_empty() {
            return Err(DomainError::EmptyRoute);
        }

        let transfers = steps
            .windows(2)
            .filter(|pair| pair[0].line() != pair[1].line())
            .count();

        Ok(Route { steps, transfers })
    }

    /// All steps in travel order.
    pub fn steps(&self) -> &[PathStep] {
        &self.steps
    }

    /// Number of line changes.
    pub fn transfers(&self) -> usize {
        self.transfers
    }

    /// Number of steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false: routes are never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// First step.
    pub fn origin(&self) -> &PathStep {
        &self.steps[0]
    }

    /// Last step.
    pub fn destination(&self) -> &PathStep {
        &self.steps[self.steps.len() - 1]
    }

    /// Splits the route into per-line runs.
    ///
    /// The split happens between every pair of consecutive steps whose line
    /// differs, so the station just before a change closes one segment and
    /// the station just after opens the next.
    pub fn segments(&self) -> Vec<RouteSegment<'_>> {
        let mut segments = Vec::with_capacity(self.transfers + 1);
        let mut start = 0;

        for i in 1..=self.steps.len() {
            let boundary =
                i == self.steps.len() || self.steps[i].line() != self.steps[i - 1].line();
            if boundary {
                segments.push(RouteSegment {
                    line: self.steps[start].line(),
                    start,
                    steps: &self.steps[start..i],
                });
                start = i;
            }
        }

        segments
    }

    /// Indices of the steps worth labelling on a map: both endpoints and the
    /// steps either side of every line change. Sorted, without duplicates.
    pub fn label_indices(&self) -> Vec<usize> {
        let last = self.steps.len() - 1;
        let mut indices = vec![0];

        for i in 1..self.steps.len() {
            if self.steps[i].line() != self.steps[i - 1].line() {
                indices.push(i - 1);
                indices.push(i);
            }
        }
        indices.push(last);

        indices.sort_unstable();
        indices.dedup();
        indices
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::domain::OccurrenceId;
    use proptest::prelude::*;

    fn steps_from(lines: &[usize]) -> Vec<PathStep> {
        lines
            .iter()
            .enumerate()
            .map(|(i, &line)| {
                PathStep::new(StationOccurrence {
                    id: OccurrenceId(i),
                    line: LineId(line),
                    index: i,
                })
            })
            .collect()
    }

    proptest! {
        /// Segments cover every step exactly once, in order
        #[test]
        fn segments_partition_steps(lines in prop::collection::vec(0usize..4, 1..30)) {
            let route = Route::new(steps_from(&lines)).unwrap();
            let segments = route.segments();

            prop_assert_eq!(segments.len(), route.transfers() + 1);

            let rejoined: Vec<PathStep> =
                segments.iter().flat_map(|s| s.steps.iter().copied()).collect();
            prop_assert_eq!(rejoined.as_slice(), route.steps());

            for seg in &segments {
                prop_assert!(seg.steps.iter().all(|s| s.line() == seg.line));
            }
        }

        /// Labels always include both endpoints
        #[test]
        fn labels_include_endpoints(lines in prop::collection::vec(0usize..4, 1..30)) {
            let route = Route::new(steps_from(&lines)).unwrap();
            let labels = route.label_indices();
            prop_assert_eq!(labels.first().copied(), Some(0));
            prop_assert_eq!(labels.last().copied(), Some(route.len() - 1));
        }
    }
}
