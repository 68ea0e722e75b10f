//! Same-line neighbours of a station occurrence.

use crate::domain::{StationCatalog, StationOccurrence};

/// The stations immediately before and after an occurrence on its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbors {
    /// Index - 1 on the same line; absent at the first station.
    pub predecessor: Option<StationOccurrence>,
    /// Index + 1 on the same line; absent at the last station.
    pub successor: Option<StationOccurrence>,
}

impl Neighbors {
    /// Predecessor, then successor.
    pub fn iter(&self) -> impl Iterator<Item = StationOccurrence> {
        self.predecessor.into_iter().chain(self.successor)
    }
}

/// Adjacency along lines. Stations are adjacent only to the stations
/// next to them on the same line.
#[derive(Debug, Clone, Copy)]
pub struct LineAdjacency<'a> {
    catalog: &'a StationCatalog,
}

impl<'a> LineAdjacency<'a> {
    pub fn new(catalog: &'a StationCatalog) -> Self {
        Self { catalog }
    }

    pub fn neighbors(&self, occ: StationOccurrence) -> Neighbors {
        let predecessor = occ
            .index
            .checked_sub(1)
            .and_then(|i| self.catalog.occurrence(occ.line, i));
        let successor = self.catalog.occurrence(occ.line, occ.index + 1);

        Neighbors {
            predecessor,
            successor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::LineId;
    use crate::test_support::named_catalog;

    #[test]
    fn interior_station_has_both_neighbours() {
        let catalog = named_catalog(&[("A", &["a", "b", "c"])]);
        let adjacency = LineAdjacency::new(&catalog);
        let b = catalog.occurrence(LineId(0), 1).unwrap();

        let n = adjacency.neighbors(b);
        assert_eq!(n.predecessor, catalog.occurrence(LineId(0), 0));
        assert_eq!(n.successor, catalog.occurrence(LineId(0), 2));

        let names: Vec<_> = n.iter().map(|o| catalog.station(o).name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
    }

    #[test]
    fn line_ends_have_one_neighbour() {
        let catalog = named_catalog(&[("A", &["a", "b", "c"])]);
        let adjacency = LineAdjacency::new(&catalog);

        let first = adjacency.neighbors(catalog.occurrence(LineId(0), 0).unwrap());
        assert_eq!(first.predecessor, None);
        assert_eq!(first.iter().count(), 1);

        let last = adjacency.neighbors(catalog.occurrence(LineId(0), 2).unwrap());
        assert_eq!(last.successor, None);
        assert_eq!(last.iter().count(), 1);
    }

    #[test]
    fn single_station_line_is_isolated() {
        let catalog = named_catalog(&[("A", &["a", "b"]), ("B", &["solo"])]);
        let adjacency = LineAdjacency::new(&catalog);
        let solo = catalog.occurrence(LineId(1), 0).unwrap();

        assert_eq!(adjacency.neighbors(solo).iter().count(), 0);
    }

    #[test]
    fn neighbours_never_cross_lines() {
        let catalog = named_catalog(&[("A", &["a", "b"]), ("B", &["c", "d"])]);
        let adjacency = LineAdjacency::new(&catalog);

        for occ in catalog.occurrences() {
            for n in adjacency.neighbors(occ).iter() {
                assert_eq!(n.line, occ.line);
                assert_eq!(n.index.abs_diff(occ.index), 1);
            }
        }
    }
}
