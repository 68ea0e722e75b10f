//! The station catalog: every line, every station, loaded once.

use std::collections::{BTreeSet, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};

use super::{CatalogError, Line, LineId, Station};

/// Source of process-unique catalog versions.
static NEXT_VERSION: AtomicU64 = AtomicU64::new(1);

/// Dense, catalog-wide ordinal of a station occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OccurrenceId(pub usize);

/// A station as it appears on one line at one index.
///
/// Occurrences are only ever handed out by a [`StationCatalog`] and are
/// meaningful only for that catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StationOccurrence {
    pub id: OccurrenceId,
    pub line: LineId,
    pub index: usize,
}

/// Immutable set of lines.
///
/// Built once at startup and shared read-only (typically behind an `Arc`)
/// by every query.
///
/// # Invariants
///
/// - At least one line; every line has at least one station
/// - Line names are unique
/// - Every station position is finite and in range (enforced by `GeoPoint`)
#[derive(Debug)]
pub struct StationCatalog {
    lines: Vec<Line>,
    /// Occurrence id of each line's first station.
    offsets: Vec<usize>,
    occurrence_count: usize,
    version: u64,
}

impl StationCatalog {
    /// Validates the lines and builds the catalog.
    ///
    /// # Errors
    ///
    /// Returns `Err` if there are no lines, a line has no stations, or two
    /// lines share a name.
    pub fn new(lines: Vec<Line>) -> Result<Self, CatalogError> {
        if lines.is_empty() {
            return Err(CatalogError::NoLines);
        }

        let mut names = HashSet::new();
        let mut offsets = Vec::with_capacity(lines.len());
        let mut total = 0;

        for line in &lines {
            if line.is_empty() {
                return Err(CatalogError::EmptyLine(line.name.clone()));
            }
            if !names.insert(line.name.as_str()) {
                return Err(CatalogError::DuplicateLine(line.name.clone()));
            }
            offsets.push(total);
            total += line.len();
        }

        Ok(Self {
            lines,
            offsets,
            occurrence_count: total,
            version: NEXT_VERSION.fetch_add(1, Ordering::Relaxed),
        })
    }

    /// All lines, in insertion order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Line ids paired with their lines, in insertion order.
    pub fn lines_with_ids(&self) -> impl Iterator<Item = (LineId, &Line)> {
        self.lines.iter().enumerate().map(|(i, l)| (LineId(i), l))
    }

    /// Looks up a line by id.
    ///
    /// # Panics
    ///
    /// Panics if the id did not come from this catalog.
    pub fn line(&self, id: LineId) -> &Line {
        &self.lines[id.0]
    }

    /// The station at an occurrence.
    pub fn station(&self, occ: StationOccurrence) -> &Station {
        &self.lines[occ.line.0].stations[occ.index]
    }

    /// The occurrence at `index` on `line`, if the line is that long.
    pub fn occurrence(&self, line: LineId, index: usize) -> Option<StationOccurrence> {
        let l = self.lines.get(line.0)?;
        (index < l.len()).then(|| StationOccurrence {
            id: OccurrenceId(self.offsets[line.0] + index),
            line,
            index,
        })
    }

    /// Every occurrence in catalog order (line order, then index).
    pub fn occurrences(&self) -> impl Iterator<Item = StationOccurrence> + '_ {
        self.lines_with_ids().flat_map(move |(line, l)| {
            let offset = self.offsets[line.0];
            (0..l.len()).map(move |index| StationOccurrence {
                id: OccurrenceId(offset + index),
                line,
                index,
            })
        })
    }

    /// All occurrences carrying exactly this name, in catalog order.
    pub fn occurrences_named<'a>(
        &'a self,
        name: &'a str,
    ) -> impl Iterator<Item = StationOccurrence> + 'a {
        self.occurrences()
            .filter(move |occ| self.station(*occ).name == name)
    }

    /// Distinct station names across all lines, sorted.
    pub fn list_station_names(&self) -> Vec<String> {
        self.lines
            .iter()
            .flat_map(|l| l.stations.iter().map(|s| s.name.as_str()))
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Total number of station occurrences.
    pub fn occurrence_count(&self) -> usize {
        self.occurrence_count
    }

    /// Process-unique identity of this catalog, for cache keys.
    pub fn version(&self) -> u64 {
        self.version
    }
}
