//! Conversion from catalog DTOs to domain types.

use tracing::debug;

use crate::domain::{CatalogError, GeoPoint, Line, LineColor, Station, StationCatalog};

use super::error::SourceError;
use super::types::{CatalogDocument, LineRecord, StationRecord};

/// Convert a parsed document into a validated catalog.
///
/// Fails on the first invalid colour or coordinate, naming the line (and
/// station) at fault.
pub fn convert_document(document: CatalogDocument) -> Result<StationCatalog, SourceError> {
    let lines = document
        .lines
        .into_iter()
        .map(convert_line)
        .collect::<Result<Vec<_>, _>>()?;

    let catalog = StationCatalog::new(lines)?;
    debug!(
        lines = catalog.lines().len(),
        occurrences = catalog.occurrence_count(),
        "Converted catalog document"
    );
    Ok(catalog)
}

fn convert_line(record: LineRecord) -> Result<Line, SourceError> {
    let color = LineColor::parse(&record.color).map_err(|source| SourceError::InvalidColor {
        line: record.name.clone(),
        source,
    })?;

    let stations = record
        .stations
        .into_iter()
        .map(|s| convert_station(&record.name, s))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Line::new(record.name, color, stations))
}

fn convert_station(line: &str, record: StationRecord) -> Result<Station, CatalogError> {
    let position =
        GeoPoint::new(record.lat, record.lng).map_err(|source| CatalogError::InvalidStation {
            line: line.to_string(),
            station: record.name.clone(),
            source,
        })?;

    Ok(Station::new(record.name, position))
}
