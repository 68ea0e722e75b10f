//! Catalog file DTOs.
//!
//! These types map directly to the JSON catalog document. Nothing is
//! validated here; see `convert` for that.

use serde::Deserialize;

/// The whole catalog document.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogDocument {
    /// Lines in display order.
    pub lines: Vec<LineRecord>,
}

/// One line as written in the document.
#[derive(Debug, Clone, Deserialize)]
pub struct LineRecord {
    pub name: String,

    /// CSS hex colour, e.g. `#00a7db`.
    pub color: String,

    /// Stations in running order.
    pub stations: Vec<StationRecord>,
}

/// One station as written in the document.
#[derive(Debug, Clone, Deserialize)]
pub struct StationRecord {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}
