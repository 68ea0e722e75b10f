//! Domain error types.
//!
//! These errors represent validation failures in the domain layer. Catalog
//! errors are fatal at load time; they never surface from a query.

use super::InvalidCoordinate;

/// Errors raised while assembling a [`StationCatalog`](super::StationCatalog).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    /// The catalog has no lines at all
    #[error("catalog must contain at least one line")]
    NoLines,

    /// A line has no stations
    #[error("line {0} has no stations")]
    EmptyLine(String),

    /// Two lines share a name
    #[error("duplicate line name: {0}")]
    DuplicateLine(String),

    /// A station position failed validation
    #[error("station {station} on line {line}: {source}")]
    InvalidStation {
        line: String,
        station: String,
        #[source]
        source: InvalidCoordinate,
    },
}

/// Domain-level errors for value construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Route has no steps
    #[error("route must have at least one step")]
    EmptyRoute,
}
