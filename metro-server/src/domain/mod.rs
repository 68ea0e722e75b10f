//! Domain types for the metro route planner.
//!
//! This module contains the core domain model types that represent
//! validated network data. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod catalog;
mod error;
mod line;
mod route;
mod station;

pub use catalog::{OccurrenceId, StationCatalog, StationOccurrence};
pub use error::{CatalogError, DomainError};
pub use line::{InvalidLineColor, Line, LineColor, LineId};
pub use route::{PathStep, Route, RouteSegment};
pub use station::{GeoPoint, InvalidCoordinate, Station};
