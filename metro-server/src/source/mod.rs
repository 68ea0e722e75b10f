//! Catalog source: the JSON file describing every line.
//!
//! The file is read once at startup. Any problem with it is fatal; the
//! server never runs with a partial catalog.

mod convert;
mod error;
mod loader;
mod types;

pub use convert::convert_document;
pub use error::SourceError;
pub use loader::{load_catalog, parse_catalog};
pub use types::{CatalogDocument, LineRecord, StationRecord};
