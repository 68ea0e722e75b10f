//! Station name lookup for autocomplete.
//!
//! Names are collected once from the catalog at startup; the catalog never
//! changes, so neither does the lookup.

mod names;

pub use names::StationNames;
