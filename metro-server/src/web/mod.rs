//! Web layer for the metro route planner.
//!
//! Serves the search page, station and line listings, and route queries
//! as HTML fragments or JSON.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
