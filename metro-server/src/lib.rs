//! Metro route planner server.
//!
//! A web application that answers: "how do I get between these two
//! stations with the fewest changes of line?"

pub mod cache;
pub mod domain;
pub mod planner;
pub mod source;
pub mod stations;
pub mod walkable;
pub mod web;

#[cfg(test)]
mod test_support;
