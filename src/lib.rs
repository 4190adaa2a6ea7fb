//! Solar and sprinkler-pump sizing engine with step-by-step derivation logs.

pub mod catalog;
pub mod cli;
pub mod config;
/// Ordered, numbered record of how each recommendation was reached.
pub mod derivation;
pub mod io;
pub mod loads;
pub mod report;
/// Sizers for each system type plus their shared electrical helpers.
pub mod sizing;
pub mod standards;

#[cfg(feature = "api")]
pub mod api;
