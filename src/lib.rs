// src/lib.rs
//! Turns scraped dashboard text and range-query responses into report values.
//!
//! - [`specs::legend`] / [`specs::grid`]: scraped panel text → records → extrema.
//! - [`series`]: range-query JSON → max / min / mean with labels.
//! - [`query`], [`dashboard`], [`report`]: the thin pieces an orchestrator needs
//!   around them (query parameters, panel listing, result file).

#[macro_use]
pub mod macros;
#[macro_use]
pub mod logging;

pub mod config;
pub mod core;
pub mod csv;
pub mod dashboard;
pub mod query;
pub mod report;
pub mod series;
pub mod specs;

#[cfg(feature = "cli")]
pub mod cli;

pub use crate::core::record::{Cell, Record};
pub use crate::series::{Extremum, Labels, Mean};
pub use crate::specs::grid::GridTable;
pub use crate::specs::legend::LegendTable;
