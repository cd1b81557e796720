// src/core/mod.rs

pub mod record;
pub mod sanitize;
pub mod units;

pub use record::{Cell, Record};
pub use units::Unit;
