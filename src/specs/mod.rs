// src/specs/mod.rs
//! # Scraped panel "specs"
//!
//! This module hosts the **panel-shape parsers**. Each one
//! focuses on one shape of text that a dashboard panel renders and encodes
//! *how the rows are laid out* and *how to extract them robustly*.
//!
//! ## What lives here
//! - **Pure text parsing** of blocks already lifted out of the page by the
//!   scraping layer. No DOM knowledge; the input is the literal text content.
//! - **Unit-family detection** for legend blocks (percent, sizes, counts,
//!   durations, bare numbers), chosen once per block.
//! - **Extremum selection** under a unit-aware ordering (`core::units`).
//!
//! ## What does **not** live here
//! - **Browser automation, retries or waiting for a panel to render.**
//! - **Range-query aggregation** – that's `series`, which shares no code with
//!   the specs beyond the unit vocabulary.
//! - **Report formatting or delivery** – see `report`.
//!
//! ## Conventions & invariants
//! - **Never fail.** Scraped text is noisy: short lines give empty strings,
//!   unknown units compare as `0.0`, nothing to parse gives an empty list or
//!   `None`.
//! - Record values keep the **raw scraped text**; normalisation is only used to
//!   order them.
//! - Ties go to the **first** record in block order.
//!
//! ## Current specs
//! - `legend` – `Name Mean Max` style legends: name line, metrics line, repeat.
//! - `grid` – column-major flattened tables (headers block + data block).
pub mod grid;
pub mod legend;
