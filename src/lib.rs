//! `roof-carbon` library crate.
//!
//! The binary (`roofc`) is a thin wrapper around this library so that:
//!
//! - the engine is testable without spawning processes
//! - the pipelines can be embedded by other front-ends
//! - code stays easy to navigate as the project grows
//!
//! Layout, leaf-first: `domain` (types, tables, validation), `math` (year grid),
//! `sim` (curves and neutrality), `score` (economics, social/health, SDG,
//! sustainability), `app::pipeline` (base and enhanced pipelines), then the
//! presentation layers `report`, `plot`, `io`, `cli` and `tui`.

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod math;
pub mod plot;
pub mod report;
pub mod score;
pub mod sim;
pub mod tui;
