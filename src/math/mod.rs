//! Numeric helpers: sampling grids.

pub mod grid;

pub use grid::*;
