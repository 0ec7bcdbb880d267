//! Input/output helpers.
//!
//! - configuration JSON read and discovery (`config`)
//! - result JSON envelope read/write (`result`)

pub mod config;
pub mod result;

pub use config::*;
pub use result::*;
