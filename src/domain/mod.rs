//! Domain types used throughout the engine.
//!
//! This module defines:
//!
//! - input configuration (`CalculationConfig`, `EnhancedRequest`, `ClimateZone`)
//! - validated engine input (`RoofConfiguration`, `ImprovementProfile`, `Horizon`)
//! - engine outputs (`TimelineSeries`, `NeutralityResult`, `EconomicsResult`, ...)
//! - constant lookup tables (`tables`)

pub mod tables;
pub mod types;
pub mod validate;

pub use tables::LookupTables;
pub use types::*;
pub use validate::validate_config;
