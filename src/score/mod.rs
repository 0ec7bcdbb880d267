//! Scoring on top of the simulated timeline.
//!
//! - `economics`: cost, payback, ROI, intensity
//! - `social`: social score, health score, exposure-scaled health impact
//! - `sdg`: SDG alignment and gap analysis
//! - `sustainability`: weighted composite

pub mod economics;
pub mod sdg;
pub mod social;
pub mod sustainability;
