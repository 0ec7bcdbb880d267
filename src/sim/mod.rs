//! CO₂ trajectory simulation.
//!
//! - `timeline`: year grid plus natural / improved curves
//! - `neutrality`: first zero crossing of each curve

pub mod neutrality;
pub mod timeline;

pub use neutrality::*;
pub use timeline::*;
