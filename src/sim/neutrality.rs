//! Neutrality detection: when does a curve first reach zero?

use crate::domain::{NeutralityResult, TimelineSeries};

/// Year of the first sample whose value is `<= 0`.
///
/// The reported year is the grid year of that sample; there is no
/// interpolation between samples.
pub fn first_non_positive(years: &[f64], values: &[f64]) -> Option<f64> {
    years
        .iter()
        .zip(values)
        .find(|(_, v)| **v <= 0.0)
        .map(|(year, _)| *year)
}

/// Neutrality years for both curves of a timeline.
///
/// The natural curve is a positive exponential, so its neutrality year is
/// `None` unless the values underflow to zero.
pub fn analyze(series: &TimelineSeries) -> NeutralityResult {
    NeutralityResult {
        improved_year: first_non_positive(series.years(), series.co2_improved()),
        natural_year: first_non_positive(series.years(), series.co2_natural()),
    }
}
