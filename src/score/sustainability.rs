//! Composite sustainability score.

use crate::domain::{PerformanceRating, SustainabilityComponents, SustainabilityScore};

pub const ENVIRONMENTAL_WEIGHT: f64 = 0.4;
pub const SOCIAL_WEIGHT: f64 = 0.3;
pub const HEALTH_WEIGHT: f64 = 0.2;
pub const SDG_WEIGHT: f64 = 0.1;

/// `total_annual_reduction / (initial_co2 * 0.1)`. Not bounded above.
pub fn environmental_component(total_annual_reduction: f64, initial_co2: f64) -> f64 {
    let reference = initial_co2 * 0.1;
    if reference > 0.0 {
        total_annual_reduction / reference
    } else {
        0.0
    }
}

/// Weighted composite, rated on the seven-tier scale.
///
/// The raw value is rated as-is; `display_value` is only a clamp for output.
pub fn compose(environmental: f64, social: f64, health: f64, sdg: f64) -> SustainabilityScore {
    let value = ENVIRONMENTAL_WEIGHT * environmental
        + SOCIAL_WEIGHT * social
        + HEALTH_WEIGHT * health
        + SDG_WEIGHT * sdg;

    SustainabilityScore {
        value,
        display_value: value.clamp(0.0, 100.0),
        rating: PerformanceRating::from_score(value),
        components: SustainabilityComponents {
            environmental,
            social,
            health,
            sdg,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn environmental_component_is_relative_to_ten_percent_of_initial() {
        assert!((environmental_component(4777.9325, 6000.0) - 7.963220833).abs() < 1e-6);
        assert_eq!(environmental_component(100.0, 0.0), 0.0);
    }

    #[test]
    fn composite_weights() {
        let score = compose(50.0, 60.0, 70.0, 80.0);
        assert!((score.value - (20.0 + 18.0 + 14.0 + 8.0)).abs() < 1e-12);
        assert_eq!(score.rating, PerformanceRating::Satisfactory);
        assert_eq!(score.display_value, score.value);
    }

    #[test]
    fn large_reductions_exceed_one_hundred_but_display_is_clamped() {
        let env = environmental_component(60_000.0, 1000.0);
        assert_eq!(env, 600.0);
        let score = compose(env, 0.0, 0.0, 0.0);
        assert_eq!(score.value, 240.0);
        assert_eq!(score.display_value, 100.0);
        assert_eq!(score.rating, PerformanceRating::Outstanding);
    }
}
