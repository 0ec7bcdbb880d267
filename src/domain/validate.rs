//! Input validation.
//!
//! Every check runs before a single simulation step. The first failing check
//! is reported; there is never a partial result.

use crate::domain::{
    CalculationConfig, CategoryImprovement, EngineInput, Horizon, ImprovementProfile, RoofConfiguration,
};
use crate::error::EngineError;

/// Allowed deviation of the division total from 100%.
pub const DIVISION_TOLERANCE: f64 = 0.01;

/// Validate a configuration and convert it into engine input.
///
/// Categories come from `roof_division`. A category with no `full_savings`
/// entry saves nothing; one with no `improvement_years` entry starts at year 0.
pub fn validate_config(config: &CalculationConfig) -> Result<EngineInput, EngineError> {
    if !(config.roof_area.is_finite() && config.roof_area > 0.0) {
        return Err(EngineError::validation("Roof area must be positive"));
    }
    if !(config.gwp_roof.is_finite() && config.gwp_roof > 0.0) {
        return Err(EngineError::validation("GWP factor must be positive"));
    }
    if !(config.decline_rate.is_finite() && (0.0..1.0).contains(&config.decline_rate)) {
        return Err(EngineError::validation(
            "Decline rate must be between 0 (inclusive) and 1 (exclusive)",
        ));
    }
    validate_division(config)?;

    for (name, saving) in &config.full_savings {
        if !(saving.is_finite() && *saving >= 0.0) {
            return Err(EngineError::validation(format!(
                "Full savings for '{name}' must be a non-negative number"
            )));
        }
    }
    if !(config.efficiency_degradation.is_finite() && config.efficiency_degradation >= 0.0) {
        return Err(EngineError::validation("Efficiency degradation must be non-negative"));
    }
    if config.years_to_calculate == 0 {
        return Err(EngineError::validation("Years to calculate must be positive"));
    }
    if config.points == 0 {
        return Err(EngineError::validation("Number of points must be positive"));
    }

    let roof = RoofConfiguration {
        area: config.roof_area,
        gwp_factor: config.gwp_roof,
        decline_rate: config.decline_rate,
        climate_zone: config.climate_zone,
        division: config.roof_division.clone(),
    };

    let categories = config
        .roof_division
        .keys()
        .map(|name| {
            let improvement = CategoryImprovement {
                full_annual_saving: config.full_savings.get(name).copied().unwrap_or(0.0),
                start_year: config.improvement_years.get(name).copied().unwrap_or(0),
            };
            (name.clone(), improvement)
        })
        .collect();

    Ok(EngineInput {
        roof,
        improvements: ImprovementProfile {
            categories,
            efficiency_degradation: config.efficiency_degradation,
        },
        horizon: Horizon {
            years: config.years_to_calculate,
            points: config.points,
        },
    })
}

fn validate_division(config: &CalculationConfig) -> Result<(), EngineError> {
    if config.roof_division.is_empty() {
        return Err(EngineError::validation("Roof division must list at least one category"));
    }
    for (name, pct) in &config.roof_division {
        if !(pct.is_finite() && *pct >= 0.0) {
            return Err(EngineError::validation(format!(
                "Roof division percentage for '{name}' must be a non-negative number"
            )));
        }
    }
    let total: f64 = config.roof_division.values().sum();
    if (total - 100.0).abs() > DIVISION_TOLERANCE {
        return Err(EngineError::validation(format!(
            "Roof division percentages must sum to 100% (got {total:.2}%)"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::ClimateZone;

    fn base_config() -> CalculationConfig {
        CalculationConfig {
            roof_area: 2000.0,
            gwp_roof: 3.0,
            decline_rate: 0.02,
            roof_division: BTreeMap::from([
                ("Green Areas".to_string(), 60.0),
                ("Solar Power".to_string(), 40.0),
            ]),
            full_savings: BTreeMap::from([("Green Areas".to_string(), 1000.0)]),
            improvement_years: BTreeMap::from([("Green Areas".to_string(), 3)]),
            climate_zone: ClimateZone::Temperate,
            efficiency_degradation: 0.005,
            years_to_calculate: 50,
            points: 1000,
        }
    }

    fn message(config: &CalculationConfig) -> String {
        validate_config(config).unwrap_err().to_string()
    }

    #[test]
    fn valid_config_builds_engine_input() {
        let input = validate_config(&base_config()).unwrap();
        assert_eq!(input.roof.initial_co2(), 6000.0);
        assert_eq!(input.horizon, Horizon { years: 50, points: 1000 });

        let green = input.improvements.categories["Green Areas"];
        assert_eq!(green.full_annual_saving, 1000.0);
        assert_eq!(green.start_year, 3);

        let solar = input.improvements.categories["Solar Power"];
        assert_eq!(solar.full_annual_saving, 0.0);
        assert_eq!(solar.start_year, 0);
    }

    #[test]
    fn rejects_non_positive_area() {
        let mut config = base_config();
        config.roof_area = 0.0;
        assert_eq!(message(&config), "Roof area must be positive");
        config.roof_area = f64::NAN;
        assert_eq!(message(&config), "Roof area must be positive");
    }

    #[test]
    fn rejects_non_positive_gwp() {
        let mut config = base_config();
        config.gwp_roof = -1.0;
        assert_eq!(message(&config), "GWP factor must be positive");
    }

    #[test]
    fn decline_rate_is_half_open() {
        let mut config = base_config();
        config.decline_rate = 0.0;
        assert!(validate_config(&config).is_ok());
        config.decline_rate = 1.0;
        assert!(validate_config(&config).is_err());
        config.decline_rate = -0.01;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn division_must_sum_to_one_hundred_within_tolerance() {
        let mut config = base_config();
        config.roof_division.insert("Solar Power".to_string(), 40.009);
        assert!(validate_config(&config).is_ok());

        config.roof_division.insert("Solar Power".to_string(), 40.02);
        assert!(message(&config).starts_with("Roof division percentages must sum to 100%"));

        config.roof_division.insert("Solar Power".to_string(), 30.0);
        assert!(message(&config).starts_with("Roof division percentages must sum to 100%"));
    }

    #[test]
    fn rejects_empty_or_negative_division() {
        let mut config = base_config();
        config.roof_division.clear();
        assert!(validate_config(&config).is_err());

        let mut config = base_config();
        config.roof_division = BTreeMap::from([
            ("A".to_string(), 110.0),
            ("B".to_string(), -10.0),
        ]);
        assert!(message(&config).contains("'B'"));
    }

    #[test]
    fn rejects_zero_points_and_years() {
        let mut config = base_config();
        config.points = 0;
        assert!(validate_config(&config).is_err());

        let mut config = base_config();
        config.years_to_calculate = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_negative_savings_and_degradation() {
        let mut config = base_config();
        config.full_savings.insert("Solar Power".to_string(), -5.0);
        assert!(message(&config).contains("Solar Power"));

        let mut config = base_config();
        config.efficiency_degradation = -0.1;
        assert!(validate_config(&config).is_err());
    }
}
