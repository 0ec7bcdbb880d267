//! Social and health scoring.
//!
//! - social score: weighted mean of percentage metrics
//! - health score: mean of hypertension and mortality reductions
//! - health impact: research baselines scaled by green-roof exposure

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::LookupTables;
use crate::error::EngineError;

pub const HYPERTENSION_KEY: &str = "hypertension_reduction";
pub const MORTALITY_KEY: &str = "mortality_reduction";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedMetric {
    pub value: f64,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialImpact {
    pub score: f64,
    pub metrics: BTreeMap<String, WeightedMetric>,
}

/// `Σ(value * weight) / Σ(weight)`; `0.0` for an empty metric set.
pub fn social_score(metrics: &BTreeMap<String, f64>, tables: &LookupTables) -> f64 {
    let (weighted, total_weight) = metrics.iter().fold((0.0, 0.0), |(sum, wsum), (name, value)| {
        let w = tables.social_weight(name);
        (sum + value * w, wsum + w)
    });
    if total_weight > 0.0 {
        weighted / total_weight
    } else {
        0.0
    }
}

pub fn social_impact(metrics: &BTreeMap<String, f64>, tables: &LookupTables) -> SocialImpact {
    SocialImpact {
        score: social_score(metrics, tables),
        metrics: metrics
            .iter()
            .map(|(name, value)| {
                let metric = WeightedMetric {
                    value: *value,
                    weight: tables.social_weight(name),
                };
                (name.clone(), metric)
            })
            .collect(),
    }
}

/// `(hypertension_reduction + mortality_reduction) / 2`; missing metrics count as 0.
pub fn health_score(metrics: &BTreeMap<String, f64>) -> f64 {
    let hypertension = metrics.get(HYPERTENSION_KEY).copied().unwrap_or(0.0);
    let mortality = metrics.get(MORTALITY_KEY).copied().unwrap_or(0.0);
    (hypertension + mortality) / 2.0
}

/// Yearly money value of the health effects for a workforce (€).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthEconomics {
    pub productivity_value: f64,
    pub sick_day_savings: f64,
    pub total_annual_benefit: f64,
}

/// Exposure-scaled health effects of a green roof (all reductions in %).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthImpact {
    pub green_roof_area: f64,
    pub view_percentage: f64,
    pub employees: u32,
    pub stress_reduction: f64,
    pub hypertension_reduction: f64,
    pub mortality_reduction: f64,
    pub productivity_increase: f64,
    pub sick_days_reduction: f64,
    pub health_impact_score: f64,
    pub economics: HealthEconomics,
}

/// Scale the research baselines by green-roof share and view exposure.
///
/// Every baseline is scaled by `green_area / area`; all but mortality are also
/// scaled by `view_pct / 100` (mortality depends on presence, not on view).
pub fn health_impact(
    area: f64,
    green_pct: f64,
    view_pct: f64,
    employees: u32,
    tables: &LookupTables,
) -> Result<HealthImpact, EngineError> {
    if !(area.is_finite() && area > 0.0) {
        return Err(EngineError::validation("Roof area must be positive"));
    }
    if !(green_pct.is_finite() && (0.0..=100.0).contains(&green_pct)) {
        return Err(EngineError::validation(
            "Green area percentage must be between 0 and 100",
        ));
    }
    if !(view_pct.is_finite() && (0.0..=100.0).contains(&view_pct)) {
        return Err(EngineError::validation("View percentage must be between 0 and 100"));
    }

    let base = tables.health;
    let green_roof_area = area * green_pct / 100.0;
    let green_share = green_roof_area / area;
    let view = view_pct / 100.0;

    let stress_reduction = base.stress_reduction * green_share * view;
    let hypertension_reduction = base.hypertension_reduction * green_share * view;
    let mortality_reduction = base.mortality_reduction * green_share;
    let productivity_increase = base.productivity_increase * green_share * view;
    let sick_days_reduction = base.sick_days_reduction * green_share * view;

    let health_impact_score = (stress_reduction
        + hypertension_reduction
        + mortality_reduction
        + productivity_increase
        + sick_days_reduction)
        / 5.0;

    let headcount = f64::from(employees);
    let productivity_value = productivity_increase / 100.0 * base.average_salary * headcount;
    let sick_day_savings = sick_days_reduction / 100.0 * base.sick_day_cost * headcount;

    Ok(HealthImpact {
        green_roof_area,
        view_percentage: view_pct,
        employees,
        stress_reduction,
        hypertension_reduction,
        mortality_reduction,
        productivity_increase,
        sick_days_reduction,
        health_impact_score,
        economics: HealthEconomics {
            productivity_value,
            sick_day_savings,
            total_annual_benefit: productivity_value + sick_day_savings,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn social_score_weights_known_metrics() {
        let tables = LookupTables::STANDARD;
        let m = metrics(&[("trust", 40.0), ("happiness", 80.0)]);
        let expected = (40.0 * 0.1 + 80.0 * 0.15) / 0.25;
        assert!((social_score(&m, &tables) - expected).abs() < 1e-12);
    }

    #[test]
    fn unknown_social_metric_uses_default_weight() {
        let tables = LookupTables::STANDARD;
        let m = metrics(&[("curiosity", 50.0), ("safety_wellbeing", 20.0)]);
        let expected = (50.0 * 0.1 + 20.0 * 0.15) / 0.25;
        assert!((social_score(&m, &tables) - expected).abs() < 1e-12);

        let impact = social_impact(&m, &tables);
        assert_eq!(impact.metrics["curiosity"].weight, 0.1);
        assert_eq!(impact.score, social_score(&m, &tables));
    }

    #[test]
    fn empty_social_metrics_score_zero() {
        assert_eq!(social_score(&BTreeMap::new(), &LookupTables::STANDARD), 0.0);
    }

    #[test]
    fn health_score_averages_two_metrics() {
        let m = metrics(&[(HYPERTENSION_KEY, 6.0), (MORTALITY_KEY, 14.0), ("other", 99.0)]);
        assert_eq!(health_score(&m), 10.0);
        assert_eq!(health_score(&metrics(&[(MORTALITY_KEY, 8.0)])), 4.0);
    }

    #[test]
    fn health_impact_scales_by_exposure() {
        let impact = health_impact(2776.0, 25.0, 60.0, 100, &LookupTables::STANDARD).unwrap();
        assert!((impact.green_roof_area - 694.0).abs() < 1e-9);
        assert!((impact.stress_reduction - 5.91).abs() < 1e-9);
        assert!((impact.hypertension_reduction - 1.0155).abs() < 1e-9);
        // Mortality ignores the view share.
        assert!((impact.mortality_reduction - 3.75).abs() < 1e-9);
        assert!((impact.productivity_increase - 3.39).abs() < 1e-9);
        assert!((impact.sick_days_reduction - 1.845).abs() < 1e-9);
        assert!((impact.health_impact_score - 3.1821).abs() < 1e-9);
    }

    #[test]
    fn health_economics_scale_with_headcount() {
        let impact = health_impact(1000.0, 100.0, 100.0, 10, &LookupTables::STANDARD).unwrap();
        assert!((impact.economics.productivity_value - 0.226 * 45_000.0 * 10.0).abs() < 1e-6);
        assert!((impact.economics.sick_day_savings - 0.123 * 2_000.0 * 10.0).abs() < 1e-6);
        assert!(
            (impact.economics.total_annual_benefit
                - impact.economics.productivity_value
                - impact.economics.sick_day_savings)
                .abs()
                < 1e-9
        );
    }

    #[test]
    fn health_impact_rejects_bad_inputs() {
        let tables = LookupTables::STANDARD;
        assert!(health_impact(0.0, 25.0, 60.0, 1, &tables).is_err());
        assert!(health_impact(100.0, 120.0, 60.0, 1, &tables).is_err());
        assert!(health_impact(100.0, 25.0, -1.0, 1, &tables).is_err());
    }
}
