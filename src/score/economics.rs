//! Cost, payback and return on investment.

use crate::domain::{EconomicsResult, EngineInput, Intensity, LookupTables, RoofConfiguration, TimelineSeries};

/// `Σ area * share/100 * cost_per_sqm` over the roof categories (€).
pub fn estimated_cost(roof: &RoofConfiguration, tables: &LookupTables) -> f64 {
    roof.division
        .keys()
        .map(|category| roof.category_area(category) * tables.cost_per_sqm(category))
        .sum()
}

/// Years until savings cover the cost; `None` when nothing is saved.
pub fn simple_payback(estimated_cost: f64, total_annual_savings: f64) -> Option<f64> {
    if total_annual_savings > 0.0 {
        Some(estimated_cost / total_annual_savings)
    } else {
        None
    }
}

/// Sample index standing in for "year ten": `floor(points / years * 10)`,
/// clamped to the last sample for horizons shorter than ten years.
pub fn ten_year_index(points: usize, horizon_years: u32) -> usize {
    if points == 0 || horizon_years == 0 {
        return 0;
    }
    let idx = (points as f64 / f64::from(horizon_years) * 10.0).floor() as usize;
    idx.min(points - 1)
}

/// CO₂ kept out of the atmosphere by year ten: natural minus improved.
pub fn ten_year_savings(series: &TimelineSeries, horizon_years: u32) -> f64 {
    let idx = ten_year_index(series.len(), horizon_years);
    series
        .sample(idx)
        .map(|s| s.co2_natural - s.co2_improved)
        .unwrap_or(0.0)
}

pub fn evaluate(input: &EngineInput, series: &TimelineSeries, tables: &LookupTables) -> EconomicsResult {
    let cost = estimated_cost(&input.roof, tables);
    let total = input.improvements.total_annual_savings(&input.roof);
    let ten_year = ten_year_savings(series, input.horizon.years);
    let roi_10yr = if cost > 0.0 { ten_year / cost * 100.0 } else { 0.0 };

    EconomicsResult {
        estimated_cost: cost,
        simple_payback_years: simple_payback(cost, total),
        roi_10yr,
    }
}

pub fn intensity(input: &EngineInput, estimated_cost: f64) -> Intensity {
    let total = input.improvements.total_annual_savings(&input.roof);
    Intensity {
        carbon_per_sqm: input.roof.initial_co2() / input.roof.area,
        reduction_per_euro: if estimated_cost > 0.0 { total / estimated_cost } else { 0.0 },
    }
}
