//! Shared calculation pipelines used by the CLI and the TUI.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! validate -> simulate -> neutrality -> savings/economics -> summary
//!
//! The enhanced pipeline adds the ratio-based scorers (social, health, SDG,
//! sustainability) on top of the base calculation. Front-ends only deal with
//! presentation.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::tables::GREEN_AREAS;
use crate::domain::{
    CalculationConfig, EconomicsResult, EngineInput, EnhancedRequest, Intensity, LookupTables,
    NeutralityResult, Savings, SustainabilityScore, TimelineSeries, validate_config,
};
use crate::error::EngineError;
use crate::math::nearest_index;
use crate::report::{CalculationSummary, EnhancedSummary, calculation_summary, enhanced_summary};
use crate::score::sdg::SdgAlignment;
use crate::score::social::{HealthImpact, SocialImpact};
use crate::score::{economics, sdg, social, sustainability};
use crate::sim;

/// All computed outputs of a base calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationOutput {
    pub configuration: CalculationConfig,
    pub initial_co2: f64,
    pub timeline: TimelineSeries,
    pub neutrality: NeutralityResult,
    pub savings: Savings,
    pub economics: EconomicsResult,
    pub intensity: Intensity,
    pub summary: CalculationSummary,
}

/// Execute the base pipeline.
pub fn run_calculation(
    config: &CalculationConfig,
    tables: &LookupTables,
) -> Result<CalculationOutput, EngineError> {
    // Validate before touching the simulator.
    let input = validate_config(config)?;
    Ok(calculate(config, &input, tables))
}

/// Base pipeline on already validated input.
fn calculate(config: &CalculationConfig, input: &EngineInput, tables: &LookupTables) -> CalculationOutput {
    // 1) Simulate both curves.
    let timeline = sim::simulate(input);

    // 2) Derive neutrality, savings and economics from the curves.
    let neutrality = sim::analyze(&timeline);
    let savings = savings(input, &timeline);
    let economics = economics::evaluate(input, &timeline, tables);
    let intensity = economics::intensity(input, economics.estimated_cost);

    let initial_co2 = input.roof.initial_co2();
    let summary = calculation_summary(initial_co2, &savings, &neutrality, &economics);

    info!(
        target: "engine.pipeline",
        initial_co2,
        total_annual_savings = savings.total_annual,
        neutrality_year = ?neutrality.improved_year,
        payback_years = ?economics.simple_payback_years,
        "Calculation finished"
    );

    CalculationOutput {
        configuration: config.clone(),
        initial_co2,
        timeline,
        neutrality,
        savings,
        economics,
        intensity,
        summary,
    }
}

fn savings(input: &EngineInput, timeline: &TimelineSeries) -> Savings {
    Savings {
        annual: input.improvements.annual_savings(&input.roof),
        total_annual: input.improvements.total_annual_savings(&input.roof),
        ten_year: economics::ten_year_savings(timeline, input.horizon.years),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalImpact {
    pub initial_co2: f64,
    pub annual_co2_reduction: f64,
    /// Annual reduction as a share of the initial footprint (%).
    pub reduction_percentage: f64,
    pub environmental_component: f64,
    pub ten_year_savings: f64,
    pub neutrality: NeutralityResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSection {
    pub score: f64,
    pub hypertension_reduction: f64,
    pub mortality_reduction: f64,
    pub exposure: HealthImpact,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedEconomics {
    #[serde(flatten)]
    pub result: EconomicsResult,
    pub intensity: Intensity,
    pub annual_health_benefit: f64,
}

/// Cumulative values at each whole year of the horizon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projections {
    pub years: Vec<u32>,
    pub cumulative_co2_reduction: Vec<f64>,
    pub co2_remaining: Vec<f64>,
    pub cumulative_health_benefit: Vec<f64>,
}

/// All computed outputs of the enhanced pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedOutput {
    pub configuration: EnhancedRequest,
    pub environmental_impact: EnvironmentalImpact,
    pub social_impact: SocialImpact,
    pub health_impact: HealthSection,
    pub sdg_alignment: SdgAlignment,
    pub sustainability: SustainabilityScore,
    pub economics: EnhancedEconomics,
    pub projections: Projections,
    pub summary: EnhancedSummary,
}

/// Execute the enhanced pipeline: base calculation plus ratio-based scores.
pub fn run_enhanced(
    request: &EnhancedRequest,
    tables: &LookupTables,
) -> Result<EnhancedOutput, EngineError> {
    let input = validate_config(&request.roof)?;
    let base = calculate(&request.roof, &input, tables);

    let total_reduction = base.savings.total_annual;
    let environmental = sustainability::environmental_component(total_reduction, base.initial_co2);

    let social_impact = social::social_impact(&request.social_metrics, tables);
    let health_score = social::health_score(&request.health_metrics);
    let exposure = social::health_impact(
        input.roof.area,
        input.roof.share_pct(GREEN_AREAS),
        request.view_percentage,
        request.employees,
        tables,
    )?;
    let sdg_alignment = sdg::align(&request.sdg_focus, tables);

    let score = sustainability::compose(
        environmental,
        social_impact.score,
        health_score,
        sdg_alignment.score,
    );
    debug!(
        target: "engine.pipeline",
        environmental,
        social = social_impact.score,
        health = health_score,
        sdg = sdg_alignment.score,
        sustainability = score.value,
        "Enhanced scores composed"
    );

    let environmental_impact = EnvironmentalImpact {
        initial_co2: base.initial_co2,
        annual_co2_reduction: total_reduction,
        reduction_percentage: total_reduction / base.initial_co2 * 100.0,
        environmental_component: environmental,
        ten_year_savings: base.savings.ten_year,
        neutrality: base.neutrality,
    };
    let health_impact = HealthSection {
        score: health_score,
        hypertension_reduction: request
            .health_metrics
            .get(social::HYPERTENSION_KEY)
            .copied()
            .unwrap_or(0.0),
        mortality_reduction: request
            .health_metrics
            .get(social::MORTALITY_KEY)
            .copied()
            .unwrap_or(0.0),
        exposure,
    };
    let projections = projections(&input, &base.timeline, exposure.economics.total_annual_benefit);
    let summary = enhanced_summary(&environmental_impact, &social_impact, &health_impact, &sdg_alignment, &score);

    Ok(EnhancedOutput {
        configuration: request.clone(),
        environmental_impact,
        social_impact,
        health_impact,
        sdg_alignment,
        sustainability: score,
        economics: EnhancedEconomics {
            result: base.economics,
            intensity: base.intensity,
            annual_health_benefit: exposure.economics.total_annual_benefit,
        },
        projections,
        summary,
    })
}

/// Cumulative projections over whole years `0..=horizon`.
///
/// Year `k` contributes the savings of every category already active at the
/// start of that year, at that year's efficiency. Entry `y` sums years `0..y`.
pub fn projections(input: &EngineInput, timeline: &TimelineSeries, annual_health_benefit: f64) -> Projections {
    let years: Vec<u32> = (0..=input.horizon.years).collect();

    let cumulative_co2_reduction = std::iter::once(0.0)
        .chain((0..input.horizon.years).scan(0.0, |total, year| {
            *total += yearly_reduction(input, year);
            Some(*total)
        }))
        .collect();

    let co2_remaining = years
        .iter()
        .map(|&y| {
            nearest_index(timeline.years(), f64::from(y))
                .map(|i| timeline.co2_improved()[i])
                .unwrap_or(0.0)
        })
        .collect();

    Projections {
        cumulative_co2_reduction,
        cumulative_health_benefit: years.iter().map(|&y| annual_health_benefit * f64::from(y)).collect(),
        co2_remaining,
        years,
    }
}

/// Climate-scaled reduction delivered during `year` (kg CO2e).
fn yearly_reduction(input: &EngineInput, year: u32) -> f64 {
    let climate = input.roof.climate_zone.factor();
    let degradation = input.improvements.efficiency_degradation;
    input
        .improvements
        .categories
        .iter()
        .filter(|(_, c)| c.start_year <= year)
        .map(|(name, c)| {
            let eff = sim::efficiency(degradation, f64::from(year - c.start_year));
            input.improvements.category_annual_saving(&input.roof, name) * eff * climate
        })
        .sum()
}

/// One named scenario in a comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioOutcome {
    pub name: String,
    pub output: CalculationOutput,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub scenarios: Vec<ScenarioOutcome>,
    /// Scenario with the shortest payback (if any pays back at all).
    pub fastest_payback: Option<String>,
    /// Scenario whose improved curve reaches zero first.
    pub earliest_neutrality: Option<String>,
}

/// Run independent scenarios in parallel, keeping input order.
pub fn compare_scenarios(
    names: &[String],
    configs: &[CalculationConfig],
    tables: &LookupTables,
) -> Result<ScenarioComparison, EngineError> {
    if configs.is_empty() {
        return Err(EngineError::validation("At least one scenario is required"));
    }
    if names.len() != configs.len() {
        return Err(EngineError::validation(format!(
            "Scenario names and configurations must match ({} names, {} configurations)",
            names.len(),
            configs.len()
        )));
    }

    let outputs: Vec<CalculationOutput> = configs
        .par_iter()
        .map(|config| run_calculation(config, tables))
        .collect::<Result<_, _>>()?;

    let scenarios: Vec<ScenarioOutcome> = names
        .iter()
        .cloned()
        .zip(outputs)
        .map(|(name, output)| ScenarioOutcome { name, output })
        .collect();

    info!(target: "engine.pipeline", scenarios = scenarios.len(), "Scenario comparison finished");

    Ok(ScenarioComparison {
        fastest_payback: min_by_key(&scenarios, |s| s.output.economics.simple_payback_years),
        earliest_neutrality: min_by_key(&scenarios, |s| s.output.neutrality.improved_year),
        scenarios,
    })
}

/// Name of the scenario with the smallest `Some` key; first one wins on ties.
fn min_by_key(scenarios: &[ScenarioOutcome], key: impl Fn(&ScenarioOutcome) -> Option<f64>) -> Option<String> {
    let mut best: Option<(&ScenarioOutcome, f64)> = None;
    for s in scenarios {
        let Some(k) = key(s) else { continue };
        match best {
            Some((_, bk)) if k >= bk => {}
            _ => best = Some((s, k)),
        }
    }
    best.map(|(s, _)| s.name.clone())
}
