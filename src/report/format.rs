//! Reporting utilities: summary strings and formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the engine code stays clean and testable
//! - output changes are localized (golden tests below pin the exact text)

use serde::{Deserialize, Serialize};

use crate::app::pipeline::{
    CalculationOutput, EnhancedOutput, EnvironmentalImpact, HealthSection, ScenarioComparison,
};
use crate::domain::{EconomicsResult, NeutralityResult, Savings, SustainabilityScore};
use crate::score::sdg::{SdgAlignment, SdgReport};
use crate::score::social::{HealthImpact, SocialImpact};

/// Human-readable lines carried in the base result object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationSummary {
    pub initial_emissions: String,
    pub annual_savings: String,
    pub neutrality_with_improvements: String,
    pub neutrality_natural_decline: String,
    pub payback: String,
    pub roi: String,
}

/// Human-readable lines carried in the enhanced result object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnhancedSummary {
    pub headline: String,
    pub environmental: String,
    pub social: String,
    pub health: String,
    pub sdg: String,
}

pub fn calculation_summary(
    initial_co2: f64,
    savings: &Savings,
    neutrality: &NeutralityResult,
    economics: &EconomicsResult,
) -> CalculationSummary {
    CalculationSummary {
        initial_emissions: format!("Initial roof emissions: {initial_co2:.2} kg CO2e"),
        annual_savings: format!(
            "Annual savings: {:.2} kg CO2e/yr ({:.2} kg CO2e ahead of natural decline at year 10)",
            savings.total_annual, savings.ten_year
        ),
        neutrality_with_improvements: neutrality_line("With improvements", neutrality.improved_year),
        neutrality_natural_decline: neutrality_line("Natural decline", neutrality.natural_year),
        payback: match economics.simple_payback_years {
            Some(years) => format!(
                "Simple payback: {years:.1} years on an estimated cost of EUR {:.2}",
                economics.estimated_cost
            ),
            None => "Simple payback: not applicable (no annual savings)".to_string(),
        },
        roi: format!("10-year ROI: {:.2}%", economics.roi_10yr),
    }
}

fn neutrality_line(label: &str, year: Option<f64>) -> String {
    match year {
        Some(y) => format!("{label}: carbon neutral in year {y:.1}"),
        None => format!("{label}: not carbon neutral within the horizon"),
    }
}

pub fn enhanced_summary(
    environmental: &EnvironmentalImpact,
    social: &SocialImpact,
    health: &HealthSection,
    sdg: &SdgAlignment,
    sustainability: &SustainabilityScore,
) -> EnhancedSummary {
    EnhancedSummary {
        headline: format!(
            "Sustainability score {:.1} ({})",
            sustainability.display_value,
            sustainability.rating.label()
        ),
        environmental: format!(
            "Cuts {:.2} kg CO2e/yr, {:.1}% of the initial footprint",
            environmental.annual_co2_reduction, environmental.reduction_percentage
        ),
        social: format!("Social score {:.1} across {} metrics", social.score, social.metrics.len()),
        health: format!(
            "Health score {:.1}; exposure-weighted impact {:.2}",
            health.score, health.exposure.health_impact_score
        ),
        sdg: format!(
            "Addresses {} SDGs, alignment {:.1} ({})",
            sdg.addressed.len(),
            sdg.score,
            sdg.rating.label()
        ),
    }
}

/// Full terminal report for a base calculation.
pub fn format_calculation_report(out: &CalculationOutput) -> String {
    let mut s = String::new();
    let c = &out.configuration;

    s.push_str("=== roofc - Roof Carbon Projection ===\n");
    s.push_str(&format!(
        "Roof: {:.1} m2 | GWP {:.3} | decline {:.4}/yr | climate {} (x{:.1})\n",
        c.roof_area,
        c.gwp_roof,
        c.decline_rate,
        c.climate_zone,
        c.climate_zone.factor()
    ));
    s.push_str(&format!(
        "Horizon: {} years | {} points | efficiency degradation {:.4}/yr\n",
        c.years_to_calculate, c.points, c.efficiency_degradation
    ));

    s.push_str("\nRoof division:\n");
    s.push_str(&format!(
        "{:<24} {:>8} {:>14} {:>10}\n",
        "category", "share", "saving/yr", "start"
    ));
    s.push_str(&format!("{:-<24} {:-<8} {:-<14} {:-<10}\n", "", "", "", ""));
    for (name, pct) in &c.roof_division {
        let saving = out.savings.annual.get(name).copied().unwrap_or(0.0);
        let start = c.improvement_years.get(name).copied().unwrap_or(0);
        s.push_str(&format!(
            "{:<24} {:>7.2}% {:>14.3} {:>10}\n",
            truncate(name, 24),
            pct,
            saving,
            start
        ));
    }

    s.push('\n');
    let sm = &out.summary;
    for line in [
        &sm.initial_emissions,
        &sm.annual_savings,
        &sm.neutrality_with_improvements,
        &sm.neutrality_natural_decline,
        &sm.payback,
        &sm.roi,
    ] {
        s.push_str(&format!("- {line}\n"));
    }
    s.push_str(&format!(
        "- Intensity: {:.3} kg CO2e/m2 | {:.5} kg CO2e/yr per EUR\n",
        out.intensity.carbon_per_sqm, out.intensity.reduction_per_euro
    ));

    s
}

/// Full terminal report for the enhanced pipeline.
pub fn format_enhanced_report(out: &EnhancedOutput) -> String {
    let mut s = String::new();

    s.push_str("=== roofc - Enhanced Sustainability Report ===\n");
    s.push_str(&format!("{}\n\n", out.summary.headline));

    let sus = &out.sustainability;
    s.push_str("Components (weight):\n");
    s.push_str(&format!("  environmental (0.4) {:>10.3}\n", sus.components.environmental));
    s.push_str(&format!("  social        (0.3) {:>10.3}\n", sus.components.social));
    s.push_str(&format!("  health        (0.2) {:>10.3}\n", sus.components.health));
    s.push_str(&format!("  sdg           (0.1) {:>10.3}\n", sus.components.sdg));
    if sus.value != sus.display_value {
        s.push_str(&format!("  raw composite {:.3} (display clamped)\n", sus.value));
    }

    s.push('\n');
    for line in [
        &out.summary.environmental,
        &out.summary.social,
        &out.summary.health,
        &out.summary.sdg,
    ] {
        s.push_str(&format!("- {line}\n"));
    }

    let econ = &out.economics;
    s.push_str("\nEconomics:\n");
    s.push_str(&format!("  estimated cost      EUR {:.2}\n", econ.result.estimated_cost));
    s.push_str(&format!("  payback             {}\n", fmt_payback(econ.result.simple_payback_years)));
    s.push_str(&format!("  10-year ROI         {:.2}%\n", econ.result.roi_10yr));
    s.push_str(&format!("  health benefit/yr   EUR {:.2}\n", econ.annual_health_benefit));

    if !out.sdg_alignment.gaps.is_empty() {
        s.push_str("\nSDG gaps:\n");
        for gap in &out.sdg_alignment.gaps {
            s.push_str(&format!("  - {}\n", gap.suggestion));
        }
    }

    s
}

pub fn format_health_report(impact: &HealthImpact) -> String {
    let mut s = String::new();
    s.push_str("=== roofc - Health Impact ===\n");
    s.push_str(&format!(
        "Green roof area: {:.2} m2 | view: {:.1}% | employees: {}\n",
        impact.green_roof_area, impact.view_percentage, impact.employees
    ));
    s.push_str(&format!("{:<22} {:>9}\n", "effect", "%"));
    s.push_str(&format!("{:-<22} {:->9}\n", "", ""));
    for (label, value) in [
        ("stress reduction", impact.stress_reduction),
        ("hypertension reduction", impact.hypertension_reduction),
        ("mortality reduction", impact.mortality_reduction),
        ("productivity increase", impact.productivity_increase),
        ("sick days reduction", impact.sick_days_reduction),
    ] {
        s.push_str(&format!("{label:<22} {value:>9.2}\n"));
    }
    s.push_str(&format!("Health impact score: {:.2}\n", impact.health_impact_score));
    s.push_str(&format!(
        "Productivity value: EUR {:.2}/yr | sick-day savings: EUR {:.2}/yr\n",
        impact.economics.productivity_value, impact.economics.sick_day_savings
    ));
    s
}

pub fn format_sdg_report(report: &SdgReport) -> String {
    let mut s = String::new();
    s.push_str("=== roofc - SDG Alignment ===\n");
    s.push_str(&format!(
        "Score: {:.2} ({} of {} goals) | rating: {}\n",
        report.score,
        report.addressed.len(),
        report.total_goals,
        report.rating.label()
    ));
    for detail in &report.addressed {
        let number = detail
            .number
            .map(|n| format!("SDG {n:>2}"))
            .unwrap_or_else(|| "SDG  ?".to_string());
        s.push_str(&format!("\n{number}  {}\n", detail.name));
        s.push_str(&format!("        {}\n", detail.description));
        s.push_str(&format!("        -> {}\n", detail.contribution));
    }
    if !report.gaps.is_empty() {
        s.push_str("\nGaps:\n");
        for gap in &report.gaps {
            s.push_str(&format!("  - {}\n", gap.suggestion));
        }
    }
    s
}

pub fn format_comparison(cmp: &ScenarioComparison) -> String {
    let mut s = String::new();
    s.push_str(&format!(
        "{:<20} {:>12} {:>12} {:>10} {:>10} {:>9}\n",
        "scenario", "initial", "saving/yr", "neutral", "payback", "roi10"
    ));
    s.push_str(&format!(
        "{:-<20} {:->12} {:->12} {:->10} {:->10} {:->9}\n",
        "", "", "", "", "", ""
    ));
    for sc in &cmp.scenarios {
        let o = &sc.output;
        s.push_str(&format!(
            "{:<20} {:>12.1} {:>12.1} {:>10} {:>10} {:>8.2}%\n",
            truncate(&sc.name, 20),
            o.initial_co2,
            o.savings.total_annual,
            o.neutrality
                .improved_year
                .map(|y| format!("{y:.1}"))
                .unwrap_or_else(|| "-".to_string()),
            o.economics
                .simple_payback_years
                .map(|y| format!("{y:.1}"))
                .unwrap_or_else(|| "n/a".to_string()),
            o.economics.roi_10yr
        ));
    }
    if let Some(name) = &cmp.fastest_payback {
        s.push_str(&format!("\nFastest payback: {name}\n"));
    }
    if let Some(name) = &cmp.earliest_neutrality {
        s.push_str(&format!("Earliest neutrality: {name}\n"));
    }
    s
}

fn fmt_payback(years: Option<f64>) -> String {
    years
        .map(|y| format!("{y:.1} years"))
        .unwrap_or_else(|| "not applicable".to_string())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::domain::LookupTables;
    use crate::score::sdg;

    #[test]
    fn summary_lines_golden() {
        let savings = Savings {
            annual: BTreeMap::new(),
            total_annual: 4777.9325,
            ten_year: 1234.5,
        };
        let neutrality = NeutralityResult {
            improved_year: Some(8.108108),
            natural_year: None,
        };
        let economics = EconomicsResult {
            estimated_cost: 350_000.0,
            simple_payback_years: None,
            roi_10yr: 0.35271,
        };
        let sm = calculation_summary(6000.0, &savings, &neutrality, &economics);
        assert_eq!(sm.initial_emissions, "Initial roof emissions: 6000.00 kg CO2e");
        assert_eq!(
            sm.annual_savings,
            "Annual savings: 4777.93 kg CO2e/yr (1234.50 kg CO2e ahead of natural decline at year 10)"
        );
        assert_eq!(sm.neutrality_with_improvements, "With improvements: carbon neutral in year 8.1");
        assert_eq!(
            sm.neutrality_natural_decline,
            "Natural decline: not carbon neutral within the horizon"
        );
        assert_eq!(sm.payback, "Simple payback: not applicable (no annual savings)");
        assert_eq!(sm.roi, "10-year ROI: 0.35%");
    }

    #[test]
    fn sdg_report_lists_goals_and_gaps() {
        let addressed = vec!["SDG 13".to_string(), "Quality Education".to_string()];
        let report = sdg::report(&addressed, &LookupTables::STANDARD);
        let txt = format_sdg_report(&report);
        assert!(txt.contains("Score: 11.76 (2 of 17 goals) | rating: Needs Improvement"));
        assert!(txt.contains("SDG 13  Climate Action"));
        assert!(txt.contains("SDG  4  Quality Education"));
        assert!(txt.contains("No description available"));
        assert!(txt.contains("Gaps:"));
    }

    #[test]
    fn truncate_marks_cut_names() {
        assert_eq!(truncate("Water Management", 8), "Water M.");
        assert_eq!(truncate("Solar", 8), "Solar");
    }
}
