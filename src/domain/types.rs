//! Shared domain types.
//!
//! These types are kept lightweight and serializable so they can be:
//!
//! - built fresh for every calculation
//! - printed as the JSON result object
//! - reloaded later for plotting or comparisons

use std::collections::BTreeMap;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::tables;
use crate::error::EngineError;

pub const DEFAULT_EFFICIENCY_DEGRADATION: f64 = 0.005;
pub const DEFAULT_YEARS_TO_CALCULATE: u32 = 50;
pub const DEFAULT_POINTS: usize = 1000;

/// Climate zone of the building. Scales both natural decay and improvement savings.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ClimateZone {
    #[default]
    Temperate,
    Tropical,
    Arid,
    Continental,
    Polar,
}

impl ClimateZone {
    pub const ALL: [ClimateZone; 5] = [
        ClimateZone::Temperate,
        ClimateZone::Tropical,
        ClimateZone::Arid,
        ClimateZone::Continental,
        ClimateZone::Polar,
    ];

    /// Multiplier applied to decay and savings rates.
    pub fn factor(self) -> f64 {
        tables::climate_factor(self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ClimateZone::Temperate => "temperate",
            ClimateZone::Tropical => "tropical",
            ClimateZone::Arid => "arid",
            ClimateZone::Continental => "continental",
            ClimateZone::Polar => "polar",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|z| *z == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|z| *z == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl std::fmt::Display for ClimateZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClimateZone {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|z| z.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| EngineError::UnknownClimateZone(wanted.to_string()))
    }
}

impl TryFrom<String> for ClimateZone {
    type Error = EngineError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The input configuration as callers supply it.
///
/// Field names follow the external JSON interface (`GWP_roof` included), so a
/// config file can be fed to the engine unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationConfig {
    /// Roof area (m²).
    pub roof_area: f64,
    /// Global-warming-potential coefficient (kg CO₂e per m²).
    #[serde(rename = "GWP_roof")]
    pub gwp_roof: f64,
    /// Natural annual decline rate in `[0, 1)`.
    pub decline_rate: f64,
    /// Category name → percentage of the roof (must sum to 100).
    pub roof_division: BTreeMap<String, f64>,
    /// Category name → annual saving at 100% allocation (kg CO₂e/yr).
    #[serde(default)]
    pub full_savings: BTreeMap<String, f64>,
    /// Category name → year the improvement becomes active.
    #[serde(default)]
    pub improvement_years: BTreeMap<String, u32>,
    #[serde(default)]
    pub climate_zone: ClimateZone,
    #[serde(default = "default_efficiency_degradation")]
    pub efficiency_degradation: f64,
    #[serde(default = "default_years_to_calculate")]
    pub years_to_calculate: u32,
    #[serde(default = "default_points")]
    pub points: usize,
}

fn default_efficiency_degradation() -> f64 {
    DEFAULT_EFFICIENCY_DEGRADATION
}

fn default_years_to_calculate() -> u32 {
    DEFAULT_YEARS_TO_CALCULATE
}

fn default_points() -> usize {
    DEFAULT_POINTS
}

/// Physical description of the roof.
#[derive(Debug, Clone, PartialEq)]
pub struct RoofConfiguration {
    pub area: f64,
    pub gwp_factor: f64,
    pub decline_rate: f64,
    pub climate_zone: ClimateZone,
    pub division: BTreeMap<String, f64>,
}

impl RoofConfiguration {
    /// `gwp_factor * area`.
    pub fn initial_co2(&self) -> f64 {
        self.gwp_factor * self.area
    }

    /// Percentage share of a category, `0.0` if the roof has no such category.
    pub fn share_pct(&self, category: &str) -> f64 {
        self.division.get(category).copied().unwrap_or(0.0)
    }

    /// Area (m²) allocated to a category.
    pub fn category_area(&self, category: &str) -> f64 {
        self.area * self.share_pct(category) / 100.0
    }
}

/// One category's improvement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryImprovement {
    /// kg CO₂e/yr if the whole roof were given to this category.
    pub full_annual_saving: f64,
    pub start_year: u32,
}

/// Improvement plan across all roof categories.
#[derive(Debug, Clone, PartialEq)]
pub struct ImprovementProfile {
    pub categories: BTreeMap<String, CategoryImprovement>,
    /// Fractional annual loss of effectiveness, shared by all categories.
    pub efficiency_degradation: f64,
}

impl ImprovementProfile {
    /// `full_annual_saving * share/100` for one category.
    pub fn category_annual_saving(&self, roof: &RoofConfiguration, category: &str) -> f64 {
        self.categories
            .get(category)
            .map(|c| c.full_annual_saving * roof.share_pct(category) / 100.0)
            .unwrap_or(0.0)
    }

    pub fn annual_savings(&self, roof: &RoofConfiguration) -> BTreeMap<String, f64> {
        self.categories
            .keys()
            .map(|name| (name.clone(), self.category_annual_saving(roof, name)))
            .collect()
    }

    pub fn total_annual_savings(&self, roof: &RoofConfiguration) -> f64 {
        self.categories
            .keys()
            .map(|name| self.category_annual_saving(roof, name))
            .sum()
    }
}

/// Sampling window for a timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Horizon {
    pub years: u32,
    pub points: usize,
}

impl Default for Horizon {
    fn default() -> Self {
        Self {
            years: DEFAULT_YEARS_TO_CALCULATE,
            points: DEFAULT_POINTS,
        }
    }
}

/// A validated engine input: everything the simulator and scorers need.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineInput {
    pub roof: RoofConfiguration,
    pub improvements: ImprovementProfile,
    pub horizon: Horizon,
}

/// One timeline sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimelineSample {
    pub year: f64,
    pub co2_natural: f64,
    pub co2_improved: f64,
}

/// Both CO₂ curves sampled on the same year grid.
///
/// Built once by the simulator and never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSeries {
    years: Vec<f64>,
    #[serde(rename = "co2_with_improvements")]
    co2_improved: Vec<f64>,
    #[serde(rename = "co2_natural_decline")]
    co2_natural: Vec<f64>,
}

impl TimelineSeries {
    /// # Panics
    /// Panics if the three vectors differ in length. The simulator always
    /// builds them from the same grid.
    pub fn new(years: Vec<f64>, co2_natural: Vec<f64>, co2_improved: Vec<f64>) -> Self {
        assert_eq!(years.len(), co2_natural.len());
        assert_eq!(years.len(), co2_improved.len());
        Self {
            years,
            co2_improved,
            co2_natural,
        }
    }

    pub fn years(&self) -> &[f64] {
        &self.years
    }

    pub fn co2_natural(&self) -> &[f64] {
        &self.co2_natural
    }

    pub fn co2_improved(&self) -> &[f64] {
        &self.co2_improved
    }

    pub fn len(&self) -> usize {
        self.years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    pub fn sample(&self, idx: usize) -> Option<TimelineSample> {
        Some(TimelineSample {
            year: *self.years.get(idx)?,
            co2_natural: *self.co2_natural.get(idx)?,
            co2_improved: *self.co2_improved.get(idx)?,
        })
    }

    pub fn samples(&self) -> impl Iterator<Item = TimelineSample> + '_ {
        (0..self.len()).filter_map(|i| self.sample(i))
    }
}

/// First sampled year at which each curve reaches zero (`None` if it never does).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NeutralityResult {
    #[serde(rename = "with_improvements")]
    pub improved_year: Option<f64>,
    #[serde(rename = "natural_decline")]
    pub natural_year: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EconomicsResult {
    /// €.
    pub estimated_cost: f64,
    /// `None` when there are no savings to pay the cost back.
    pub simple_payback_years: Option<f64>,
    /// Percent.
    pub roi_10yr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Savings {
    /// Category → kg CO₂e/yr.
    pub annual: BTreeMap<String, f64>,
    pub total_annual: f64,
    /// Gap between the natural and improved curves at the ten-year sample.
    pub ten_year: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Intensity {
    pub carbon_per_sqm: f64,
    pub reduction_per_euro: f64,
}

/// Five-tier scale used for SDG alignment inside the enhanced pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlignmentRating {
    Exceptional,
    Strong,
    Good,
    Moderate,
    Limited,
}

impl AlignmentRating {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            AlignmentRating::Exceptional
        } else if score >= 70.0 {
            AlignmentRating::Strong
        } else if score >= 50.0 {
            AlignmentRating::Good
        } else if score >= 30.0 {
            AlignmentRating::Moderate
        } else {
            AlignmentRating::Limited
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AlignmentRating::Exceptional => "Exceptional",
            AlignmentRating::Strong => "Strong",
            AlignmentRating::Good => "Good",
            AlignmentRating::Moderate => "Moderate",
            AlignmentRating::Limited => "Limited",
        }
    }
}

/// Seven-tier scale used for the sustainability score and the standalone SDG report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceRating {
    Outstanding,
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
    Satisfactory,
    Fair,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl PerformanceRating {
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            PerformanceRating::Outstanding
        } else if score >= 80.0 {
            PerformanceRating::Excellent
        } else if score >= 70.0 {
            PerformanceRating::VeryGood
        } else if score >= 60.0 {
            PerformanceRating::Good
        } else if score >= 50.0 {
            PerformanceRating::Satisfactory
        } else if score >= 40.0 {
            PerformanceRating::Fair
        } else {
            PerformanceRating::NeedsImprovement
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PerformanceRating::Outstanding => "Outstanding",
            PerformanceRating::Excellent => "Excellent",
            PerformanceRating::VeryGood => "Very Good",
            PerformanceRating::Good => "Good",
            PerformanceRating::Satisfactory => "Satisfactory",
            PerformanceRating::Fair => "Fair",
            PerformanceRating::NeedsImprovement => "Needs Improvement",
        }
    }
}

/// Weighted components that went into a sustainability score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityComponents {
    pub environmental: f64,
    pub social: f64,
    pub health: f64,
    pub sdg: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SustainabilityScore {
    /// Raw composite; not bounded above (the environmental term is unbounded).
    pub value: f64,
    /// `value` clamped to `[0, 100]` for presentation.
    pub display_value: f64,
    pub rating: PerformanceRating,
    pub components: SustainabilityComponents,
}

/// Input of the enhanced pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedRequest {
    pub roof: CalculationConfig,
    #[serde(default)]
    pub social_metrics: BTreeMap<String, f64>,
    #[serde(default)]
    pub health_metrics: BTreeMap<String, f64>,
    #[serde(default)]
    pub sdg_focus: Vec<String>,
    #[serde(default = "default_view_percentage")]
    pub view_percentage: f64,
    #[serde(default = "default_employees")]
    pub employees: u32,
}

pub const DEFAULT_VIEW_PERCENTAGE: f64 = 50.0;
pub const DEFAULT_EMPLOYEES: u32 = 100;

fn default_view_percentage() -> f64 {
    DEFAULT_VIEW_PERCENTAGE
}

fn default_employees() -> u32 {
    DEFAULT_EMPLOYEES
}
