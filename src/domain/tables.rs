//! Constant lookup tables.
//!
//! Everything here is immutable `static` data. Components receive a
//! `&LookupTables` instead of reaching for globals, so tests can hand in their
//! own tables.

use crate::domain::ClimateZone;

/// Climate zone multipliers.
pub const CLIMATE_FACTORS: [(ClimateZone, f64); 5] = [
    (ClimateZone::Temperate, 1.0),
    (ClimateZone::Tropical, 1.2),
    (ClimateZone::Arid, 0.9),
    (ClimateZone::Continental, 1.1),
    (ClimateZone::Polar, 0.8),
];

pub fn climate_factor(zone: ClimateZone) -> f64 {
    CLIMATE_FACTORS
        .iter()
        .find(|(z, _)| *z == zone)
        .map(|(_, f)| *f)
        .unwrap_or(1.0)
}

pub const GREEN_AREAS: &str = "Green Areas";

/// Installation cost per m² by roof category (€).
pub const COST_PER_SQM: &[(&str, f64)] = &[
    (GREEN_AREAS, 120.0),
    ("Solar Power", 350.0),
    ("Water Management", 80.0),
    ("Social Impact", 150.0),
];

pub const DEFAULT_COST_PER_SQM: f64 = 100.0;

/// Importance weight of each social metric.
pub const SOCIAL_WEIGHTS: &[(&str, f64)] = &[
    ("social_network", 0.1),
    ("trust", 0.1),
    ("reciprocity", 0.1),
    ("safety_wellbeing", 0.15),
    ("social_equity", 0.15),
    ("happiness", 0.15),
    ("stress_reduction", 0.15),
    ("quality_of_life", 0.1),
];

pub const DEFAULT_SOCIAL_WEIGHT: f64 = 0.1;

/// Research baselines (%) for a fully green roof seen by every occupant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HealthBaselines {
    pub stress_reduction: f64,
    pub hypertension_reduction: f64,
    pub mortality_reduction: f64,
    pub productivity_increase: f64,
    pub sick_days_reduction: f64,
    /// € per employee per year.
    pub average_salary: f64,
    /// € lost to sick days per employee per year.
    pub sick_day_cost: f64,
}

pub const HEALTH_BASELINES: HealthBaselines = HealthBaselines {
    stress_reduction: 39.4,
    hypertension_reduction: 6.77,
    mortality_reduction: 15.0,
    productivity_increase: 22.6,
    sick_days_reduction: 12.3,
    average_salary: 45_000.0,
    sick_day_cost: 2_000.0,
};

pub const SDG_COUNT: usize = 17;

/// One UN Sustainable Development Goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SdgEntry {
    pub number: u8,
    pub name: &'static str,
    pub description: Option<&'static str>,
    pub contribution: Option<&'static str>,
}

const fn sdg(number: u8, name: &'static str) -> SdgEntry {
    SdgEntry {
        number,
        name,
        description: None,
        contribution: None,
    }
}

const fn sdg_with(
    number: u8,
    name: &'static str,
    description: &'static str,
    contribution: &'static str,
) -> SdgEntry {
    SdgEntry {
        number,
        name,
        description: Some(description),
        contribution: Some(contribution),
    }
}

pub const SDG_CATALOG: [SdgEntry; SDG_COUNT] = [
    sdg(1, "No Poverty"),
    sdg(2, "Zero Hunger"),
    sdg_with(
        3,
        "Good Health and Well-being",
        "Ensure healthy lives and promote well-being for all at all ages",
        "Green roofs lower stress, blood pressure and heat exposure for occupants and neighbours",
    ),
    sdg(4, "Quality Education"),
    sdg(5, "Gender Equality"),
    sdg_with(
        6,
        "Clean Water and Sanitation",
        "Ensure availability and sustainable management of water and sanitation for all",
        "Rainwater retention and filtering reduce runoff and ease pressure on drainage",
    ),
    sdg_with(
        7,
        "Affordable and Clean Energy",
        "Ensure access to affordable, reliable, sustainable and modern energy for all",
        "Rooftop solar generates clean electricity on site",
    ),
    sdg(8, "Decent Work and Economic Growth"),
    sdg_with(
        9,
        "Industry, Innovation and Infrastructure",
        "Build resilient infrastructure and foster innovation",
        "Multi-purpose roofs turn idle surface into resilient building infrastructure",
    ),
    sdg(10, "Reduced Inequalities"),
    sdg_with(
        11,
        "Sustainable Cities and Communities",
        "Make cities inclusive, safe, resilient and sustainable",
        "Shared rooftop spaces add green area and community space in dense districts",
    ),
    sdg_with(
        12,
        "Responsible Consumption and Production",
        "Ensure sustainable consumption and production patterns",
        "Longer roof membrane life and reused materials cut resource use",
    ),
    sdg_with(
        13,
        "Climate Action",
        "Take urgent action to combat climate change and its impacts",
        "Reduced operational emissions and carbon uptake lower the building's footprint",
    ),
    sdg(14, "Life Below Water"),
    sdg_with(
        15,
        "Life on Land",
        "Protect, restore and promote sustainable use of terrestrial ecosystems",
        "Vegetated roofs provide habitat for pollinators and birds",
    ),
    sdg(16, "Peace, Justice and Strong Institutions"),
    sdg(17, "Partnerships for the Goals"),
];

pub const NO_SDG_DESCRIPTION: &str = "No description available";

/// Read-only tables handed to every engine component.
#[derive(Debug, Clone, Copy)]
pub struct LookupTables {
    pub cost_per_sqm: &'static [(&'static str, f64)],
    pub default_cost_per_sqm: f64,
    pub social_weights: &'static [(&'static str, f64)],
    pub default_social_weight: f64,
    pub health: HealthBaselines,
    pub sdg_catalog: &'static [SdgEntry],
}

impl LookupTables {
    pub const STANDARD: LookupTables = LookupTables {
        cost_per_sqm: COST_PER_SQM,
        default_cost_per_sqm: DEFAULT_COST_PER_SQM,
        social_weights: SOCIAL_WEIGHTS,
        default_social_weight: DEFAULT_SOCIAL_WEIGHT,
        health: HEALTH_BASELINES,
        sdg_catalog: &SDG_CATALOG,
    };

    pub fn cost_per_sqm(&self, category: &str) -> f64 {
        lookup(self.cost_per_sqm, category).unwrap_or(self.default_cost_per_sqm)
    }

    pub fn social_weight(&self, metric: &str) -> f64 {
        lookup(self.social_weights, metric).unwrap_or(self.default_social_weight)
    }

    /// Find an SDG by name (case-insensitive) or by `"SDG <n>"` / `"SDG<n>"`.
    pub fn sdg(&self, key: &str) -> Option<&SdgEntry> {
        let key = key.trim();
        if let Some(number) = parse_sdg_number(key) {
            return self.sdg_catalog.iter().find(|e| e.number == number);
        }
        self.sdg_catalog
            .iter()
            .find(|e| e.name.eq_ignore_ascii_case(key))
    }
}

impl Default for LookupTables {
    fn default() -> Self {
        Self::STANDARD
    }
}

fn lookup(table: &[(&str, f64)], key: &str) -> Option<f64> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

fn parse_sdg_number(key: &str) -> Option<u8> {
    let prefix = key.get(..3)?;
    if !prefix.eq_ignore_ascii_case("sdg") {
        return None;
    }
    key[3..].trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn climate_factors_match_zones() {
        assert_eq!(climate_factor(ClimateZone::Temperate), 1.0);
        assert_eq!(climate_factor(ClimateZone::Tropical), 1.2);
        assert_eq!(climate_factor(ClimateZone::Arid), 0.9);
        assert_eq!(climate_factor(ClimateZone::Continental), 1.1);
        assert_eq!(climate_factor(ClimateZone::Polar), 0.8);
    }

    #[test]
    fn unknown_keys_fall_back_to_defaults() {
        let tables = LookupTables::STANDARD;
        assert_eq!(tables.cost_per_sqm("Solar Power"), 350.0);
        assert_eq!(tables.cost_per_sqm("Beehives"), 100.0);
        assert_eq!(tables.social_weight("happiness"), 0.15);
        assert_eq!(tables.social_weight("curiosity"), 0.1);
    }

    #[test]
    fn catalog_has_seventeen_goals_and_eight_descriptions() {
        assert_eq!(SDG_CATALOG.len(), 17);
        let described = SDG_CATALOG.iter().filter(|e| e.description.is_some()).count();
        assert_eq!(described, 8);
        for (i, entry) in SDG_CATALOG.iter().enumerate() {
            assert_eq!(entry.number as usize, i + 1);
        }
    }

    #[test]
    fn sdg_lookup_accepts_names_and_numbers() {
        let tables = LookupTables::STANDARD;
        assert_eq!(tables.sdg("climate action").map(|e| e.number), Some(13));
        assert_eq!(tables.sdg("SDG 7").map(|e| e.number), Some(7));
        assert_eq!(tables.sdg("sdg11").map(|e| e.number), Some(11));
        assert!(tables.sdg("SDG 18").is_none());
        assert!(tables.sdg("Moon Colonies").is_none());
    }
}
