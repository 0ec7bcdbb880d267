//! SDG alignment: score, rating and gap recommendations.
//!
//! Two rating scales are in use:
//! - the enhanced pipeline rates alignment on the five-tier `AlignmentRating`
//! - the standalone SDG report rates it on the seven-tier `PerformanceRating`

use serde::{Deserialize, Serialize};

use crate::domain::tables::{NO_SDG_DESCRIPTION, SDG_COUNT, SdgEntry};
use crate::domain::{AlignmentRating, LookupTables, PerformanceRating};

/// Maximum number of unaddressed goals suggested by gap analysis.
pub const MAX_GAPS: usize = 3;

/// One addressed goal, with catalog text where available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdgDetail {
    /// `None` when the name is not in the catalog.
    pub number: Option<u8>,
    pub name: String,
    pub description: String,
    pub contribution: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdgGap {
    pub number: u8,
    pub name: String,
    pub suggestion: String,
}

/// Alignment as reported inside the enhanced pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdgAlignment {
    pub score: f64,
    pub rating: AlignmentRating,
    pub addressed: Vec<SdgDetail>,
    pub gaps: Vec<SdgGap>,
}

/// Standalone SDG report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdgReport {
    pub score: f64,
    pub rating: PerformanceRating,
    pub total_goals: usize,
    pub addressed: Vec<SdgDetail>,
    pub gaps: Vec<SdgGap>,
}

/// `min(100, addressed / 17 * 100)`.
pub fn alignment_score(addressed: &[String]) -> f64 {
    (addressed.len() as f64 / SDG_COUNT as f64 * 100.0).min(100.0)
}

pub fn describe(name: &str, tables: &LookupTables) -> SdgDetail {
    match tables.sdg(name) {
        Some(entry) => SdgDetail {
            number: Some(entry.number),
            name: entry.name.to_string(),
            description: entry.description.unwrap_or(NO_SDG_DESCRIPTION).to_string(),
            contribution: entry.contribution.unwrap_or(NO_SDG_DESCRIPTION).to_string(),
        },
        None => SdgDetail {
            number: None,
            name: name.trim().to_string(),
            description: NO_SDG_DESCRIPTION.to_string(),
            contribution: NO_SDG_DESCRIPTION.to_string(),
        },
    }
}

/// Up to `limit` catalog goals (in catalog order) that nobody addressed.
pub fn gap_analysis(addressed: &[String], tables: &LookupTables, limit: usize) -> Vec<SdgGap> {
    let covered: Vec<u8> = addressed
        .iter()
        .filter_map(|name| tables.sdg(name).map(|e| e.number))
        .collect();

    tables
        .sdg_catalog
        .iter()
        .filter(|e| !covered.contains(&e.number))
        .take(limit)
        .map(gap_for)
        .collect()
}

fn gap_for(entry: &SdgEntry) -> SdgGap {
    SdgGap {
        number: entry.number,
        name: entry.name.to_string(),
        suggestion: format!(
            "Consider adding roof features that contribute to SDG {} ({})",
            entry.number, entry.name
        ),
    }
}

pub fn align(addressed: &[String], tables: &LookupTables) -> SdgAlignment {
    let score = alignment_score(addressed);
    SdgAlignment {
        score,
        rating: AlignmentRating::from_score(score),
        addressed: addressed.iter().map(|name| describe(name, tables)).collect(),
        gaps: gap_analysis(addressed, tables, MAX_GAPS),
    }
}

pub fn report(addressed: &[String], tables: &LookupTables) -> SdgReport {
    let score = alignment_score(addressed);
    SdgReport {
        score,
        rating: PerformanceRating::from_score(score),
        total_goals: SDG_COUNT,
        addressed: addressed.iter().map(|name| describe(name, tables)).collect(),
        gaps: gap_analysis(addressed, tables, MAX_GAPS),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn four_goals_score_about_23_53() {
        let addressed = names(&[
            "Climate Action",
            "Good Health and Well-being",
            "Sustainable Cities and Communities",
            "Life on Land",
        ]);
        let score = alignment_score(&addressed);
        assert!((score - 4.0 / 17.0 * 100.0).abs() < 1e-12);
        assert!((score - 23.53).abs() < 0.01);
    }

    #[test]
    fn score_is_capped_at_one_hundred() {
        let addressed: Vec<String> = (0..20).map(|i| format!("SDG {i}")).collect();
        assert_eq!(alignment_score(&addressed), 100.0);
        assert_eq!(alignment_score(&[]), 0.0);
    }

    #[test]
    fn the_two_call_sites_use_different_scales() {
        let tables = LookupTables::STANDARD;
        // 9/17 ≈ 52.9
        let addressed: Vec<String> = (1..=9).map(|i| format!("SDG {i}")).collect();
        assert_eq!(align(&addressed, &tables).rating, AlignmentRating::Good);
        assert_eq!(report(&addressed, &tables).rating, PerformanceRating::Satisfactory);
    }

    #[test]
    fn undescribed_goals_fall_back() {
        let tables = LookupTables::STANDARD;
        let detail = describe("Zero Hunger", &tables);
        assert_eq!(detail.number, Some(2));
        assert_eq!(detail.description, NO_SDG_DESCRIPTION);

        let unknown = describe("Space Exploration", &tables);
        assert_eq!(unknown.number, None);
        assert_eq!(unknown.contribution, NO_SDG_DESCRIPTION);

        let known = describe("sdg 13", &tables);
        assert_eq!(known.name, "Climate Action");
        assert_ne!(known.description, NO_SDG_DESCRIPTION);
    }

    #[test]
    fn gaps_skip_addressed_goals_and_stop_at_three() {
        let tables = LookupTables::STANDARD;
        let gaps = gap_analysis(&names(&["No Poverty", "SDG 3"]), &tables, MAX_GAPS);
        let numbers: Vec<u8> = gaps.iter().map(|g| g.number).collect();
        assert_eq!(numbers, vec![2, 4, 5]);
        assert!(gaps[0].suggestion.contains("Zero Hunger"));

        let all: Vec<String> = (1..=17).map(|i| format!("SDG {i}")).collect();
        assert!(gap_analysis(&all, &tables, MAX_GAPS).is_empty());
    }
}
