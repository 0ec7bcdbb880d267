//! Timeline simulation: CO₂ with and without roof improvements.
//!
//! Two curves are sampled on the same evenly spaced year grid:
//!
//! - natural decline, closed form: `initial * exp(-rate * t * climate)`
//! - with improvements, a recurrence where each sample is the previous one
//!   after one decay step minus the savings of every active category
//!
//! The recurrence is written as a left fold over the grid, so the simulator has
//! no mutable state beyond the accumulator and returns an immutable series.

use tracing::debug;

use crate::domain::{EngineInput, Horizon, ImprovementProfile, RoofConfiguration, TimelineSeries};
use crate::math::linspace;

/// Remaining effectiveness of an improvement after `years_active` years.
///
/// Linear decay floored at zero; exactly `1.0` when `degradation == 0`.
pub fn efficiency(degradation: f64, years_active: f64) -> f64 {
    (1.0 - degradation * years_active).max(0.0)
}

/// Natural-decline curve evaluated on `years`.
pub fn natural_curve(initial_co2: f64, decline_rate: f64, climate_factor: f64, years: &[f64]) -> Vec<f64> {
    years
        .iter()
        .map(|&t| initial_co2 * (-decline_rate * t * climate_factor).exp())
        .collect()
}

/// An improvement reduced to what a single step needs.
#[derive(Debug, Clone, Copy)]
struct ActiveSaving {
    annual: f64,
    start_year: f64,
}

/// Improved curve evaluated on `years`. Floored at zero.
pub fn improved_curve(roof: &RoofConfiguration, improvements: &ImprovementProfile, years: &[f64]) -> Vec<f64> {
    let Some((_, rest)) = years.split_first() else {
        return Vec::new();
    };

    let climate = roof.climate_zone.factor();
    let step_decay = (-roof.decline_rate * climate).exp();
    let points = years.len() as f64;
    let degradation = improvements.efficiency_degradation;

    let savings: Vec<ActiveSaving> = improvements
        .categories
        .iter()
        .map(|(name, c)| ActiveSaving {
            annual: improvements.category_annual_saving(roof, name),
            start_year: f64::from(c.start_year),
        })
        .collect();

    let initial = roof.initial_co2();
    let tail = rest.iter().scan(initial, |co2, &year| {
        let next = savings
            .iter()
            .filter(|s| s.start_year <= year)
            .fold(*co2 * step_decay, |acc, s| {
                let eff = efficiency(degradation, year - s.start_year);
                acc - (s.annual * eff / points) * climate
            });
        *co2 = next.max(0.0);
        Some(*co2)
    });

    std::iter::once(initial).chain(tail).collect()
}

/// Run the simulator for validated input.
pub fn simulate(input: &EngineInput) -> TimelineSeries {
    simulate_parts(&input.roof, &input.improvements, input.horizon)
}

/// Run the simulator on explicit parts.
pub fn simulate_parts(
    roof: &RoofConfiguration,
    improvements: &ImprovementProfile,
    horizon: Horizon,
) -> TimelineSeries {
    let years = linspace(0.0, f64::from(horizon.years), horizon.points);
    let natural = natural_curve(
        roof.initial_co2(),
        roof.decline_rate,
        roof.climate_zone.factor(),
        &years,
    );
    let improved = improved_curve(roof, improvements, &years);

    debug!(
        target: "engine.timeline",
        initial_co2 = roof.initial_co2(),
        points = horizon.points,
        years = horizon.years,
        climate = %roof.climate_zone,
        "Timeline simulated"
    );

    TimelineSeries::new(years, natural, improved)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use super::*;
    use crate::domain::{CategoryImprovement, ClimateZone};

    fn roof(decline_rate: f64, zone: ClimateZone) -> RoofConfiguration {
        RoofConfiguration {
            area: 2000.0,
            gwp_factor: 3.0,
            decline_rate,
            climate_zone: zone,
            division: BTreeMap::from([
                ("Green Areas".to_string(), 25.0),
                ("Solar Power".to_string(), 25.0),
                ("Water Management".to_string(), 25.0),
                ("Social Impact".to_string(), 25.0),
            ]),
        }
    }

    fn improvements(start_year: u32, degradation: f64) -> ImprovementProfile {
        let savings = [
            ("Green Areas", 1347.98),
            ("Solar Power", 12142.5),
            ("Water Management", 1441.25),
            ("Social Impact", 4180.0),
        ];
        ImprovementProfile {
            categories: savings
                .iter()
                .map(|(name, s)| {
                    (
                        name.to_string(),
                        CategoryImprovement {
                            full_annual_saving: *s,
                            start_year,
                        },
                    )
                })
                .collect(),
            efficiency_degradation: degradation,
        }
    }

    #[test]
    fn initial_value_and_grid() {
        let r = roof(0.02, ClimateZone::Temperate);
        let series = simulate_parts(&r, &improvements(0, 0.005), Horizon::default());
        assert_eq!(series.len(), 1000);
        assert_eq!(series.years()[0], 0.0);
        assert_eq!(series.years()[999], 50.0);
        assert_eq!(series.co2_improved()[0], 6000.0);
        assert_eq!(series.co2_natural()[0], 6000.0);
    }

    #[test]
    fn natural_curve_matches_closed_form() {
        let r = roof(0.03, ClimateZone::Tropical);
        let series = simulate_parts(&r, &improvements(0, 0.005), Horizon { years: 20, points: 5 });
        for s in series.samples() {
            let expected = 6000.0 * (-0.03 * s.year * 1.2).exp();
            assert!((s.co2_natural - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn improved_curve_without_active_savings_is_pure_step_decay() {
        let r = roof(0.02, ClimateZone::Continental);
        let series = simulate_parts(&r, &improvements(100, 0.0), Horizon { years: 50, points: 200 });
        let decay = (-0.02_f64 * 1.1).exp();
        let mut expected = 6000.0;
        for (i, &v) in series.co2_improved().iter().enumerate() {
            if i > 0 {
                expected *= decay;
            }
            assert_eq!(v, expected);
        }
    }

    #[test]
    fn savings_only_apply_from_start_year() {
        let r = roof(0.0, ClimateZone::Temperate);
        let series = simulate_parts(&r, &improvements(10, 0.0), Horizon { years: 20, points: 21 });
        let improved = series.co2_improved();
        // No decay and nothing active before year 10.
        for &v in &improved[..10] {
            assert_eq!(v, 6000.0);
        }
        let per_step = 4777.9325 / 21.0;
        assert!((improved[10] - (6000.0 - per_step)).abs() < 1e-9);
        assert!((improved[11] - (6000.0 - 2.0 * per_step)).abs() < 1e-9);
    }

    #[test]
    fn improved_curve_reaches_floor_and_stays_there() {
        let r = roof(0.02, ClimateZone::Temperate);
        let series = simulate_parts(&r, &improvements(0, 0.005), Horizon::default());
        let improved = series.co2_improved();
        let first_zero = improved.iter().position(|&v| v == 0.0).unwrap();
        assert!(improved[first_zero..].iter().all(|&v| v == 0.0));
        assert!(improved.iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn zero_degradation_keeps_full_efficiency() {
        for years_active in [0.0, 0.5, 10.0, 49.95, 1000.0] {
            assert_eq!(efficiency(0.0, years_active), 1.0);
        }
    }

    #[test]
    fn efficiency_is_non_increasing_and_floored() {
        let mut prev = efficiency(0.05, 0.0);
        for i in 1..100 {
            let e = efficiency(0.05, i as f64 * 0.5);
            assert!(e <= prev);
            assert!(e >= 0.0);
            prev = e;
        }
        assert_eq!(efficiency(0.05, 40.0), 0.0);
    }

    #[test]
    fn identical_inputs_are_bit_identical() {
        let r = roof(0.015, ClimateZone::Arid);
        let imp = improvements(2, 0.01);
        let a = simulate_parts(&r, &imp, Horizon::default());
        let b = simulate_parts(&r, &imp, Horizon::default());
        assert_eq!(a, b);
    }

    #[test]
    fn single_point_horizon_holds_only_the_initial_value() {
        let r = roof(0.02, ClimateZone::Polar);
        let series = simulate_parts(&r, &improvements(0, 0.0), Horizon { years: 50, points: 1 });
        assert_eq!(series.years(), &[0.0]);
        assert_eq!(series.co2_improved(), &[6000.0]);
        assert_eq!(series.co2_natural(), &[6000.0]);
    }

    #[test]
    fn randomized_curve_invariants() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..60 {
            let zone = ClimateZone::ALL[rng.gen_range(0..ClimateZone::ALL.len())];
            let split = rng.gen_range(0.0..=100.0);
            let r = RoofConfiguration {
                area: rng.gen_range(1.0..5000.0),
                gwp_factor: rng.gen_range(0.1..10.0),
                decline_rate: rng.gen_range(0.001..0.99),
                climate_zone: zone,
                division: BTreeMap::from([
                    ("Green Areas".to_string(), split),
                    ("Solar Power".to_string(), 100.0 - split),
                ]),
            };
            let imp = ImprovementProfile {
                categories: ["Green Areas", "Solar Power"]
                    .iter()
                    .map(|name| {
                        (
                            name.to_string(),
                            CategoryImprovement {
                                full_annual_saving: rng.gen_range(0.0..20_000.0),
                                start_year: rng.gen_range(0..30),
                            },
                        )
                    })
                    .collect(),
                efficiency_degradation: rng.gen_range(0.0..0.05),
            };
            let horizon = Horizon {
                years: rng.gen_range(1..100),
                points: rng.gen_range(2..500),
            };

            let series = simulate_parts(&r, &imp, horizon);
            assert!(series.co2_improved().iter().all(|&v| v >= 0.0));
            assert_eq!(series.co2_improved()[0], r.initial_co2());
            for w in series.co2_natural().windows(2) {
                assert!(w[1] < w[0], "natural curve must strictly decrease");
            }
        }
    }
}
