//! Command-line parsing for the roof carbon projection tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the engine code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{CalculationConfig, ClimateZone, DEFAULT_EMPLOYEES, DEFAULT_VIEW_PERCENTAGE};

pub mod picker;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "roofc", version, about = "Roof improvement carbon projection and scoring")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Project the CO2 timeline, neutrality year and economics for one roof.
    Calc(CalcArgs),
    /// Base calculation plus social, health, SDG and sustainability scores.
    Enhanced(EnhancedArgs),
    /// Exposure-scaled health impact of a green roof.
    Health(HealthArgs),
    /// Standalone SDG alignment report.
    Sdg(SdgArgs),
    /// Run several configurations side by side.
    Compare(CompareArgs),
    /// Plot a previously exported calculation result.
    Plot(PlotArgs),
    /// Launch the interactive TUI.
    ///
    /// This uses the same pipeline as `roofc calc`, but renders results
    /// in a terminal UI using Ratatui.
    Tui(TuiArgs),
}

/// Flags that override fields of a loaded configuration.
#[derive(Debug, Args, Clone, Default)]
pub struct OverrideArgs {
    /// Climate zone (temperate, tropical, arid, continental, polar).
    #[arg(long, value_enum)]
    pub climate_zone: Option<ClimateZone>,

    /// Horizon in years.
    #[arg(long)]
    pub years: Option<u32>,

    /// Number of timeline samples.
    #[arg(long)]
    pub points: Option<usize>,

    /// Annual efficiency loss of each improvement.
    #[arg(long)]
    pub efficiency_degradation: Option<f64>,
}

impl OverrideArgs {
    pub fn apply(&self, config: &mut CalculationConfig) {
        if let Some(zone) = self.climate_zone {
            config.climate_zone = zone;
        }
        if let Some(years) = self.years {
            config.years_to_calculate = years;
        }
        if let Some(points) = self.points {
            config.points = points;
        }
        if let Some(deg) = self.efficiency_degradation {
            config.efficiency_degradation = deg;
        }
    }
}

#[derive(Debug, Args, Clone)]
pub struct CalcArgs {
    /// Configuration JSON (falls back to ROOFC_CONFIG, then an interactive picker).
    #[arg(short = 'c', long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Print the full result as JSON instead of the text report.
    #[arg(long)]
    pub json: bool,

    /// Render an ASCII plot of both curves after the report.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,

    /// Write the result (with a timestamped envelope) to a JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct EnhancedArgs {
    /// Enhanced request JSON (`{roof, social_metrics, health_metrics, sdg_focus, ...}`).
    #[arg(short = 'c', long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Print the full result as JSON instead of the text report.
    #[arg(long)]
    pub json: bool,

    /// Write the result (with a timestamped envelope) to a JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct HealthArgs {
    /// Total roof area (m2).
    #[arg(long)]
    pub area: f64,

    /// Share of the roof given to Green Areas (%).
    #[arg(long)]
    pub green_pct: f64,

    /// Share of occupants with a view of the green roof (%).
    #[arg(long, default_value_t = DEFAULT_VIEW_PERCENTAGE)]
    pub view: f64,

    /// Number of employees in the building.
    #[arg(long, default_value_t = DEFAULT_EMPLOYEES)]
    pub employees: u32,

    /// Print JSON instead of the text report.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct SdgArgs {
    /// Goals addressed, by name or as "SDG n".
    #[arg(required = true, value_name = "SDG")]
    pub goals: Vec<String>,

    /// Print JSON instead of the text report.
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args, Clone)]
pub struct CompareArgs {
    /// Scenario configuration JSON files; each is named after its file stem.
    #[arg(short = 'c', long = "config", value_name = "JSON", required = true, num_args = 1..)]
    pub configs: Vec<PathBuf>,

    /// Applied to every scenario.
    #[command(flatten)]
    pub overrides: OverrideArgs,

    /// Print the full comparison as JSON instead of the table.
    #[arg(long)]
    pub json: bool,

    /// Write the comparison (with a timestamped envelope) to a JSON file.
    #[arg(long, value_name = "JSON")]
    pub export: Option<PathBuf>,
}

/// Options for plotting a saved result.
#[derive(Debug, Args, Clone)]
pub struct PlotArgs {
    /// Result JSON produced by `roofc calc --export`.
    #[arg(long, value_name = "JSON")]
    pub result: PathBuf,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

#[derive(Debug, Args, Clone, Default)]
pub struct TuiArgs {
    /// Configuration JSON (falls back to ROOFC_CONFIG, then an interactive picker).
    #[arg(short = 'c', long, value_name = "JSON")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: OverrideArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn calc_parses_overrides() {
        let cli = Cli::parse_from([
            "roofc",
            "calc",
            "--config",
            "roof.json",
            "--climate-zone",
            "arid",
            "--years",
            "30",
            "--efficiency-degradation",
            "0.01",
        ]);
        let Command::Calc(args) = cli.command else {
            panic!("expected calc");
        };
        assert_eq!(args.config, Some(PathBuf::from("roof.json")));
        assert_eq!(args.overrides.climate_zone, Some(ClimateZone::Arid));
        assert_eq!(args.overrides.years, Some(30));
        assert_eq!(args.overrides.points, None);
        assert!(!args.json);
    }

    #[test]
    fn compare_accepts_several_configs() {
        let cli = Cli::parse_from(["roofc", "compare", "-c", "a.json", "b.json"]);
        let Command::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.configs.len(), 2);
    }

    #[test]
    fn health_defaults() {
        let cli = Cli::parse_from(["roofc", "health", "--area", "2776", "--green-pct", "25"]);
        let Command::Health(args) = cli.command else {
            panic!("expected health");
        };
        assert_eq!(args.view, 50.0);
        assert_eq!(args.employees, 100);
    }

    #[test]
    fn sdg_requires_a_goal() {
        assert!(Cli::try_parse_from(["roofc", "sdg"]).is_err());
    }
}
