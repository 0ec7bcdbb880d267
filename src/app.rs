//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and installs the log subscriber
//! - parses CLI arguments
//! - resolves and reads configuration files
//! - runs the engine pipelines
//! - prints reports/plots and writes optional exports

use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use crate::app::pipeline::CalculationOutput;
use crate::cli::{
    CalcArgs, Command, CompareArgs, EnhancedArgs, HealthArgs, OverrideArgs, PlotArgs, SdgArgs,
};
use crate::domain::tables::GREEN_AREAS;
use crate::domain::{CalculationConfig, LookupTables};
use crate::error::AppError;
use crate::io::{ConfigKind, ResultFile};

pub mod pipeline;

/// Log filter (`EnvFilter` syntax), e.g. `ROOFC_LOG=engine=debug`.
pub const LOG_ENV: &str = "ROOFC_LOG";
/// Default configuration path when `--config` is omitted.
pub const CONFIG_ENV: &str = "ROOFC_CONFIG";

/// Entry point for the `roofc` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    // We want `roofc` and `roofc --climate-zone arid` to behave like `roofc tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);
    let tables = LookupTables::STANDARD;

    match cli.command {
        Command::Calc(args) => handle_calc(args, &tables),
        Command::Enhanced(args) => handle_enhanced(args, &tables),
        Command::Health(args) => handle_health(args, &tables),
        Command::Sdg(args) => handle_sdg(args, &tables),
        Command::Compare(args) => handle_compare(args, &tables),
        Command::Plot(args) => handle_plot(args),
        Command::Tui(args) => {
            let config = load_config(args.config.as_deref(), &args.overrides)?;
            crate::tui::run(config, tables)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    // A second install (tests, embedding) is not an error worth surfacing.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn handle_calc(args: CalcArgs, tables: &LookupTables) -> Result<(), AppError> {
    let config = load_config(args.config.as_deref(), &args.overrides)?;
    let out = pipeline::run_calculation(&config, tables)?;

    if args.json {
        print_json(&out)?;
    } else {
        println!("{}", crate::report::format_calculation_report(&out));
        if args.plot {
            println!(
                "{}",
                crate::plot::render_timeline_plot(&out.timeline, args.width, args.height)
            );
        }
    }

    if let Some(path) = &args.export {
        crate::io::write_result_json(path, &out)?;
        debug!(target: "app", path = %path.display(), "Wrote result");
    }
    Ok(())
}

fn handle_enhanced(args: EnhancedArgs, tables: &LookupTables) -> Result<(), AppError> {
    let path = resolve_config_path(args.config.as_deref(), ConfigKind::Enhanced)?;
    let mut request = crate::io::read_enhanced_json(&path)?;
    args.overrides.apply(&mut request.roof);

    if !request.roof.roof_division.contains_key(GREEN_AREAS) {
        warn!(
            target: "app",
            "Roof division has no '{GREEN_AREAS}' entry; the health impact will be zero"
        );
    }

    let out = pipeline::run_enhanced(&request, tables)?;
    if args.json {
        print_json(&out)?;
    } else {
        println!("{}", crate::report::format_enhanced_report(&out));
    }

    if let Some(path) = &args.export {
        crate::io::write_result_json(path, &out)?;
    }
    Ok(())
}

fn handle_health(args: HealthArgs, tables: &LookupTables) -> Result<(), AppError> {
    let impact = crate::score::social::health_impact(
        args.area,
        args.green_pct,
        args.view,
        args.employees,
        tables,
    )?;
    if args.json {
        print_json(&impact)
    } else {
        println!("{}", crate::report::format_health_report(&impact));
        Ok(())
    }
}

fn handle_sdg(args: SdgArgs, tables: &LookupTables) -> Result<(), AppError> {
    let report = crate::score::sdg::report(&args.goals, tables);
    if args.json {
        print_json(&report)
    } else {
        println!("{}", crate::report::format_sdg_report(&report));
        Ok(())
    }
}

fn handle_compare(args: CompareArgs, tables: &LookupTables) -> Result<(), AppError> {
    let (names, mut configs) = crate::io::read_scenarios(&args.configs)?;
    for config in &mut configs {
        args.overrides.apply(config);
    }

    let cmp = pipeline::compare_scenarios(&names, &configs, tables)?;
    if args.json {
        print_json(&cmp)?;
    } else {
        println!("{}", crate::report::format_comparison(&cmp));
    }

    if let Some(path) = &args.export {
        crate::io::write_result_json(path, &cmp)?;
    }
    Ok(())
}

fn handle_plot(args: PlotArgs) -> Result<(), AppError> {
    let file: ResultFile<CalculationOutput> = crate::io::read_result_json(&args.result)?;
    println!("Result written {} by {}", file.generated_at.to_rfc3339(), file.tool);
    println!(
        "{}",
        crate::plot::render_timeline_plot(&file.result.timeline, args.width, args.height)
    );
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let txt = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::new(2, format!("Failed to serialize result: {e}")))?;
    println!("{txt}");
    Ok(())
}

/// Load a base configuration and apply flag overrides.
pub fn load_config(explicit: Option<&Path>, overrides: &OverrideArgs) -> Result<CalculationConfig, AppError> {
    let path = resolve_config_path(explicit, ConfigKind::Calculation)?;
    let mut config = crate::io::read_config_json(&path)?;
    overrides.apply(&mut config);
    Ok(config)
}

/// `--config`, then `ROOFC_CONFIG`, then the interactive picker.
fn resolve_config_path(explicit: Option<&Path>, kind: ConfigKind) -> Result<PathBuf, AppError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        if !path.trim().is_empty() {
            debug!(target: "app", path = %path, "Using config from {CONFIG_ENV}");
            return Ok(PathBuf::from(path));
        }
    }
    crate::cli::picker::prompt_for_config_path(kind)
}

/// Rewrite argv so `roofc` defaults to `roofc tui`.
///
/// Rules:
/// - `roofc`                         -> `roofc tui`
/// - `roofc --climate-zone arid ...` -> `roofc tui --climate-zone arid ...`
/// - `roofc --help/--version/-h`     -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(
        arg1.as_str(),
        "calc" | "enhanced" | "health" | "sdg" | "compare" | "plot" | "tui"
    );
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    argv
}
