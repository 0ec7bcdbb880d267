//! Read and discover configuration JSON files.
//!
//! Missing optional fields take their defaults through serde; everything
//! else is checked by the engine's validation, not here.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;

use crate::domain::{CalculationConfig, EnhancedRequest};
use crate::error::AppError;

/// How deep below the search root discovery descends.
pub const DISCOVERY_DEPTH: usize = 4;

/// Which document a command expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKind {
    /// A bare roof configuration (`calc`, `tui`).
    Calculation,
    /// `{roof, social_metrics, ...}` (`enhanced`).
    Enhanced,
}

impl ConfigKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::Calculation => "roof configuration",
            Self::Enhanced => "enhanced request",
        }
    }
}

/// A discovered file that parsed as the requested kind.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigCandidate {
    pub path: PathBuf,
    /// The roof inside the file, for listing.
    pub roof: CalculationConfig,
}

impl ConfigCandidate {
    /// One-line description used by the picker.
    pub fn summary(&self) -> String {
        format!(
            "{:.0} m2, {} categories, {}, {} y",
            self.roof.roof_area,
            self.roof.roof_division.len(),
            self.roof.climate_zone.as_str(),
            self.roof.years_to_calculate
        )
    }
}

/// Parse `path` as `kind`, returning the roof it describes.
///
/// Exported results and unrelated JSON come back as `None`.
pub fn classify(path: &Path, kind: ConfigKind) -> Option<CalculationConfig> {
    let file = File::open(path).ok()?;
    let value: serde_json::Value = serde_json::from_reader(BufReader::new(file)).ok()?;
    match kind {
        ConfigKind::Calculation => serde_json::from_value::<CalculationConfig>(value).ok(),
        ConfigKind::Enhanced => serde_json::from_value::<EnhancedRequest>(value)
            .ok()
            .map(|request| request.roof),
    }
}

/// Find `*.json` files under `root` that parse as `kind`, sorted by path.
///
/// Build output, VCS and hidden directories are not entered.
pub fn discover_configs(root: &Path, kind: ConfigKind, max_depth: usize) -> Vec<ConfigCandidate> {
    let mut found = Vec::new();
    let mut pending = vec![(root.to_path_buf(), 0usize)];

    while let Some((dir, depth)) = pending.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            if file_type.is_dir() {
                if depth < max_depth && !is_ignored_dir(&path) {
                    pending.push((path, depth + 1));
                }
            } else if file_type.is_file() && is_json(&path) {
                if let Some(roof) = classify(&path, kind) {
                    found.push(ConfigCandidate { path, roof });
                }
            }
        }
    }

    found.sort_by(|a, b| a.path.cmp(&b.path));
    found
}

pub fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn is_ignored_dir(path: &Path) -> bool {
    let name = path.file_name().and_then(|s| s.to_str()).unwrap_or("");
    name.starts_with('.') || matches!(name, "target" | "node_modules")
}

/// Read a base calculation configuration.
pub fn read_config_json(path: &Path) -> Result<CalculationConfig, AppError> {
    read_json(path, "configuration")
}

/// Read an enhanced request (`{roof, social_metrics, health_metrics, sdg_focus, ...}`).
pub fn read_enhanced_json(path: &Path) -> Result<EnhancedRequest, AppError> {
    read_json(path, "enhanced request")
}

/// Read several scenario configurations, naming each after its file stem.
pub fn read_scenarios(paths: &[PathBuf]) -> Result<(Vec<String>, Vec<CalculationConfig>), AppError> {
    let mut names = Vec::with_capacity(paths.len());
    let mut configs = Vec::with_capacity(paths.len());
    for path in paths {
        names.push(scenario_name(path));
        configs.push(read_config_json(path)?);
    }
    Ok((names, configs))
}

fn scenario_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn read_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open {what} JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::new(2, format!("Invalid {what} JSON '{}': {e}", path.display())))
}
