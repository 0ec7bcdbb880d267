//! Interactive configuration picker.
//!
//! Used when a command is run without `--config` and `ROOFC_CONFIG` is unset.
//! Discovery lives in [`crate::io::config`]; only files that parse as the
//! document the command needs are offered, each with a short roof summary.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::io::{ConfigCandidate, ConfigKind, DISCOVERY_DEPTH, classify, discover_configs, is_json};

/// List matching configurations under the working directory and read a choice.
///
/// A number picks from the list, anything else is taken as a path, `q` cancels.
pub fn prompt_for_config_path(kind: ConfigKind) -> Result<PathBuf, AppError> {
    let candidates = discover_configs(Path::new("."), kind, DISCOVERY_DEPTH);
    if candidates.is_empty() {
        return Err(AppError::new(
            2,
            format!("No {} found here. Pass one with --config <file.json>.", kind.label()),
        ));
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    select(&candidates, kind, &mut stdin.lock(), &mut stdout)
}

fn select(
    candidates: &[ConfigCandidate],
    kind: ConfigKind,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<PathBuf, AppError> {
    let io_err = |e: io::Error| AppError::new(2, format!("Terminal I/O failed: {e}"));

    writeln!(output, "Select a {}:", kind.label()).map_err(io_err)?;
    for (idx, candidate) in candidates.iter().enumerate() {
        writeln!(
            output,
            "{:>3}) {:<40} {}",
            idx + 1,
            display_path(&candidate.path),
            candidate.summary()
        )
        .map_err(io_err)?;
    }

    loop {
        write!(output, "Number (1-{}), path, or q: ", candidates.len()).map_err(io_err)?;
        output.flush().map_err(io_err)?;

        let mut line = String::new();
        if input.read_line(&mut line).map_err(io_err)? == 0 {
            return Err(AppError::new(2, "No selection made."));
        }
        let answer = line.trim();
        if answer.eq_ignore_ascii_case("q") {
            return Err(AppError::new(2, "Canceled."));
        }

        if let Ok(choice) = answer.parse::<usize>() {
            match candidates.get(choice.wrapping_sub(1)) {
                Some(candidate) => return Ok(candidate.path.clone()),
                None => writeln!(output, "No entry {choice}.").map_err(io_err)?,
            }
            continue;
        }

        let path = Path::new(answer);
        if is_json(path) && classify(path, kind).is_some() {
            return Ok(path.to_path_buf());
        }
        writeln!(output, "'{answer}' is not a readable {} JSON file.", kind.label()).map_err(io_err)?;
    }
}

fn display_path(path: &Path) -> String {
    path.strip_prefix(".").unwrap_or(path).display().to_string()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::io::Cursor;

    use super::*;
    use crate::domain::{CalculationConfig, ClimateZone};

    fn candidate(path: &str) -> ConfigCandidate {
        ConfigCandidate {
            path: PathBuf::from(path),
            roof: CalculationConfig {
                roof_area: 1200.0,
                gwp_roof: 2.0,
                decline_rate: 0.01,
                roof_division: BTreeMap::from([("Green Areas".to_string(), 100.0)]),
                full_savings: BTreeMap::new(),
                improvement_years: BTreeMap::new(),
                climate_zone: ClimateZone::Polar,
                efficiency_degradation: 0.005,
                years_to_calculate: 30,
                points: 100,
            },
        }
    }

    #[test]
    fn number_selects_after_a_bad_entry() {
        let list = [candidate("./a.json"), candidate("./runs/b.json")];
        let mut input = Cursor::new("7\n0\n2\n");
        let mut shown = Vec::new();

        let picked = select(&list, ConfigKind::Calculation, &mut input, &mut shown).unwrap();

        let shown = String::from_utf8(shown).unwrap();
        assert_eq!(picked, PathBuf::from("./runs/b.json"));
        assert!(shown.contains("runs/b.json"));
        assert!(shown.contains("1200 m2, 1 categories, polar, 30 y"));
        assert!(shown.contains("No entry 7."));
        assert!(shown.contains("No entry 0."));
    }

    #[test]
    fn quit_and_end_of_input_cancel() {
        let list = [candidate("./a.json")];
        let err = select(&list, ConfigKind::Enhanced, &mut Cursor::new("q\n"), &mut Vec::new()).unwrap_err();
        assert_eq!(err.message(), "Canceled.");
        let err = select(&list, ConfigKind::Enhanced, &mut Cursor::new(""), &mut Vec::new()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn typed_path_must_parse_as_the_requested_kind() {
        let list = [candidate("./a.json")];
        let mut shown = Vec::new();
        let err = select(
            &list,
            ConfigKind::Calculation,
            &mut Cursor::new("Cargo.toml\nmissing.json\n"),
            &mut shown,
        )
        .unwrap_err();
        let shown = String::from_utf8(shown).unwrap();
        assert_eq!(err.message(), "No selection made.");
        assert!(shown.contains("'Cargo.toml' is not a readable roof configuration JSON file."));
    }
}
