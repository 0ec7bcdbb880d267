//! Read/write result JSON files.
//!
//! A result file wraps an engine output in a small envelope:
//! - the tool name
//! - the time the file was written (`generated_at`, UTC)
//! - the output itself under `result`
//!
//! The engine never stamps times; only this layer does.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

pub const TOOL_NAME: &str = "roofc";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultFile<T> {
    pub tool: String,
    pub generated_at: DateTime<Utc>,
    pub result: T,
}

impl<T> ResultFile<T> {
    pub fn stamped(result: T) -> Self {
        Self {
            tool: TOOL_NAME.to_string(),
            generated_at: Utc::now(),
            result,
        }
    }
}

/// Write `result` wrapped in a freshly stamped envelope.
pub fn write_result_json<T: Serialize>(path: &Path, result: &T) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create result JSON '{}': {e}", path.display())))?;

    let envelope = ResultFile::stamped(result);
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &envelope)
        .map_err(|e| AppError::new(2, format!("Failed to write result JSON: {e}")))?;
    // Small results sit entirely in the buffer until here.
    writer
        .flush()
        .map_err(|e| AppError::new(2, format!("Failed to write result JSON '{}': {e}", path.display())))?;

    Ok(())
}

/// Read a result file written by [`write_result_json`].
pub fn read_result_json<T: DeserializeOwned>(path: &Path) -> Result<ResultFile<T>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open result JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AppError::new(2, format!("Invalid result JSON '{}': {e}", path.display())))
}
