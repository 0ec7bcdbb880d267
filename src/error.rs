//! Error types.
//!
//! - `EngineError` is what the projection/scoring engine returns. It carries the
//!   human-readable message a calling layer shows to the user.
//! - `AppError` is the binary-facing error with a process exit code.

use thiserror::Error;

/// Engine failures. All of them are caller input problems; nothing here is transient.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("{0}")]
    Validation(String),
    #[error("Unknown climate zone '{0}' (expected temperate, tropical, arid, continental or polar)")]
    UnknownClimateZone(String),
}

impl EngineError {
    pub fn validation(message: impl Into<String>) -> Self {
        EngineError::Validation(message.into())
    }
}

#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<EngineError> for AppError {
    fn from(err: EngineError) -> Self {
        AppError::new(3, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
