//! Error types for the CLI host layer
//!
//! The engine itself is infallible by design (`analyze` always returns a
//! result); these errors cover the surrounding host concerns of locating
//! and reading the file to analyze.

use std::process::ExitCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BigOError>;

#[derive(Debug, Error)]
pub enum BigOError {
    #[error("file not found: {path}")]
    FileNotFound { path: String },

    #[error("unsupported file type: {path} (expected a .py file)")]
    UnsupportedFile { path: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl BigOError {
    /// Map the error to a process exit code
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Self::FileNotFound { .. } => ExitCode::from(2),
            Self::UnsupportedFile { .. } => ExitCode::from(3),
            Self::Io(_) | Self::Serialization(_) => ExitCode::FAILURE,
        }
    }
}
