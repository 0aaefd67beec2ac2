//! Error handling for station matching operations.
//!
//! Provides error types with context for table loading, schema validation,
//! batch combination, and matching failures.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Input table not found at path: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Missing required column '{column}' in table: {path}")]
    MissingColumn { path: PathBuf, column: String },

    #[error("Date column '{column}' has unsupported dtype {dtype}: expected date, datetime, or string")]
    UnsupportedDateColumn { column: String, dtype: String },

    #[error("No station batch files matched pattern: {pattern}")]
    NoBatchesFound { pattern: String },

    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Processing interrupted: {reason}")]
    Interrupted { reason: String },

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl MatchError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a missing column error
    pub fn missing_column(path: impl Into<PathBuf>, column: impl Into<String>) -> Self {
        Self::MissingColumn {
            path: path.into(),
            column: column.into(),
        }
    }

    /// Create an interrupted error
    pub fn interrupted(reason: impl Into<String>) -> Self {
        Self::Interrupted {
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
