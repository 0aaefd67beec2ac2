//! Configuration for station matching runs.
//!
//! Plain configuration struct with defaults derived from the application
//! constants; CLI arguments override individual fields in the command layer.

use crate::constants::{DEFAULT_COMPLETENESS_THRESHOLD, REQUIRED_MEASUREMENT_COLUMNS};
use crate::error::{MatchError, Result};
use serde::{Deserialize, Serialize};

/// Global configuration for the matcher and its ingestion stages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatcherConfig {
    /// Number of worker tasks for concurrent batch reading
    pub workers: usize,

    /// Completeness threshold for the station filter (fraction, 0..=1)
    pub completeness_threshold: f64,

    /// Measurement columns that must all be non-null for a complete row
    pub required_columns: Vec<String>,

    /// Show progress bars during long operations
    pub show_progress: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            workers: num_cpus::get().min(8),
            completeness_threshold: DEFAULT_COMPLETENESS_THRESHOLD,
            required_columns: REQUIRED_MEASUREMENT_COLUMNS
                .iter()
                .map(|c| c.to_string())
                .collect(),
            show_progress: true,
        }
    }
}

impl MatcherConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(MatchError::configuration(
                "workers must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.completeness_threshold) {
            return Err(MatchError::configuration(format!(
                "completeness threshold must be within 0..=1, got {}",
                self.completeness_threshold
            )));
        }
        if self.required_columns.is_empty() {
            return Err(MatchError::configuration(
                "at least one required measurement column is needed".to_string(),
            ));
        }
        Ok(())
    }
}
