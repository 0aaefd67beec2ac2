//! Core data structures for station matching.
//!
//! Defines the typed station reading extracted from the stations table and
//! the statistics structures reported by the pipeline and CLI commands.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// One station reading: a station's location and a date it reported.
///
/// The stations table holds one row per station per date; multiple readings
/// may share a date (different stations) or a name (different dates).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StationReading {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub date: NaiveDate,
}

/// Convert a polars physical date (days since the Unix epoch) to a `NaiveDate`.
pub fn date_from_epoch_days(days: i32) -> NaiveDate {
    // NaiveDate::default() is 1970-01-01, the same epoch polars uses.
    NaiveDate::default() + Duration::days(days as i64)
}

/// Statistics gathered during a match pipeline run
#[derive(Debug, Clone, Default)]
pub struct MatchStats {
    /// Number of event rows processed
    pub events_total: usize,
    /// Events matched to a station
    pub matched: usize,
    /// Events left unmatched (null date or no stations on the date)
    pub unmatched: usize,
    /// Events with a null date, skipped without touching the cache
    pub null_dates: usize,
    /// Date lookups answered from the single-slot cache
    pub cache_hits: usize,
    /// Date lookups that re-filtered the station table
    pub cache_misses: usize,
}

impl MatchStats {
    /// Fraction of events that received a station match
    pub fn match_rate(&self) -> f64 {
        if self.events_total == 0 {
            return 0.0;
        }
        self.matched as f64 / self.events_total as f64
    }
}
