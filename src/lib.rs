//! Station Matcher Library
//!
//! A Rust library for augmenting geolocated, dated event records with the
//! name of the nearest weather station that has a reading on the same
//! calendar date.
//!
//! This library provides tools for:
//! - Great-circle distance computation via the haversine formula
//! - Date-scoped station lookup backed by a single-slot cache
//! - Per-event nearest-station matching with deterministic tie-breaking
//! - A table pipeline that appends a `Closest_Station` column to the
//!   events table without reordering or dropping rows
//! - Combining batched station CSV exports into a single table
//! - Filtering stations by measurement completeness

pub mod config;
pub mod constants;
pub mod error;
pub mod geo;
pub mod models;

// Table ingestion and preparation (the boundary around the matching core)
pub mod ingest {
    pub mod combine;
    pub mod completeness;
    pub mod loader;
}

// The matching core: index, matcher, pipeline
pub mod matching;

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use config::MatcherConfig;
pub use error::{MatchError, Result};
pub use geo::Coordinate;
pub use matching::{DateScopedStationIndex, MatchPipeline, NearestStationMatcher};
pub use models::{MatchStats, StationReading};
