//! Command-line argument definitions for the station matcher
//!
//! Defines the CLI interface using the clap derive API. Each subcommand
//! carries its own paths and tuning flags; logging verbosity and progress
//! reporting are shared conventions across commands.

use crate::constants::DEFAULT_COMPLETENESS_THRESHOLD;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the station matcher
#[derive(Debug, Clone, Parser)]
#[command(
    name = "station-matcher",
    version,
    about = "Match geolocated, dated event records to the nearest same-date weather station",
    long_about = "Augments an events CSV (LATITUDE, LONGITUDE, CRASH_DATE, plus passthrough \
                  columns) with a Closest_Station column naming the nearest weather station \
                  that has a reading on the event's date. Also provides helpers for combining \
                  batched station exports and filtering stations by measurement completeness."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Match events to their nearest same-date station (main command)
    Match(MatchArgs),
    /// Combine a directory of batched station CSVs into one table
    Combine(CombineArgs),
    /// Filter stations by measurement completeness
    FilterStations(FilterStationsArgs),
}

/// Arguments for the match command
#[derive(Debug, Clone, Parser)]
pub struct MatchArgs {
    /// Events CSV with LATITUDE, LONGITUDE, and CRASH_DATE columns
    #[arg(short = 'e', long = "events", value_name = "PATH")]
    pub events_path: PathBuf,

    /// Stations CSV with NAME, LATITUDE, LONGITUDE, and DATE columns
    #[arg(short = 's', long = "stations", value_name = "PATH")]
    pub stations_path: PathBuf,

    /// Output CSV path for the augmented events table
    #[arg(short = 'o', long = "output", value_name = "PATH", default_value = "output.csv")]
    pub output_path: PathBuf,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Suppress progress output
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

/// Arguments for the combine command
#[derive(Debug, Clone, Parser)]
pub struct CombineArgs {
    /// Directory containing batched station CSV files
    #[arg(short = 'i', long = "input", value_name = "DIR")]
    pub input_dir: PathBuf,

    /// Output CSV path for the combined station table
    #[arg(short = 'o', long = "output", value_name = "PATH", default_value = "combined_stations.csv")]
    pub output_path: PathBuf,

    /// Number of concurrent batch readers (defaults to available cores)
    #[arg(short = 'w', long = "workers", value_name = "N")]
    pub workers: Option<usize>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Suppress progress output
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}

/// Arguments for the filter-stations command
#[derive(Debug, Clone, Parser)]
pub struct FilterStationsArgs {
    /// Stations CSV to filter
    #[arg(short = 'i', long = "input", value_name = "PATH")]
    pub input_path: PathBuf,

    /// Output CSV path for the filtered station table
    #[arg(short = 'o', long = "output", value_name = "PATH", default_value = "filtered_stations.csv")]
    pub output_path: PathBuf,

    /// Minimum fraction of rows with all required measurements
    #[arg(
        short = 't',
        long = "threshold",
        value_name = "FRACTION",
        default_value_t = DEFAULT_COMPLETENESS_THRESHOLD
    )]
    pub threshold: f64,

    /// Only print the per-station completeness report, don't write output
    #[arg(long = "report-only")]
    pub report_only: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Suppress progress output
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}
