//! Command implementations for the station matcher CLI
//!
//! Each subcommand lives in its own module; shared logging setup, progress
//! styling, and summary reporting live in [`shared`].

pub mod combine;
pub mod filter_stations;
pub mod match_events;
pub mod shared;

use crate::cli::args::{Args, Commands};
use crate::error::{MatchError, Result};

/// Dispatch the parsed CLI arguments to the matching subcommand handler.
pub async fn run(args: Args) -> Result<()> {
    let Some(command) = args.command else {
        return Err(MatchError::configuration(
            "no subcommand provided".to_string(),
        ));
    };

    match command {
        Commands::Match(match_args) => match_events::run_match(match_args).await,
        Commands::Combine(combine_args) => combine::run_combine(combine_args).await,
        Commands::FilterStations(filter_args) => {
            filter_stations::run_filter_stations(filter_args).await
        }
    }
}
