//! Match command implementation
//!
//! Orchestrates the full matching workflow: load and prepare both tables,
//! run the match pipeline, write the augmented events CSV, and report a
//! summary.

use crate::cli::args::MatchArgs;
use crate::cli::commands::shared::{format_percent, setup_logging};
use crate::error::Result;
use crate::ingest::loader::{load_events, load_stations, write_table};
use crate::matching::MatchPipeline;
use colored::*;
use std::time::Instant;
use tracing::{debug, info};

/// Run the match command end to end.
pub async fn run_match(args: MatchArgs) -> Result<()> {
    setup_logging(&args.log_level, args.quiet)?;
    let start_time = Instant::now();

    info!("Starting nearest-station matching");
    debug!("Command line arguments: {:?}", args);

    let events = load_events(&args.events_path)?;
    info!(
        "Loaded {} events from {}",
        events.height(),
        args.events_path.display()
    );

    let (stations, skipped) = load_stations(&args.stations_path)?;
    info!(
        "Loaded {} station readings from {} ({} rows skipped)",
        stations.len(),
        args.stations_path.display(),
        skipped
    );

    let pipeline = MatchPipeline::new();
    let (mut augmented, stats) = pipeline.run(&events, &stations)?;

    write_table(&mut augmented, &args.output_path)?;

    if !args.quiet {
        println!("{}", "Matching complete".bright_green().bold());
        println!("  events:      {}", stats.events_total);
        println!(
            "  matched:     {} ({})",
            stats.matched,
            format_percent(stats.match_rate())
        );
        println!(
            "  unmatched:   {} ({} with null dates)",
            stats.unmatched, stats.null_dates
        );
        println!(
            "  date cache:  {} hits / {} misses",
            stats.cache_hits, stats.cache_misses
        );
        println!("  output:      {}", args.output_path.display());
        println!("  elapsed:     {:.2?}", start_time.elapsed());
    }

    Ok(())
}
