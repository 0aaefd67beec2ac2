//! Filter-stations command implementation

use crate::cli::args::FilterStationsArgs;
use crate::cli::commands::shared::setup_logging;
use crate::config::MatcherConfig;
use crate::error::Result;
use crate::ingest::completeness::{completeness_report, filter_complete_stations};
use crate::ingest::loader::{load_table, write_table};
use colored::*;
use tracing::info;

/// Run the filter-stations command.
///
/// Prints the per-station completeness report and, unless `--report-only`
/// is set, writes the station rows that meet the threshold.
pub async fn run_filter_stations(args: FilterStationsArgs) -> Result<()> {
    setup_logging(&args.log_level, args.quiet)?;

    let config = MatcherConfig {
        completeness_threshold: args.threshold,
        ..Default::default()
    };
    config.validate()?;

    let required: Vec<&str> = config.required_columns.iter().map(String::as_str).collect();

    let stations = load_table(&args.input_path)?;
    info!(
        "Loaded {} station rows from {}",
        stations.height(),
        args.input_path.display()
    );

    let report = completeness_report(&stations, &required)?;
    if !args.quiet {
        println!("{}", "Station completeness".bright_green().bold());
        println!("{}", report);
    }

    if args.report_only {
        return Ok(());
    }

    let mut filtered = filter_complete_stations(&stations, &required, args.threshold)?;
    write_table(&mut filtered, &args.output_path)?;

    if !args.quiet {
        println!(
            "Kept {} of {} rows at threshold {} -> {}",
            filtered.height(),
            stations.height(),
            args.threshold,
            args.output_path.display()
        );
    }

    Ok(())
}
