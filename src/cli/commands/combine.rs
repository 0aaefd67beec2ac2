//! Combine command implementation

use crate::cli::args::CombineArgs;
use crate::cli::commands::shared::{create_progress_bar, setup_logging};
use crate::error::Result;
use crate::ingest::combine::{combine_station_batches, discover_batches};
use colored::*;
use std::time::Instant;
use tracing::info;

/// Run the combine command: union all station batches into one CSV.
pub async fn run_combine(args: CombineArgs) -> Result<()> {
    setup_logging(&args.log_level, args.quiet)?;
    let start_time = Instant::now();

    let workers = args.workers.unwrap_or_else(|| num_cpus::get().min(8));
    info!(
        "Combining station batches from {} with {} workers",
        args.input_dir.display(),
        workers
    );

    let progress = if args.quiet {
        None
    } else {
        let total = discover_batches(&args.input_dir)?.len() as u64;
        Some(create_progress_bar(total, "Reading station batches"))
    };

    let stats =
        combine_station_batches(&args.input_dir, &args.output_path, workers, progress.as_ref())
            .await?;

    if let Some(pb) = progress {
        pb.finish_with_message("All station batches read");
    }

    if !args.quiet {
        println!("{}", "Combine complete".bright_green().bold());
        println!("  batches:  {} found", stats.batches_found);
        println!(
            "  combined: {} ({} failed)",
            stats.batches_combined, stats.batches_failed
        );
        println!("  rows:     {}", stats.rows_written);
        println!("  output:   {}", args.output_path.display());
        println!("  elapsed:  {:.2?}", start_time.elapsed());
    }

    Ok(())
}
