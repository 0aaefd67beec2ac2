use clap::Parser;
use station_matcher::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(args) => result,
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, shutting down");
                Err(station_matcher::MatchError::interrupted(
                    "interrupted by user".to_string(),
                ))
            }
        }
    });

    match result {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Station Matcher - Nearest Same-Date Weather Station Lookup");
    println!("==========================================================");
    println!();
    println!("Augment an events CSV with the name of the nearest weather station");
    println!("that has a reading on each event's date.");
    println!();
    println!("USAGE:");
    println!("    station-matcher <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    match            Match events to their nearest same-date station");
    println!("    combine          Combine batched station CSVs into one table");
    println!("    filter-stations  Filter stations by measurement completeness");
    println!("    help             Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Match events against a prepared station table:");
    println!("    station-matcher match --events events.csv --stations stations.csv \\");
    println!("                          --output events_with_stations.csv");
    println!();
    println!("    # Combine raw station batches, then keep only complete stations:");
    println!("    station-matcher combine --input ./station-batches --output combined.csv");
    println!("    station-matcher filter-stations --input combined.csv --threshold 0.9 \\");
    println!("                                    --output stations.csv");
    println!();
    println!("For detailed help on any command, use:");
    println!("    station-matcher <COMMAND> --help");
}
