//! Combine batched station CSV exports into a single table.
//!
//! Station data arrives as a directory of per-batch CSV files. This module
//! discovers them by glob, reads them concurrently on blocking worker
//! tasks, and concatenates them diagonally so batches with differing
//! column sets union into one schema.

use crate::error::{MatchError, Result};
use crate::ingest::loader::{load_table, write_table};
use futures::stream::{self, StreamExt};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tokio::task;
use tracing::{debug, error};

/// Statistics from one combine run
#[derive(Debug, Clone, Default)]
pub struct CombineStats {
    pub batches_found: usize,
    pub batches_combined: usize,
    pub batches_failed: usize,
    pub rows_written: usize,
}

/// Discover station batch CSV files under a directory, sorted by path.
pub fn discover_batches(input_dir: &Path) -> Result<Vec<PathBuf>> {
    let pattern = input_dir.join("*.csv").to_string_lossy().into_owned();

    let mut paths: Vec<PathBuf> = glob::glob(&pattern)?.filter_map(|entry| entry.ok()).collect();
    // Sort for a deterministic concatenation order
    paths.sort();

    if paths.is_empty() {
        return Err(MatchError::NoBatchesFound { pattern });
    }

    debug!("Discovered {} station batches", paths.len());
    Ok(paths)
}

/// Read every batch, union their schemas, and write the combined table.
///
/// Batches are read concurrently with at most `workers` blocking tasks in
/// flight; results are folded back in discovery order so the output is
/// deterministic. A batch that fails to read is logged and skipped rather
/// than aborting the run.
pub async fn combine_station_batches(
    input_dir: &Path,
    output_path: &Path,
    workers: usize,
    progress: Option<&indicatif::ProgressBar>,
) -> Result<CombineStats> {
    let paths = discover_batches(input_dir)?;
    let mut stats = CombineStats {
        batches_found: paths.len(),
        ..Default::default()
    };

    let results: Vec<(PathBuf, Result<DataFrame>)> = stream::iter(paths)
        .map(|path| async move {
            let read_path = path.clone();
            let result = task::spawn_blocking(move || load_table(&read_path)).await;
            let flattened = match result {
                Ok(inner) => inner,
                Err(join_error) => Err(MatchError::Join(join_error)),
            };
            (path, flattened)
        })
        .buffered(workers.max(1))
        .inspect(|_| {
            if let Some(pb) = progress {
                pb.inc(1);
            }
        })
        .collect()
        .await;

    let mut frames = Vec::with_capacity(results.len());
    for (path, result) in results {
        match result {
            Ok(df) => {
                stats.batches_combined += 1;
                frames.push(df.lazy());
            }
            Err(e) => {
                error!("Failed to read station batch {}: {:#}", path.display(), e);
                stats.batches_failed += 1;
            }
        }
    }

    if frames.is_empty() {
        return Err(MatchError::NoBatchesFound {
            pattern: input_dir.join("*.csv").to_string_lossy().into_owned(),
        });
    }

    let mut combined = concat_lf_diagonal(frames, UnionArgs::default())?.collect()?;
    stats.rows_written = combined.height();

    write_table(&mut combined, output_path)?;
    Ok(stats)
}
