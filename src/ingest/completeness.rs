//! Station completeness filtering.
//!
//! A station qualifies as a matching input only if enough of its rows
//! carry all required measurement columns. Completeness is the fraction of
//! a station's rows where every required column is non-null.

use crate::constants::STATION_NAME_COL;
use crate::error::Result;
use polars::prelude::*;
use tracing::info;

const TOTAL_RECORDS_COL: &str = "total_records";
const COMPLETE_RECORDS_COL: &str = "complete_records";
const COMPLETENESS_COL: &str = "completeness";

/// Expression that is true when every required column is populated.
fn row_is_complete(required: &[&str]) -> Expr {
    required
        .iter()
        .map(|column| col(*column).is_not_null())
        .reduce(|acc, e| acc.and(e))
        .unwrap_or_else(|| lit(true))
}

/// Per-station completeness report, sorted by completeness descending.
///
/// Columns: station `NAME`, `total_records`, `complete_records`, and the
/// `completeness` fraction.
pub fn completeness_report(stations: &DataFrame, required: &[&str]) -> Result<DataFrame> {
    let report = stations
        .clone()
        .lazy()
        .with_column(row_is_complete(required).alias("is_complete"))
        .group_by([col(STATION_NAME_COL)])
        .agg([
            len().alias(TOTAL_RECORDS_COL),
            col("is_complete")
                .cast(DataType::UInt32)
                .sum()
                .alias(COMPLETE_RECORDS_COL),
        ])
        .with_column(
            (col(COMPLETE_RECORDS_COL).cast(DataType::Float64)
                / col(TOTAL_RECORDS_COL).cast(DataType::Float64))
            .alias(COMPLETENESS_COL),
        )
        .sort(
            [COMPLETENESS_COL],
            SortMultipleOptions::default().with_order_descending(true),
        )
        .collect()?;

    Ok(report)
}

/// Keep only rows belonging to stations at or above the threshold.
///
/// Row order within the surviving stations is preserved; the matcher's
/// tie-break depends on it.
pub fn filter_complete_stations(
    stations: &DataFrame,
    required: &[&str],
    threshold: f64,
) -> Result<DataFrame> {
    let qualified = completeness_report(stations, required)?
        .lazy()
        .filter(col(COMPLETENESS_COL).gt_eq(lit(threshold)))
        .select([col(STATION_NAME_COL)]);

    // Left-order-preserving semi join: the tie-break contract needs the
    // surviving rows in their original table order.
    let mut join_args = JoinArgs::new(JoinType::Semi);
    join_args.maintain_order = MaintainOrderJoin::Left;

    let filtered = stations
        .clone()
        .lazy()
        .join(
            qualified,
            [col(STATION_NAME_COL)],
            [col(STATION_NAME_COL)],
            join_args,
        )
        .collect()?;

    info!(
        "Completeness filter kept {} of {} station rows (threshold {})",
        filtered.height(),
        stations.height(),
        threshold
    );

    Ok(filtered)
}
