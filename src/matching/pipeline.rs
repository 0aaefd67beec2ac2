//! Table-level matching pipeline.
//!
//! Drives the per-event matcher across a whole events table and appends
//! the derived `Closest_Station` column. Events are expected pre-sorted by
//! date so the index's single-slot cache stays hot; sorting is a
//! performance concern only and never affects which station matches.

use crate::constants::{CLOSEST_STATION_COL, EVENT_DATE_COL, LATITUDE_COL, LONGITUDE_COL};
use crate::error::Result;
use crate::matching::matcher::NearestStationMatcher;
use crate::models::{date_from_epoch_days, MatchStats, StationReading};
use polars::prelude::*;
use tracing::{debug, info};

/// One-pass match pipeline over an events table.
#[derive(Debug, Default)]
pub struct MatchPipeline;

impl MatchPipeline {
    pub fn new() -> Self {
        Self
    }

    /// Match every event row against the station table and return the
    /// events table with a `Closest_Station` column appended.
    ///
    /// Row count, row order, and all original columns are preserved; rows
    /// with no possible match get a null in the new column. The events
    /// table must carry `LATITUDE` and `LONGITUDE` float columns and a
    /// `CRASH_DATE` column already normalized to the date dtype.
    pub fn run(
        &self,
        events: &DataFrame,
        stations: &[StationReading],
    ) -> Result<(DataFrame, MatchStats)> {
        let latitudes = events.column(LATITUDE_COL)?.f64()?;
        let longitudes = events.column(LONGITUDE_COL)?.f64()?;
        let dates = events.column(EVENT_DATE_COL)?.date()?;

        let mut matcher = NearestStationMatcher::new(stations);
        let mut stats = MatchStats {
            events_total: events.height(),
            ..Default::default()
        };

        let mut matches: Vec<Option<String>> = Vec::with_capacity(events.height());
        for ((lat, lon), days) in latitudes.into_iter().zip(longitudes).zip(dates.into_iter()) {
            let date = days.map(date_from_epoch_days);
            if date.is_none() {
                stats.null_dates += 1;
            }

            // Null coordinates are a malformed-input precondition violation;
            // they degrade to NaN and flow through the distance unvalidated.
            let nearest = matcher.find_nearest(
                lat.unwrap_or(f64::NAN),
                lon.unwrap_or(f64::NAN),
                date,
            );

            match nearest {
                Some(name) => {
                    stats.matched += 1;
                    matches.push(Some(name.to_string()));
                }
                None => {
                    stats.unmatched += 1;
                    matches.push(None);
                }
            }
        }

        stats.cache_hits = matcher.index().cache_hits();
        stats.cache_misses = matcher.index().cache_misses();

        debug!(
            "Date cache: {} hits, {} misses",
            stats.cache_hits, stats.cache_misses
        );
        info!(
            "Matched {} of {} events ({} unmatched, {} null dates)",
            stats.matched, stats.events_total, stats.unmatched, stats.null_dates
        );

        let mut augmented = events.clone();
        augmented.with_column(Series::new(CLOSEST_STATION_COL.into(), matches))?;

        Ok((augmented, stats))
    }
}
