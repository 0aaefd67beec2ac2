//! Date-scoped station lookup with a single-slot cache.
//!
//! The index answers "which station readings exist on date D" against the
//! full station table. Event tables are processed sorted by date, so
//! successive lookups usually repeat the previous date; a one-entry cache
//! keyed by that date avoids re-filtering the table for every event row.

use crate::models::StationReading;
use chrono::NaiveDate;
use tracing::debug;

/// Single-slot cache mapping one date to the matching row indices.
///
/// Capacity is fixed at one entry. A lookup for any other date evicts the
/// slot and repopulates it, including with an empty subset for dates that
/// have no station readings.
#[derive(Debug, Default)]
struct DateCache {
    date: Option<NaiveDate>,
    subset: Vec<usize>,
}

/// Index over a station table answering per-date candidate lookups.
///
/// Holds a borrowed view of the caller's station table; the only owned
/// state is the cached subset of row indices for the current date.
#[derive(Debug)]
pub struct DateScopedStationIndex<'a> {
    stations: &'a [StationReading],
    cache: DateCache,
    hits: usize,
    misses: usize,
}

impl<'a> DateScopedStationIndex<'a> {
    /// Create an index over the given station table. The cache starts empty.
    pub fn new(stations: &'a [StationReading]) -> Self {
        Self {
            stations,
            cache: DateCache::default(),
            hits: 0,
            misses: 0,
        }
    }

    /// The full station table this index was built over.
    pub fn stations(&self) -> &'a [StationReading] {
        self.stations
    }

    /// Row indices of the station readings on `date`, in table order.
    ///
    /// Checks in strict precedence order:
    /// 1. A `None` date returns an empty subset immediately, without
    ///    touching the cache. That row can never match, and caching a
    ///    null key would only evict a useful date.
    /// 2. If the slot already holds `date`, the cached subset is returned.
    /// 3. Otherwise the station table is filtered for `date` and the
    ///    result replaces the slot, empty subsets included, so repeated
    ///    events on a station-less date don't re-filter.
    pub fn lookup(&mut self, date: Option<NaiveDate>) -> &[usize] {
        let Some(date) = date else {
            return &[];
        };

        if self.cache.date == Some(date) {
            self.hits += 1;
            return &self.cache.subset;
        }

        self.misses += 1;
        let subset: Vec<usize> = self
            .stations
            .iter()
            .enumerate()
            .filter(|(_, s)| s.date == date)
            .map(|(i, _)| i)
            .collect();

        debug!(
            "Cache miss for {}: {} candidate readings",
            date,
            subset.len()
        );

        self.cache.date = Some(date);
        self.cache.subset = subset;
        &self.cache.subset
    }

    /// The date currently held in the cache slot, if any.
    pub fn cached_date(&self) -> Option<NaiveDate> {
        self.cache.date
    }

    /// Lookups answered from the cache slot so far.
    pub fn cache_hits(&self) -> usize {
        self.hits
    }

    /// Lookups that re-filtered the station table so far.
    pub fn cache_misses(&self) -> usize {
        self.misses
    }
}
