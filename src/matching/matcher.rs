//! Per-event nearest-station selection.

use crate::geo::Coordinate;
use crate::matching::index::DateScopedStationIndex;
use crate::models::StationReading;
use chrono::NaiveDate;

/// Finds the nearest station with a reading on a given date.
///
/// Owns the date-scoped index (and with it the single-slot cache) for the
/// duration of one pipeline pass. Purely computational; no I/O and no
/// retries.
#[derive(Debug)]
pub struct NearestStationMatcher<'a> {
    index: DateScopedStationIndex<'a>,
}

impl<'a> NearestStationMatcher<'a> {
    /// Create a matcher over the given station table.
    pub fn new(stations: &'a [StationReading]) -> Self {
        Self {
            index: DateScopedStationIndex::new(stations),
        }
    }

    /// Name of the nearest station with a reading on `date`, or `None`
    /// when the date is null or no station reported on it.
    ///
    /// Distances are great-circle kilometers from the event coordinates.
    /// Ties at the exact minimum resolve to the candidate appearing first
    /// in station-table row order; the replacement comparison is strict,
    /// so later equal-distance candidates never win. Coordinates are not
    /// validated: NaN input makes every comparison fail and the first
    /// candidate is returned, per the matcher's precondition contract.
    pub fn find_nearest(
        &mut self,
        latitude: f64,
        longitude: f64,
        date: Option<NaiveDate>,
    ) -> Option<&'a str> {
        let stations = self.index.stations();
        let origin = Coordinate::from_degrees(latitude, longitude);

        let mut best: Option<(usize, f64)> = None;
        for &i in self.index.lookup(date) {
            let station = &stations[i];
            let candidate = Coordinate::from_degrees(station.latitude, station.longitude);
            let distance = origin.distance_km(&candidate);

            let closer = match best {
                None => true,
                Some((_, best_distance)) => distance < best_distance,
            };
            if closer {
                best = Some((i, distance));
            }
        }

        best.map(|(i, _)| stations[i].name.as_str())
    }

    /// Access to the underlying index, for cache inspection and stats.
    pub fn index(&self) -> &DateScopedStationIndex<'a> {
        &self.index
    }
}
