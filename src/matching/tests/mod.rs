//! Tests for the matching core
//!
//! Unit tests for the date-scoped index, the nearest-station matcher, and
//! the table pipeline, with shared fixtures for building station tables.


use crate::constants::{EVENT_DATE_COL, LATITUDE_COL, LONGITUDE_COL};
use crate::models::StationReading;
use chrono::NaiveDate;
use polars::prelude::*;

/// Shorthand date constructor for fixtures
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// Create a station reading fixture
pub fn reading(name: &str, latitude: f64, longitude: f64, d: NaiveDate) -> StationReading {
    StationReading {
        name: name.to_string(),
        latitude,
        longitude,
        date: d,
    }
}

/// A small station table spanning two dates around New York
pub fn sample_stations() -> Vec<StationReading> {
    vec![
        reading("CENTRAL PARK", 40.779, -73.969, date(2020, 1, 1)),
        reading("LAGUARDIA", 40.779, -73.880, date(2020, 1, 1)),
        reading("JFK INTL", 40.639, -73.764, date(2020, 1, 2)),
        reading("CENTRAL PARK", 40.779, -73.969, date(2020, 1, 2)),
    ]
}

/// Build an events DataFrame with a date-typed `CRASH_DATE` column
pub fn events_frame(rows: &[(Option<f64>, Option<f64>, Option<NaiveDate>)]) -> DataFrame {
    let lats: Vec<Option<f64>> = rows.iter().map(|r| r.0).collect();
    let lons: Vec<Option<f64>> = rows.iter().map(|r| r.1).collect();
    let dates: Vec<Option<NaiveDate>> = rows.iter().map(|r| r.2).collect();

    let date_series = Series::new(EVENT_DATE_COL.into(), dates);
    DataFrame::new(vec![
        Series::new(LATITUDE_COL.into(), lats).into(),
        Series::new(LONGITUDE_COL.into(), lons).into(),
        date_series.into(),
    ])
    .unwrap()
}
