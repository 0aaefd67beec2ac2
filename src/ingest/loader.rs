//! CSV loading, schema checks, and date normalization.
//!
//! Everything here runs before the matching core and is the stage where
//! malformed input fails fast: missing columns, unparseable dates, and
//! non-numeric coordinate columns abort the run. Null dates survive
//! normalization untouched; the matcher treats them as unmatched rows.

use crate::constants::{
    EVENT_DATE_COL, LATITUDE_COL, LONGITUDE_COL, STATION_DATE_COL, STATION_NAME_COL,
};
use crate::error::{MatchError, Result};
use crate::models::{date_from_epoch_days, StationReading};
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, warn};

/// Read a CSV file into a DataFrame.
pub fn load_table(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(MatchError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    debug!(
        "Loaded {} rows x {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

/// Verify that every required column is present in the table.
pub fn ensure_columns(df: &DataFrame, path: &Path, columns: &[&str]) -> Result<()> {
    let schema = df.schema();
    for column in columns {
        if !schema.contains(column) {
            return Err(MatchError::missing_column(path, *column));
        }
    }
    Ok(())
}

/// Normalize a date column to the date dtype, discarding time-of-day.
///
/// String columns are parsed strictly with an inferred format, so an
/// unparseable value is a fatal ingestion error rather than a silent null.
/// Datetime columns are truncated to the calendar date; date columns pass
/// through. Nulls are preserved in all cases.
pub fn normalize_date_column(df: DataFrame, column: &str) -> Result<DataFrame> {
    let series = df.column(column)?;
    let dtype = series.dtype().clone();
    let all_null = series.null_count() == df.height();

    let expr = match dtype {
        // An all-null string column gives the parser no format to infer;
        // a plain cast yields the all-null date column it represents.
        DataType::String if all_null => col(column).cast(DataType::Date),
        DataType::Date => col(column),
        DataType::Datetime(_, _) => col(column).cast(DataType::Date),
        // Parse through datetime first so both date-only and timestamped
        // strings are accepted, then truncate to the calendar date.
        DataType::String => col(column)
            .str()
            .to_datetime(
                None,
                None,
                StrptimeOptions {
                    format: None,
                    strict: true,
                    exact: true,
                    cache: true,
                },
                lit("raise"),
            )
            .cast(DataType::Date),
        other => {
            return Err(MatchError::UnsupportedDateColumn {
                column: column.to_string(),
                dtype: other.to_string(),
            })
        }
    };

    Ok(df.lazy().with_column(expr.alias(column)).collect()?)
}

/// Cast a coordinate column to floats, failing on non-numeric columns.
fn normalize_coordinate_column(df: DataFrame, column: &str) -> Result<DataFrame> {
    Ok(df
        .lazy()
        .with_column(col(column).cast(DataType::Float64).alias(column))
        .collect()?)
}

/// Load the events table and prepare it for matching.
///
/// Checks the column contract, parses `CRASH_DATE` to a date, casts the
/// coordinates to floats, and sorts ascending by date (nulls last) so the
/// matcher's single-slot cache sees each date as one contiguous run. All
/// passthrough columns ride along unchanged.
pub fn load_events(path: &Path) -> Result<DataFrame> {
    let df = load_table(path)?;
    ensure_columns(&df, path, &[LATITUDE_COL, LONGITUDE_COL, EVENT_DATE_COL])?;

    let df = normalize_date_column(df, EVENT_DATE_COL)?;
    let df = normalize_coordinate_column(df, LATITUDE_COL)?;
    let df = normalize_coordinate_column(df, LONGITUDE_COL)?;

    let df = df.sort(
        [EVENT_DATE_COL],
        SortMultipleOptions::default()
            .with_maintain_order(true)
            .with_nulls_last(true),
    )?;

    Ok(df)
}

/// Load the stations table and extract typed readings in row order.
///
/// Rows missing a name, coordinate, or date carry no usable reading and
/// are skipped with a warning; the returned count reports how many.
pub fn load_stations(path: &Path) -> Result<(Vec<StationReading>, usize)> {
    let df = load_table(path)?;
    ensure_columns(
        &df,
        path,
        &[STATION_NAME_COL, LATITUDE_COL, LONGITUDE_COL, STATION_DATE_COL],
    )?;

    let df = normalize_date_column(df, STATION_DATE_COL)?;
    let df = normalize_coordinate_column(df, LATITUDE_COL)?;
    let df = normalize_coordinate_column(df, LONGITUDE_COL)?;

    extract_station_readings(&df)
}

/// Pull typed `StationReading` rows out of a prepared stations DataFrame.
///
/// Table row order is preserved: the matcher's tie-break depends on it.
pub fn extract_station_readings(df: &DataFrame) -> Result<(Vec<StationReading>, usize)> {
    let names = df.column(STATION_NAME_COL)?.str()?;
    let latitudes = df.column(LATITUDE_COL)?.f64()?;
    let longitudes = df.column(LONGITUDE_COL)?.f64()?;
    let dates = df.column(STATION_DATE_COL)?.date()?;

    let mut readings = Vec::with_capacity(df.height());
    let mut skipped = 0usize;

    for (((name, lat), lon), days) in names
        .into_iter()
        .zip(latitudes)
        .zip(longitudes)
        .zip(dates.into_iter())
    {
        match (name, lat, lon, days) {
            (Some(name), Some(latitude), Some(longitude), Some(days)) => {
                readings.push(StationReading {
                    name: name.to_string(),
                    latitude,
                    longitude,
                    date: date_from_epoch_days(days),
                });
            }
            _ => skipped += 1,
        }
    }

    if skipped > 0 {
        warn!(
            "Skipped {} station rows with missing name, coordinates, or date",
            skipped
        );
    }

    Ok((readings, skipped))
}

/// Write a DataFrame to a CSV file.
pub fn write_table(df: &mut DataFrame, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    CsvWriter::new(file).include_header(true).finish(df)?;
    debug!("Wrote {} rows to {}", df.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_csv(dir: &TempDir, name: &str, contents: &str) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_table_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = load_table(&dir.path().join("absent.csv"));
        assert!(matches!(result, Err(MatchError::InputNotFound { .. })));
    }

    #[test]
    fn test_load_events_sorts_by_date_nulls_last() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "events.csv",
            "LATITUDE,LONGITUDE,CRASH_DATE,BOROUGH\n\
             40.7,-73.9,2020-02-01,QUEENS\n\
             40.6,-73.8,,BROOKLYN\n\
             40.8,-73.7,2020-01-15,BRONX\n",
        );

        let df = load_events(&path).unwrap();
        assert_eq!(df.height(), 3);

        let dates = df.column(EVENT_DATE_COL).unwrap().date().unwrap();
        let first = dates.get(0).map(date_from_epoch_days);
        let last = dates.get(2).map(date_from_epoch_days);
        assert_eq!(first, Some(NaiveDate::from_ymd_opt(2020, 1, 15).unwrap()));
        assert_eq!(last, None);

        // Passthrough column survives the sort alongside its row
        let boroughs = df.column("BOROUGH").unwrap().str().unwrap();
        assert_eq!(boroughs.get(0), Some("BRONX"));
        assert_eq!(boroughs.get(2), Some("BROOKLYN"));
    }

    #[test]
    fn test_load_events_missing_column() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(&dir, "events.csv", "LATITUDE,LONGITUDE\n40.7,-73.9\n");
        let result = load_events(&path);
        assert!(matches!(result, Err(MatchError::MissingColumn { .. })));
    }

    #[test]
    fn test_load_events_unparseable_date_fails_fast() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "events.csv",
            "LATITUDE,LONGITUDE,CRASH_DATE\n40.7,-73.9,not-a-date\n",
        );
        assert!(load_events(&path).is_err());
    }

    #[test]
    fn test_load_stations_extracts_readings_in_row_order() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "stations.csv",
            "NAME,LATITUDE,LONGITUDE,DATE\n\
             LAGUARDIA,40.779,-73.880,2020-01-01\n\
             JFK INTL,40.639,-73.764,2020-01-01\n",
        );

        let (readings, skipped) = load_stations(&path).unwrap();
        assert_eq!(skipped, 0);
        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].name, "LAGUARDIA");
        assert_eq!(readings[1].name, "JFK INTL");
        assert_eq!(
            readings[0].date,
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_load_stations_skips_incomplete_rows() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "stations.csv",
            "NAME,LATITUDE,LONGITUDE,DATE\n\
             LAGUARDIA,40.779,-73.880,2020-01-01\n\
             ,40.639,-73.764,2020-01-01\n\
             JFK INTL,,-73.764,2020-01-01\n",
        );

        let (readings, skipped) = load_stations(&path).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(skipped, 2);
    }

    #[test]
    fn test_normalize_datetime_column_truncates_time() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            &dir,
            "stations.csv",
            "NAME,LATITUDE,LONGITUDE,DATE\n\
             LAGUARDIA,40.779,-73.880,2020-01-01 13:45:00\n",
        );

        let (readings, _) = load_stations(&path).unwrap();
        assert_eq!(
            readings[0].date,
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_write_table_round_trip() {
        let dir = TempDir::new().unwrap();
        let input = write_csv(
            &dir,
            "events.csv",
            "LATITUDE,LONGITUDE,CRASH_DATE\n40.7,-73.9,2020-02-01\n",
        );
        let mut df = load_events(&input).unwrap();

        let output = dir.path().join("out.csv");
        write_table(&mut df, &output).unwrap();
        assert!(output.exists());

        let reloaded = load_table(&output).unwrap();
        assert_eq!(reloaded.height(), 1);
    }
}
