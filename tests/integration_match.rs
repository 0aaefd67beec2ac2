//! End-to-end tests for the matching workflow
//!
//! Drive the public library surface the way the CLI does: CSV fixtures on
//! disk, through loading, normalization, matching, and output writing.

use station_matcher::constants::CLOSEST_STATION_COL;
use station_matcher::ingest::combine::combine_station_batches;
use station_matcher::ingest::completeness::filter_complete_stations;
use station_matcher::ingest::loader::{
    extract_station_readings, load_events, load_stations, load_table, normalize_date_column,
    write_table,
};
use station_matcher::MatchPipeline;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_csv(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

fn closest_column(df: &polars::prelude::DataFrame) -> Vec<Option<String>> {
    df.column(CLOSEST_STATION_COL)
        .unwrap()
        .str()
        .unwrap()
        .into_iter()
        .map(|v| v.map(|s| s.to_string()))
        .collect()
}

#[test]
fn test_nearest_station_same_date() {
    let dir = TempDir::new().unwrap();
    let events_path = write_csv(
        dir.path(),
        "events.csv",
        "LATITUDE,LONGITUDE,CRASH_DATE\n40.0,-73.0,2020-01-01\n",
    );
    let stations_path = write_csv(
        dir.path(),
        "stations.csv",
        "NAME,LATITUDE,LONGITUDE,DATE\n\
         A,40.001,-73.0,2020-01-01\n\
         B,41.0,-73.0,2020-01-01\n",
    );

    let events = load_events(&events_path).unwrap();
    let (stations, _) = load_stations(&stations_path).unwrap();

    let (augmented, stats) = MatchPipeline::new().run(&events, &stations).unwrap();
    assert_eq!(closest_column(&augmented), vec![Some("A".to_string())]);
    assert_eq!(stats.matched, 1);
}

#[test]
fn test_no_station_reading_on_event_date() {
    let dir = TempDir::new().unwrap();
    let events_path = write_csv(
        dir.path(),
        "events.csv",
        "LATITUDE,LONGITUDE,CRASH_DATE\n40.0,-73.0,2020-01-02\n",
    );
    let stations_path = write_csv(
        dir.path(),
        "stations.csv",
        "NAME,LATITUDE,LONGITUDE,DATE\nA,40.001,-73.0,2020-01-01\n",
    );

    let events = load_events(&events_path).unwrap();
    let (stations, _) = load_stations(&stations_path).unwrap();

    let (augmented, stats) = MatchPipeline::new().run(&events, &stations).unwrap();
    assert_eq!(closest_column(&augmented), vec![None]);
    assert_eq!(stats.unmatched, 1);
}

#[test]
fn test_null_event_date_skips_station_filter() {
    let dir = TempDir::new().unwrap();
    let events_path = write_csv(
        dir.path(),
        "events.csv",
        "LATITUDE,LONGITUDE,CRASH_DATE\n40.0,-73.0,\n",
    );
    let stations_path = write_csv(
        dir.path(),
        "stations.csv",
        "NAME,LATITUDE,LONGITUDE,DATE\nA,40.001,-73.0,2020-01-01\n",
    );

    let events = load_events(&events_path).unwrap();
    let (stations, _) = load_stations(&stations_path).unwrap();

    let (augmented, stats) = MatchPipeline::new().run(&events, &stations).unwrap();
    assert_eq!(closest_column(&augmented), vec![None]);
    assert_eq!(stats.null_dates, 1);
    assert_eq!(stats.cache_misses, 0);
}

#[test]
fn test_output_written_with_passthrough_columns() {
    let dir = TempDir::new().unwrap();
    let events_path = write_csv(
        dir.path(),
        "events.csv",
        "COLLISION_ID,LATITUDE,LONGITUDE,CRASH_DATE,BOROUGH\n\
         1001,40.78,-73.97,2020-01-01,MANHATTAN\n\
         1002,40.64,-73.76,2020-01-02,QUEENS\n",
    );
    let stations_path = write_csv(
        dir.path(),
        "stations.csv",
        "NAME,LATITUDE,LONGITUDE,DATE\n\
         CENTRAL PARK,40.779,-73.969,2020-01-01\n\
         JFK INTL,40.639,-73.764,2020-01-02\n",
    );

    let events = load_events(&events_path).unwrap();
    let (stations, _) = load_stations(&stations_path).unwrap();
    let (mut augmented, _) = MatchPipeline::new().run(&events, &stations).unwrap();

    let output_path = dir.path().join("out.csv");
    write_table(&mut augmented, &output_path).unwrap();

    let written = load_table(&output_path).unwrap();
    assert_eq!(written.height(), 2);
    assert!(written.schema().contains("BOROUGH"));
    assert!(written.schema().contains("COLLISION_ID"));
    assert!(written.schema().contains(CLOSEST_STATION_COL));

    let names = written.column(CLOSEST_STATION_COL).unwrap().str().unwrap();
    assert_eq!(names.get(0), Some("CENTRAL PARK"));
    assert_eq!(names.get(1), Some("JFK INTL"));
}

#[tokio::test]
async fn test_combine_filter_match_workflow() {
    let dir = TempDir::new().unwrap();

    // Two station batches: ALPHA reports complete measurements, BRAVO
    // reports nothing but temperature and gets filtered out.
    let batches = dir.path().join("batches");
    std::fs::create_dir(&batches).unwrap();
    write_csv(
        &batches,
        "batch_a.csv",
        "NAME,LATITUDE,LONGITUDE,DATE,PRCP,TMAX,TMIN,SNOW\n\
         ALPHA,41.0,-73.0,2020-01-01,0.1,10.0,2.0,0.0\n\
         ALPHA,41.0,-73.0,2020-01-02,0.2,11.0,3.0,0.0\n",
    );
    write_csv(
        &batches,
        "batch_b.csv",
        "NAME,LATITUDE,LONGITUDE,DATE,TMAX\n\
         BRAVO,40.001,-73.0,2020-01-01,9.0\n",
    );

    let combined_path = dir.path().join("combined.csv");
    let stats = combine_station_batches(&batches, &combined_path, 2, None)
        .await
        .unwrap();
    assert_eq!(stats.rows_written, 3);

    // BRAVO is nearer to the event but fails the completeness filter
    let combined = load_table(&combined_path).unwrap();
    let filtered = filter_complete_stations(
        &combined,
        &["PRCP", "TMAX", "TMIN", "SNOW"],
        0.9,
    )
    .unwrap();
    assert_eq!(filtered.height(), 2);

    let prepared = normalize_date_column(filtered, "DATE").unwrap();
    let (stations, skipped) = extract_station_readings(&prepared).unwrap();
    assert_eq!(skipped, 0);

    let events_path = write_csv(
        dir.path(),
        "events.csv",
        "LATITUDE,LONGITUDE,CRASH_DATE\n40.0,-73.0,2020-01-01\n",
    );
    let events = load_events(&events_path).unwrap();

    let (augmented, _) = MatchPipeline::new().run(&events, &stations).unwrap();
    assert_eq!(closest_column(&augmented), vec![Some("ALPHA".to_string())]);
}
