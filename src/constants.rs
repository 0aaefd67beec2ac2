//! Application constants for the station matcher
//!
//! Column names form the contract with the input tables; measurement
//! columns and the completeness threshold drive the station filter.

// =============================================================================
// Column Names (input table contract)
// =============================================================================

/// Latitude column shared by the events and stations tables
pub const LATITUDE_COL: &str = "LATITUDE";

/// Longitude column shared by the events and stations tables
pub const LONGITUDE_COL: &str = "LONGITUDE";

/// Date column of the events table
pub const EVENT_DATE_COL: &str = "CRASH_DATE";

/// Date column of the stations table
pub const STATION_DATE_COL: &str = "DATE";

/// Station name column of the stations table
pub const STATION_NAME_COL: &str = "NAME";

/// Derived column appended to the events table by the match pipeline
pub const CLOSEST_STATION_COL: &str = "Closest_Station";

// =============================================================================
// Station Completeness Filter
// =============================================================================

/// Measurement columns a station row must populate to count as complete
pub const REQUIRED_MEASUREMENT_COLUMNS: &[&str] = &["PRCP", "TMAX", "TMIN", "SNOW"];

/// Default fraction of complete rows a station needs to qualify
pub const DEFAULT_COMPLETENESS_THRESHOLD: f64 = 0.9;

// =============================================================================
// Geometry
// =============================================================================

/// Mean Earth radius in kilometers, used by the haversine distance
pub const EARTH_RADIUS_KM: f64 = 6371.0;
