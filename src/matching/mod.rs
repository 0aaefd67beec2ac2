//! The nearest-station matching core.
//!
//! Matches one event at a time against the station readings that exist on
//! the event's calendar date. The module is organized into three layers:
//! - [`index`] - date-scoped candidate lookup over the station table,
//!   backed by a single-slot cache
//! - [`matcher`] - per-event haversine scan over the candidates with
//!   first-occurrence tie-breaking
//! - [`pipeline`] - per-table driver that appends the `Closest_Station`
//!   column to the events table
//!
//! The core is single-threaded and synchronous; cache state is owned by the
//! index instance, so independent pipelines never share lookup state.

pub mod index;
pub mod matcher;
pub mod pipeline;

#[cfg(test)]
pub mod tests;

pub use index::DateScopedStationIndex;
pub use matcher::NearestStationMatcher;
pub use pipeline::MatchPipeline;
