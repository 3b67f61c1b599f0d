//! Descriptive statistics over bike-share trip data.
//!
//! The pipeline runs in three steps: [`loader`] reads a city's trips into a
//! [`TripTable`](table::TripTable), [`filter`] narrows it by month and
//! weekday, and [`stats`] computes the four statistic groups.

pub mod config;
pub mod error;
pub mod filter;
pub mod loader;
pub mod logging;
pub mod output;
pub mod prompt;
pub mod query;
pub mod stats;
pub mod table;

use crate::config::Settings;
use crate::error::DataSourceError;
use crate::query::Query;
use crate::stats::StatsReport;

/// Loads the query's city, applies its filters, and computes every group.
pub fn run_query(settings: &Settings, query: Query) -> Result<StatsReport, DataSourceError> {
    let table = loader::load_city(settings, query.city)?.filtered(&query);
    Ok(StatsReport::compute(query, &table))
}
