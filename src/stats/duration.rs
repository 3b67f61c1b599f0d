//! Total and average trip duration.

use serde::Serialize;

use super::utility::{mean, round2};
use crate::error::StatsError;
use crate::table::TripTable;

pub const SECONDS_PER_HOUR: f64 = 3600.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationStats {
    pub total_secs: f64,
    pub mean_secs: f64,
    /// Whole hours, truncated.
    pub total_hours: u64,
    /// Hours, rounded to two decimals.
    pub mean_hours: f64,
}

#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn duration_stats(table: &TripTable) -> Result<DurationStats, StatsError> {
    if table.is_empty() {
        return Err(StatsError::EmptyTable { group: "duration" });
    }

    let durations: Vec<f64> = table.iter().map(|r| r.duration_secs()).collect();
    let total_secs: f64 = durations.iter().sum();
    let mean_secs = mean(&durations);

    Ok(DurationStats {
        total_secs,
        mean_secs,
        total_hours: (total_secs / SECONDS_PER_HOUR) as u64,
        mean_hours: round2(mean_secs / SECONDS_PER_HOUR),
    })
}
