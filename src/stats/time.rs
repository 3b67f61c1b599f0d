//! Most frequent times of travel.

use chrono::Weekday;
use serde::Serialize;

use super::serialize_weekday;
use super::utility::mode;
use crate::error::StatsError;
use crate::table::TripTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeStats {
    pub most_common_month: u32,
    #[serde(serialize_with = "serialize_weekday")]
    pub most_common_weekday: Weekday,
    pub most_common_hour: u32,
}

/// Modes of start month, weekday and hour.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn time_stats(table: &TripTable) -> Result<TimeStats, StatsError> {
    let empty = || StatsError::EmptyTable { group: "time" };

    Ok(TimeStats {
        most_common_month: mode(table.iter().map(|r| r.month())).ok_or_else(empty)?,
        most_common_weekday: mode(table.iter().map(|r| r.weekday())).ok_or_else(empty)?,
        most_common_hour: mode(table.iter().map(|r| r.hour())).ok_or_else(empty)?,
    })
}
