//! Most popular stations and trips.

use serde::Serialize;

use super::utility::mode;
use crate::error::StatsError;
use crate::table::TripTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationStats {
    pub most_common_start_station: String,
    pub most_common_end_station: String,
    pub most_common_trip: String,
}

/// Modes of start station, end station and start/end pair.
#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn station_stats(table: &TripTable) -> Result<StationStats, StatsError> {
    let empty = || StatsError::EmptyTable { group: "station" };

    let start = mode(table.iter().map(|r| r.start_station())).ok_or_else(empty)?;
    let end = mode(table.iter().map(|r| r.end_station())).ok_or_else(empty)?;
    let trip = mode(table.iter().map(|r| r.trip())).ok_or_else(empty)?;

    Ok(StationStats {
        most_common_start_station: start.to_string(),
        most_common_end_station: end.to_string(),
        most_common_trip: trip.to_string(),
    })
}
