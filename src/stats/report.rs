use std::time::{Duration, Instant};

use crate::error::StatsError;
use crate::query::Query;
use crate::table::TripTable;

use super::{
    DurationStats, StationStats, TimeStats, UserStats, duration_stats, station_stats, time_stats,
    user_stats,
};

/// A group's outcome and how long it took to compute.
#[derive(Debug, Clone, PartialEq)]
pub struct Timed<T> {
    pub result: Result<T, StatsError>,
    pub elapsed: Duration,
}

impl<T> Timed<T> {
    fn run(f: impl FnOnce() -> Result<T, StatsError>) -> Self {
        let start = Instant::now();
        let result = f();
        Self {
            result,
            elapsed: start.elapsed(),
        }
    }

    pub fn value(&self) -> Option<&T> {
        self.result.as_ref().ok()
    }
}

/// All four groups computed over one filtered table.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    pub query: Query,
    pub rows: usize,
    pub time: Timed<TimeStats>,
    pub station: Timed<StationStats>,
    pub duration: Timed<DurationStats>,
    pub user: Timed<UserStats>,
}

impl StatsReport {
    #[tracing::instrument(skip(table), fields(rows = table.len()))]
    pub fn compute(query: Query, table: &TripTable) -> Self {
        Self {
            query,
            rows: table.len(),
            time: Timed::run(|| time_stats(table)),
            station: Timed::run(|| station_stats(table)),
            duration: Timed::run(|| duration_stats(table)),
            user: Timed::run(|| user_stats(table)),
        }
    }

    /// True when the filters matched nothing.
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}
