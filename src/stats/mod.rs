//! Descriptive statistics over a filtered trip table.
//!
//! Four independent groups: time of travel, stations, trip duration, and
//! users. Each is a pure function of the table and returns
//! [`StatsError::EmptyTable`](crate::error::StatsError) when there is nothing
//! to aggregate.

pub mod duration;
pub mod report;
pub mod station;
pub mod time;
pub mod user;
pub mod utility;

pub use duration::{DurationStats, SECONDS_PER_HOUR, duration_stats};
pub use report::{StatsReport, Timed};
pub use station::{StationStats, station_stats};
pub use time::{TimeStats, time_stats};
pub use user::{BirthYears, Demographics, UserStats, user_stats};
pub use utility::Share;

use chrono::Weekday;
use serde::Serializer;

use crate::query::weekday_name;

pub(crate) fn serialize_weekday<S: Serializer>(day: &Weekday, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(weekday_name(*day))
}
