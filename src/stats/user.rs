//! User type and demographic breakdowns.
//!
//! Gender and birth year only exist for some cities. Whether they are
//! reported depends on the table's [`Schema`](crate::table::Schema), never
//! on a lookup failing.

use serde::Serialize;

use super::utility::{Share, mode, value_shares};
use crate::error::StatsError;
use crate::table::TripTable;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserStats {
    pub user_types: Vec<Share>,
    pub demographics: Demographics,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Demographics {
    /// The source has no gender or birth year columns.
    Unavailable,
    Available {
        genders: Vec<Share>,
        /// `None` when no trip in the table records a birth year.
        birth_years: Option<BirthYears>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BirthYears {
    pub earliest: i32,
    pub most_recent: i32,
    pub most_common: i32,
}

#[tracing::instrument(skip(table), fields(rows = table.len()))]
pub fn user_stats(table: &TripTable) -> Result<UserStats, StatsError> {
    if table.is_empty() {
        return Err(StatsError::EmptyTable { group: "user" });
    }

    let user_types = value_shares(table.iter().filter_map(|r| r.user_type()));

    let demographics = if table.schema().has_demographics {
        Demographics::Available {
            genders: value_shares(table.iter().filter_map(|r| r.gender())),
            birth_years: birth_years(table),
        }
    } else {
        Demographics::Unavailable
    };

    Ok(UserStats {
        user_types,
        demographics,
    })
}

fn birth_years(table: &TripTable) -> Option<BirthYears> {
    let years = || table.iter().filter_map(|r| r.birth_year());

    Some(BirthYears {
        earliest: years().min()?,
        most_recent: years().max()?,
        most_common: mode(years())?,
    })
}
