//! Month/day selection over a loaded table.

use tracing::debug;

use crate::query::{DayFilter, MonthFilter};
use crate::table::TripTable;

/// Returns a new table with the rows matching both selectors, in load order.
///
/// The source table is left untouched. No matches yields an empty table with
/// the same schema.
#[tracing::instrument(skip(table), fields(rows_in = table.len()))]
pub fn filter(table: &TripTable, month: MonthFilter, day: DayFilter) -> TripTable {
    let records: Vec<_> = table
        .iter()
        .filter(|r| month.matches(r.month()) && day.matches(r.weekday()))
        .cloned()
        .collect();

    debug!(rows_out = records.len(), "Filter applied");
    TripTable::new(records, table.schema())
}
