//! In-memory trip table.
//!
//! A [`TripRecord`] computes its calendar fields and trip label once, in its
//! constructor, and exposes them read-only so they always agree with the
//! timestamp and station pair they came from.

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::Serialize;

use crate::error::RecordError;
use crate::query::Query;

/// Separator between start and end station in a trip label.
pub const TRIP_SEPARATOR: &str = " ----> ";

/// Which optional columns a source exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Schema {
    /// Both `Gender` and `Birth Year` columns are present.
    pub has_demographics: bool,
}

/// One bike trip.
#[derive(Debug, Clone, PartialEq)]
pub struct TripRecord {
    start_time: NaiveDateTime,
    end_time: NaiveDateTime,
    start_station: String,
    end_station: String,
    duration_secs: f64,
    user_type: Option<String>,
    gender: Option<String>,
    birth_year: Option<i32>,

    // derived
    month: u32,
    weekday: Weekday,
    hour: u32,
    trip: String,
}

impl TripRecord {
    /// Builds a trip, rejecting negative or non-finite durations and blank
    /// station names.
    pub fn new(
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        start_station: impl Into<String>,
        end_station: impl Into<String>,
        duration_secs: f64,
        user_type: Option<String>,
    ) -> Result<Self, RecordError> {
        let start_station = start_station.into();
        let end_station = end_station.into();

        if !duration_secs.is_finite() || duration_secs < 0.0 {
            return Err(RecordError::InvalidDuration(duration_secs));
        }
        if start_station.trim().is_empty() {
            return Err(RecordError::EmptyStation("Start Station"));
        }
        if end_station.trim().is_empty() {
            return Err(RecordError::EmptyStation("End Station"));
        }

        let trip = format!("{start_station}{TRIP_SEPARATOR}{end_station}");

        Ok(Self {
            month: start_time.month(),
            weekday: start_time.weekday(),
            hour: start_time.hour(),
            trip,
            start_time,
            end_time,
            start_station,
            end_station,
            duration_secs,
            user_type,
            gender: None,
            birth_year: None,
        })
    }

    /// Attaches gender and birth year from sources that carry them.
    pub fn with_demographics(mut self, gender: Option<String>, birth_year: Option<i32>) -> Self {
        self.gender = gender;
        self.birth_year = birth_year;
        self
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveDateTime {
        self.end_time
    }

    pub fn start_station(&self) -> &str {
        &self.start_station
    }

    pub fn end_station(&self) -> &str {
        &self.end_station
    }

    pub fn duration_secs(&self) -> f64 {
        self.duration_secs
    }

    pub fn user_type(&self) -> Option<&str> {
        self.user_type.as_deref()
    }

    pub fn gender(&self) -> Option<&str> {
        self.gender.as_deref()
    }

    pub fn birth_year(&self) -> Option<i32> {
        self.birth_year
    }

    /// Start month, 1–12.
    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn weekday(&self) -> Weekday {
        self.weekday
    }

    /// Start hour, 0–23.
    pub fn hour(&self) -> u32 {
        self.hour
    }

    /// `"<start station> ----> <end station>"`.
    pub fn trip(&self) -> &str {
        &self.trip
    }
}

/// Trips in load order, sharing one schema.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TripTable {
    records: Vec<TripRecord>,
    schema: Schema,
}

impl TripTable {
    pub fn new(records: Vec<TripRecord>, schema: Schema) -> Self {
        Self { records, schema }
    }

    pub fn records(&self) -> &[TripRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TripRecord> {
        self.records.iter()
    }

    pub fn schema(&self) -> Schema {
        self.schema
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Rows matching the query's month and day selectors.
    pub fn filtered(&self, query: &Query) -> TripTable {
        crate::filter::filter(self, query.month, query.day)
    }
}

impl<'a> IntoIterator for &'a TripTable {
    type Item = &'a TripRecord;
    type IntoIter = std::slice::Iter<'a, TripRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 15, 0)
            .unwrap()
    }

    #[test]
    fn test_derived_fields_follow_start_time() {
        // 2017-03-06 was a Monday
        let record = TripRecord::new(
            at(2017, 3, 6, 17),
            at(2017, 3, 6, 18),
            "Canal St",
            "Clark St",
            600.0,
            Some("Subscriber".into()),
        )
        .unwrap();

        assert_eq!(record.month(), 3);
        assert_eq!(record.weekday(), Weekday::Mon);
        assert_eq!(record.hour(), 17);
        assert_eq!(record.trip(), "Canal St ----> Clark St");
    }

    #[test]
    fn test_demographics_default_to_none() {
        let record =
            TripRecord::new(at(2017, 1, 1, 0), at(2017, 1, 1, 1), "A", "B", 1.0, None).unwrap();
        assert_eq!(record.gender(), None);
        assert_eq!(record.birth_year(), None);

        let record = record.with_demographics(Some("Female".into()), Some(1985));
        assert_eq!(record.gender(), Some("Female"));
        assert_eq!(record.birth_year(), Some(1985));
    }

    #[test]
    fn test_constructor_rejects_broken_trips() {
        let start = at(2017, 1, 1, 0);

        let err = TripRecord::new(start, start, "A", "B", -1.0, None).unwrap_err();
        assert_eq!(err, RecordError::InvalidDuration(-1.0));

        assert!(TripRecord::new(start, start, "A", "B", f64::NAN, None).is_err());

        let err = TripRecord::new(start, start, "  ", "B", 60.0, None).unwrap_err();
        assert_eq!(err, RecordError::EmptyStation("Start Station"));

        let err = TripRecord::new(start, start, "A", "", 60.0, None).unwrap_err();
        assert_eq!(err, RecordError::EmptyStation("End Station"));

        assert!(TripRecord::new(start, start, "A", "B", 0.0, None).is_ok());
    }

    #[test]
    fn test_empty_table() {
        let table = TripTable::default();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(!table.schema().has_demographics);
    }
}
