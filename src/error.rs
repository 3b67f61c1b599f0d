//! Error types for the trip pipeline.

use thiserror::Error;

/// Failure to read a city's trip data into a table.
#[derive(Error, Debug)]
pub enum DataSourceError {
    /// No data file for the city exists in the data directory
    #[error("trip data not found: {path}")]
    NotFound { path: String },

    /// The file exists but could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV syntax error or a field that does not fit its column type
    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from the header row
    #[error("{path}: missing required column '{column}'")]
    MissingColumn { path: String, column: &'static str },

    /// A row violates a record invariant
    #[error("{path}: invalid record at row {row}: {reason}")]
    InvalidRecord {
        path: String,
        row: usize,
        reason: String,
    },
}

/// A trip that breaks a record invariant.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    #[error("invalid Trip Duration {0}")]
    InvalidDuration(f64),

    #[error("empty {0}")]
    EmptyStation(&'static str),
}

/// A statistic group could not produce a value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    #[error("no trips to compute {group} statistics over")]
    EmptyTable { group: &'static str },
}

/// User input that does not name a city, month or day.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unrecognized {kind}: '{input}'")]
pub struct SelectorError {
    pub kind: &'static str,
    pub input: String,
}

impl SelectorError {
    pub(crate) fn new(kind: &'static str, input: &str) -> Self {
        Self {
            kind,
            input: input.to_string(),
        }
    }
}
