//! CSV loader for city trip data.
//!
//! Reads the columns every city publishes plus, when present, `Gender` and
//! `Birth Year`. The presence of those two columns is checked once against
//! the header row and recorded in the table's [`Schema`].

use std::ffi::OsString;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use flate2::read::GzDecoder;
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::DataSourceError;
use crate::query::City;
use crate::table::{Schema, TripRecord, TripTable};

/// Columns every source must expose.
pub const REQUIRED_COLUMNS: [&str; 6] = [
    "Start Time",
    "End Time",
    "Start Station",
    "End Station",
    "Trip Duration",
    "User Type",
];

const GENDER_COLUMN: &str = "Gender";
const BIRTH_YEAR_COLUMN: &str = "Birth Year";

const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// One CSV row as published. Unknown columns are ignored.
#[derive(Debug, Deserialize)]
struct RawTrip {
    #[serde(rename = "Start Time")]
    start_time: String,
    #[serde(rename = "End Time")]
    end_time: String,
    #[serde(rename = "Start Station")]
    start_station: String,
    #[serde(rename = "End Station")]
    end_station: String,
    #[serde(rename = "Trip Duration")]
    trip_duration: f64,
    #[serde(rename = "User Type")]
    user_type: Option<String>,
    #[serde(rename = "Gender")]
    gender: Option<String>,
    #[serde(rename = "Birth Year")]
    birth_year: Option<f64>,
}

/// Loads every trip for `city` from the configured data directory.
///
/// Falls back to `<file>.csv.gz` when the plain CSV is absent.
///
/// # Errors
///
/// [`DataSourceError::NotFound`] if neither file exists; any other variant
/// if the file cannot be read or a row is malformed.
#[tracing::instrument(skip(settings), fields(data_dir = %settings.data_dir().display()))]
pub fn load_city(settings: &Settings, city: City) -> Result<TripTable, DataSourceError> {
    let csv_path = settings.city_path(city);
    let gz_path = gzip_sibling(&csv_path);

    let table = if csv_path.is_file() {
        let source = csv_path.display().to_string();
        let file = open(&csv_path)?;
        load_from_reader(file, &source)?
    } else if gz_path.is_file() {
        let source = gz_path.display().to_string();
        let file = open(&gz_path)?;
        debug!(path = %source, "Reading gzip-compressed trip data");
        load_from_reader(GzDecoder::new(file), &source)?
    } else {
        return Err(DataSourceError::NotFound {
            path: csv_path.display().to_string(),
        });
    };

    info!(
        %city,
        rows = table.len(),
        has_demographics = table.schema().has_demographics,
        "Trip data loaded"
    );
    Ok(table)
}

/// Parses trip rows from any CSV source. `source` names it in errors.
pub fn load_from_reader<R: Read>(reader: R, source: &str) -> Result<TripTable, DataSourceError> {
    let csv_err = |e: csv::Error| DataSourceError::Csv {
        path: source.to_string(),
        source: e,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers().map_err(csv_err)?.clone();
    let has_column = |name: &str| headers.iter().any(|h| h == name);

    for column in REQUIRED_COLUMNS {
        if !has_column(column) {
            return Err(DataSourceError::MissingColumn {
                path: source.to_string(),
                column,
            });
        }
    }

    let schema = Schema {
        has_demographics: has_column(GENDER_COLUMN) && has_column(BIRTH_YEAR_COLUMN),
    };
    debug!(source, ?schema, "Header checked");

    let mut records = Vec::new();
    for (idx, result) in rdr.deserialize::<RawTrip>().enumerate() {
        let raw = result.map_err(csv_err)?;
        let record = to_record(raw, schema).map_err(|reason| DataSourceError::InvalidRecord {
            path: source.to_string(),
            row: idx + 1,
            reason,
        })?;
        records.push(record);
    }

    Ok(TripTable::new(records, schema))
}

fn to_record(raw: RawTrip, schema: Schema) -> Result<TripRecord, String> {
    let start_time = parse_timestamp(&raw.start_time)
        .ok_or_else(|| format!("unparseable Start Time '{}'", raw.start_time))?;
    let end_time = parse_timestamp(&raw.end_time)
        .ok_or_else(|| format!("unparseable End Time '{}'", raw.end_time))?;

    let record = TripRecord::new(
        start_time,
        end_time,
        raw.start_station,
        raw.end_station,
        raw.trip_duration,
        non_blank(raw.user_type),
    )
    .map_err(|e| e.to_string())?;

    if !schema.has_demographics {
        return Ok(record);
    }

    let birth_year = match raw.birth_year {
        Some(year) if year.is_finite() => Some(year.round() as i32),
        Some(year) => return Err(format!("invalid Birth Year {year}")),
        None => None,
    };
    Ok(record.with_demographics(non_blank(raw.gender), birth_year))
}

fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn gzip_sibling(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".gz");
    PathBuf::from(name)
}

fn open(path: &Path) -> Result<File, DataSourceError> {
    File::open(path).map_err(|source| DataSourceError::Io {
        path: path.display().to_string(),
        source,
    })
}
