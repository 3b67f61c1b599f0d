//! Presentation of statistics reports.
//!
//! Supports a plain-text console report, JSON serialization, and CSV append
//! of one summary row per query.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use tracing::debug;

use crate::config::Settings;
use crate::error::StatsError;
use crate::query::{City, DayFilter, MonthFilter, Query, month_name, weekday_name};
use crate::stats::{
    Demographics, DurationStats, Share, StationStats, StatsReport, TimeStats, Timed, UserStats,
};

pub const RULE_WIDTH: usize = 60;

const NO_DATA: &str = "No trips match the selected filters.";

/// Writes the four statistic sections as plain text.
pub fn write_report<W: Write>(out: &mut W, report: &StatsReport) -> io::Result<()> {
    writeln!(out, "\nCalculating The Most Frequent Times of Travel...\n")?;
    section(out, &report.time, write_time)?;

    writeln!(
        out,
        "\nCalculating The Most Popular Stations and Trip Combinations...\n"
    )?;
    section(out, &report.station, write_station)?;

    writeln!(out, "\nCalculating Trip Duration...\n")?;
    section(out, &report.duration, write_duration)?;

    writeln!(out, "\nCalculating User Stats...\n")?;
    let city = report.query.city;
    section(out, &report.user, |out, stats| write_user(out, stats, city))?;

    Ok(())
}

fn section<W, T, F>(out: &mut W, group: &Timed<T>, body: F) -> io::Result<()>
where
    W: Write,
    F: FnOnce(&mut W, &T) -> io::Result<()>,
{
    match &group.result {
        Ok(stats) => body(out, stats)?,
        Err(StatsError::EmptyTable { .. }) => writeln!(out, "{NO_DATA}")?,
    }
    write_elapsed(out, group.elapsed)
}

fn write_elapsed<W: Write>(out: &mut W, elapsed: Duration) -> io::Result<()> {
    writeln!(out, "\nThis took {:.3} seconds.", elapsed.as_secs_f64())?;
    writeln!(out, "{}", "-".repeat(RULE_WIDTH))
}

fn write_time<W: Write>(out: &mut W, stats: &TimeStats) -> io::Result<()> {
    writeln!(
        out,
        "Most common month: {}",
        month_name(stats.most_common_month)
    )?;
    writeln!(
        out,
        "Most common day of week: {}",
        weekday_name(stats.most_common_weekday)
    )?;
    writeln!(out, "Most common hour: {}", stats.most_common_hour)
}

fn write_station<W: Write>(out: &mut W, stats: &StationStats) -> io::Result<()> {
    writeln!(
        out,
        "Most commonly used start station: {}",
        stats.most_common_start_station
    )?;
    writeln!(
        out,
        "Most commonly used end station: {}",
        stats.most_common_end_station
    )?;
    writeln!(out, "Most commonly used trip: {}", stats.most_common_trip)
}

fn write_duration<W: Write>(out: &mut W, stats: &DurationStats) -> io::Result<()> {
    writeln!(
        out,
        "Total travel time for all trips in hours: {}",
        thousands(stats.total_hours)
    )?;
    writeln!(
        out,
        "Mean travel time per trip in hours: {:.2}",
        stats.mean_hours
    )
}

fn write_user<W: Write>(out: &mut W, stats: &UserStats, city: City) -> io::Result<()> {
    writeln!(out, "User Type Breakdown (%):\n")?;
    write_shares(out, &stats.user_types)?;

    match &stats.demographics {
        Demographics::Unavailable => writeln!(
            out,
            "\nGender and birth year data are not available for {city}."
        ),
        Demographics::Available {
            genders,
            birth_years,
        } => {
            writeln!(out, "\nUser Gender Breakdown (%) and Birth Year:\n")?;
            write_shares(out, genders)?;
            match birth_years {
                Some(years) => {
                    writeln!(out, "\nEarliest birth year: {}", years.earliest)?;
                    writeln!(out, "Most recent birth year: {}", years.most_recent)?;
                    writeln!(out, "Most common birth year: {}", years.most_common)
                }
                None => writeln!(out, "\nNo birth years recorded for these trips."),
            }
        }
    }
}

fn write_shares<W: Write>(out: &mut W, shares: &[Share]) -> io::Result<()> {
    for share in shares {
        writeln!(out, "{:<16}{:>7.2}%", share.value, share.fraction * 100.0)?;
    }
    Ok(())
}

/// Lists each supported city with its data file and whether it exists.
pub fn write_city_listing<W: Write>(out: &mut W, settings: &Settings) -> io::Result<()> {
    for city in City::ALL {
        let path = settings.city_path(city);
        let status = if path.is_file() { "found" } else { "missing" };
        let shown = path.display().to_string();
        writeln!(out, "{city:<15}{shown:<40}{status}")?;
    }
    Ok(())
}

/// Formats an integer with comma thousands separators.
pub fn thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    query: &'a Query,
    rows: usize,
    time_stats: Option<&'a TimeStats>,
    station_stats: Option<&'a StationStats>,
    duration_stats: Option<&'a DurationStats>,
    user_stats: Option<&'a UserStats>,
}

/// Serializes a report as pretty-printed JSON. Empty groups become `null`.
pub fn to_json(report: &StatsReport) -> Result<String> {
    let json = JsonReport {
        query: &report.query,
        rows: report.rows,
        time_stats: report.time.value(),
        station_stats: report.station.value(),
        duration_stats: report.duration.value(),
        user_stats: report.user.value(),
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

/// Logs a report using Rust's debug pretty-print format.
pub fn print_pretty(report: &StatsReport) {
    debug!("{:#?}", report);
}

/// One flattened CSV row per answered query.
#[derive(Debug, Serialize)]
pub struct SummaryRow {
    pub generated_at: DateTime<Utc>,
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
    pub rows: usize,
    pub most_common_month: Option<u32>,
    pub most_common_weekday: Option<&'static str>,
    pub most_common_hour: Option<u32>,
    pub most_common_start_station: Option<String>,
    pub most_common_end_station: Option<String>,
    pub most_common_trip: Option<String>,
    pub total_hours: Option<u64>,
    pub mean_hours: Option<f64>,
    pub top_user_type: Option<String>,
    pub earliest_birth_year: Option<i32>,
    pub most_recent_birth_year: Option<i32>,
    pub most_common_birth_year: Option<i32>,
}

impl SummaryRow {
    pub fn from_report(report: &StatsReport) -> Self {
        let time = report.time.value();
        let station = report.station.value();
        let duration = report.duration.value();
        let user = report.user.value();
        let birth_years = user.and_then(|u| match &u.demographics {
            Demographics::Available { birth_years, .. } => *birth_years,
            Demographics::Unavailable => None,
        });

        SummaryRow {
            generated_at: Utc::now(),
            city: report.query.city,
            month: report.query.month,
            day: report.query.day,
            rows: report.rows,
            most_common_month: time.map(|t| t.most_common_month),
            most_common_weekday: time.map(|t| weekday_name(t.most_common_weekday)),
            most_common_hour: time.map(|t| t.most_common_hour),
            most_common_start_station: station.map(|s| s.most_common_start_station.clone()),
            most_common_end_station: station.map(|s| s.most_common_end_station.clone()),
            most_common_trip: station.map(|s| s.most_common_trip.clone()),
            total_hours: duration.map(|d| d.total_hours),
            mean_hours: duration.map(|d| d.mean_hours),
            top_user_type: user
                .and_then(|u| u.user_types.first())
                .map(|s| s.value.clone()),
            earliest_birth_year: birth_years.map(|b| b.earliest),
            most_recent_birth_year: birth_years.map(|b| b.most_recent),
            most_common_birth_year: birth_years.map(|b| b.most_common),
        }
    }
}

/// Appends a [`SummaryRow`] for `report` to a CSV file.
///
/// Creates the file with headers if it does not already exist.
pub fn append_record(path: &Path, report: &StatsReport) -> Result<()> {
    let file_exists = path.exists();
    debug!(path = %path.display(), file_exists, "Appending CSV record");

    let file = OpenOptions::new().append(true).create(true).open(path)?;

    let mut writer = WriterBuilder::new()
        .has_headers(!file_exists) // header only on the first write
        .from_writer(file);

    writer.serialize(SummaryRow::from_report(report))?;
    writer.flush()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::test_support::{table, trip};
    use crate::table::TripTable;
    use std::fs;

    fn sample_report() -> StatsReport {
        let table = table(vec![
            trip("2017-01-02 08:00:00", "Canal St", "Clark St", 7200.0),
            trip("2017-01-02 09:00:00", "Canal St", "Lake St", 3600.0),
        ]);
        StatsReport::compute(Query::unfiltered(City::Washington), &table)
    }

    fn render(report: &StatsReport) -> String {
        let mut buf = Vec::new();
        write_report(&mut buf, report).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_thousands() {
        assert_eq!(thousands(0), "0");
        assert_eq!(thousands(999), "999");
        assert_eq!(thousands(1000), "1,000");
        assert_eq!(thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_text_report_sections() {
        let text = render(&sample_report());

        assert!(text.contains("Most common month: January"));
        assert!(text.contains("Most common day of week: Monday"));
        assert!(text.contains("Most commonly used start station: Canal St"));
        assert!(text.contains("Most commonly used trip: Canal St ----> Clark St"));
        assert!(text.contains("Total travel time for all trips in hours: 3"));
        assert!(text.contains("Mean travel time per trip in hours: 1.50"));
        assert!(text.contains("Gender and birth year data are not available for Washington."));
        assert_eq!(text.matches("This took").count(), 4);
    }

    #[test]
    fn test_text_report_for_empty_table() {
        let report = StatsReport::compute(Query::unfiltered(City::Chicago), &TripTable::default());
        let text = render(&report);
        assert_eq!(text.matches(NO_DATA).count(), 4);
    }

    #[test]
    fn test_json_report() {
        let json: serde_json::Value = serde_json::from_str(&to_json(&sample_report()).unwrap()).unwrap();
        assert_eq!(json["rows"], 2);
        assert_eq!(json["query"]["city"], "washington");
        assert_eq!(json["duration_stats"]["total_hours"], 3);
        assert_eq!(json["user_stats"]["demographics"]["status"], "unavailable");
    }

    #[test]
    fn test_json_report_nulls_empty_groups() {
        let report = StatsReport::compute(Query::unfiltered(City::Chicago), &TripTable::default());
        let json: serde_json::Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();
        assert!(json["time_stats"].is_null());
        assert!(json["user_stats"].is_null());
    }

    #[test]
    fn test_city_listing_marks_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("chicago.csv"), "").unwrap();

        let mut buf = Vec::new();
        write_city_listing(&mut buf, &Settings::new(dir.path())).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("Chicago"));
        assert!(lines[0].ends_with("found"));
        assert!(lines[1].starts_with("New York City"));
        assert!(lines[1].ends_with("missing"));
        assert!(lines[2].contains("washington.csv"));
        assert!(lines[2].ends_with("missing"));
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&sample_report());
    }

    #[test]
    fn test_append_record_writes_header_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.csv");

        let report = sample_report();
        append_record(&path, &report).unwrap();
        append_record(&path, &report).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("generated_at,city,month,day,rows"));
        assert!(lines[1].contains("washington,all,all,2"));
    }
}
