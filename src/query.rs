//! Query parameters: which city to load and which month/day to keep.
//!
//! Selectors parse case-insensitively from the words a user types at the
//! prompt or on the command line, and normalize to `chrono` values.

use std::fmt;
use std::str::FromStr;

use chrono::{Month, Weekday};
use serde::{Serialize, Serializer};

use crate::error::SelectorError;

/// The published trip data covers January through June.
pub const LAST_MONTH_WITH_DATA: u32 = 6;

/// Cities with a trip data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    /// Name of the CSV file holding this city's trips.
    pub fn file_name(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        })
    }
}

impl FromStr for City {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('_', " ");
        match normalized.as_str() {
            "chicago" => Ok(City::Chicago),
            "new york city" | "new york" | "nyc" => Ok(City::NewYorkCity),
            "washington" => Ok(City::Washington),
            _ => Err(SelectorError::new("city", s)),
        }
    }
}

/// Keeps every month, or only trips starting in one month (1–12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MonthFilter {
    #[default]
    All,
    Only(u32),
}

impl MonthFilter {
    /// Builds a filter for a month number, rejecting anything outside 1–12.
    pub fn month(number: u32) -> Result<Self, SelectorError> {
        if (1..=12).contains(&number) {
            Ok(MonthFilter::Only(number))
        } else {
            Err(SelectorError::new("month", &number.to_string()))
        }
    }

    pub fn matches(self, month: u32) -> bool {
        match self {
            MonthFilter::All => true,
            MonthFilter::Only(m) => m == month,
        }
    }
}

impl fmt::Display for MonthFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MonthFilter::All => f.pad("all"),
            MonthFilter::Only(m) => f.pad(month_name(*m)),
        }
    }
}

/// Accepts `all` or a month name within the published data range.
impl FromStr for MonthFilter {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.eq_ignore_ascii_case("all") {
            return Ok(MonthFilter::All);
        }
        let month = input
            .parse::<Month>()
            .map_err(|_| SelectorError::new("month", s))?;
        let number = month.number_from_month();
        if number > LAST_MONTH_WITH_DATA {
            return Err(SelectorError::new("month", s));
        }
        Ok(MonthFilter::Only(number))
    }
}

impl Serialize for MonthFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Keeps every weekday, or only trips starting on one weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayFilter {
    #[default]
    All,
    Only(Weekday),
}

impl DayFilter {
    pub fn matches(self, weekday: Weekday) -> bool {
        match self {
            DayFilter::All => true,
            DayFilter::Only(d) => d == weekday,
        }
    }
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::All => f.pad("all"),
            DayFilter::Only(d) => f.pad(weekday_name(*d)),
        }
    }
}

impl FromStr for DayFilter {
    type Err = SelectorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.eq_ignore_ascii_case("all") {
            return Ok(DayFilter::All);
        }
        input
            .parse::<Weekday>()
            .map(DayFilter::Only)
            .map_err(|_| SelectorError::new("day", s))
    }
}

impl Serialize for DayFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// One question asked of the data: a city and its month/day selectors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Query {
    pub city: City,
    pub month: MonthFilter,
    pub day: DayFilter,
}

impl Query {
    pub fn new(city: City, month: MonthFilter, day: DayFilter) -> Self {
        Self { city, month, day }
    }

    /// A query over every trip for `city`.
    pub fn unfiltered(city: City) -> Self {
        Self::new(city, MonthFilter::All, DayFilter::All)
    }
}

/// Full English weekday name, e.g. `Monday`.
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Full English month name for 1–12; `"unknown"` otherwise.
pub fn month_name(number: u32) -> &'static str {
    u8::try_from(number)
        .ok()
        .and_then(|n| Month::try_from(n).ok())
        .map(|m| m.name())
        .unwrap_or("unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_city_parse_is_case_insensitive() {
        assert_eq!("Chicago".parse::<City>().unwrap(), City::Chicago);
        assert_eq!("NEW YORK CITY".parse::<City>().unwrap(), City::NewYorkCity);
        assert_eq!("new_york_city".parse::<City>().unwrap(), City::NewYorkCity);
        assert_eq!(" washington ".parse::<City>().unwrap(), City::Washington);
    }

    #[test]
    fn test_city_parse_rejects_unknown() {
        let err = "boston".parse::<City>().unwrap_err();
        assert_eq!(err.kind, "city");
        assert_eq!(err.input, "boston");
    }

    #[test]
    fn test_city_file_names() {
        assert_eq!(City::Chicago.file_name(), "chicago.csv");
        assert_eq!(City::NewYorkCity.file_name(), "new_york_city.csv");
        assert_eq!(City::Washington.file_name(), "washington.csv");
    }

    #[test]
    fn test_month_filter_parse() {
        assert_eq!("all".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert_eq!("ALL".parse::<MonthFilter>().unwrap(), MonthFilter::All);
        assert_eq!("January".parse::<MonthFilter>().unwrap(), MonthFilter::Only(1));
        assert_eq!("june".parse::<MonthFilter>().unwrap(), MonthFilter::Only(6));
    }

    #[test]
    fn test_month_filter_rejects_months_without_data() {
        assert!("july".parse::<MonthFilter>().is_err());
        assert!("december".parse::<MonthFilter>().is_err());
        assert!("smarch".parse::<MonthFilter>().is_err());
    }

    #[test]
    fn test_month_filter_from_number() {
        assert_eq!(MonthFilter::month(12).unwrap(), MonthFilter::Only(12));
        assert!(MonthFilter::month(0).is_err());
        assert!(MonthFilter::month(13).is_err());
    }

    #[test]
    fn test_day_filter_parse() {
        assert_eq!("all".parse::<DayFilter>().unwrap(), DayFilter::All);
        assert_eq!(
            "monday".parse::<DayFilter>().unwrap(),
            DayFilter::Only(Weekday::Mon)
        );
        assert_eq!(
            "SUNDAY".parse::<DayFilter>().unwrap(),
            DayFilter::Only(Weekday::Sun)
        );
        assert!("funday".parse::<DayFilter>().is_err());
    }

    #[test]
    fn test_filter_display() {
        assert_eq!(MonthFilter::Only(3).to_string(), "March");
        assert_eq!(MonthFilter::All.to_string(), "all");
        assert_eq!(DayFilter::Only(Weekday::Wed).to_string(), "Wednesday");
    }

    #[test]
    fn test_query_serializes_to_words() {
        let query = Query::new(City::NewYorkCity, MonthFilter::Only(2), DayFilter::All);
        let json = serde_json::to_value(query).unwrap();
        assert_eq!(json["city"], "new_york_city");
        assert_eq!(json["month"], "February");
        assert_eq!(json["day"], "all");
    }
}
