//! Interactive prompts for choosing a query.
//!
//! Generic over the input and output streams so the loop can run against
//! stdin/stdout or in-memory buffers.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use tracing::debug;

use crate::output::RULE_WIDTH;
use crate::query::{City, DayFilter, MonthFilter, Query};

pub const INPUT_ERROR: &str = "I'm sorry. That didn't seem to be one of the options.";

const CITY_QUESTION: &str = "\nWhich city's bikeshare data would you like to view:\n\
    Chicago, New York City, or Washington? ";
const MONTH_QUESTION: &str = "\nWould you like to see bikeshare data for an individual\n\
    month (January, February, March, April, May, or June) or\n\
    for all months (all)? ";
const DAY_QUESTION: &str = "\nWould you like to see bikeshare data for a specific day\n\
    of the week (Monday, Tuesday, Wednesday, Thursday,\n\
    Friday, Saturday, or Sunday) or for all days (all)? ";
const RESTART_QUESTION: &str = "\nWould you like to restart? Enter yes or no.\n";

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Asks for city, month and day in turn. `None` if input ends first.
    pub fn ask_query(&mut self) -> io::Result<Option<Query>> {
        writeln!(self.output, "\nHello! Let's explore some US bikeshare data!")?;

        let Some(city) = self.ask::<City>(CITY_QUESTION)? else {
            return Ok(None);
        };
        let Some(month) = self.ask::<MonthFilter>(MONTH_QUESTION)? else {
            return Ok(None);
        };
        let Some(day) = self.ask::<DayFilter>(DAY_QUESTION)? else {
            return Ok(None);
        };

        writeln!(self.output, "{}", "-".repeat(RULE_WIDTH))?;
        Ok(Some(Query::new(city, month, day)))
    }

    /// True only for `yes` or `y`.
    pub fn ask_restart(&mut self) -> io::Result<bool> {
        write!(self.output, "{RESTART_QUESTION}")?;
        self.output.flush()?;
        let answer = self.read_line()?.unwrap_or_default().to_lowercase();
        Ok(matches!(answer.as_str(), "yes" | "y"))
    }

    /// Repeats `question` until the answer parses. `None` on end of input.
    pub fn ask<T: FromStr>(&mut self, question: &str) -> io::Result<Option<T>> {
        loop {
            write!(self.output, "{question}")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.parse::<T>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => {
                    debug!(input = %line, "Rejected prompt answer");
                    writeln!(self.output, "\n{INPUT_ERROR}")?;
                }
            }
        }
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;
    use std::io::Cursor;

    fn prompter(input: &str) -> Prompter<Cursor<Vec<u8>>, Vec<u8>> {
        Prompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    fn transcript(p: &mut Prompter<Cursor<Vec<u8>>, Vec<u8>>) -> String {
        String::from_utf8(p.output().clone()).unwrap()
    }

    #[test]
    fn test_ask_query() {
        let mut p = prompter("Chicago\nmarch\nFriday\n");
        let query = p.ask_query().unwrap().unwrap();

        assert_eq!(
            query,
            Query::new(City::Chicago, MonthFilter::Only(3), DayFilter::Only(Weekday::Fri))
        );
    }

    #[test]
    fn test_invalid_answers_reprompt() {
        let mut p = prompter("paris\nnew york city\nseptember\nall\nsomeday\nall\n");
        let query = p.ask_query().unwrap().unwrap();

        assert_eq!(query, Query::unfiltered(City::NewYorkCity));
        assert_eq!(transcript(&mut p).matches(INPUT_ERROR).count(), 3);
    }

    #[test]
    fn test_end_of_input_stops() {
        let mut p = prompter("washington\n");
        assert_eq!(p.ask_query().unwrap(), None);
    }

    #[test]
    fn test_restart() {
        assert!(prompter("yes\n").ask_restart().unwrap());
        assert!(prompter("Y\n").ask_restart().unwrap());
        assert!(!prompter("no\n").ask_restart().unwrap());
        assert!(!prompter("").ask_restart().unwrap());
    }
}
