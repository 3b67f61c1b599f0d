//! CLI entry point for the bike-share statistics tool.
//!
//! Runs an interactive prompt loop by default, or answers a single query
//! given on the command line.

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use bikeshare_stats::config::Settings;
use bikeshare_stats::logging;
use bikeshare_stats::output::{
    append_record, print_pretty, to_json, write_city_listing, write_report,
};
use bikeshare_stats::prompt::Prompter;
use bikeshare_stats::query::{City, DayFilter, MonthFilter, Query};
use bikeshare_stats::run_query;
use clap::{Parser, Subcommand};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "bikeshare_stats")]
#[command(about = "Explore US bike-share trip statistics", long_about = None)]
struct Cli {
    /// Directory containing the city CSV files (overrides BIKESHARE_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Choose a city, month and day interactively (the default)
    Explore,
    /// Compute statistics for one city and filter combination
    Query {
        /// chicago, new york city, or washington
        #[arg(short, long)]
        city: City,

        /// all, or a month from january to june
        #[arg(short, long, default_value = "all")]
        month: MonthFilter,

        /// all, or a day of the week
        #[arg(short, long, default_value = "all")]
        day: DayFilter,

        /// Print the report as JSON instead of text
        #[arg(long, default_value_t = false)]
        json: bool,

        /// CSV file to append a summary row to
        #[arg(short, long, value_name = "FILE")]
        export: Option<PathBuf>,
    },
    /// List supported cities and their data files
    Cities,
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let cli = Cli::parse();

    let log_file_path = std::env::var_os("LOG_FILE_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(logging::DEFAULT_LOG_FILE));
    let _log_guard = logging::init(&log_file_path);

    let settings = Settings::resolve(cli.data_dir);
    info!(data_dir = %settings.data_dir().display(), "Settings resolved");

    match cli.command.unwrap_or(Commands::Explore) {
        Commands::Explore => explore(&settings)?,
        Commands::Query {
            city,
            month,
            day,
            json,
            export,
        } => {
            let query = Query::new(city, month, day);
            let report = run_query(&settings, query)
                .with_context(|| format!("failed to load trip data for {city}"))?;
            print_pretty(&report);

            let mut stdout = io::stdout().lock();
            if json {
                writeln!(stdout, "{}", to_json(&report)?)?;
            } else {
                write_report(&mut stdout, &report)?;
            }

            if let Some(path) = export {
                append_record(&path, &report)
                    .with_context(|| format!("failed to export to {}", path.display()))?;
                info!(path = %path.display(), "Summary row exported");
            }
        }
        Commands::Cities => write_city_listing(&mut io::stdout().lock(), &settings)?,
    }

    Ok(())
}

/// Prompts for queries until the user declines to restart or input ends.
fn explore(settings: &Settings) -> Result<()> {
    let mut prompter = Prompter::new(io::stdin().lock(), io::stdout());

    loop {
        let Some(query) = prompter.ask_query()? else {
            break;
        };
        info!(city = %query.city, month = %query.month, day = %query.day, "Query selected");

        match run_query(settings, query) {
            Ok(report) => {
                print_pretty(&report);
                write_report(prompter.output(), &report)?;
            }
            Err(e) => {
                error!(error = %e, "Trip data load failed");
                writeln!(
                    prompter.output(),
                    "\nCould not load trip data for {}: {e}",
                    query.city
                )?;
            }
        }

        if !prompter.ask_restart()? {
            break;
        }
    }

    Ok(())
}
