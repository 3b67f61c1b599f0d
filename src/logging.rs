//! Tracing setup: colored stderr + JSON rolling log file.
//!
//! `RUST_LOG` filters the stderr layer (default `warn`, so prompts stay
//! readable) and `RUST_LOG_JSON` filters the file layer (default `debug`).
//! A log directory that cannot be created drops the file layer instead of
//! aborting the program.

use std::ffi::OsStr;
use std::io;
use std::path::Path;

use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{
    EnvFilter, Layer,
    filter::LevelFilter,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

pub const DEFAULT_LOG_FILE: &str = "logs/bikeshare_stats.log";

/// Builds a filter from `directives`, falling back to `default` for
/// anything they leave unset. Unparseable directives are skipped.
pub fn filter_from(directives: Option<&str>, default: LevelFilter) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(default.into())
        .parse_lossy(directives.unwrap_or_default())
}

/// [`filter_from`] over the value of the environment variable `var`.
pub fn env_filter(var: &str, default: LevelFilter) -> EnvFilter {
    filter_from(std::env::var(var).ok().as_deref(), default)
}

/// Daily-rotating appender writing `<dir>/<file name>.<date>`.
pub fn file_appender(log_file_path: &Path) -> Result<RollingFileAppender, InitError> {
    let log_dir = log_file_path.parent().unwrap_or(Path::new("logs"));
    let log_file_name = log_file_path
        .file_name()
        .unwrap_or(OsStr::new("bikeshare_stats.log"));

    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(log_file_name.to_string_lossy())
        .build(log_dir)
}

/// Installs the global subscriber. Keep the returned guard alive for the
/// life of the program so buffered file output is flushed.
pub fn init(log_file_path: &Path) -> Option<WorkerGuard> {
    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(io::stderr)
        .with_filter(env_filter("RUST_LOG", LevelFilter::WARN));

    let (json_layer, guard, file_error) = match file_appender(log_file_path) {
        Ok(appender) => {
            let (non_blocking_file, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(true)
                .with_writer(non_blocking_file)
                .with_filter(env_filter("RUST_LOG_JSON", LevelFilter::DEBUG));
            (Some(layer), Some(guard), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    if let Some(e) = file_error {
        warn!(
            path = %log_file_path.display(),
            error = %e,
            "Log file unavailable, logging to stderr only"
        );
    }

    guard
}
