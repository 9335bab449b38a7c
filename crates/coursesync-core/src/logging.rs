//! Logging configuration using tracing
//!
//! Everything goes to a daily rolling file; stdout is reserved for NDJSON.

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable controlling the log filter.
pub const LOG_ENV_VAR: &str = "COURSESYNC_LOG";

const DEFAULT_FILTER: &str = "coursesync=info,warn";

/// Daily files are named `coursesync.log.YYYY-MM-DD`.
const LOG_FILE_PREFIX: &str = "coursesync.log";

/// Initialize the logging subsystem and return the directory logs go to.
///
/// # Examples
/// ```bash
/// COURSESYNC_LOG=debug coursesync --course 3
/// COURSESYNC_LOG=coursesync_app=trace coursesync --course 3
/// ```
pub fn init() -> Result<PathBuf> {
    let log_dir = log_directory();
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_PREFIX);

    tracing_subscriber::registry()
        .with(filter_from(std::env::var(LOG_ENV_VAR).ok()))
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    Ok(log_dir)
}

/// Directory holding the rolling log files.
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("coursesync")
        .join("logs")
}

/// A missing or unparsable filter falls back to [`DEFAULT_FILTER`].
fn filter_from(value: Option<String>) -> EnvFilter {
    value
        .and_then(|v| EnvFilter::try_new(v).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_FILTER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_uses_env_value() {
        assert_eq!(filter_from(Some("debug".to_string())).to_string(), "debug");
    }

    #[test]
    fn test_filter_falls_back_to_default() {
        assert!(filter_from(None).to_string().contains("coursesync=info"));
        assert!(filter_from(Some("coursesync=loud".to_string()))
            .to_string()
            .contains("coursesync=info"));
    }

    #[test]
    fn test_log_directory_is_namespaced() {
        assert!(log_directory().ends_with("coursesync/logs"));
    }
}
