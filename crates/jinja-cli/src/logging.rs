//! Diagnostic logging for the binary.
//!
//! The libraries only emit `tracing` events. This module installs the single
//! subscriber that prints them to stderr.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive that replaces the level
/// chosen on the command line, e.g. `JINJA_LOG=jinja_data=trace`.
pub const LOG_ENV: &str = "JINJA_LOG";

/// Logging configuration derived from the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    pub level: LevelFilter,
}

impl LogConfig {
    /// `quiet` wins over any number of `-v`.
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        let level = match (quiet, verbose) {
            (true, _) => LevelFilter::ERROR,
            (false, 0) => LevelFilter::WARN,
            (false, 1) => LevelFilter::INFO,
            (false, 2) => LevelFilter::DEBUG,
            (false, _) => LevelFilter::TRACE,
        };
        Self { level }
    }

    fn filter(&self) -> EnvFilter {
        EnvFilter::builder()
            .with_default_directive(self.level.into())
            .with_env_var(LOG_ENV)
            .from_env_lossy()
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::from_flags(0, false)
    }
}

/// Installs the stderr subscriber. Later calls are no-ops.
pub fn init(config: LogConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
