use std::io::{self, IsTerminal};
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable checked before `RUST_LOG`.
pub const LOG_ENV: &str = "QUAKEWATCH_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Pretty,
}

/// Initialize the logging system.
///
/// - `TOKIO_CONSOLE` set: hand everything to tokio-console instead
/// - otherwise filter from `QUAKEWATCH_LOG`, then `RUST_LOG`, then "info"
/// - output always goes to stderr; stdout belongs to the dashboard
pub fn init_logging(format: LogFormat) {
    // If tokio-console is enabled, DO NOT install the normal subscriber
    if std::env::var("TOKIO_CONSOLE").is_ok() {
        init_console_logging();
    } else {
        init_normal_logging(format);
    }
}

pub fn init_normal_logging(format: LogFormat) {
    let builder = fmt().with_env_filter(env_filter()).with_writer(io::stderr);

    match format {
        LogFormat::Json => builder.json().flatten_event(true).init(),
        LogFormat::Pretty => builder.compact().init(),
    }
}

fn init_console_logging() {
    console_subscriber::init();
}

pub fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

pub fn default_log_format() -> LogFormat {
    if io::stderr().is_terminal() {
        LogFormat::Pretty
    } else {
        LogFormat::Json
    }
}
