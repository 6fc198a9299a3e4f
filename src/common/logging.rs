//! Logging and tracing configuration
//!
//! All diagnostics go to stderr so stdout stays clean for results. Console
//! probe records are emitted under the `console` target.

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::paths;

/// Default filter when `RUST_LOG` is unset
const DEFAULT_FILTER: &str = "netprobe=info,console=debug,warn";

/// Name of the log file inside the log directory
const LOG_FILE: &str = "netprobe.log";

/// Initialize tracing for the CLI
///
/// Logs are controlled by the `RUST_LOG` environment variable. When
/// `to_file` is set, events are also appended to `<data_dir>/logs/netprobe.log`
/// through a non-blocking writer; the returned guard must be held until exit
/// so buffered lines are flushed.
pub fn init_cli(to_file: bool) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact();

    let file_writer = if to_file { open_log_dir() } else { None };

    match file_writer {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true);

            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .with(file_layer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stderr_layer)
                .init();
            None
        }
    }
}

/// Get the path to the log file
pub fn log_file_path() -> Option<PathBuf> {
    paths::log_dir().map(|d| d.join(LOG_FILE))
}

fn open_log_dir() -> Option<PathBuf> {
    let dir = paths::log_dir()?;
    match std::fs::create_dir_all(&dir) {
        Ok(()) => Some(dir),
        Err(e) => {
            eprintln!("Warning: Could not create log directory: {}", e);
            None
        }
    }
}
