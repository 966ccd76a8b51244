//! Tracing configuration and log routing.
//!
//! The server logs to stdout using a compact formatter and to a file. When
//! `CAR_REGISTRY_LOG_FILE` is set, logs are appended to that path; otherwise a file logger is
//! created under `logs/car-registry.log`. A non-blocking writer keeps request handlers off the
//! file system.
use std::sync::OnceLock;

use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

const LOG_DIR: &str = "logs";
const LOG_FILE_NAME: &str = "car-registry.log";

/// Configure tracing subscribers for stdout and file logging.
///
/// - Respects `RUST_LOG` for filtering (defaults to `info`).
/// - Installs a compact stdout layer and, when available, a file layer.
/// - Keeps the non-blocking writer guard alive for the process lifetime.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let stdout_layer = fmt::layer().with_target(false).compact();

    let registry = tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer);

    if let Some(writer) = configure_file_writer() {
        let file_layer = fmt::layer()
            .with_writer(writer)
            .with_target(true)
            .with_ansi(false)
            .compact();

        registry.with(file_layer).init();
    } else {
        registry.init();
    }
}

/// Build a non-blocking writer for file logging.
///
/// Returns `None` when the logs directory cannot be created or the target file cannot be opened.
fn configure_file_writer() -> Option<NonBlocking> {
    if let Ok(path) = std::env::var("CAR_REGISTRY_LOG_FILE") {
        let file = match std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            Ok(file) => file,
            Err(err) => {
                eprintln!("Failed to open log file {path}: {err}");
                return None;
            }
        };
        return Some(install_writer(tracing_appender::non_blocking(file)));
    }

    if let Err(err) = std::fs::create_dir_all(LOG_DIR) {
        eprintln!("Failed to create {LOG_DIR} directory: {err}");
        return None;
    }
    let appender = tracing_appender::rolling::never(LOG_DIR, LOG_FILE_NAME);
    Some(install_writer(tracing_appender::non_blocking(appender)))
}

fn install_writer((writer, guard): (NonBlocking, WorkerGuard)) -> NonBlocking {
    let _ = LOG_GUARD.set(guard);
    writer
}
