//! File-backed tracing setup.
//!
//! The TUI owns the terminal, so log lines only ever go to a file.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Environment variable holding a filter directive, e.g. `unitdeck=debug`
pub const LOG_ENV: &str = "UNITDECK_LOG";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to install log subscriber: {0}")]
    Install(String),
}

/// Install the global subscriber writing to `file`.
///
/// Does nothing and returns `Ok(false)` without a file.
pub fn init_logging(file: Option<&Path>, level: &str) -> Result<bool, LoggingError> {
    let Some(path) = file else {
        return Ok(false);
    };

    let writer = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    let filter = build_filter(std::env::var(LOG_ENV).ok().as_deref(), level);
    let layer = fmt::layer()
        .with_writer(Mutex::new(writer))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))?;

    Ok(true)
}

/// Filter from the environment directive when it parses, else `level`
fn build_filter(env_directive: Option<&str>, level: &str) -> EnvFilter {
    env_directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}
