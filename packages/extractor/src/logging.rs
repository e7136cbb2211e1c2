//! File-backed log sink for batch runs.
//!
//! The subscriber is built once per invocation and installed by the caller
//! for the duration of a batch with `tracing::subscriber::with_default`.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing::Subscriber;
use tracing_subscriber::fmt::time::ChronoLocal;
use tracing_subscriber::EnvFilter;

use crate::config::{DEFAULT_LOG_FILTER, LOG_TIME_FORMAT};
use crate::error::Result;

/// Build a subscriber appending timestamped log lines to `log_file`.
///
/// The level is taken from `RUST_LOG`, defaulting to `info`.
pub fn file_subscriber(log_file: &Path) -> Result<impl Subscriber + Send + Sync + 'static> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file)?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .with_timer(ChronoLocal::new(LOG_TIME_FORMAT.to_string()))
        .finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_file_subscriber_writes_and_appends() {
        let dir = tempdir().unwrap();
        let log_file = dir.path().join("run.log");
        fs::write(&log_file, "previous run\n").unwrap();

        let subscriber = file_subscriber(&log_file).unwrap();
        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(file = "JURITEXT000.xml", "Problem processing the file");
        });

        let content = fs::read_to_string(&log_file).unwrap();
        assert!(content.starts_with("previous run\n"));
        assert!(content.contains("ERROR"));
        assert!(content.contains("JURITEXT000.xml"));
        assert!(content.contains("Problem processing the file"));
        assert!(!content.contains('\u{1b}'), "log file must not contain ANSI codes");
    }

    #[test]
    fn test_file_subscriber_missing_directory() {
        let dir = tempdir().unwrap();
        assert!(file_subscriber(&dir.path().join("missing/run.log")).is_err());
    }
}
