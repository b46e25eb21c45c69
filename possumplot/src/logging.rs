//! Logging setup.
//!
//! Events go to two places:
//! - `logs/possumplot.log`, cleared at the start of every session
//! - stdout, in a compact single-line format
//!
//! The level defaults to `info` and can be changed with `RUST_LOG`.

use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Guard that must be kept alive for the duration of logging.
///
/// Dropping this guard flushes and closes the log file writer.
pub struct LoggingGuard {
    _file_guard: WorkerGuard,
}

/// Install the global subscriber.
///
/// Creates `log_dir` if needed and truncates `log_file` before writing.
///
/// # Errors
///
/// Returns an error if the directory cannot be created, the log file cannot
/// be cleared, or a global subscriber is already installed.
pub fn init_logging(log_dir: &Path, log_file: &str) -> Result<LoggingGuard, io::Error> {
    fs::create_dir_all(log_dir)?;
    fs::write(log_dir.join(log_file), "")?;

    let file_appender = tracing_appender::rolling::never(log_dir, log_file);
    let (non_blocking_file, file_guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false)
        .with_target(true);

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_target(false)
        .compact();

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

/// Default log directory, relative to the working directory.
pub fn default_log_dir() -> &'static Path {
    Path::new("logs")
}

/// Default log file name.
pub fn default_log_file() -> &'static str {
    "possumplot.log"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        assert_eq!(default_log_dir(), Path::new("logs"));
        assert_eq!(default_log_file(), "possumplot.log");
    }

    #[test]
    fn test_guard_structure() {
        use tracing_appender::non_blocking::NonBlocking;

        let (non_blocking, guard) = NonBlocking::new(std::io::sink());
        drop(non_blocking);

        let _logging_guard = LoggingGuard { _file_guard: guard };
    }

    // A global subscriber can only be installed once per process, so this is
    // the only test that calls init_logging.
    #[test]
    fn test_init_clears_previous_log() {
        let dir = tempfile::TempDir::new().unwrap();
        let log_dir = dir.path().join("logs");
        fs::create_dir_all(&log_dir).unwrap();
        fs::write(log_dir.join("test.log"), "old session").unwrap();

        let guard = init_logging(&log_dir, "test.log");

        assert!(guard.is_ok());
        assert!(!fs::read_to_string(log_dir.join("test.log"))
            .unwrap()
            .contains("old session"));
    }
}
