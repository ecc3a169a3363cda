//! File logging bootstrap.
//!
//! The terminal belongs to the TUI, so log output goes to rotating files
//! under the profile's data directory instead of stderr.

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use std::path::Path;
use thiserror::Error;

const LOG_FILE_BASENAME: &str = "mood";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 3;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Unsupported log level '{0}' (expected trace|debug|info|warn|error|off)")]
    InvalidLevel(String),
    #[error("Failed to create log directory: {0}")]
    DirectoryError(String),
    #[error("Failed to start logger: {0}")]
    StartError(#[from] flexi_logger::FlexiLoggerError),
}

/// Start file logging. The returned handle must be kept alive for the
/// lifetime of the process; dropping it flushes and stops the logger.
pub fn init_logging(level: &str, log_dir: &Path) -> Result<LoggerHandle, LoggingError> {
    let level = normalize_level(level)?;

    std::fs::create_dir_all(log_dir)
        .map_err(|e| LoggingError::DirectoryError(format!("{}: {}", log_dir.display(), e)))?;

    let handle = Logger::try_with_str(level)?
        .log_to_file(
            FileSpec::default()
                .directory(log_dir)
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()?;

    log::info!(
        "event=app_start module=logging status=ok version={} level={} log_dir={}",
        env!("CARGO_PKG_VERSION"),
        level,
        log_dir.display()
    );

    Ok(handle)
}

fn normalize_level(level: &str) -> Result<&'static str, LoggingError> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        "off" => Ok("off"),
        other => Err(LoggingError::InvalidLevel(other.to_string())),
    }
}
