//! File logger for the terminal binary.
//!
//! The alternate screen owns stdout/stderr while the quiz runs, so records go
//! to the file named by `VOWEL_GRID_LOG_PATH`. Without a path, logging stays
//! off.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use anyhow::{Context, Result};
use log::{LevelFilter, Metadata, Record};

pub const LOG_PATH_VAR: &str = "VOWEL_GRID_LOG_PATH";
pub const LOG_LEVEL_VAR: &str = "VOWEL_GRID_LOG";

struct FileLogger {
    file: Mutex<File>,
}

impl log::Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut file) = self.file.lock() {
            let _ = writeln!(file, "[{}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {
        if let Ok(mut file) = self.file.lock() {
            let _ = file.flush();
        }
    }
}

/// Parse a level name (case-insensitive); unknown names give `None`.
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.trim().parse::<LevelFilter>().ok()
}

pub fn log_level_from_env() -> LevelFilter {
    std::env::var(LOG_LEVEL_VAR)
        .ok()
        .and_then(|s| parse_level(&s))
        .unwrap_or(LevelFilter::Warn)
}

/// Install the file logger at `path` with `level`.
///
/// A logger can only be installed once per process; later calls fail.
pub fn init_file_logger(path: &Path, level: LevelFilter) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening log file {}", path.display()))?;
    let logger: &'static FileLogger = Box::leak(Box::new(FileLogger {
        file: Mutex::new(file),
    }));
    log::set_logger(logger).map_err(|e| anyhow::anyhow!("installing logger: {e}"))?;
    log::set_max_level(level);
    Ok(())
}

/// Install the file logger if `VOWEL_GRID_LOG_PATH` is set.
pub fn init_from_env() -> Result<()> {
    match std::env::var_os(LOG_PATH_VAR) {
        Some(path) if !path.is_empty() => init_file_logger(Path::new(&path), log_level_from_env()),
        _ => Ok(()),
    }
}
