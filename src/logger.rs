//! Logging setup.
//!
//! Records go through the `log` facade. [`Logger::install`] wires `fern` so
//! that every record lands in an in-memory buffer (for a debug panel) and,
//! when enabled in the config, in a log file under the data directory.

use anyhow::{Context, Result};
use chrono::Utc;
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Most lines kept in memory; older ones are dropped first
const MAX_BUFFERED_LINES: usize = 1_000;

/// Shared logger that can be used across the application
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<VecDeque<String>>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(VecDeque::with_capacity(MAX_BUFFERED_LINES))),
            log_file: None,
        }
    }

    /// Create a logger; with `enabled` records are also appended to the log file
    pub fn from_config(enabled: bool) -> Result<Self> {
        if enabled {
            Self::with_log_file(Self::get_log_file_path()?)
        } else {
            Ok(Self::new())
        }
    }

    /// Logger that also appends records to `path`, creating parent directories
    pub fn with_log_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }
        // Fail early on an unwritable location
        fern::log_file(&path).with_context(|| format!("Failed to open log file: {}", path.display()))?;

        Ok(Self {
            log_file: Some(path),
            ..Self::new()
        })
    }

    /// Build the dispatch without installing it globally.
    ///
    /// The buffer receives every record; the file output, when configured, is
    /// owned by fern and flushed per record.
    pub fn dispatch(&self, level: log::LevelFilter) -> Result<fern::Dispatch> {
        let sink = self.clone();
        let mut dispatch = fern::Dispatch::new()
            .level(level)
            .chain(fern::Output::call(move |record| {
                sink.log(format!("{} [{}] {}", record.level(), record.target(), record.args()));
            }));

        if let Some(path) = &self.log_file {
            let file = fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
            dispatch = dispatch.chain(
                fern::Dispatch::new()
                    .format(|out, message, record| {
                        out.finish(format_args!(
                            "[{}] {} [{}] {}",
                            Utc::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                            record.level(),
                            record.target(),
                            message
                        ))
                    })
                    .chain(file),
            );
        }
        Ok(dispatch)
    }

    /// Route `log` records into this logger. Can only succeed once per process.
    pub fn install(&self, level: log::LevelFilter) -> Result<()> {
        self.dispatch(level)?.apply().context("Failed to install logger")
    }

    /// Add a line to the in-memory buffer
    pub fn log(&self, message: String) {
        let timestamp = Utc::now().format("%H:%M:%S%.3f").to_string();
        let formatted_message = format!("[{}] {}", timestamp, message);

        if let Ok(mut logs) = self.logs.lock() {
            if logs.len() >= MAX_BUFFERED_LINES {
                logs.pop_front();
            }
            logs.push_back(formatted_message);
        }
    }

    /// Get all logs sorted by date (newest first)
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            logs.iter().rev().cloned().collect()
        } else {
            Vec::new()
        }
    }

    /// Clear all logs
    pub fn clear(&self) {
        if let Ok(mut logs) = self.logs.lock() {
            logs.clear();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.log_file.is_some()
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Log file location in the platform data directory
    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::data_local_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
            .map(|dir| dir.join("omnisearch").join("omnisearch.log"))
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}
