//! Logging setup.
//!
//! Everything logs through the `log` macros. [`Logger::install`] wires them to
//! a `fern` dispatch that always feeds an in-memory buffer (shown in the UI
//! debug view) and, when file logging is enabled, appends to `taskdesk.log`.

use anyhow::{Context, Result};
use chrono::Local;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

/// In-memory entries kept for the UI
const MAX_BUFFERED_LOGS: usize = 500;

/// Shared logger that can be used across the application
#[derive(Clone)]
pub struct Logger {
    logs: Arc<Mutex<Vec<String>>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// In-memory logger without a file sink
    pub fn new() -> Self {
        Self {
            logs: Arc::new(Mutex::new(Vec::new())),
            log_file: None,
        }
    }

    /// Logger honoring the `[logging] enabled` setting
    pub fn from_config(enabled: bool) -> Result<Self> {
        let mut logger = Self::new();
        if enabled {
            let path = Self::get_log_file_path()?;
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
            }
            logger.log_file = Some(path);
        }
        Ok(logger)
    }

    /// Install this logger as the global `log` backend
    pub fn install(&self, level: log::LevelFilter) -> Result<()> {
        let logs = Arc::clone(&self.logs);
        let mut dispatch = fern::Dispatch::new()
            .format(|out, message, record| {
                out.finish(format_args!(
                    "[{} {} {}] {}",
                    Local::now().format("%H:%M:%S%.3f"),
                    record.level(),
                    record.target(),
                    message
                ))
            })
            .level(level)
            .level_for("hyper", log::LevelFilter::Warn)
            .level_for("reqwest", log::LevelFilter::Warn)
            .chain(fern::Output::call(move |record| {
                push_bounded(&logs, record.args().to_string());
            }));

        if let Some(path) = &self.log_file {
            let file = fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
            dispatch = dispatch.chain(file);
        }

        dispatch.apply().context("A global logger is already installed")?;
        Ok(())
    }

    /// Add a log entry directly to the buffer
    pub fn log(&self, message: String) {
        let timestamp = Local::now().format("%H:%M:%S%.3f").to_string();
        push_bounded(&self.logs, format!("[{}] {}", timestamp, message));
    }

    /// Get all logs, newest first
    pub fn get_logs(&self) -> Vec<String> {
        if let Ok(logs) = self.logs.lock() {
            let mut sorted_logs = logs.clone();
            sorted_logs.reverse();
            sorted_logs
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

    /// Whether file logging is enabled
    pub fn is_enabled(&self) -> bool {
        self.log_file.is_some()
    }

    pub fn log_file(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Location of the log file under the user data directory
    pub fn get_log_file_path() -> Result<PathBuf> {
        dirs::data_dir()
            .or_else(dirs::cache_dir)
            .map(|dir| dir.join("taskdesk").join("taskdesk.log"))
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

fn push_bounded(logs: &Mutex<Vec<String>>, entry: String) {
    if let Ok(mut logs) = logs.lock() {
        if logs.len() >= MAX_BUFFERED_LOGS {
            logs.remove(0);
        }
        logs.push(entry);
    }
}
