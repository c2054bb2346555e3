//! Rolling Logger
//!
//! A `log` backend that keeps the most recent records in a fixed-size ring
//! and mirrors each one to the browser console (stderr off the web).

use std::collections::VecDeque;
use std::fmt;
use std::sync::{Mutex, OnceLock};

use chrono::{DateTime, Local};
use log::{Level, LevelFilter, Log, Metadata, Record};

pub const DEFAULT_CAPACITY: usize = 500;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoggerError {
    #[error("logger capacity must be at least one record")]
    ZeroCapacity,
    #[error("a logger is already installed")]
    AlreadyInitialized,
    #[error("logger has not been initialized")]
    NotInitialized,
}

/// One captured record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<Local>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {:<5} {}: {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

/// Circular buffer: once full, each push drops the oldest entry.
#[derive(Debug)]
pub struct RollingBuffer {
    capacity: usize,
    entries: VecDeque<LogEntry>,
}

impl RollingBuffer {
    pub fn new(capacity: usize) -> Result<Self, LoggerError> {
        if capacity == 0 {
            return Err(LoggerError::ZeroCapacity);
        }
        Ok(Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        })
    }

    pub fn push(&mut self, entry: LogEntry) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Oldest first
    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.iter().cloned().collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

pub struct RollingLogger {
    app_name: String,
    level: LevelFilter,
    buffer: Mutex<RollingBuffer>,
}

impl RollingLogger {
    pub fn new(app_name: &str, level: LevelFilter, capacity: usize) -> Result<Self, LoggerError> {
        Ok(Self {
            app_name: app_name.to_string(),
            level,
            buffer: Mutex::new(RollingBuffer::new(capacity)?),
        })
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.buffer.lock().map(|b| b.entries()).unwrap_or_default()
    }

    fn record(&self, level: Level, target: &str, message: String) {
        let entry = LogEntry {
            timestamp: Local::now(),
            level,
            target: target.to_string(),
            message,
        };
        emit(&self.app_name, &entry);
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.push(entry);
        }
    }
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.record(record.level(), record.target(), record.args().to_string());
        }
    }

    fn flush(&self) {}
}

#[cfg(target_arch = "wasm32")]
fn emit(app_name: &str, entry: &LogEntry) {
    use wasm_bindgen::JsValue;
    use web_sys::console;

    let line = JsValue::from_str(&format!("{} {}", app_name, entry));
    match entry.level {
        Level::Error => console::error_1(&line),
        Level::Warn => console::warn_1(&line),
        Level::Info => console::info_1(&line),
        Level::Debug | Level::Trace => console::debug_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(app_name: &str, entry: &LogEntry) {
    eprintln!("{} {}", app_name, entry);
}

static LOGGER: OnceLock<RollingLogger> = OnceLock::new();

/// Install the global logger. Records above `level` are discarded.
pub fn init_logger(app_name: &str, level: LevelFilter, capacity: usize) -> Result<(), LoggerError> {
    if LOGGER.get().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }
    let logger = RollingLogger::new(app_name, level, capacity)?;
    let logger = LOGGER.get_or_init(|| logger);
    log::set_logger(logger).map_err(|_| LoggerError::AlreadyInitialized)?;
    log::set_max_level(level);
    Ok(())
}

fn installed() -> Result<&'static RollingLogger, LoggerError> {
    LOGGER.get().ok_or(LoggerError::NotInitialized)
}

pub fn info(message: &str) -> Result<(), LoggerError> {
    installed()?.record(Level::Info, "app", message.to_string());
    Ok(())
}

pub fn error(message: &str) -> Result<(), LoggerError> {
    installed()?.record(Level::Error, "app", message.to_string());
    Ok(())
}

/// Snapshot of the retained records, oldest first
pub fn recent() -> Vec<LogEntry> {
    installed().map(|l| l.entries()).unwrap_or_default()
}

/// Retained records as text, one per line
pub fn dump() -> String {
    recent()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            timestamp: Local::now(),
            level: Level::Info,
            target: "test".into(),
            message: message.into(),
        }
    }

    #[test]
    fn test_buffer_evicts_oldest() {
        let mut buffer = RollingBuffer::new(2).unwrap();
        buffer.push(entry("a"));
        buffer.push(entry("b"));
        buffer.push(entry("c"));
        let messages: Vec<_> = buffer.entries().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["b", "c"]);
        buffer.clear();
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        assert_eq!(RollingBuffer::new(0).unwrap_err(), LoggerError::ZeroCapacity);
    }

    #[test]
    fn test_level_filter() {
        let logger = RollingLogger::new("Test", LevelFilter::Info, 10).unwrap();
        logger.log(
            &Record::builder()
                .level(Level::Debug)
                .target("gateway")
                .args(format_args!("dropped"))
                .build(),
        );
        logger.log(
            &Record::builder()
                .level(Level::Warn)
                .target("gateway")
                .args(format_args!("kept {}", 1))
                .build(),
        );
        let entries = logger.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "kept 1");
        assert!(entries[0].to_string().contains("WARN  gateway: kept 1"));
    }
}
