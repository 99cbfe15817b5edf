//! Rolling Logger
//!
//! `log` backend that keeps the most recent records in a circular buffer and,
//! in the browser, mirrors every record to the devtools console at the
//! matching level. The buffer can be dumped when reporting a problem.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError};

pub const DEFAULT_CAPACITY: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

impl LogEntry {
    pub fn format_line(&self) -> String {
        format!(
            "{} {:<5} {}: {}",
            self.timestamp.format("%H:%M:%S%.3f"),
            self.level,
            self.target,
            self.message
        )
    }
}

pub struct RollingLogger {
    entries: Mutex<VecDeque<LogEntry>>,
    capacity: AtomicUsize,
}

impl RollingLogger {
    pub const fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            capacity: AtomicUsize::new(capacity),
        }
    }

    pub fn set_capacity(&self, capacity: usize) {
        self.capacity.store(capacity.max(1), Ordering::Relaxed);
        if let Ok(mut entries) = self.entries.lock() {
            while entries.len() > capacity.max(1) {
                entries.pop_front();
            }
        }
    }

    pub fn push(&self, entry: LogEntry) {
        let capacity = self.capacity.load(Ordering::Relaxed);
        // A poisoned buffer only loses history
        let Ok(mut entries) = self.entries.lock() else {
            return;
        };
        if entries.len() >= capacity {
            entries.pop_front();
        }
        entries.push_back(entry);
    }

    /// Oldest first
    pub fn snapshot(&self) -> Vec<LogEntry> {
        self.entries
            .lock()
            .map(|entries| entries.iter().cloned().collect())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.clear();
        }
    }
}

impl Log for RollingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let entry = LogEntry {
            timestamp: Utc::now(),
            level: record.level(),
            target: record.target().to_string(),
            message: record.args().to_string(),
        };
        console::write(&entry);
        self.push(entry);
    }

    fn flush(&self) {}
}

static LOGGER: RollingLogger = RollingLogger::new(DEFAULT_CAPACITY);

/// Install the global logger. `level` accepts `log` level names
/// (`"debug"`, `"warn"`, ...); anything else means `info`.
pub fn init_logger(level: &str, capacity: usize) -> Result<(), SetLoggerError> {
    LOGGER.set_capacity(capacity);
    log::set_logger(&LOGGER)?;
    log::set_max_level(parse_level(level));
    Ok(())
}

pub fn parse_level(raw: &str) -> LevelFilter {
    raw.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Recent records, oldest first
pub fn recent() -> Vec<LogEntry> {
    LOGGER.snapshot()
}

/// Recent records as text, one per line
pub fn dump() -> String {
    recent()
        .iter()
        .map(LogEntry::format_line)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(target_arch = "wasm32")]
mod console {
    use super::LogEntry;
    use log::Level;
    use wasm_bindgen::JsValue;

    pub fn write(entry: &LogEntry) {
        let line = JsValue::from_str(&format!("[{}] {}", entry.target, entry.message));
        match entry.level {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod console {
    use super::LogEntry;

    pub fn write(_entry: &LogEntry) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(i: usize) -> LogEntry {
        LogEntry {
            timestamp: Utc::now(),
            level: Level::Info,
            target: "test".into(),
            message: format!("record {}", i),
        }
    }

    #[test]
    fn test_oldest_evicted() {
        let logger = RollingLogger::new(3);
        for i in 0..5 {
            logger.push(entry(i));
        }
        let messages: Vec<String> = logger.snapshot().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["record 2", "record 3", "record 4"]);
    }

    #[test]
    fn test_shrinking_capacity_trims() {
        let logger = RollingLogger::new(10);
        for i in 0..6 {
            logger.push(entry(i));
        }
        logger.set_capacity(2);
        assert_eq!(logger.snapshot().len(), 2);
        logger.clear();
        assert!(logger.snapshot().is_empty());
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level(" WARN "), LevelFilter::Warn);
        assert_eq!(parse_level("loud"), LevelFilter::Info);
    }

    #[test]
    fn test_format_line() {
        let line = entry(1).format_line();
        assert!(line.ends_with("INFO  test: record 1"));
    }
}
