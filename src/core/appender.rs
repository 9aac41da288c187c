//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry, log_level::LogLevel};

pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;

    /// Entries below this level are skipped by the logger
    fn min_level(&self) -> LogLevel {
        LogLevel::NOTSET
    }
}
