//! In-memory appender for tests and inspection

use crate::core::{Appender, LogEntry, LogLevel, Result};
use parking_lot::Mutex;
use std::sync::Arc;

/// Keeps every entry it receives; clones share the same buffer
#[derive(Debug, Clone)]
pub struct MemoryAppender {
    entries: Arc<Mutex<Vec<LogEntry>>>,
    min_level: LogLevel,
}

impl MemoryAppender {
    pub fn new() -> Self {
        Self {
            entries: Arc::default(),
            min_level: LogLevel::NOTSET,
        }
    }

    #[must_use]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.entries.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.entries.lock().iter().map(|e| e.message.clone()).collect()
    }

    pub fn clear(&self) {
        self.entries.lock().clear();
    }
}

impl Default for MemoryAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for MemoryAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        self.entries.lock().push(entry.clone());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }

    fn min_level(&self) -> LogLevel {
        self.min_level
    }
}
