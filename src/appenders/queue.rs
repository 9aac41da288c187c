//! Appender feeding a notification delivery queue

use crate::core::{Appender, LogEntry, LogLevel, Result};
use crate::delivery::DeliverySender;
use crate::formatters::{Formatter, NotificationFormatter, RichMessage};

/// Formats entries as [`RichMessage`]s and pushes them onto a queue
///
/// Never blocks the logging call; delivery happens on the consumer side.
pub struct QueueAppender {
    sender: DeliverySender<RichMessage>,
    formatter: NotificationFormatter,
    min_level: LogLevel,
}

impl QueueAppender {
    pub fn new(sender: DeliverySender<RichMessage>) -> Self {
        Self {
            sender,
            formatter: NotificationFormatter::new(),
            min_level: LogLevel::NOTSET,
        }
    }

    #[must_use]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    pub fn dropped_count(&self) -> u64 {
        self.sender.dropped_count()
    }
}

impl Appender for QueueAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        self.sender.push(self.formatter.format(entry));
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "notification-queue"
    }

    fn min_level(&self) -> LogLevel {
        self.min_level
    }
}
