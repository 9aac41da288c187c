//! Plain text formatter
//!
//! Layout: `YYYY-MM-DD HH:MM:SS [<level>] <name>: <message>`
//!
//! A raw payload is appended to the message as an indented block surrounded
//! by newlines. An exception trace follows as a separate indented block with
//! one trailing newline.

use super::{Formatter, TextSections};
use crate::core::{LogEntry, TimestampFormat};

#[derive(Debug, Clone, Default)]
pub struct PlainFormatter {
    timestamp_format: TimestampFormat,
}

impl PlainFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timestamp format for this formatter
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_logging_kit::formatters::PlainFormatter;
    /// use rust_logging_kit::TimestampFormat;
    ///
    /// let formatter = PlainFormatter::new().with_timestamp_format(TimestampFormat::Utc);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }
}

impl Formatter for PlainFormatter {
    type Output = String;

    fn format(&self, entry: &LogEntry) -> String {
        let sections = TextSections::of(entry);

        let mut output = format!(
            "{} [{:<8}] {}: {}",
            self.timestamp_format.format(&entry.timestamp),
            entry.level_name,
            entry.logger_name,
            entry.message
        );

        if let Some(ref raw) = sections.raw_block {
            output.push_str(raw);
        }

        if let Some(ref exc) = sections.exception_block {
            if sections.needs_separator(&entry.message) {
                output.push('\n');
            }
            output.push_str(exc);
        }

        output
    }
}
