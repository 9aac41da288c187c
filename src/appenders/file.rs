//! File appender implementation

use crate::core::{Appender, LogEntry, LogLevel, LoggerError, Result, TimestampFormat};
use crate::formatters::{Formatter, PlainFormatter};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends plain-formatted entries to a file, one record per line
pub struct FileAppender {
    path: PathBuf,
    writer: BufWriter<File>,
    formatter: PlainFormatter,
    min_level: LogLevel,
}

impl FileAppender {
    /// Open `path` for appending, creating it if needed
    ///
    /// The parent directory must already exist.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                LoggerError::file_appender(path.display().to_string(), "failed to open log file", e)
            })?;
        let writer = BufWriter::new(file);

        Ok(Self {
            path,
            writer,
            formatter: PlainFormatter::new(),
            min_level: LogLevel::NOTSET,
        })
    }

    #[must_use]
    pub fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Set the timestamp format for this appender
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use rust_logging_kit::appenders::FileAppender;
    /// use rust_logging_kit::TimestampFormat;
    ///
    /// let appender = FileAppender::new("/var/log/app.log")
    ///     .unwrap()
    ///     .with_timestamp_format(TimestampFormat::Utc);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.formatter = PlainFormatter::new().with_timestamp_format(format);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Appender for FileAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let mut output = self.formatter.format(entry);
        output.push('\n');

        self.writer.write_all(output.as_bytes())?;
        // Records must be on disk before the process can die from what they report.
        self.writer.flush()?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }

    fn min_level(&self) -> LogLevel {
        self.min_level
    }
}

impl Drop for FileAppender {
    fn drop(&mut self) {
        let _ = self.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_appends_plain_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");

        let mut appender = FileAppender::new(&path).unwrap();
        appender
            .append(&LogEntry::new(LogLevel::INFO, "INFO", "app", "first"))
            .unwrap();
        appender
            .append(&LogEntry::new(LogLevel::ERROR, "ERROR", "app", "second"))
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("[INFO    ] app: first"));
        assert!(lines[1].ends_with("[ERROR   ] app: second"));
        assert!(!content.contains('\x1b'));
    }

    #[test]
    fn test_reopen_appends() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("app.log");

        for message in ["one", "two"] {
            let mut appender = FileAppender::new(&path).unwrap();
            appender
                .append(&LogEntry::new(LogLevel::INFO, "INFO", "app", message))
                .unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("app.log");

        match FileAppender::new(&path) {
            Err(LoggerError::FileAppenderError { path: p, .. }) => {
                assert!(p.ends_with("app.log"));
            }
            other => panic!("expected FileAppenderError, got {:?}", other.map(|_| ())),
        }
    }
}
