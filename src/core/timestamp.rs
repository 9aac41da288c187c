//! Timestamp formatting for text output
//!
//! The text formatters render `YYYY-MM-DD HH:MM:SS`; the variants only choose
//! which clock that is read in.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Pattern shared by the built-in variants
pub const DEFAULT_TIMESTAMP_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use rust_logging_kit::core::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let ts = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Utc.format(&ts), "2025-01-08 10:30:45");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2025-01-08 10:30:45` in the local timezone (default)
    #[default]
    Local,

    /// `2025-01-08 10:30:45` in UTC
    Utc,
}

impl TimestampFormat {
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Local => datetime
                .with_timezone(&Local)
                .format(DEFAULT_TIMESTAMP_PATTERN)
                .to_string(),
            TimestampFormat::Utc => datetime.format(DEFAULT_TIMESTAMP_PATTERN).to_string(),
        }
    }
}
