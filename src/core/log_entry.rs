//! Log entry structure

use super::log_context::{FieldValue, LogContext, RAW_PAYLOAD_KEY};
use super::log_level::LogLevel;
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::error::Error;
use std::panic::Location;

/// Failure information attached to an entry
///
/// Rendered by the text formatters as an indented block underneath the
/// message and by the notification formatter as a second code block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExceptionInfo {
    pub kind: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub causes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backtrace: Option<String>,
    #[serde(default)]
    pub interrupt: bool,
}

impl ExceptionInfo {
    pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            message: message.into(),
            causes: Vec::new(),
            backtrace: None,
            interrupt: false,
        }
    }

    /// Capture an error together with its `source()` chain
    pub fn from_error(err: &(dyn Error + 'static)) -> Self {
        let mut info = Self::new(short_type_name(err), err.to_string());
        let mut source = err.source();
        while let Some(cause) = source {
            info.causes.push(cause.to_string());
            source = cause.source();
        }
        info
    }

    /// Capture a panic payload as reported to a panic hook
    pub fn from_panic(
        payload: &(dyn Any + Send),
        location: Option<&Location<'_>>,
        backtrace: Option<String>,
    ) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "Box<dyn Any>".to_string()
        };

        let thread = std::thread::current();
        let kind = format!("panic in thread '{}'", thread.name().unwrap_or("<unnamed>"));

        let mut info = Self::new(kind, message);
        if let Some(location) = location {
            info.causes.push(format!("at {}", location));
        }
        info.backtrace = backtrace.filter(|bt| !bt.trim().is_empty());
        info
    }

    /// An interrupt request (Ctrl-C) rather than a failure
    pub fn interrupt() -> Self {
        let mut info = Self::new("Interrupt", "interrupt signal received");
        info.interrupt = true;
        info
    }

    #[must_use]
    pub fn with_cause(mut self, cause: impl Into<String>) -> Self {
        self.causes.push(cause.into());
        self
    }

    #[must_use]
    pub fn with_backtrace(mut self, backtrace: impl Into<String>) -> Self {
        self.backtrace = Some(backtrace.into());
        self
    }

    pub fn is_interrupt(&self) -> bool {
        self.interrupt
    }

    /// Standard multi-line trace text, without a trailing newline
    pub fn render(&self) -> String {
        let mut out = format!("{}: {}", self.kind, self.message);

        if !self.causes.is_empty() {
            out.push_str("\n\nCaused by:");
            for (idx, cause) in self.causes.iter().enumerate() {
                out.push_str(&format!("\n    {}: {}", idx, cause));
            }
        }

        if let Some(ref backtrace) = self.backtrace {
            out.push_str("\n\nStack backtrace:\n");
            out.push_str(backtrace.trim_end_matches('\n'));
        }

        out
    }
}

fn short_type_name(err: &dyn Error) -> String {
    // Debug output of most errors starts with the type or variant name
    let debug = format!("{:?}", err);
    let name: String = debug
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .collect();
    if name.is_empty() {
        "Error".to_string()
    } else {
        name
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub level_name: String,
    pub logger_name: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exception: Option<ExceptionInfo>,
    #[serde(default)]
    pub extra: LogContext,
}

impl LogEntry {
    pub fn new(
        level: LogLevel,
        level_name: impl Into<String>,
        logger_name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            level,
            level_name: level_name.into(),
            logger_name: logger_name.into(),
            message: message.into(),
            exception: None,
            extra: LogContext::new(),
        }
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Set the creation time from fractional seconds since the Unix epoch
    #[must_use]
    pub fn with_timestamp_secs(mut self, secs: f64) -> Self {
        let whole = secs.floor();
        let nanos = ((secs - whole) * 1_000_000_000.0).round() as u32;
        if let Some(ts) = Utc.timestamp_opt(whole as i64, nanos.min(999_999_999)).single() {
            self.timestamp = ts;
        }
        self
    }

    #[must_use]
    pub fn with_exception(mut self, exception: ExceptionInfo) -> Self {
        self.exception = Some(exception);
        self
    }

    #[must_use]
    pub fn with_extra(mut self, extra: LogContext) -> Self {
        self.extra = extra;
        self
    }

    #[must_use]
    pub fn with_raw_payload(mut self, raw: impl Into<String>) -> Self {
        self.extra
            .add_field(RAW_PAYLOAD_KEY, FieldValue::String(raw.into()));
        self
    }

    pub fn raw_payload(&self) -> Option<&str> {
        self.extra.raw_payload()
    }
}
