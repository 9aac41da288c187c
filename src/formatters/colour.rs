//! ANSI colour formatter
//!
//! Produces the same text as [`PlainFormatter`](super::PlainFormatter) with
//! every field wrapped in an SGR escape sequence:
//!
//! | element                | code    |                      |
//! |------------------------|---------|----------------------|
//! | timestamp, punctuation | `30;2`  | black, dim           |
//! | NOTSET                 | `30;1`  | black, bold          |
//! | DEBUG                  | `35;1`  | magenta, bold        |
//! | INFO                   | `37;1`  | white, bold          |
//! | NOTICE                 | `32;1`  | green, bold          |
//! | WARNING                | `33;1`  | yellow, bold         |
//! | ERROR                  | `31;1`  | red, bold            |
//! | CRITICAL               | `41;1`  | red background, bold |
//! | logger name            | `34`    | blue                 |
//! | exception block        | `31`    | red                  |
//! | raw payload block      | `36`    | cyan                 |
//!
//! The message itself keeps the terminal's default colour. Severities without
//! an entry use the DEBUG colour.

use super::{Formatter, TextSections};
use crate::core::{LogEntry, LogLevel, TimestampFormat};
use std::collections::BTreeMap;
use std::sync::Arc;

const RESET: &str = "0";

fn sgr(code: &str) -> String {
    format!("\x1b[{}m", code)
}

/// Colour table and timestamp settings for a [`ColourFormatter`]
///
/// Codes are SGR parameter lists such as `"33;1"`. The config is fixed once
/// the formatter is built.
///
/// # Examples
///
/// ```
/// use rust_logging_kit::formatters::FormatterConfig;
/// use rust_logging_kit::LogLevel;
///
/// let config = FormatterConfig::new().with_level_code(LogLevel::NOTICE, "36;1");
/// assert_eq!(config.level_code(LogLevel::NOTICE), "36;1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterConfig {
    level_codes: BTreeMap<LogLevel, String>,
    accent: String,
    logger_name: String,
    exception: String,
    raw_payload: String,
    timestamp_format: TimestampFormat,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        let level_codes = [
            (LogLevel::NOTSET, "30;1"),
            (LogLevel::DEBUG, "35;1"),
            (LogLevel::INFO, "37;1"),
            (LogLevel::NOTICE, "32;1"),
            (LogLevel::WARNING, "33;1"),
            (LogLevel::ERROR, "31;1"),
            (LogLevel::CRITICAL, "41;1"),
        ]
        .into_iter()
        .map(|(level, code)| (level, code.to_string()))
        .collect();

        Self {
            level_codes,
            accent: "30;2".to_string(),
            logger_name: "34".to_string(),
            exception: "31".to_string(),
            raw_payload: "36".to_string(),
            timestamp_format: TimestampFormat::default(),
        }
    }
}

impl FormatterConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_level_code(mut self, level: LogLevel, code: impl Into<String>) -> Self {
        self.level_codes.insert(level, code.into());
        self
    }

    #[must_use]
    pub fn with_accent_code(mut self, code: impl Into<String>) -> Self {
        self.accent = code.into();
        self
    }

    #[must_use]
    pub fn with_logger_name_code(mut self, code: impl Into<String>) -> Self {
        self.logger_name = code.into();
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = format;
        self
    }

    /// SGR code for `level`, falling back to the DEBUG entry
    pub fn level_code(&self, level: LogLevel) -> &str {
        self.level_codes
            .get(&level)
            .or_else(|| self.level_codes.get(&LogLevel::DEBUG))
            .map(String::as_str)
            .unwrap_or(RESET)
    }

    pub fn timestamp_format(&self) -> &TimestampFormat {
        &self.timestamp_format
    }

    /// Wrap this config in an Arc for sharing across formatters
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ColourFormatter {
    config: Arc<FormatterConfig>,
}

impl ColourFormatter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: impl Into<Arc<FormatterConfig>>) -> Self {
        Self {
            config: config.into(),
        }
    }

    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }
}

impl Formatter for ColourFormatter {
    type Output = String;

    fn format(&self, entry: &LogEntry) -> String {
        let config = &self.config;
        let accent = sgr(&config.accent);
        let reset = sgr(RESET);
        let sections = TextSections::of(entry);

        let mut output = format!(
            "{accent}{ts} [{reset}{level}{name:<8}{reset}{accent}] {reset}{blue}{logger}{reset}{accent}: {reset}{message}",
            ts = config.timestamp_format.format(&entry.timestamp),
            level = sgr(config.level_code(entry.level)),
            name = entry.level_name,
            blue = sgr(&config.logger_name),
            logger = entry.logger_name,
            message = entry.message,
        );

        if let Some(ref raw) = sections.raw_block {
            output.push_str(&sgr(&config.raw_payload));
            output.push_str(raw);
            output.push_str(&reset);
        }

        if let Some(ref exc) = sections.exception_block {
            if sections.needs_separator(&entry.message) {
                output.push('\n');
            }
            output.push_str(&sgr(&config.exception));
            output.push_str(exc);
            output.push_str(&reset);
        }

        output
    }
}

/// Remove SGR escape sequences (`ESC [ ... m`) from `text`
pub fn strip_ansi(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for inner in chars.by_ref() {
                if inner == 'm' {
                    break;
                }
            }
            continue;
        }
        out.push(c);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ExceptionInfo;
    use crate::formatters::PlainFormatter;
    use chrono::{TimeZone, Utc};

    fn entry(level: LogLevel, name: &str) -> LogEntry {
        LogEntry::new(level, name, "app", "hello")
            .with_timestamp(Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap())
    }

    fn formatter() -> ColourFormatter {
        ColourFormatter::with_config(FormatterConfig::new().with_timestamp_format(TimestampFormat::Utc))
    }

    #[test]
    fn test_documented_codes() {
        let config = FormatterConfig::default();
        assert_eq!(config.level_code(LogLevel::NOTSET), "30;1");
        assert_eq!(config.level_code(LogLevel::DEBUG), "35;1");
        assert_eq!(config.level_code(LogLevel::INFO), "37;1");
        assert_eq!(config.level_code(LogLevel::NOTICE), "32;1");
        assert_eq!(config.level_code(LogLevel::WARNING), "33;1");
        assert_eq!(config.level_code(LogLevel::ERROR), "31;1");
        assert_eq!(config.level_code(LogLevel::CRITICAL), "41;1");
    }

    #[test]
    fn test_unknown_level_uses_debug_code() {
        let config = FormatterConfig::default();
        assert_eq!(config.level_code(LogLevel::new(15)), "35;1");
        assert_eq!(config.level_code(LogLevel::new(99)), "35;1");
    }

    #[test]
    fn test_exact_template() {
        let out = formatter().format(&entry(LogLevel::WARNING, "WARNING"));
        assert_eq!(
            out,
            "\x1b[30;2m2025-01-08 10:30:45 [\x1b[0m\x1b[33;1mWARNING \x1b[0m\x1b[30;2m] \
             \x1b[0m\x1b[34mapp\x1b[0m\x1b[30;2m: \x1b[0mhello"
        );
    }

    #[test]
    fn test_blocks_are_wrapped() {
        let e = entry(LogLevel::ERROR, "ERROR")
            .with_raw_payload("row")
            .with_exception(ExceptionInfo::new("Timeout", "after 5s"));
        let out = formatter().format(&e);
        assert!(out.ends_with("hello\x1b[36m\n  row\n\x1b[0m\x1b[31m  Timeout: after 5s\n\x1b[0m"));
    }

    #[test]
    fn test_strip_matches_plain() {
        let plain = PlainFormatter::new().with_timestamp_format(TimestampFormat::Utc);
        let cases = vec![
            entry(LogLevel::INFO, "INFO"),
            entry(LogLevel::new(33), "Level 33"),
            entry(LogLevel::ERROR, "ERROR").with_exception(ExceptionInfo::new("E", "x")),
            entry(LogLevel::NOTICE, "NOTICE").with_raw_payload("a\nb"),
            entry(LogLevel::CRITICAL, "CRITICAL")
                .with_raw_payload("a")
                .with_exception(ExceptionInfo::new("E", "x").with_cause("y")),
        ];

        for e in cases {
            assert_eq!(strip_ansi(&formatter().format(&e)), plain.format(&e));
        }
    }

    #[test]
    fn test_strip_ansi() {
        assert_eq!(strip_ansi("\x1b[41;1mCRITICAL\x1b[0m done"), "CRITICAL done");
        assert_eq!(strip_ansi("no escapes"), "no escapes");
    }
}
