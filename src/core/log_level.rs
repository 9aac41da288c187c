//! Log level definitions
//!
//! Severities are plain ordered integers so that levels registered at runtime
//! sit on the same scale as the built-in ones.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogLevel(u32);

impl LogLevel {
    pub const NOTSET: LogLevel = LogLevel(0);
    pub const DEBUG: LogLevel = LogLevel(10);
    pub const INFO: LogLevel = LogLevel(20);
    /// Like INFO, but meant to be displayed prominently
    pub const NOTICE: LogLevel = LogLevel(25);
    pub const WARNING: LogLevel = LogLevel(30);
    pub const ERROR: LogLevel = LogLevel(40);
    pub const CRITICAL: LogLevel = LogLevel(50);

    /// Every level known at compile time, ascending
    pub const BUILTIN: [LogLevel; 7] = [
        LogLevel::NOTSET,
        LogLevel::DEBUG,
        LogLevel::INFO,
        LogLevel::NOTICE,
        LogLevel::WARNING,
        LogLevel::ERROR,
        LogLevel::CRITICAL,
    ];

    #[must_use]
    pub const fn new(value: u32) -> Self {
        LogLevel(value)
    }

    #[must_use]
    pub const fn value(&self) -> u32 {
        self.0
    }

    /// Canonical name for built-in levels
    pub fn builtin_name(&self) -> Option<&'static str> {
        match *self {
            LogLevel::NOTSET => Some("NOTSET"),
            LogLevel::DEBUG => Some("DEBUG"),
            LogLevel::INFO => Some("INFO"),
            LogLevel::NOTICE => Some("NOTICE"),
            LogLevel::WARNING => Some("WARNING"),
            LogLevel::ERROR => Some("ERROR"),
            LogLevel::CRITICAL => Some("CRITICAL"),
            _ => None,
        }
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel::INFO
    }
}

impl From<u32> for LogLevel {
    fn from(value: u32) -> Self {
        LogLevel(value)
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.builtin_name() {
            Some(name) => f.write_str(name),
            None => write!(f, "Level {}", self.0),
        }
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(value) = trimmed.parse::<u32>() {
            return Ok(LogLevel(value));
        }
        match trimmed.to_uppercase().as_str() {
            "NOTSET" => Ok(LogLevel::NOTSET),
            "DEBUG" => Ok(LogLevel::DEBUG),
            "INFO" => Ok(LogLevel::INFO),
            "NOTICE" => Ok(LogLevel::NOTICE),
            "WARN" | "WARNING" => Ok(LogLevel::WARNING),
            "ERROR" => Ok(LogLevel::ERROR),
            "FATAL" | "CRITICAL" => Ok(LogLevel::CRITICAL),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_sits_between_info_and_warning() {
        assert!(LogLevel::INFO < LogLevel::NOTICE);
        assert!(LogLevel::NOTICE < LogLevel::WARNING);
        assert_eq!(LogLevel::NOTICE.value(), 25);
    }

    #[test]
    fn test_display() {
        assert_eq!(LogLevel::CRITICAL.to_string(), "CRITICAL");
        assert_eq!(LogLevel::new(17).to_string(), "Level 17");
    }

    #[test]
    fn test_parse() {
        assert_eq!("warn".parse::<LogLevel>(), Ok(LogLevel::WARNING));
        assert_eq!("Notice".parse::<LogLevel>(), Ok(LogLevel::NOTICE));
        assert_eq!("35".parse::<LogLevel>(), Ok(LogLevel::new(35)));
        assert!("verbose".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_serde_is_integer() {
        let json = serde_json::to_string(&LogLevel::NOTICE).unwrap();
        assert_eq!(json, "25");
        let level: LogLevel = serde_json::from_str("40").unwrap();
        assert_eq!(level, LogLevel::ERROR);
    }
}
