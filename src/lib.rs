//! # Rust Logging Kit
//!
//! Logging setup helpers for applications and chat bots.
//!
//! ## Features
//!
//! - **NOTICE severity**: a level between INFO and WARNING, plus runtime
//!   registration of further levels with call-by-name logging
//! - **Text formatters**: plain and ANSI-coloured output with identical layout
//! - **Colour detection**: TTY, IDE, Windows terminal and container aware
//! - **Notifications**: entries rendered as rich chat messages and delivered
//!   through an async queue (`notification` feature)
//! - **One-call setup**: console and file output, `log` facade bridge and
//!   panic reporting via [`setup::setup_logging`]

pub mod appenders;
pub mod core;
#[cfg(feature = "notification")]
pub mod delivery;
pub mod formatters;
pub mod global;
pub mod macros;
pub mod setup;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, FileAppender, MemoryAppender};
    pub use crate::core::{
        Appender, ColourPolicy, ExceptionInfo, FieldValue, LevelRegistry, LogContext, LogEntry,
        LogLevel, LogOptions, Logger, LoggerAdapter, LoggerBuilder, LoggerError, Result,
        SeverityLog, TimestampFormat,
    };
    pub use crate::formatters::{ColourFormatter, Formatter, NotificationFormatter, PlainFormatter};
    pub use crate::setup::{setup_logging, LoggingConfig};
}

pub use appenders::{ConsoleAppender, FileAppender};
pub use core::{
    Appender, ColourPolicy, ExceptionInfo, FieldValue, LevelRegistry, LogContext, LogEntry,
    LogLevel, LogOptions, Logger, LoggerAdapter, LoggerBuilder, LoggerError, Result, SeverityLog,
    TimestampFormat,
};
pub use setup::{setup_logging, LoggingConfig};
