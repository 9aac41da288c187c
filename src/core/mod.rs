//! Core logger types and traits

pub mod appender;
pub mod colour_support;
pub mod error;
pub mod level_registry;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod timestamp;

pub use appender::Appender;
pub use colour_support::{supports_colour, ColourEnvironment, ColourPolicy, Platform};
pub use error::{LoggerError, Result};
pub use level_registry::LevelRegistry;
pub use log_context::{FieldValue, LogContext, RAW_PAYLOAD_KEY};
pub use log_entry::{ExceptionInfo, LogEntry};
pub use log_level::LogLevel;
pub use logger::{LogOptions, Logger, LoggerAdapter, LoggerBuilder, SeverityLog, ROOT_LOGGER_NAME};
pub use timestamp::TimestampFormat;
