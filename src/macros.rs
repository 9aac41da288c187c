//! Logging macros for ergonomic log message formatting.
//!
//! Each macro takes anything implementing
//! [`SeverityLog`](crate::core::SeverityLog) (a logger, a child, an adapter)
//! followed by `format!` arguments. The message is only formatted when the
//! level is enabled.
//!
//! # Examples
//!
//! ```
//! use rust_logging_kit::prelude::*;
//! use rust_logging_kit::{info, notice};
//!
//! let logger = Logger::new();
//! logger.registry().register_level("NOTICE", 25);
//!
//! info!(logger, "Server started");
//!
//! let port = 8080;
//! notice!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at an arbitrary level.
///
/// # Examples
///
/// ```
/// # use rust_logging_kit::prelude::*;
/// # let logger = Logger::new();
/// use rust_logging_kit::log;
/// log!(logger, LogLevel::INFO, "Simple message");
/// log!(logger, LogLevel::new(35), "Between WARNING and ERROR: {}", 35);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {{
        use $crate::core::SeverityLog as _;
        let level = $level;
        let logger = &$logger;
        if logger.is_enabled_for(level) {
            logger.log_event(level, format!($($arg)+), $crate::core::LogOptions::default());
        }
    }};
}

/// Log a debug-level message.
///
/// ```
/// # use rust_logging_kit::prelude::*;
/// # let logger = Logger::builder().min_level(LogLevel::DEBUG).build();
/// use rust_logging_kit::debug;
/// debug!(logger, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::DEBUG, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::INFO, $($arg)+)
    };
}

/// Log a notice-level message, between INFO and WARNING.
#[macro_export]
macro_rules! notice {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::NOTICE, $($arg)+)
    };
}

#[macro_export]
macro_rules! warning {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::WARNING, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::ERROR, $($arg)+)
    };
}

/// Log a critical-level message.
///
/// ```
/// # use rust_logging_kit::prelude::*;
/// # let logger = Logger::new();
/// use rust_logging_kit::critical;
/// critical!(logger, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::CRITICAL, $($arg)+)
    };
}
