//! One-call logging setup for applications
//!
//! [`setup_logging`] registers the NOTICE level, configures the root logger
//! with a console appender (coloured when the terminal allows it) and an
//! optional plain file appender, installs it process-wide, forwards records
//! from the `log` facade, and routes unhandled panics into the log at
//! CRITICAL.
//!
//! # Example
//!
//! ```no_run
//! use rust_logging_kit::prelude::*;
//! use rust_logging_kit::setup::{setup_logging, LoggingConfig};
//!
//! let root = setup_logging(LoggingConfig::default().with_file("app.log", LogLevel::NOTICE))?;
//! root.child("startup").notice("ready");
//! # Ok::<(), rust_logging_kit::LoggerError>(())
//! ```

use crate::appenders::{ConsoleAppender, FileAppender};
use crate::core::logger::is_dispatching;
use crate::core::{
    ColourPolicy, ExceptionInfo, LevelRegistry, LogLevel, LogOptions, Logger, LoggerError,
    Result, SeverityLog,
};
use crate::formatters::{Formatter, PlainFormatter};
use crate::global;
use serde::{Deserialize, Serialize};
use std::backtrace::{Backtrace, BacktraceStatus};
use std::path::PathBuf;
use std::sync::Arc;

pub const UNCAUGHT_MESSAGE: &str = "App has encountered an unhandled exception!";
pub const INTERRUPT_MESSAGE: &str = "Interrupt received.";

/// Settings for [`setup_logging`]
///
/// Every field has a default, so a partial JSON document is enough:
///
/// ```
/// use rust_logging_kit::setup::LoggingConfig;
/// use rust_logging_kit::LogLevel;
///
/// let config = LoggingConfig::from_json(r#"{"file_path": "bot.log", "file_level": 25}"#).unwrap();
/// assert_eq!(config.file_level, LogLevel::NOTICE);
/// assert!(config.use_colour_if_supported);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write plain records to this file
    pub file_path: Option<PathBuf>,
    pub file_level: LogLevel,
    pub use_colour_if_supported: bool,
    pub root_level: LogLevel,
    pub colour_policy: ColourPolicy,
    pub install_panic_hook: bool,
    /// Forward records emitted through the `log` crate
    pub bridge_log_crate: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file_path: None,
            file_level: LogLevel::INFO,
            use_colour_if_supported: true,
            root_level: LogLevel::INFO,
            colour_policy: ColourPolicy::default(),
            install_panic_hook: true,
            bridge_log_crate: true,
        }
    }
}

impl LoggingConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    #[must_use]
    pub fn with_file(mut self, path: impl Into<PathBuf>, level: LogLevel) -> Self {
        self.file_path = Some(path.into());
        self.file_level = level;
        self
    }

    #[must_use]
    pub fn with_colour(mut self, use_colour_if_supported: bool) -> Self {
        self.use_colour_if_supported = use_colour_if_supported;
        self
    }

    #[must_use]
    pub fn with_root_level(mut self, level: LogLevel) -> Self {
        self.root_level = level;
        self
    }

    #[must_use]
    pub fn with_colour_policy(mut self, policy: ColourPolicy) -> Self {
        self.colour_policy = policy;
        self
    }

    #[must_use]
    pub fn with_panic_hook(mut self, install: bool) -> Self {
        self.install_panic_hook = install;
        self
    }

    #[must_use]
    pub fn with_log_bridge(mut self, bridge: bool) -> Self {
        self.bridge_log_crate = bridge;
        self
    }
}

/// Build the configured root logger without installing anything globally
pub fn build_root_logger(config: &LoggingConfig) -> Result<Logger> {
    let registry = Arc::new(LevelRegistry::new());
    registry.register_level("NOTICE", LogLevel::NOTICE.value());

    let mut builder = Logger::builder()
        .registry(registry)
        .min_level(config.root_level)
        .appender(ConsoleAppender::auto(
            config.use_colour_if_supported,
            &config.colour_policy,
        ));

    if let Some(ref path) = config.file_path {
        builder = builder.appender(FileAppender::new(path)?.with_min_level(config.file_level));
    }

    Ok(builder.build())
}

/// Configure process-wide logging; may only succeed once per process
pub fn setup_logging(config: LoggingConfig) -> Result<Logger> {
    if global::root().is_some() {
        return Err(LoggerError::AlreadyInitialized);
    }

    let root = build_root_logger(&config)?;
    global::install(root.clone())?;

    if config.bridge_log_crate {
        if let Err(e) = LogBridge::install(root.clone()) {
            eprintln!("[LOGGER ERROR] {}", e);
        }
    }

    if config.install_panic_hook {
        install_panic_hook(root.clone());
    }

    Ok(root)
}

/// Log unhandled panics on `logger` at CRITICAL instead of printing them
pub fn install_panic_hook(logger: Logger) {
    std::panic::set_hook(Box::new(move |info| {
        let backtrace = Backtrace::capture();
        let backtrace = match backtrace.status() {
            BacktraceStatus::Captured => Some(backtrace.to_string()),
            _ => None,
        };
        let exception = ExceptionInfo::from_panic(info.payload(), info.location(), backtrace);
        report_uncaught(&logger, exception);
    }));
}

/// Record an unhandled failure at CRITICAL
///
/// Interrupts get a short message without a trace. Waits for appenders busy
/// on other threads; when this thread is itself inside an appender (a panic
/// raised by one) and the lock is taken, the record goes to stderr.
pub fn report_uncaught(logger: &Logger, exception: ExceptionInfo) {
    let entry = if exception.is_interrupt() {
        logger.make_entry(LogLevel::CRITICAL, INTERRUPT_MESSAGE.to_string(), LogOptions::new())
    } else {
        logger.make_entry(
            LogLevel::CRITICAL,
            UNCAUGHT_MESSAGE.to_string(),
            LogOptions::new().with_exception(exception),
        )
    };

    if !is_dispatching() {
        logger.emit(&entry);
    } else if !logger.try_emit(&entry) {
        eprintln!("{}", PlainFormatter::new().format(&entry));
    }
}

/// Wait for Ctrl-C and report it as an interrupt
#[cfg(feature = "signal")]
pub async fn log_interrupt(logger: &Logger) -> Result<()> {
    wait_for_interrupt(logger, tokio::signal::ctrl_c()).await
}

#[cfg(feature = "signal")]
async fn wait_for_interrupt<F>(logger: &Logger, signal: F) -> Result<()>
where
    F: std::future::Future<Output = std::io::Result<()>>,
{
    signal
        .await
        .map_err(|e| LoggerError::io_operation("waiting for Ctrl-C", "signal handler failed", e))?;
    report_uncaught(logger, ExceptionInfo::interrupt());
    Ok(())
}

/// `log` facade backend forwarding into a [`Logger`]
///
/// Records are logged on a child named after the record's target.
pub struct LogBridge {
    root: Logger,
}

impl LogBridge {
    pub fn new(root: Logger) -> Self {
        Self { root }
    }

    /// Register as the `log` crate's global logger
    pub fn install(root: Logger) -> Result<()> {
        log::set_boxed_logger(Box::new(Self::new(root)))
            .map_err(|e| LoggerError::config("log bridge", e.to_string()))?;
        log::set_max_level(log::LevelFilter::Trace);
        Ok(())
    }

    pub fn map_level(level: log::Level) -> LogLevel {
        match level {
            log::Level::Trace | log::Level::Debug => LogLevel::DEBUG,
            log::Level::Info => LogLevel::INFO,
            log::Level::Warn => LogLevel::WARNING,
            log::Level::Error => LogLevel::ERROR,
        }
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        self.root.is_enabled_for(Self::map_level(metadata.level()))
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.root.child(record.target()).log_event(
            Self::map_level(record.level()),
            record.args().to_string(),
            LogOptions::new(),
        );
    }

    fn flush(&self) {
        let _ = self.root.flush();
    }
}
