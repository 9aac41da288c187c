//! Logger implementation
//!
//! A [`Logger`] is a cheap handle: a name plus shared state (threshold,
//! appenders, level registry). [`Logger::child`] hands out handles with
//! dotted names that feed the same appenders, so configuring the root logger
//! configures every logger derived from it.
//!
//! Everything that can log implements [`SeverityLog`], which supplies one
//! generic entry point and a named method per known severity.

use super::{
    appender::Appender,
    error::{LoggerError, Result},
    level_registry::LevelRegistry,
    log_context::{FieldValue, LogContext, RAW_PAYLOAD_KEY},
    log_entry::{ExceptionInfo, LogEntry},
    log_level::LogLevel,
};
use parking_lot::RwLock;
use std::any::Any;
use std::cell::Cell;
use std::error::Error;
use std::sync::Arc;

/// Name of the logger every other logger descends from
pub const ROOT_LOGGER_NAME: &str = "root";

/// Optional parts of a log call
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub exception: Option<ExceptionInfo>,
    pub extra: LogContext,
}

impl LogOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_exception(mut self, exception: ExceptionInfo) -> Self {
        self.exception = Some(exception);
        self
    }

    #[must_use]
    pub fn with_error(self, err: &(dyn Error + 'static)) -> Self {
        self.with_exception(ExceptionInfo::from_error(err))
    }

    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.extra.add_field(key, value);
        self
    }

    #[must_use]
    pub fn with_raw_payload(self, raw: impl Into<String>) -> Self {
        self.with_field(RAW_PAYLOAD_KEY, raw.into())
    }
}

macro_rules! severity_methods {
    ($($(#[$doc:meta])* $method:ident, $method_with:ident => $level:expr;)*) => {
        $(
            $(#[$doc])*
            #[inline]
            fn $method(&self, message: impl Into<String>)
            where
                Self: Sized,
            {
                self.log($level, message);
            }

            #[inline]
            fn $method_with(&self, message: impl Into<String>, options: LogOptions)
            where
                Self: Sized,
            {
                self.log_with($level, message, options);
            }
        )*
    };
}

/// Logging interface shared by loggers, adapters and the global root
pub trait SeverityLog {
    fn is_enabled_for(&self, level: LogLevel) -> bool;

    fn log_event(&self, level: LogLevel, message: String, options: LogOptions);

    fn registry(&self) -> &LevelRegistry;

    fn log(&self, level: LogLevel, message: impl Into<String>)
    where
        Self: Sized,
    {
        self.log_with(level, message, LogOptions::default());
    }

    fn log_with(&self, level: LogLevel, message: impl Into<String>, options: LogOptions)
    where
        Self: Sized,
    {
        if self.is_enabled_for(level) {
            self.log_event(level, message.into(), options);
        }
    }

    severity_methods! {
        debug, debug_with => LogLevel::DEBUG;
        info, info_with => LogLevel::INFO;
        /// Like `info`, for messages that should stand out
        notice, notice_with => LogLevel::NOTICE;
        warning, warning_with => LogLevel::WARNING;
        error, error_with => LogLevel::ERROR;
        critical, critical_with => LogLevel::CRITICAL;
    }

    /// Log at ERROR with `err` and its sources attached
    fn exception(&self, message: impl Into<String>, err: &(dyn Error + 'static))
    where
        Self: Sized,
    {
        self.log_with(LogLevel::ERROR, message, LogOptions::new().with_error(err));
    }

    /// Log through a lowercase method name registered at runtime
    ///
    /// ```
    /// use rust_logging_kit::prelude::*;
    ///
    /// let logger = Logger::new();
    /// logger.registry().register_level("AUDIT", 35);
    /// logger.log_named("audit", "user 42 exported data").unwrap();
    /// assert!(logger.log_named("verbose", "nope").is_err());
    /// ```
    fn log_named(&self, method: &str, message: impl Into<String>) -> Result<()>
    where
        Self: Sized,
    {
        let level = self
            .registry()
            .method_level(method)
            .ok_or_else(|| LoggerError::UnknownLevel(method.to_string()))?;
        self.log(level, message);
        Ok(())
    }
}

thread_local! {
    static DISPATCHING: Cell<bool> = const { Cell::new(false) };
}

/// Marks the current thread as inside appender code until dropped
struct DispatchGuard {
    previous: bool,
}

impl DispatchGuard {
    fn enter() -> Self {
        Self {
            previous: DISPATCHING.with(|flag| flag.replace(true)),
        }
    }
}

impl Drop for DispatchGuard {
    fn drop(&mut self) {
        DISPATCHING.with(|flag| flag.set(self.previous));
    }
}

/// Whether the current thread is running appender code
///
/// True while a panic raised by an appender is being reported; waiting for
/// the appender lock from there would deadlock.
pub fn is_dispatching() -> bool {
    DISPATCHING.with(Cell::get)
}

struct LoggerShared {
    min_level: RwLock<LogLevel>,
    appenders: RwLock<Vec<Box<dyn Appender>>>,
    registry: Arc<LevelRegistry>,
}

#[derive(Clone)]
pub struct Logger {
    name: Arc<str>,
    shared: Arc<LoggerShared>,
}

impl Logger {
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(ROOT_LOGGER_NAME, Arc::new(LevelRegistry::new()))
    }

    #[must_use]
    pub fn with_registry(name: &str, registry: Arc<LevelRegistry>) -> Self {
        Self {
            name: Arc::from(name),
            shared: Arc::new(LoggerShared {
                min_level: RwLock::new(LogLevel::INFO),
                appenders: RwLock::new(Vec::new()),
                registry,
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Logger named `self.name + "." + suffix` sharing this logger's setup
    ///
    /// Children of the root logger are named by the suffix alone.
    #[must_use]
    pub fn child(&self, suffix: &str) -> Logger {
        let name = if &*self.name == ROOT_LOGGER_NAME {
            suffix.to_string()
        } else {
            format!("{}.{}", self.name, suffix)
        };
        Logger {
            name: Arc::from(name.as_str()),
            shared: Arc::clone(&self.shared),
        }
    }

    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        self.shared.appenders.write().push(appender);
    }

    pub fn appender_names(&self) -> Vec<String> {
        self.shared
            .appenders
            .read()
            .iter()
            .map(|a| a.name().to_string())
            .collect()
    }

    pub fn set_min_level(&self, level: LogLevel) {
        *self.shared.min_level.write() = level;
    }

    pub fn min_level(&self) -> LogLevel {
        *self.shared.min_level.read()
    }

    /// Build an entry stamped with this logger's name and the level's
    /// registered name
    pub fn make_entry(&self, level: LogLevel, message: String, options: LogOptions) -> LogEntry {
        let mut entry = LogEntry::new(
            level,
            self.shared.registry.level_name(level),
            self.name.as_ref(),
            message,
        )
        .with_extra(options.extra);
        entry.exception = options.exception;
        entry
    }

    /// Hand an entry to every appender whose threshold it meets
    pub fn emit(&self, entry: &LogEntry) {
        let mut appenders = self.shared.appenders.write();
        Self::process_sync(&mut appenders, entry);
    }

    /// Like [`Logger::emit`] but gives up instead of waiting for the
    /// appender lock. Returns whether the entry was dispatched.
    pub fn try_emit(&self, entry: &LogEntry) -> bool {
        match self.shared.appenders.try_write() {
            Some(mut appenders) => {
                Self::process_sync(&mut appenders, entry);
                true
            }
            None => false,
        }
    }

    /// Dispatch with per-appender panic isolation
    ///
    /// A failing or panicking appender is reported on stderr and the
    /// remaining appenders still receive the entry.
    fn process_sync(appenders: &mut [Box<dyn Appender>], entry: &LogEntry) -> bool {
        let _dispatching = DispatchGuard::enter();
        let mut has_error = false;

        for (idx, appender) in appenders.iter_mut().enumerate() {
            if entry.level < appender.min_level() {
                continue;
            }

            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(entry)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Appender #{} ({}) failed: {}",
                        idx,
                        appender.name(),
                        e
                    );
                    has_error = true;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} ({}) panicked: {}. \
                         Other appenders continue to function.",
                        idx,
                        appender.name(),
                        panic_message(panic_info.as_ref())
                    );
                    has_error = true;
                }
            }
        }

        has_error
    }

    pub fn flush(&self) -> Result<()> {
        let mut appenders = self.shared.appenders.write();
        let _dispatching = DispatchGuard::enter();
        for appender in appenders.iter_mut() {
            appender.flush()?;
        }
        Ok(())
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_logging_kit::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .name("worker")
    ///     .min_level(LogLevel::DEBUG)
    ///     .build();
    /// assert_eq!(logger.name(), "worker");
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }
}

impl SeverityLog for Logger {
    fn is_enabled_for(&self, level: LogLevel) -> bool {
        level >= self.min_level()
    }

    fn log_event(&self, level: LogLevel, message: String, options: LogOptions) {
        let entry = self.make_entry(level, message, options);
        self.emit(&entry);
    }

    fn registry(&self) -> &LevelRegistry {
        &self.shared.registry
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("min_level", &self.min_level())
            .field("appenders", &self.appender_names())
            .finish()
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Logger wrapper adding fixed extra attributes to every entry
///
/// Attributes passed with an individual call win over the adapter's.
#[derive(Debug, Clone)]
pub struct LoggerAdapter {
    logger: Logger,
    extra: LogContext,
}

impl LoggerAdapter {
    pub fn new(logger: Logger, extra: LogContext) -> Self {
        Self { logger, extra }
    }

    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    pub fn extra(&self) -> &LogContext {
        &self.extra
    }
}

impl SeverityLog for LoggerAdapter {
    fn is_enabled_for(&self, level: LogLevel) -> bool {
        self.logger.is_enabled_for(level)
    }

    fn log_event(&self, level: LogLevel, message: String, mut options: LogOptions) {
        options.extra.merge_missing(&self.extra);
        self.logger.log_event(level, message, options);
    }

    fn registry(&self) -> &LevelRegistry {
        self.logger.registry()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_logging_kit::prelude::*;
///
/// let logger = Logger::builder()
///     .min_level(LogLevel::DEBUG)
///     .appender(ConsoleAppender::new())
///     .build();
/// ```
pub struct LoggerBuilder {
    name: String,
    min_level: LogLevel,
    appenders: Vec<Box<dyn Appender>>,
    registry: Option<Arc<LevelRegistry>>,
}

impl LoggerBuilder {
    pub fn new() -> Self {
        Self {
            name: ROOT_LOGGER_NAME.to_string(),
            min_level: LogLevel::INFO,
            appenders: Vec::new(),
            registry: None,
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    /// Share an existing level registry instead of creating a fresh one
    #[must_use = "builder methods return a new value"]
    pub fn registry(mut self, registry: Arc<LevelRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> Logger {
        let registry = self
            .registry
            .unwrap_or_else(|| Arc::new(LevelRegistry::new()));
        let logger = Logger::with_registry(&self.name, registry);

        logger.set_min_level(self.min_level);
        for appender in self.appenders {
            logger.add_appender(appender);
        }

        logger
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
