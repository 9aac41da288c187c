//! Process-wide root logger and module-level logging functions
//!
//! Every function here is a no-op until [`install`] has run (normally via
//! [`setup_logging`](crate::setup::setup_logging)).

use crate::core::{LogLevel, Logger, LoggerError, Result, SeverityLog};
use std::sync::OnceLock;

static ROOT: OnceLock<Logger> = OnceLock::new();

/// Make `logger` the process-wide root; fails if one is already installed
pub fn install(logger: Logger) -> Result<()> {
    ROOT.set(logger).map_err(|_| LoggerError::AlreadyInitialized)
}

pub fn root() -> Option<&'static Logger> {
    ROOT.get()
}

/// Child of the installed root, if any
pub fn get_logger(name: &str) -> Option<Logger> {
    root().map(|r| r.child(name))
}

pub fn log(level: LogLevel, message: impl Into<String>) {
    if let Some(logger) = root() {
        logger.log(level, message);
    }
}

macro_rules! global_severity_fns {
    ($($name:ident => $level:expr),* $(,)?) => {
        $(
            pub fn $name(message: impl Into<String>) {
                log($level, message);
            }
        )*
    };
}

global_severity_fns! {
    debug => LogLevel::DEBUG,
    info => LogLevel::INFO,
    notice => LogLevel::NOTICE,
    warning => LogLevel::WARNING,
    error => LogLevel::ERROR,
    critical => LogLevel::CRITICAL,
}

/// Log through a lowercase method name on the installed root
pub fn log_named(method: &str, message: impl Into<String>) -> Result<()> {
    match root() {
        Some(logger) => logger.log_named(method, message),
        None => Ok(()),
    }
}
