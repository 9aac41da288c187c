//! Error types for the logging kit

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },

    /// File appender error with path
    #[error("File appender error for '{path}': {message}")]
    FileAppenderError {
        path: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// A level name or value is already registered with a different pairing
    #[error("Level '{name}' ({value}) conflicts with existing registration '{existing}'")]
    DuplicateLevel {
        name: String,
        value: u32,
        existing: String,
    },

    /// No level is registered under the given name
    #[error("Unknown log level '{0}'")]
    UnknownLevel(String),

    /// Global logging was already set up for this process
    #[error("Logging has already been initialized")]
    AlreadyInitialized,

    /// Notification sink failed to deliver a message
    #[error("Notification sink '{sink}' failed: {message}")]
    DeliveryError { sink: String, message: String },
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Create a file appender error
    pub fn file_appender(
        path: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::FileAppenderError {
            path: path.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a duplicate level error
    pub fn duplicate_level(
        name: impl Into<String>,
        value: u32,
        existing: impl Into<String>,
    ) -> Self {
        LoggerError::DuplicateLevel {
            name: name.into(),
            value,
            existing: existing.into(),
        }
    }

    /// Create a delivery error for a notification sink
    pub fn delivery(sink: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::DeliveryError {
            sink: sink.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::config("FileAppender", "Invalid path");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));

        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err = LoggerError::file_appender("/var/log/app.log", "cannot open", io_err);
        assert!(matches!(err, LoggerError::FileAppenderError { .. }));

        let err = LoggerError::duplicate_level("NOTICE", 25, "OTHER");
        assert!(matches!(err, LoggerError::DuplicateLevel { value: 25, .. }));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::duplicate_level("NOTICE", 25, "VERBOSE");
        assert_eq!(
            err.to_string(),
            "Level 'NOTICE' (25) conflicts with existing registration 'VERBOSE'"
        );

        let err = LoggerError::UnknownLevel("trace".to_string());
        assert_eq!(err.to_string(), "Unknown log level 'trace'");

        let err = LoggerError::delivery("discord", "channel closed");
        assert_eq!(
            err.to_string(),
            "Notification sink 'discord' failed: channel closed"
        );
    }

    #[test]
    fn test_io_operation_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err = LoggerError::io_operation("writing log file", "cannot write to file", io_err);

        assert!(matches!(err, LoggerError::IoOperation { .. }));
        assert!(err.to_string().contains("writing log file"));
        assert!(err.to_string().contains("cannot write to file"));
    }
}
