//! Console appender implementation

use crate::core::{supports_colour, Appender, ColourPolicy, LogEntry, Result, TimestampFormat};
use crate::formatters::{BoxedTextFormatter, ColourFormatter, FormatterConfig, PlainFormatter};
use std::io::{self, Write};

/// Which standard stream the appender writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConsoleTarget {
    Stdout,
    #[default]
    Stderr,
}

pub struct ConsoleAppender {
    target: ConsoleTarget,
    formatter: BoxedTextFormatter,
    coloured: bool,
}

impl ConsoleAppender {
    /// Plain text on stderr
    pub fn new() -> Self {
        Self::with_colors(false)
    }

    pub fn with_colors(use_colors: bool) -> Self {
        let formatter: BoxedTextFormatter = if use_colors {
            Box::new(ColourFormatter::new())
        } else {
            Box::new(PlainFormatter::new())
        };

        Self {
            target: ConsoleTarget::default(),
            formatter,
            coloured: use_colors,
        }
    }

    /// Colour output on stderr when `prefer_colour` is set and stderr can
    /// display it
    ///
    /// # Example
    ///
    /// ```
    /// use rust_logging_kit::appenders::ConsoleAppender;
    /// use rust_logging_kit::ColourPolicy;
    ///
    /// let appender = ConsoleAppender::auto(true, &ColourPolicy::default());
    /// ```
    pub fn auto(prefer_colour: bool, policy: &ColourPolicy) -> Self {
        Self::auto_for(ConsoleTarget::Stderr, prefer_colour, policy)
    }

    /// Like [`ConsoleAppender::auto`], detecting colour support on `target`
    pub fn auto_for(target: ConsoleTarget, prefer_colour: bool, policy: &ColourPolicy) -> Self {
        let coloured = prefer_colour
            && match target {
                ConsoleTarget::Stdout => supports_colour(&io::stdout(), policy),
                ConsoleTarget::Stderr => supports_colour(&io::stderr(), policy),
            };
        Self::with_colors(coloured).with_target(target)
    }

    /// Switch streams; the colour choice is kept, use
    /// [`ConsoleAppender::auto_for`] to detect it for the new stream
    #[must_use]
    pub fn with_target(mut self, target: ConsoleTarget) -> Self {
        self.target = target;
        self
    }

    /// Replace the formatter, e.g. a [`ColourFormatter`] with a custom table
    #[must_use]
    pub fn with_formatter(mut self, formatter: BoxedTextFormatter) -> Self {
        self.formatter = formatter;
        self
    }

    /// Set the timestamp format, keeping the current colour choice
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_logging_kit::appenders::ConsoleAppender;
    /// use rust_logging_kit::TimestampFormat;
    ///
    /// let appender = ConsoleAppender::new()
    ///     .with_timestamp_format(TimestampFormat::Utc);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.formatter = if self.coloured {
            Box::new(ColourFormatter::with_config(
                FormatterConfig::new().with_timestamp_format(format),
            ))
        } else {
            Box::new(PlainFormatter::new().with_timestamp_format(format))
        };
        self
    }

    pub fn is_coloured(&self) -> bool {
        self.coloured
    }

    pub fn target(&self) -> ConsoleTarget {
        self.target
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new()
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let output = self.formatter.format(entry);

        match self.target {
            ConsoleTarget::Stderr => writeln!(io::stderr().lock(), "{}", output)?,
            ConsoleTarget::Stdout => writeln!(io::stdout().lock(), "{}", output)?,
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.target {
            ConsoleTarget::Stderr => io::stderr().flush()?,
            ConsoleTarget::Stdout => io::stdout().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
