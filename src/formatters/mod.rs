//! Formatters turning a [`LogEntry`] into rendered output
//!
//! - [`PlainFormatter`]: single-colour text for files and dumb terminals
//! - [`ColourFormatter`]: the same text decorated with ANSI escapes
//! - [`NotificationFormatter`]: a [`RichMessage`] for chat channels

pub mod colour;
pub mod notification;
pub mod plain;

pub use colour::{strip_ansi, ColourFormatter, FormatterConfig};
pub use notification::{NotificationFormatter, RichColour, RichMessage, MAX_DESCRIPTION_LEN};
pub use plain::PlainFormatter;

use crate::core::LogEntry;

pub trait Formatter: Send + Sync {
    type Output;

    fn format(&self, entry: &LogEntry) -> Self::Output;
}

/// Text formatter usable behind a trait object
pub type BoxedTextFormatter = Box<dyn Formatter<Output = String>>;

/// Uncoloured sections shared by the text formatters.
///
/// Both text formatters derive their structure from this, which keeps the
/// coloured output identical to the plain one once escapes are removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TextSections {
    /// Leading blank line, indented payload, trailing newline
    pub raw_block: Option<String>,
    /// Indented trace followed by one newline
    pub exception_block: Option<String>,
}

impl TextSections {
    pub(crate) fn of(entry: &LogEntry) -> Self {
        let raw_block = entry
            .raw_payload()
            .map(|raw| format!("\n{}\n", indent_lines(raw)));
        let exception_block = entry
            .exception
            .as_ref()
            .map(|exc| format!("{}\n", indent_lines(&exc.render())));

        Self {
            raw_block,
            exception_block,
        }
    }

    /// Whether a newline must separate the message body from the trace
    pub(crate) fn needs_separator(&self, message: &str) -> bool {
        let body_ends_with_newline = match self.raw_block {
            Some(ref raw) => raw.ends_with('\n'),
            None => message.ends_with('\n'),
        };
        self.exception_block.is_some() && !body_ends_with_newline
    }
}

/// Prefix every line of `text` with two spaces
pub(crate) fn indent_lines(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    out.push_str("  ");
    out.push_str(&text.split_inclusive('\n').collect::<Vec<_>>().join("  "));
    out
}
