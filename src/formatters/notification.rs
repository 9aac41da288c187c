//! Rich-message formatter for chat channels
//!
//! Each entry becomes an embed-style [`RichMessage`]:
//!
//! - title: `LEVELNAME - logger.name`
//! - colour: picked from the severity (see [`RichColour::for_level`])
//! - timestamp: entry time in the local offset
//! - description: the message in a ```` ```profile ```` code block, the
//!   exception trace in a second code block, then the raw payload as a
//!   multi-line quote so its own markdown still renders
//!
//! The chat client's `profile` highlighting misreads some punctuation, so
//! inside the code blocks `(` (and ` (`) becomes `（` and a `.` that is not
//! followed by a digit becomes `․`. The title and the raw payload are left
//! untouched. Keep this in mind before reusing a description as data.

use super::Formatter;
use crate::core::{LogEntry, LogLevel};
use chrono::{DateTime, FixedOffset, Local};
use regex::Regex;
use serde::{Serialize, Serializer};
use std::sync::LazyLock;

/// Longest description a chat embed accepts, in characters
pub const MAX_DESCRIPTION_LEN: usize = 4096;

const TRUNCATION_MARKER: &str = "...\n(truncated)```";
const CODE_BLOCK_OPEN: &str = "```profile\n";
const CODE_BLOCK_CLOSE: &str = "```";
const QUOTE_PREFIX: &str = "\n>>> ";

/// Unicode decimal digit (category Nd)
static DECIMAL_DIGIT: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\A\d\z").ok());

fn is_decimal_digit(c: char) -> bool {
    match (*DECIMAL_DIGIT).as_ref() {
        Some(digit) => digit.is_match(c.encode_utf8(&mut [0; 4])),
        None => c.is_ascii_digit(),
    }
}

/// Embed colours, one per built-in severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RichColour {
    DarkGrey,
    Purple,
    Default,
    Green,
    Yellow,
    Red,
    DarkRed,
}

impl RichColour {
    pub fn value(&self) -> u32 {
        match self {
            RichColour::DarkGrey => 0x607d8b,
            RichColour::Purple => 0x9b59b6,
            RichColour::Default => 0x000000,
            RichColour::Green => 0x2ecc71,
            RichColour::Yellow => 0xfee75c,
            RichColour::Red => 0xe74c3c,
            RichColour::DarkRed => 0x992d22,
        }
    }

    /// Colour for `level`; levels outside the built-in seven have none
    pub fn for_level(level: LogLevel) -> Option<Self> {
        match level {
            LogLevel::NOTSET => Some(RichColour::DarkGrey),
            LogLevel::DEBUG => Some(RichColour::Purple),
            LogLevel::INFO => Some(RichColour::Default),
            LogLevel::NOTICE => Some(RichColour::Green),
            LogLevel::WARNING => Some(RichColour::Yellow),
            LogLevel::ERROR => Some(RichColour::Red),
            LogLevel::CRITICAL => Some(RichColour::DarkRed),
            _ => None,
        }
    }
}

impl Serialize for RichColour {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.value())
    }
}

/// Structured notification consumed by a chat-platform sink
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RichMessage {
    pub title: String,
    pub description: String,
    #[serde(rename = "color", skip_serializing_if = "Option::is_none")]
    pub colour: Option<RichColour>,
    pub timestamp: DateTime<FixedOffset>,
}

impl RichMessage {
    /// Embed payload as JSON
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NotificationFormatter;

impl NotificationFormatter {
    pub fn new() -> Self {
        Self
    }

    fn description(&self, entry: &LogEntry) -> String {
        let mut description = String::new();

        if !entry.message.is_empty() {
            push_code_block(&mut description, &entry.message);
        }

        if let Some(ref exc) = entry.exception {
            push_code_block(&mut description, &exc.render());
        }

        if !description.is_empty() {
            description = substitute_lookalikes(&description);
        }

        if let Some(raw) = entry.raw_payload() {
            description.push_str(QUOTE_PREFIX);
            description.push_str(raw);
        }

        truncate_description(description)
    }
}

impl Formatter for NotificationFormatter {
    type Output = RichMessage;

    fn format(&self, entry: &LogEntry) -> RichMessage {
        RichMessage {
            title: format!("{} - {}", entry.level_name, entry.logger_name),
            description: self.description(entry),
            colour: RichColour::for_level(entry.level),
            timestamp: entry.timestamp.with_timezone(&Local).fixed_offset(),
        }
    }
}

fn push_code_block(out: &mut String, content: &str) {
    out.push_str(CODE_BLOCK_OPEN);
    out.push_str(content);
    out.push_str(CODE_BLOCK_CLOSE);
}

/// Replace punctuation that confuses `profile` highlighting with lookalikes
fn substitute_lookalikes(text: &str) -> String {
    let text = text.replace(" (", "\u{FF08}").replace('(', "\u{FF08}");

    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        let next_is_non_digit = chars.peek().is_some_and(|&n| !is_decimal_digit(n));
        if c == '.' && next_is_non_digit {
            out.push('\u{2024}');
        } else {
            out.push(c);
        }
    }
    out
}

/// Cut to [`MAX_DESCRIPTION_LEN`] characters, marker included
fn truncate_description(description: String) -> String {
    if description.chars().count() <= MAX_DESCRIPTION_LEN {
        return description;
    }

    let keep = MAX_DESCRIPTION_LEN - TRUNCATION_MARKER.chars().count();
    let mut truncated: String = description.chars().take(keep).collect();
    truncated.push_str(TRUNCATION_MARKER);
    truncated
}
