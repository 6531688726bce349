use crate::error::FormatError;
use serde::{Deserialize, Serialize};

/// Configuration for the RST renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RstRules {
    /// Underline characters for heading levels 1 through 6
    pub heading_chars: String,

    /// String used for block quote and directive body indentation (usually 4 spaces)
    pub indent_string: String,

    /// The character to use for unordered list markers
    pub bullet_marker: char,

    /// Whether to backslash-escape inline markup characters found in text
    pub escape_inline_markup: bool,

    /// Whether links are written as anonymous (`__`) rather than named (`_`) references
    pub anonymous_links: bool,
}

impl Default for RstRules {
    fn default() -> Self {
        Self {
            heading_chars: "#*=-^\"".to_string(),
            indent_string: "    ".to_string(),
            bullet_marker: '*',
            escape_inline_markup: true,
            anonymous_links: false,
        }
    }
}

impl RstRules {
    /// Underline character for a heading level, `None` outside 1..=6.
    ///
    /// Falls back to the level 1 character when `heading_chars` is shorter than six.
    pub fn heading_char(&self, level: u8) -> Option<char> {
        if !(1..=6).contains(&level) {
            return None;
        }
        self.heading_chars
            .chars()
            .nth(usize::from(level - 1))
            .or_else(|| self.heading_chars.chars().next())
            .or(Some('#'))
    }

    /// Reject rules that would produce invalid RST.
    ///
    /// Bullets must be one of `*`, `-`, `+`; heading underlines must be
    /// non-alphanumeric printable ASCII; the indent must be non-empty whitespace.
    pub fn validate(&self) -> Result<(), FormatError> {
        if !matches!(self.bullet_marker, '*' | '-' | '+') {
            return Err(FormatError::SerializationError(format!(
                "Invalid bullet marker '{}' (expected one of *, -, +)",
                self.bullet_marker
            )));
        }
        if self.heading_chars.is_empty()
            || !self.heading_chars.chars().all(|c| c.is_ascii_punctuation())
        {
            return Err(FormatError::SerializationError(format!(
                "Invalid heading characters '{}' (expected ASCII punctuation)",
                self.heading_chars
            )));
        }
        if self.indent_string.is_empty() || !self.indent_string.trim().is_empty() {
            return Err(FormatError::SerializationError(format!(
                "Invalid indent {:?} (expected whitespace)",
                self.indent_string
            )));
        }
        Ok(())
    }

    pub(crate) fn link_suffix(&self) -> &'static str {
        if self.anonymous_links {
            "__"
        } else {
            "_"
        }
    }
}
