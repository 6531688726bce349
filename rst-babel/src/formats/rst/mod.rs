//! reStructuredText format implementation
//!
//! Serialization only: the node tree is rendered to RST, parsing RST is out of scope.
//!
//! # Element Mapping Table
//!
//! | Node          | RST output                                              |
//! |---------------|---------------------------------------------------------|
//! | document      | blocks separated by one blank line, leading/trailing `\n` |
//! | heading       | title + underline of equal length (`#*=-^"` by level)   |
//! | paragraph     | inline content, continuation lines keep indentation     |
//! | strong        | `**text**`                                              |
//! | emphasis      | `*text*`                                                |
//! | code          | ``` ``literal`` ```                                     |
//! | link          | `` `label <url>`_ ``                                    |
//! | image         | `.. image:: url` + `:alt:` (own paragraph), or `|alt|` substitution |
//! | code_block    | `.. code:: lang`, blank line, body indented 4 spaces     |
//! | block_quote   | content indented 4 spaces                               |
//! | list          | `* ` / `#. ` markers, continuation aligned under text   |
//! | thematic_break| `----` transition                                       |
//! | html_block    | `.. raw:: html` directive                               |
//!
//! # Options
//!
//! [`Format::serialize_with_options`] accepts the following keys, all of which
//! override the format's [`RstRules`]:
//!
//! - `anonymous-links`: `true`/`false`
//! - `escape`: `true`/`false`
//! - `bullet`: a single character
//! - `indent`: a number of spaces, or the literal indent string
//! - `heading-chars`: underline characters for levels 1..6

pub mod escape;
pub mod rules;
pub mod serializer;

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Node;
use rules::RstRules;
use serializer::RstSerializer;
use std::collections::HashMap;

/// Format implementation for reStructuredText
#[derive(Debug, Clone, Default)]
pub struct RstFormat {
    rules: RstRules,
}

impl RstFormat {
    pub fn new(rules: RstRules) -> Self {
        Self { rules }
    }
}

impl Format for RstFormat {
    fn name(&self) -> &str {
        "rst"
    }

    fn description(&self) -> &str {
        "reStructuredText (docutils / Sphinx)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["rst", "rest"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Node) -> Result<String, FormatError> {
        let serializer = RstSerializer::new(self.rules.clone());
        Ok(serializer.serialize(doc)?)
    }

    fn serialize_with_options(
        &self,
        doc: &Node,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let rules = apply_options(self.rules.clone(), options)?;
        let serializer = RstSerializer::new(rules);
        Ok(serializer.serialize(doc)?)
    }
}

/// Layer `--extra-*` style options over a set of rules
pub fn apply_options(
    mut rules: RstRules,
    options: &HashMap<String, String>,
) -> Result<RstRules, FormatError> {
    for (key, value) in options {
        match key.as_str() {
            "anonymous-links" => rules.anonymous_links = parse_bool(key, value)?,
            "escape" => rules.escape_inline_markup = parse_bool(key, value)?,
            "bullet" => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => rules.bullet_marker = ch,
                    _ => {
                        return Err(FormatError::SerializationError(format!(
                            "Invalid bullet marker '{value}' (expected a single character)"
                        )))
                    }
                }
            }
            "indent" => {
                rules.indent_string = match value.parse::<usize>() {
                    Ok(width) if width > 0 => " ".repeat(width),
                    _ if !value.is_empty() && value.trim().is_empty() => value.clone(),
                    _ => {
                        return Err(FormatError::SerializationError(format!(
                            "Invalid indent '{value}'"
                        )))
                    }
                }
            }
            "heading-chars" => {
                if value.chars().count() < 6 {
                    return Err(FormatError::SerializationError(format!(
                        "heading-chars needs one character per level, got '{value}'"
                    )));
                }
                rules.heading_chars = value.clone();
            }
            other => {
                return Err(FormatError::NotSupported(format!(
                    "Format 'rst' does not support parameter '{other}'"
                )))
            }
        }
    }
    rules.validate()?;
    Ok(rules)
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, FormatError> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Ok(true),
        "false" | "0" | "no" | "n" => Ok(false),
        other => Err(FormatError::SerializationError(format!(
            "Invalid boolean value '{other}' for '{key}'"
        ))),
    }
}
