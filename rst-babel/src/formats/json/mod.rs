//! JSON node tree format
//!
//! Both directions are supported: [`to_json`] dumps the tree with a `kind` tag
//! on every node, and parsing reads the same shape back so that trees built by
//! other parsers can be rendered.
//!
//! ```json
//! {
//!   "kind": "document",
//!   "children": [
//!     { "kind": "heading", "level": 1, "children": [{ "kind": "text", "literal": "Title" }] }
//!   ]
//! }
//! ```

pub mod parser;

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Node;

pub use parser::parse_from_json;

/// Pretty-printed JSON for a node tree
pub fn to_json(node: &Node) -> Result<String, FormatError> {
    serde_json::to_string_pretty(node).map_err(|e| FormatError::SerializationError(e.to_string()))
}

/// Format implementation for the JSON node tree
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Node tree as JSON"
    }

    fn file_extensions(&self) -> &[&str] {
        &["json"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Node, FormatError> {
        parse_from_json(source)
    }

    fn serialize(&self, doc: &Node) -> Result<String, FormatError> {
        let mut json = to_json(doc)?;
        json.push('\n');
        Ok(json)
    }
}
