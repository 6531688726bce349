//! JSON → node tree
//!
//! Trees produced by other tools arrive as nested objects tagged with `kind`,
//! the same shape [`super::to_json`] writes. Validation happens here, so the
//! renderer only ever sees well-formed nodes:
//!
//! - malformed JSON → [`FormatError::ParseError`]
//! - an unknown `kind` → [`RenderError::UnsupportedNode`]
//! - a required field that is absent or of the wrong type →
//!   [`RenderError::MissingAttribute`]
//!
//! Placement rules (inline vs block) are left to the renderer.

use crate::error::{FormatError, RenderError};
use crate::ir::nodes::{
    BlockQuote, CodeBlock, Document, Heading, HtmlBlock, Image, Item, Link, List, Node, NodeKind,
};
use serde_json::{Map, Value};

pub fn parse_from_json(source: &str) -> Result<Node, FormatError> {
    let value: Value =
        serde_json::from_str(source).map_err(|e| FormatError::ParseError(e.to_string()))?;
    Ok(node_from_value(&value, "root")?)
}

fn node_from_value(value: &Value, parent: &str) -> Result<Node, RenderError> {
    let Some(name) = value.get("kind").and_then(Value::as_str) else {
        return Err(RenderError::missing("node", "kind"));
    };
    let Some(object) = value.as_object() else {
        return Err(RenderError::missing("node", "kind"));
    };
    let kind = NodeKind::from_name(name).ok_or_else(|| RenderError::unsupported(name, parent))?;
    let fields = Fields { kind, object };

    let node = match kind {
        NodeKind::Document => Node::Document(Document {
            children: fields.nodes("children")?,
        }),
        NodeKind::Heading => Node::Heading(Heading {
            level: fields.level()?,
            children: fields.nodes("children")?,
        }),
        NodeKind::Paragraph => Node::paragraph(fields.nodes("children")?),
        NodeKind::Text => Node::text(fields.string("literal")?),
        NodeKind::Emphasis => Node::emphasis(fields.nodes("children")?),
        NodeKind::Strong => Node::strong(fields.nodes("children")?),
        NodeKind::Code => Node::code(fields.string("literal")?),
        NodeKind::CodeBlock => Node::CodeBlock(CodeBlock {
            language: fields.optional_string("language"),
            literal: fields.string("literal")?,
        }),
        NodeKind::Link => Node::Link(Link {
            url: fields.string("url")?,
            title: fields.optional_string("title"),
            children: fields.nodes("children")?,
        }),
        NodeKind::Image => Node::Image(Image {
            url: fields.string("url")?,
            alt: fields.optional_string("alt").unwrap_or_default(),
            title: fields.optional_string("title"),
        }),
        NodeKind::List => Node::List(List {
            ordered: fields.boolean("ordered")?,
            start: fields.optional_usize("start").unwrap_or(1),
            tight: fields.optional_bool("tight").unwrap_or(true),
            items: fields.nodes("items")?,
        }),
        NodeKind::Item => Node::Item(Item {
            children: fields.nodes("children")?,
        }),
        NodeKind::BlockQuote => Node::BlockQuote(BlockQuote {
            children: fields.nodes("children")?,
        }),
        NodeKind::SoftBreak => Node::SoftBreak,
        NodeKind::LineBreak => Node::LineBreak,
        NodeKind::ThematicBreak => Node::ThematicBreak,
        NodeKind::HtmlBlock => Node::HtmlBlock(HtmlBlock {
            literal: fields.string("literal")?,
        }),
    };
    Ok(node)
}

/// Typed access to the attributes of one JSON node
struct Fields<'v> {
    kind: NodeKind,
    object: &'v Map<String, Value>,
}

impl Fields<'_> {
    fn missing(&self, attribute: &str) -> RenderError {
        RenderError::missing(self.kind.as_str(), attribute)
    }

    fn string(&self, attribute: &str) -> Result<String, RenderError> {
        self.optional_string(attribute)
            .ok_or_else(|| self.missing(attribute))
    }

    fn optional_string(&self, attribute: &str) -> Option<String> {
        self.object
            .get(attribute)
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn boolean(&self, attribute: &str) -> Result<bool, RenderError> {
        self.optional_bool(attribute)
            .ok_or_else(|| self.missing(attribute))
    }

    fn optional_bool(&self, attribute: &str) -> Option<bool> {
        self.object.get(attribute).and_then(Value::as_bool)
    }

    fn optional_usize(&self, attribute: &str) -> Option<usize> {
        self.object
            .get(attribute)
            .and_then(Value::as_u64)
            .and_then(|n| usize::try_from(n).ok())
    }

    /// Heading levels outside 1..=6 are treated as absent.
    fn level(&self) -> Result<u8, RenderError> {
        self.object
            .get("level")
            .and_then(Value::as_u64)
            .and_then(|n| u8::try_from(n).ok())
            .filter(|level| (1..=6).contains(level))
            .ok_or_else(|| self.missing("level"))
    }

    /// Child arrays may be omitted for leaf-like usage; a non-array is an error.
    fn nodes(&self, attribute: &str) -> Result<Vec<Node>, RenderError> {
        match self.object.get(attribute) {
            None => Ok(Vec::new()),
            Some(Value::Array(values)) => values
                .iter()
                .map(|value| node_from_value(value, self.kind.as_str()))
                .collect(),
            Some(_) => Err(self.missing(attribute)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_document() {
        let doc = parse_from_json(
            r#"{"kind": "document", "children": [
                {"kind": "paragraph", "children": [{"kind": "text", "literal": "Hi"}]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(
            doc,
            Node::document(vec![Node::paragraph(vec![Node::text("Hi")])])
        );
    }

    #[test]
    fn list_defaults() {
        let doc = parse_from_json(r#"{"kind": "list", "ordered": true, "items": []}"#).unwrap();
        assert_eq!(doc, Node::list(true, vec![]));
    }

    #[test]
    fn syntax_error_is_parse_error() {
        let err = parse_from_json("{not json").unwrap_err();
        assert!(matches!(err, FormatError::ParseError(_)));
    }

    #[test]
    fn unknown_kind_is_unsupported() {
        let err = parse_from_json(
            r#"{"kind": "document", "children": [{"kind": "table", "rows": []}]}"#,
        )
        .unwrap_err();
        assert_eq!(
            err,
            FormatError::Render(RenderError::unsupported("table", "document"))
        );
    }

    #[test]
    fn missing_fields_are_reported() {
        let err = parse_from_json(r#"{"kind": "heading", "children": []}"#).unwrap_err();
        assert_eq!(
            err,
            FormatError::Render(RenderError::missing("heading", "level"))
        );

        let err = parse_from_json(r#"{"kind": "heading", "level": 9}"#).unwrap_err();
        assert_eq!(
            err,
            FormatError::Render(RenderError::missing("heading", "level"))
        );

        let err = parse_from_json(r#"{"kind": "link", "children": []}"#).unwrap_err();
        assert_eq!(err, FormatError::Render(RenderError::missing("link", "url")));

        let err = parse_from_json(r#"{"kind": "list", "items": []}"#).unwrap_err();
        assert_eq!(
            err,
            FormatError::Render(RenderError::missing("list", "ordered"))
        );
    }

    #[test]
    fn missing_kind_is_reported() {
        let err = parse_from_json(r#"{"children": []}"#).unwrap_err();
        assert_eq!(err, FormatError::Render(RenderError::missing("node", "kind")));
    }
}
