//! Treeviz formatter for node trees
//!
//! A visual, line based dump of the tree, used by `md2rst inspect`. Each node
//! takes one line:
//!
//! <prefix><connector> <icon> <label>
//!
//! where the prefix draws the branches of the ancestors and the label is a
//! short summary of the node (text truncated to 30 characters by default).
//!
//! Example:
//!
//! ```text
//! ⧉ Document (2 blocks)
//! ├─ § Heading 1: Title
//! │ └─ ◦ Title
//! └─ ¶ Paragraph
//!   ├─ ◦ Hello 
//!   └─ 𝐁 Strong
//!     └─ ◦ Strong
//! ```
//!
//! Icons
//!     Document: ⧉
//!     Heading: §
//!     Paragraph: ¶
//!     List: ☰
//!     Item: •
//!     CodeBlock: 𝒱
//!     BlockQuote: ❝
//!     ThematicBreak: ―
//!     HtmlBlock: ⟨⟩
//!     Text: ◦
//!     Emphasis: 𝐼
//!     Strong: 𝐁
//!     Code: ƒ
//!     Link: ⊕
//!     Image: ▣
//!     SoftBreak / LineBreak: ↵

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::{Node, NodeKind};
use std::collections::HashMap;

const DEFAULT_LABEL_WIDTH: usize = 30;

fn get_icon(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Document => "⧉",
        NodeKind::Heading => "§",
        NodeKind::Paragraph => "¶",
        NodeKind::List => "☰",
        NodeKind::Item => "•",
        NodeKind::CodeBlock => "𝒱",
        NodeKind::BlockQuote => "❝",
        NodeKind::ThematicBreak => "―",
        NodeKind::HtmlBlock => "⟨⟩",
        NodeKind::Text => "◦",
        NodeKind::Emphasis => "𝐼",
        NodeKind::Strong => "𝐁",
        NodeKind::Code => "ƒ",
        NodeKind::Link => "⊕",
        NodeKind::Image => "▣",
        NodeKind::SoftBreak | NodeKind::LineBreak => "↵",
    }
}

fn truncate(text: &str, width: usize) -> String {
    let flat = text.replace('\n', "↵");
    if flat.chars().count() <= width {
        flat
    } else {
        let cut: String = flat.chars().take(width).collect();
        format!("{cut}…")
    }
}

fn display_label(node: &Node, width: usize) -> String {
    match node {
        Node::Document(doc) => format!("Document ({} blocks)", doc.children.len()),
        Node::Heading(heading) => format!(
            "Heading {}: {}",
            heading.level,
            truncate(&plain_text(&heading.children), width)
        ),
        Node::Paragraph(_) => "Paragraph".to_string(),
        Node::Text(text) => truncate(&text.literal, width),
        Node::Emphasis(_) => "Emphasis".to_string(),
        Node::Strong(_) => "Strong".to_string(),
        Node::Code(code) => truncate(&code.literal, width),
        Node::CodeBlock(code) => format!(
            "CodeBlock [{}] {} lines",
            code.language.as_deref().unwrap_or("-"),
            code.literal.lines().count()
        ),
        Node::Link(link) => format!("Link → {}", truncate(&link.url, width)),
        Node::Image(image) => format!(
            "Image {} ({})",
            truncate(&image.url, width),
            truncate(&image.alt, width)
        ),
        Node::List(list) => {
            let style = if list.ordered { "ordered" } else { "bullet" };
            let spacing = if list.tight { "tight" } else { "loose" };
            format!("{} items ({style}, {spacing})", list.items.len())
        }
        Node::Item(_) => "Item".to_string(),
        Node::BlockQuote(_) => "BlockQuote".to_string(),
        Node::SoftBreak => "SoftBreak".to_string(),
        Node::LineBreak => "LineBreak".to_string(),
        Node::ThematicBreak => "ThematicBreak".to_string(),
        Node::HtmlBlock(html) => format!("HtmlBlock {}", truncate(html.literal.trim(), width)),
    }
}

/// Text content of inline nodes, breaks flattened to spaces
fn plain_text(nodes: &[Node]) -> String {
    let mut text = String::new();
    for node in nodes {
        match node {
            Node::Text(t) => text.push_str(&t.literal),
            Node::Code(c) => text.push_str(&c.literal),
            Node::Image(i) => text.push_str(&i.alt),
            Node::SoftBreak | Node::LineBreak => text.push(' '),
            other => text.push_str(&plain_text(other.children())),
        }
    }
    text
}

fn format_node(node: &Node, prefix: &str, is_last: bool, width: usize) -> String {
    let connector = if is_last { "└─" } else { "├─" };
    let mut output = format!(
        "{prefix}{connector} {} {}\n",
        get_icon(node.kind()),
        display_label(node, width)
    );

    let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
    output.push_str(&format_children(node.children(), &child_prefix, width));
    output
}

fn format_children(children: &[Node], prefix: &str, width: usize) -> String {
    let mut output = String::new();
    let child_count = children.len();
    for (i, child) in children.iter().enumerate() {
        output.push_str(&format_node(child, prefix, i + 1 == child_count, width));
    }
    output
}

pub fn to_treeviz_str(node: &Node) -> String {
    to_treeviz_str_with_width(node, DEFAULT_LABEL_WIDTH)
}

/// Tree dump with labels truncated to `width` characters
pub fn to_treeviz_str_with_width(node: &Node, width: usize) -> String {
    let mut output = format!("{} {}\n", get_icon(node.kind()), display_label(node, width));
    output.push_str(&format_children(node.children(), "", width));
    output
}

/// Format implementation for treeviz format
#[derive(Debug, Clone, Copy, Default)]
pub struct TreevizFormat;

impl Format for TreevizFormat {
    fn name(&self) -> &str {
        "treeviz"
    }

    fn description(&self) -> &str {
        "Visual tree representation with Unicode icons"
    }

    fn file_extensions(&self) -> &[&str] {
        &["tree", "treeviz"]
    }

    fn supports_serialization(&self) -> bool {
        true
    }

    fn serialize(&self, doc: &Node) -> Result<String, FormatError> {
        Ok(to_treeviz_str(doc))
    }

    /// Accepts `width`: the label truncation width.
    fn serialize_with_options(
        &self,
        doc: &Node,
        options: &HashMap<String, String>,
    ) -> Result<String, FormatError> {
        let mut width = DEFAULT_LABEL_WIDTH;
        for (key, value) in options {
            match key.as_str() {
                "width" => {
                    width = value.parse().map_err(|_| {
                        FormatError::SerializationError(format!("Invalid width '{value}'"))
                    })?
                }
                other => {
                    return Err(FormatError::NotSupported(format!(
                        "Format 'treeviz' does not support parameter '{other}'"
                    )))
                }
            }
        }
        Ok(to_treeviz_str_with_width(doc, width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_shape() {
        let doc = Node::document(vec![
            Node::heading(1, vec![Node::text("Title")]),
            Node::paragraph(vec![
                Node::text("Hello "),
                Node::strong(vec![Node::text("Strong")]),
            ]),
        ]);
        let expected = "⧉ Document (2 blocks)\n\
                        ├─ § Heading 1: Title\n\
                        │ └─ ◦ Title\n\
                        └─ ¶ Paragraph\n\
                        \x20 ├─ ◦ Hello \n\
                        \x20 └─ 𝐁 Strong\n\
                        \x20   └─ ◦ Strong\n";
        assert_eq!(to_treeviz_str(&doc), expected);
    }

    #[test]
    fn test_labels_are_truncated() {
        let doc = Node::document(vec![Node::paragraph(vec![Node::text(
            "a very long paragraph that keeps on going",
        )])]);
        let output = to_treeviz_str_with_width(&doc, 10);
        assert!(output.contains("◦ a very lon…\n"));
    }

    #[test]
    fn test_list_label() {
        let doc = Node::document(vec![Node::list(true, vec![Node::item(vec![])])]);
        assert!(to_treeviz_str(&doc).contains("☰ 1 items (ordered, tight)"));
    }

    #[test]
    fn test_width_option() {
        let doc = Node::document(vec![Node::paragraph(vec![Node::text("abcdef")])]);
        let mut options = HashMap::new();
        options.insert("width".to_string(), "3".to_string());
        let output = TreevizFormat.serialize_with_options(&doc, &options).unwrap();
        assert!(output.contains("◦ abc…"));

        options.insert("width".to_string(), "wide".to_string());
        assert!(TreevizFormat.serialize_with_options(&doc, &options).is_err());
    }
}
