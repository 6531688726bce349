//! Core data structures for the Intermediate Representation (IR).

use serde::Serialize;
use std::fmt;

/// A document tree node. One variant per node kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Document(Document),
    Heading(Heading),
    Paragraph(Paragraph),
    Text(Text),
    Emphasis(Emphasis),
    Strong(Strong),
    Code(Code),
    CodeBlock(CodeBlock),
    Link(Link),
    Image(Image),
    List(List),
    Item(Item),
    BlockQuote(BlockQuote),
    SoftBreak,
    LineBreak,
    ThematicBreak,
    HtmlBlock(HtmlBlock),
}

/// Represents the root of a document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    pub children: Vec<Node>,
}

/// Represents a heading with a specific level (1-6).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heading {
    pub level: u8,
    pub children: Vec<Node>,
}

/// Represents a paragraph of inline content.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Paragraph {
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Text {
    pub literal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Emphasis {
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Strong {
    pub children: Vec<Node>,
}

/// Inline code span.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Code {
    pub literal: String,
}

/// Represents a block of literal text, optionally tagged with a language.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CodeBlock {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    pub literal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Link {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Image {
    pub url: String,
    pub alt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

/// Represents a list of items.
///
/// `start` is only meaningful for ordered lists. Tight lists render their
/// items without blank lines in between.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct List {
    pub ordered: bool,
    pub start: usize,
    pub tight: bool,
    pub items: Vec<Node>,
}

/// Represents an item in a list. Children are block nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockQuote {
    pub children: Vec<Node>,
}

/// Raw HTML passed through from the source document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HtmlBlock {
    pub literal: String,
}

/// The kind of a [`Node`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Document,
    Heading,
    Paragraph,
    Text,
    Emphasis,
    Strong,
    Code,
    CodeBlock,
    Link,
    Image,
    List,
    Item,
    BlockQuote,
    SoftBreak,
    LineBreak,
    ThematicBreak,
    HtmlBlock,
}

impl NodeKind {
    pub const ALL: [NodeKind; 17] = [
        NodeKind::Document,
        NodeKind::Heading,
        NodeKind::Paragraph,
        NodeKind::Text,
        NodeKind::Emphasis,
        NodeKind::Strong,
        NodeKind::Code,
        NodeKind::CodeBlock,
        NodeKind::Link,
        NodeKind::Image,
        NodeKind::List,
        NodeKind::Item,
        NodeKind::BlockQuote,
        NodeKind::SoftBreak,
        NodeKind::LineBreak,
        NodeKind::ThematicBreak,
        NodeKind::HtmlBlock,
    ];

    /// Stable snake_case name, as used in errors and in the JSON `kind` tag
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Document => "document",
            NodeKind::Heading => "heading",
            NodeKind::Paragraph => "paragraph",
            NodeKind::Text => "text",
            NodeKind::Emphasis => "emphasis",
            NodeKind::Strong => "strong",
            NodeKind::Code => "code",
            NodeKind::CodeBlock => "code_block",
            NodeKind::Link => "link",
            NodeKind::Image => "image",
            NodeKind::List => "list",
            NodeKind::Item => "item",
            NodeKind::BlockQuote => "block_quote",
            NodeKind::SoftBreak => "soft_break",
            NodeKind::LineBreak => "line_break",
            NodeKind::ThematicBreak => "thematic_break",
            NodeKind::HtmlBlock => "html_block",
        }
    }

    pub fn from_name(name: &str) -> Option<NodeKind> {
        NodeKind::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// Whether nodes of this kind live inside paragraphs, headings and links
    pub fn is_inline(&self) -> bool {
        matches!(
            self,
            NodeKind::Text
                | NodeKind::Emphasis
                | NodeKind::Strong
                | NodeKind::Code
                | NodeKind::Link
                | NodeKind::Image
                | NodeKind::SoftBreak
                | NodeKind::LineBreak
        )
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Document(_) => NodeKind::Document,
            Node::Heading(_) => NodeKind::Heading,
            Node::Paragraph(_) => NodeKind::Paragraph,
            Node::Text(_) => NodeKind::Text,
            Node::Emphasis(_) => NodeKind::Emphasis,
            Node::Strong(_) => NodeKind::Strong,
            Node::Code(_) => NodeKind::Code,
            Node::CodeBlock(_) => NodeKind::CodeBlock,
            Node::Link(_) => NodeKind::Link,
            Node::Image(_) => NodeKind::Image,
            Node::List(_) => NodeKind::List,
            Node::Item(_) => NodeKind::Item,
            Node::BlockQuote(_) => NodeKind::BlockQuote,
            Node::SoftBreak => NodeKind::SoftBreak,
            Node::LineBreak => NodeKind::LineBreak,
            Node::ThematicBreak => NodeKind::ThematicBreak,
            Node::HtmlBlock(_) => NodeKind::HtmlBlock,
        }
    }

    /// Child nodes in document order (list items for lists)
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Document(d) => &d.children,
            Node::Heading(h) => &h.children,
            Node::Paragraph(p) => &p.children,
            Node::Emphasis(e) => &e.children,
            Node::Strong(s) => &s.children,
            Node::Link(l) => &l.children,
            Node::List(l) => &l.items,
            Node::Item(i) => &i.children,
            Node::BlockQuote(q) => &q.children,
            Node::Text(_)
            | Node::Code(_)
            | Node::CodeBlock(_)
            | Node::Image(_)
            | Node::SoftBreak
            | Node::LineBreak
            | Node::ThematicBreak
            | Node::HtmlBlock(_) => &[],
        }
    }

    pub fn document(children: Vec<Node>) -> Node {
        Node::Document(Document { children })
    }

    pub fn heading(level: u8, children: Vec<Node>) -> Node {
        Node::Heading(Heading { level, children })
    }

    pub fn paragraph(children: Vec<Node>) -> Node {
        Node::Paragraph(Paragraph { children })
    }

    pub fn text(literal: impl Into<String>) -> Node {
        Node::Text(Text {
            literal: literal.into(),
        })
    }

    pub fn emphasis(children: Vec<Node>) -> Node {
        Node::Emphasis(Emphasis { children })
    }

    pub fn strong(children: Vec<Node>) -> Node {
        Node::Strong(Strong { children })
    }

    pub fn code(literal: impl Into<String>) -> Node {
        Node::Code(Code {
            literal: literal.into(),
        })
    }

    pub fn code_block(language: Option<&str>, literal: impl Into<String>) -> Node {
        Node::CodeBlock(CodeBlock {
            language: language.map(str::to_string),
            literal: literal.into(),
        })
    }

    pub fn link(url: impl Into<String>, children: Vec<Node>) -> Node {
        Node::Link(Link {
            url: url.into(),
            title: None,
            children,
        })
    }

    pub fn image(url: impl Into<String>, alt: impl Into<String>) -> Node {
        Node::Image(Image {
            url: url.into(),
            alt: alt.into(),
            title: None,
        })
    }

    /// A tight list starting at 1
    pub fn list(ordered: bool, items: Vec<Node>) -> Node {
        Node::List(List {
            ordered,
            start: 1,
            tight: true,
            items,
        })
    }

    pub fn item(children: Vec<Node>) -> Node {
        Node::Item(Item { children })
    }

    pub fn block_quote(children: Vec<Node>) -> Node {
        Node::BlockQuote(BlockQuote { children })
    }
}
