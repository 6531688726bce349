//! Markdown parsing (Markdown → node tree)
//!
//! Pipeline: Markdown string → Comrak AST → [`Node`] tree.
//!
//! Only the CommonMark core is accepted. Comrak values without a node kind
//! counterpart (inline HTML, tables, footnotes, ...) abort the conversion with
//! [`RenderError::UnsupportedNode`] named after comrak's own node name.

use crate::error::{FormatError, RenderError};
use crate::ir::nodes::{
    BlockQuote, CodeBlock, Document, Heading, HtmlBlock, Image, Item, Link, List, Node,
};
use comrak::nodes::{AstNode, ListType, NodeValue};
use comrak::{parse_document, Arena, ComrakOptions};
use serde::{Deserialize, Serialize};

/// Parser knobs exposed through configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkdownOptions {
    /// Turn straight quotes, `--` and `...` into typographic punctuation
    pub smart: bool,
}

/// Parse Markdown string to a document node
pub fn parse_from_markdown(source: &str) -> Result<Node, FormatError> {
    parse_from_markdown_with_options(source, &MarkdownOptions::default())
}

/// Parse Markdown string to a document node using explicit parser options
pub fn parse_from_markdown_with_options(
    source: &str,
    options: &MarkdownOptions,
) -> Result<Node, FormatError> {
    let arena = Arena::new();
    let comrak_options = comrak_options(options);
    let root = parse_document(&arena, source, &comrak_options);

    let doc = convert_block(root, "root")?;
    tracing::debug!(
        blocks = doc.children().len(),
        smart = options.smart,
        "converted markdown to node tree"
    );
    Ok(doc)
}

fn comrak_options(options: &MarkdownOptions) -> ComrakOptions<'static> {
    let mut comrak = ComrakOptions::default();
    comrak.parse.smart = options.smart;
    comrak
}

fn convert_children<'a>(node: &'a AstNode<'a>, parent: &str) -> Result<Vec<Node>, RenderError> {
    node.children()
        .map(|child| convert_block(child, parent))
        .collect()
}

fn convert_inlines<'a>(node: &'a AstNode<'a>, parent: &str) -> Result<Vec<Node>, RenderError> {
    node.children()
        .map(|child| convert_inline(child, parent))
        .collect()
}

/// Convert a block-level comrak node
fn convert_block<'a>(node: &'a AstNode<'a>, parent: &str) -> Result<Node, RenderError> {
    let data = node.data.borrow();

    match &data.value {
        NodeValue::Document => Ok(Node::Document(Document {
            children: convert_children(node, "document")?,
        })),

        NodeValue::Heading(heading) => Ok(Node::Heading(Heading {
            level: heading.level,
            children: convert_inlines(node, "heading")?,
        })),

        NodeValue::Paragraph => Ok(Node::paragraph(convert_inlines(node, "paragraph")?)),

        NodeValue::CodeBlock(code_block) => {
            let language = code_block
                .info
                .split_whitespace()
                .next()
                .map(str::to_string);
            Ok(Node::CodeBlock(CodeBlock {
                language,
                literal: code_block.literal.clone(),
            }))
        }

        NodeValue::List(list) => Ok(Node::List(List {
            ordered: matches!(list.list_type, ListType::Ordered),
            start: list.start,
            tight: list.tight,
            items: convert_children(node, "list")?,
        })),

        NodeValue::Item(_) => Ok(Node::Item(Item {
            children: convert_children(node, "item")?,
        })),

        NodeValue::BlockQuote => Ok(Node::BlockQuote(BlockQuote {
            children: convert_children(node, "block_quote")?,
        })),

        NodeValue::ThematicBreak => Ok(Node::ThematicBreak),

        NodeValue::HtmlBlock(html) => Ok(Node::HtmlBlock(HtmlBlock {
            literal: html.literal.clone(),
        })),

        other => Err(RenderError::unsupported(comrak_kind(other), parent)),
    }
}

/// Convert an inline comrak node
fn convert_inline<'a>(node: &'a AstNode<'a>, parent: &str) -> Result<Node, RenderError> {
    let data = node.data.borrow();

    match &data.value {
        NodeValue::Text(text) => Ok(Node::text(text.clone())),

        NodeValue::Emph => Ok(Node::emphasis(convert_inlines(node, "emphasis")?)),

        NodeValue::Strong => Ok(Node::strong(convert_inlines(node, "strong")?)),

        NodeValue::Code(code) => Ok(Node::code(code.literal.clone())),

        NodeValue::Link(link) => Ok(Node::Link(Link {
            url: link.url.clone(),
            title: non_empty(&link.title),
            children: convert_inlines(node, "link")?,
        })),

        NodeValue::Image(link) => Ok(Node::Image(Image {
            url: link.url.clone(),
            alt: collect_text_from_children(node),
            title: non_empty(&link.title),
        })),

        NodeValue::SoftBreak => Ok(Node::SoftBreak),

        NodeValue::LineBreak => Ok(Node::LineBreak),

        other => Err(RenderError::unsupported(comrak_kind(other), parent)),
    }
}

/// Name reported for comrak values that have no node kind counterpart
fn comrak_kind(value: &NodeValue) -> &'static str {
    match value {
        NodeValue::HtmlInline { .. } => "html_inline",
        NodeValue::Table { .. } => "table",
        NodeValue::TableRow { .. } => "table_row",
        NodeValue::TableCell { .. } => "table_cell",
        NodeValue::FootnoteDefinition { .. } => "footnote_definition",
        NodeValue::FootnoteReference { .. } => "footnote_reference",
        NodeValue::Strikethrough { .. } => "strikethrough",
        NodeValue::Superscript { .. } => "superscript",
        NodeValue::TaskItem { .. } => "taskitem",
        NodeValue::DescriptionList { .. } => "description_list",
        NodeValue::DescriptionItem { .. } => "description_item",
        NodeValue::DescriptionTerm { .. } => "description_term",
        NodeValue::DescriptionDetails { .. } => "description_details",
        NodeValue::FrontMatter { .. } => "frontmatter",
        NodeValue::Math { .. } => "math",
        NodeValue::MultilineBlockQuote { .. } => "multiline_block_quote",
        NodeValue::Escaped { .. } => "escaped",
        NodeValue::WikiLink { .. } => "wikilink",
        _ => "unknown",
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Plain text of an image description; markup inside the alt text is dropped
fn collect_text_from_children<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for child in node.children() {
        collect_text_content(child, &mut text);
    }
    text
}

fn collect_text_content<'a>(node: &'a AstNode<'a>, output: &mut String) {
    match &node.data.borrow().value {
        NodeValue::Text(text) => output.push_str(text),
        NodeValue::Code(code) => output.push_str(&code.literal),
        NodeValue::SoftBreak | NodeValue::LineBreak => output.push(' '),
        _ => {
            for child in node.children() {
                collect_text_content(child, output);
            }
        }
    }
}
