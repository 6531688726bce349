//! RST serialization (node tree → reStructuredText)
//!
//! The serializer walks the tree once. Blocks are written line by line through
//! `RenderState::write_line`, which prefixes every line with the current
//! indentation stack: block quotes push a plain indent, list items push their
//! marker, which is printed on the item's first line and replaced by spaces of
//! the same width on every continuation line. That stack is what normalises
//! lazy and indented Markdown continuation lines to the same output.
//!
//! Inline content is rendered to a string first (it may contain newlines from
//! soft breaks) and then handed to `write_line` one line at a time.

use super::escape::{escape_label, escape_line_start, escape_role_content, escape_text};
use super::rules::RstRules;
use crate::error::RenderError;
use crate::ir::nodes::{CodeBlock, Heading, HtmlBlock, Image, List, Node, NodeKind};
use unicode_width::UnicodeWidthStr;

/// Renders node trees to RST using a fixed set of [`RstRules`].
///
/// The serializer itself holds no per-document state, so one instance can be
/// shared between threads; every call to [`RstSerializer::serialize`] builds a
/// fresh `RenderState`.
#[derive(Debug, Clone, Default)]
pub struct RstSerializer {
    rules: RstRules,
}

impl RstSerializer {
    pub fn new(rules: RstRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &RstRules {
        &self.rules
    }

    /// Render a document node. Any other root kind is rejected.
    pub fn serialize(&self, root: &Node) -> Result<String, RenderError> {
        let Node::Document(doc) = root else {
            return Err(RenderError::unsupported(root.kind().as_str(), "root"));
        };

        let mut state = RenderState::new(&self.rules);
        for child in &doc.children {
            state.block(child, NodeKind::Document)?;
        }
        state.write_substitutions();

        tracing::debug!(
            blocks = doc.children.len(),
            bytes = state.output.len(),
            "rendered document to rst"
        );
        Ok(state.output)
    }
}

/// One level of the indentation stack.
struct Indent {
    /// Marker still to be printed on the next line (list items only)
    marker: Option<String>,
    /// Printed on every line once the marker has been consumed
    continuation: String,
}

/// An image that had to be written as a substitution reference.
struct Substitution {
    name: String,
    url: String,
    alt: String,
    target: Option<String>,
}

/// Transient state for a single render call.
struct RenderState<'r> {
    rules: &'r RstRules,
    output: String,
    indents: Vec<Indent>,
    consecutive_newlines: usize,
    /// Set while the current list item has not printed its first line yet
    item_start: bool,
    list_depth: usize,
    quote_depth: usize,
    /// > 0 while rendering the label of a link
    label_depth: usize,
    /// Soft and hard breaks become spaces (heading titles)
    single_line: bool,
    substitutions: Vec<Substitution>,
}

impl<'r> RenderState<'r> {
    fn new(rules: &'r RstRules) -> Self {
        Self {
            rules,
            output: String::new(),
            indents: Vec::new(),
            // Start as if a line just ended, so the first block gets exactly
            // one leading newline.
            consecutive_newlines: 1,
            item_start: false,
            list_depth: 0,
            quote_depth: 0,
            label_depth: 0,
            single_line: false,
            substitutions: Vec::new(),
        }
    }

    fn prefix(&mut self) -> String {
        let mut prefix = String::new();
        for indent in &mut self.indents {
            match indent.marker.take() {
                Some(marker) => prefix.push_str(&marker),
                None => prefix.push_str(&indent.continuation),
            }
        }
        prefix
    }

    fn write_line(&mut self, text: &str) {
        let prefix = self.prefix();
        if text.is_empty() {
            // Blank lines carry no indentation, except for a pending list
            // marker (an empty item).
            let marker = prefix.trim_end();
            self.output.push_str(marker);
            self.output.push('\n');
            if marker.is_empty() {
                self.consecutive_newlines += 1;
            } else {
                self.consecutive_newlines = 1;
            }
        } else {
            self.output.push_str(&prefix);
            self.output.push_str(text);
            self.output.push('\n');
            self.consecutive_newlines = 1;
        }
        self.item_start = false;
    }

    fn ensure_blank_lines(&mut self, count: usize) {
        let target_newlines = count + 1;
        while self.consecutive_newlines < target_newlines {
            self.output.push('\n');
            self.consecutive_newlines += 1;
        }
    }

    /// Blank-line spacing before a block, except for the first block of a
    /// list item, which shares the marker line.
    fn start_block(&mut self) {
        if !self.item_start {
            self.ensure_blank_lines(1);
        }
    }

    fn block(&mut self, node: &Node, parent: NodeKind) -> Result<(), RenderError> {
        tracing::trace!(kind = %node.kind(), %parent, "rendering block");
        match node {
            Node::Heading(heading) => self.heading(heading),
            Node::Paragraph(paragraph) => self.paragraph(&paragraph.children),
            Node::CodeBlock(code) => {
                self.code_block(code);
                Ok(())
            }
            Node::List(list) => self.list(list),
            Node::BlockQuote(quote) => {
                self.start_block();
                self.quote_depth += 1;
                self.indents.push(Indent {
                    marker: None,
                    continuation: self.rules.indent_string.clone(),
                });
                let result = quote
                    .children
                    .iter()
                    .try_for_each(|child| self.block(child, NodeKind::BlockQuote));
                self.indents.pop();
                self.quote_depth -= 1;
                result
            }
            Node::ThematicBreak => {
                self.start_block();
                self.write_line("----");
                Ok(())
            }
            Node::HtmlBlock(html) => {
                self.html_block(html);
                Ok(())
            }
            Node::Document(_) | Node::Item(_) => {
                Err(RenderError::unsupported(node.kind().as_str(), parent.as_str()))
            }
            Node::Text(_)
            | Node::Emphasis(_)
            | Node::Strong(_)
            | Node::Code(_)
            | Node::Link(_)
            | Node::Image(_)
            | Node::SoftBreak
            | Node::LineBreak => Err(RenderError::unsupported(
                node.kind().as_str(),
                parent.as_str(),
            )),
        }
    }

    fn heading(&mut self, heading: &Heading) -> Result<(), RenderError> {
        let underline_char = self
            .rules
            .heading_char(heading.level)
            .ok_or_else(|| RenderError::missing("heading", "level"))?;

        self.single_line = true;
        let title = self.inlines(&heading.children, NodeKind::Heading);
        self.single_line = false;
        let title = title?;
        let title = self.escape_line(title.trim());
        let title = title.as_str();

        if title.is_empty() {
            tracing::warn!(level = heading.level, "skipping heading without text");
            return Ok(());
        }
        if self.list_depth > 0 || self.quote_depth > 0 {
            tracing::warn!(
                title,
                "heading inside a list or block quote; docutils only accepts section titles at top level"
            );
        }

        // docutils measures titles in display columns
        let underline: String = std::iter::repeat(underline_char)
            .take(title.width())
            .collect();
        self.start_block();
        self.write_line(title);
        self.write_line(&underline);
        Ok(())
    }

    fn paragraph(&mut self, children: &[Node]) -> Result<(), RenderError> {
        if let Some(images) = standalone_images(children) {
            for (image, target) in images {
                self.image_directive(image, target)?;
            }
            return Ok(());
        }

        let text = self.inlines(children, NodeKind::Paragraph)?;
        if text.trim().is_empty() {
            tracing::trace!(inlines = children.len(), "skipping paragraph without text");
            return Ok(());
        }
        self.start_block();
        for line in text.split('\n') {
            let line = self.escape_line(line.trim_end());
            self.write_line(&line);
        }
        Ok(())
    }

    fn image_directive(&mut self, image: &Image, target: Option<&str>) -> Result<(), RenderError> {
        if image.url.is_empty() {
            return Err(RenderError::missing("image", "url"));
        }
        if target.is_some_and(str::is_empty) {
            return Err(RenderError::missing("link", "url"));
        }
        self.start_block();
        self.write_line(&format!(".. image:: {}", image.url));
        let indent = self.rules.indent_string.clone();
        if !image.alt.is_empty() {
            self.write_line(&format!("{indent}:alt: {}", image.alt));
        }
        if let Some(target) = target {
            self.write_line(&format!("{indent}:target: {target}"));
        }
        Ok(())
    }

    fn code_block(&mut self, code: &CodeBlock) {
        let language = code
            .language
            .as_deref()
            .and_then(|info| info.split_whitespace().next());
        let directive = match language {
            Some(language) => format!(".. code:: {language}"),
            None => ".. code::".to_string(),
        };
        self.start_block();
        self.write_line(&directive);
        self.write_literal_body(&code.literal);
    }

    fn html_block(&mut self, html: &HtmlBlock) {
        self.start_block();
        self.write_line(".. raw:: html");
        self.write_literal_body(&html.literal);
    }

    /// Directive content: a blank line, then every line indented verbatim.
    fn write_literal_body(&mut self, literal: &str) {
        if literal.trim().is_empty() {
            return;
        }
        self.ensure_blank_lines(1);
        let indent = self.rules.indent_string.clone();
        for line in literal.lines() {
            if line.trim().is_empty() {
                self.write_line("");
            } else {
                self.write_line(&format!("{indent}{line}"));
            }
        }
    }

    fn list(&mut self, list: &List) -> Result<(), RenderError> {
        self.start_block();
        self.list_depth += 1;
        let result = self.list_items(list);
        self.list_depth -= 1;
        self.item_start = false;
        result
    }

    fn list_items(&mut self, list: &List) -> Result<(), RenderError> {
        for (index, node) in list.items.iter().enumerate() {
            let Node::Item(item) = node else {
                return Err(RenderError::unsupported(node.kind().as_str(), "list"));
            };

            let marker = if !list.ordered {
                self.rules.bullet_marker.to_string()
            } else if index == 0 && list.start > 1 {
                // docutils continues auto-enumeration from an explicit first number
                format!("{}.", list.start)
            } else {
                "#.".to_string()
            };

            if index > 0 && !list.tight {
                self.ensure_blank_lines(1);
            }

            let marker = format!("{marker} ");
            let continuation = " ".repeat(marker.chars().count());
            self.indents.push(Indent {
                marker: Some(marker),
                continuation,
            });
            self.item_start = true;

            let result = item
                .children
                .iter()
                .try_for_each(|child| self.block(child, NodeKind::Item));
            if result.is_ok() && self.item_start {
                // Nothing was written for this item; still emit its marker.
                self.write_line("");
            }
            self.indents.pop();
            result?;
        }
        Ok(())
    }

    /// Concatenate inline nodes. Markup that would touch a word character is
    /// separated from it by an escaped space, which docutils drops on output.
    fn inlines(&mut self, nodes: &[Node], parent: NodeKind) -> Result<String, RenderError> {
        let mut rendered = String::new();
        let mut after_markup = false;
        for node in nodes {
            let piece = self.inline(node, parent)?;
            let Some(first) = piece.chars().next() else {
                continue;
            };
            let is_markup = is_inline_markup(node) && !piece.trim().is_empty();
            let needs_gap = match rendered.chars().next_back() {
                Some(prev) => {
                    (is_markup && !may_precede_markup(prev))
                        || (after_markup && !may_follow_markup(first))
                }
                None => false,
            };
            if needs_gap {
                rendered.push_str("\\ ");
            }
            rendered.push_str(&piece);
            after_markup = is_markup;
        }
        Ok(rendered)
    }

    fn inline(&mut self, node: &Node, parent: NodeKind) -> Result<String, RenderError> {
        match node {
            Node::Text(text) => Ok(self.escape(&text.literal)),
            Node::Emphasis(emphasis) => {
                let inner = self.inlines(&emphasis.children, NodeKind::Emphasis)?;
                Ok(wrap_markup(&inner, "*"))
            }
            Node::Strong(strong) => {
                let inner = self.inlines(&strong.children, NodeKind::Strong)?;
                Ok(wrap_markup(&inner, "**"))
            }
            Node::Code(code) => Ok(inline_literal(&code.literal)),
            Node::Link(link) => {
                if self.label_depth > 0 {
                    return Err(RenderError::unsupported("link", "link"));
                }
                if link.url.is_empty() {
                    return Err(RenderError::missing("link", "url"));
                }
                if let [Node::Image(image)] = link.children.as_slice() {
                    return self.substitution_reference(image, Some(&link.url));
                }

                self.label_depth += 1;
                let label = self.inlines(&link.children, NodeKind::Link);
                self.label_depth -= 1;
                let label = label?;
                let label = label.split_whitespace().collect::<Vec<_>>().join(" ");

                let suffix = self.rules.link_suffix();
                if label.is_empty() {
                    Ok(format!("`<{}>`{suffix}", link.url))
                } else {
                    Ok(format!("`{label} <{}>`{suffix}", link.url))
                }
            }
            Node::Image(image) => self.substitution_reference(image, None),
            Node::SoftBreak | Node::LineBreak => {
                if self.single_line || self.label_depth > 0 {
                    Ok(" ".to_string())
                } else {
                    Ok("\n".to_string())
                }
            }
            Node::Document(_)
            | Node::Heading(_)
            | Node::Paragraph(_)
            | Node::CodeBlock(_)
            | Node::List(_)
            | Node::Item(_)
            | Node::BlockQuote(_)
            | Node::ThematicBreak
            | Node::HtmlBlock(_) => Err(RenderError::unsupported(
                node.kind().as_str(),
                parent.as_str(),
            )),
        }
    }

    fn escape_line(&self, line: &str) -> String {
        if self.rules.escape_inline_markup {
            escape_line_start(line)
        } else {
            line.to_string()
        }
    }

    fn escape(&self, text: &str) -> String {
        if !self.rules.escape_inline_markup {
            text.to_string()
        } else if self.label_depth > 0 {
            escape_label(text)
        } else {
            escape_text(text)
        }
    }

    /// Inline images cannot be expressed directly in RST; they become a
    /// `|name|` reference whose definition is written after the last block.
    fn substitution_reference(
        &mut self,
        image: &Image,
        target: Option<&str>,
    ) -> Result<String, RenderError> {
        if image.url.is_empty() {
            return Err(RenderError::missing("image", "url"));
        }

        let base = substitution_name(&image.alt);
        let mut name = base.clone();
        let mut counter = 1;
        loop {
            match self.substitutions.iter().find(|s| s.name == name) {
                None => break,
                Some(existing)
                    if existing.url == image.url && existing.target.as_deref() == target =>
                {
                    return Ok(format!("|{name}|"));
                }
                Some(_) => {
                    counter += 1;
                    name = format!("{base}-{counter}");
                }
            }
        }

        self.substitutions.push(Substitution {
            name: name.clone(),
            url: image.url.clone(),
            alt: image.alt.clone(),
            target: target.map(str::to_string),
        });
        Ok(format!("|{name}|"))
    }

    fn write_substitutions(&mut self) {
        let substitutions = std::mem::take(&mut self.substitutions);
        let indent = self.rules.indent_string.clone();
        for substitution in substitutions {
            self.ensure_blank_lines(1);
            self.write_line(&format!(
                ".. |{}| image:: {}",
                substitution.name, substitution.url
            ));
            if !substitution.alt.is_empty() {
                self.write_line(&format!("{indent}:alt: {}", substitution.alt));
            }
            if let Some(target) = &substitution.target {
                self.write_line(&format!("{indent}:target: {target}"));
            }
        }
    }
}

fn is_inline_markup(node: &Node) -> bool {
    matches!(
        node,
        Node::Emphasis(_) | Node::Strong(_) | Node::Code(_) | Node::Link(_) | Node::Image(_)
    )
}

/// Characters allowed right before an inline markup start-string
fn may_precede_markup(c: char) -> bool {
    c.is_whitespace() || "-:/'\"<([{".contains(c) || (!c.is_ascii() && !c.is_alphanumeric())
}

/// Characters allowed right after an inline markup end-string
fn may_follow_markup(c: char) -> bool {
    c.is_whitespace()
        || "-.,:;!?\\/'\")]}>".contains(c)
        || (!c.is_ascii() && !c.is_alphanumeric())
}

/// ``` ``literal`` ```, or the `:literal:` role when the text touches a backtick
fn inline_literal(literal: &str) -> String {
    if literal.is_empty() {
        String::new()
    } else if literal.starts_with('`') || literal.ends_with('`') {
        format!(":literal:`{}`", escape_role_content(literal))
    } else {
        format!("``{literal}``")
    }
}

fn wrap_markup(inner: &str, delimiter: &str) -> String {
    if inner.trim().is_empty() {
        inner.to_string()
    } else {
        format!("{delimiter}{inner}{delimiter}")
    }
}

/// Substitution names come from the alt text; anything that would break the
/// `|name|` syntax falls back to a generic name.
fn substitution_name(alt: &str) -> String {
    let collapsed = alt.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() || collapsed.contains(['|', '`', '*', '_']) {
        "image".to_string()
    } else {
        collapsed
    }
}

/// The images of a paragraph that contains nothing but images (optionally
/// wrapped in a link) and whitespace, paired with their link target.
fn standalone_images(children: &[Node]) -> Option<Vec<(&Image, Option<&str>)>> {
    let mut images = Vec::new();
    for child in children {
        match child {
            Node::Image(image) => images.push((image, None)),
            Node::Link(link) => match link.children.as_slice() {
                [Node::Image(image)] => images.push((image, Some(link.url.as_str()))),
                _ => return None,
            },
            Node::Text(text) if text.literal.trim().is_empty() => {}
            Node::SoftBreak | Node::LineBreak => {}
            _ => return None,
        }
    }
    if images.is_empty() {
        None
    } else {
        Some(images)
    }
}
