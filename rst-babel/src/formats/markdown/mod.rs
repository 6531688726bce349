//! Markdown format implementation
//!
//! Parsing only: CommonMark Markdown is read with `comrak` and converted into
//! the node tree the RST renderer consumes.
//!
//! # Element Mapping Table
//!
//! | Comrak value    | Node kind        | Notes                                    |
//! |-----------------|------------------|------------------------------------------|
//! | Document        | document         |                                          |
//! | Heading         | heading          | level 1-6                                |
//! | Paragraph       | paragraph        |                                          |
//! | Text            | text             |                                          |
//! | Emph / Strong   | emphasis / strong|                                          |
//! | Code            | code             |                                          |
//! | CodeBlock       | code_block       | first word of the info string → language |
//! | Link            | link             | title kept when non-empty                |
//! | Image           | image            | alt = plain text of the description      |
//! | List / Item     | list / item      | ordered, start, tight                    |
//! | BlockQuote      | block_quote      |                                          |
//! | SoftBreak       | soft_break       |                                          |
//! | LineBreak       | line_break       |                                          |
//! | ThematicBreak   | thematic_break   |                                          |
//! | HtmlBlock       | html_block       |                                          |
//!
//! Everything else (inline HTML, tables, footnotes, ...) is rejected.

pub mod parser;

use crate::error::FormatError;
use crate::format::Format;
use crate::ir::nodes::Node;
pub use parser::MarkdownOptions;

/// Format implementation for Markdown
#[derive(Debug, Clone, Default)]
pub struct MarkdownFormat {
    options: MarkdownOptions,
}

impl MarkdownFormat {
    pub fn new(options: MarkdownOptions) -> Self {
        Self { options }
    }
}

impl Format for MarkdownFormat {
    fn name(&self) -> &str {
        "markdown"
    }

    fn description(&self) -> &str {
        "CommonMark Markdown format"
    }

    fn file_extensions(&self) -> &[&str] {
        &["md", "markdown"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Node, FormatError> {
        parser::parse_from_markdown_with_options(source, &self.options)
    }
}
