//! Markdown to reStructuredText conversion
//!
//!     This crate renders a parsed Markdown document tree as reStructuredText (RST), the markup
//!     read by docutils and Sphinx.
//!
//!     This is a pure lib, that is, it powers the md2rst cli but is shell agnostic: no code
//!     here prints to stdout or reads environment variables. I/O is the caller's business.
//!
//! Architecture
//!
//!     Parsing is not done here. Markdown goes through `comrak` and its AST is converted into a
//!     small, closed node tree (./ir/nodes.rs). The RST serializer walks that tree once, keeping
//!     its nesting state (indent stack, list depth, pending markers) in a per-call render state.
//!     Trees produced by other parsers can be fed in as JSON (./formats/json).
//!
//!     The file structure :
//!     .
//!     ├── error.rs                # RenderError, FormatError
//!     ├── format.rs               # Format trait definition
//!     ├── registry.rs             # FormatRegistry for discovery and selection
//!     ├── formats
//!     │   ├── markdown            # comrak AST → node tree
//!     │   ├── json                # node tree ↔ JSON
//!     │   ├── rst                 # node tree → RST (rules, escaping, serializer)
//!     │   └── treeviz             # node tree → visual dump
//!     ├── ir                      # Node tree
//!     └── lib.rs
//!
//! Testing
//!     tests
//!     ├── <format>
//!     │   └── <testname>.rs
//!     └── fixtures
//!         ├── <name>.md
//!         └── <name>.rst
//!
//!     Note that rust does not by default discover tests in subdirectories, so we need to include these
//!     in the mod.
//!
//! Usage
//!
//! ```ignore
//! let rst = rst_babel::markdown_to_rst("Hello **Strong**")?;
//! assert_eq!(rst, "\nHello **Strong**\n");
//! ```

pub mod error;
pub mod format;
pub mod formats;
pub mod ir;
pub mod registry;

pub use error::{FormatError, RenderError};
pub use format::Format;
pub use formats::rst::rules::RstRules;
pub use formats::rst::serializer::RstSerializer;
pub use ir::{Node, NodeKind};
pub use registry::FormatRegistry;

/// Render a document tree to RST with the default rules
pub fn render(doc: &Node) -> Result<String, RenderError> {
    RstSerializer::default().serialize(doc)
}

pub fn render_with_rules(doc: &Node, rules: &RstRules) -> Result<String, RenderError> {
    RstSerializer::new(rules.clone()).serialize(doc)
}

/// Parse CommonMark and render it as RST
pub fn markdown_to_rst(source: &str) -> Result<String, FormatError> {
    markdown_to_rst_with_rules(source, &RstRules::default())
}

pub fn markdown_to_rst_with_rules(source: &str, rules: &RstRules) -> Result<String, FormatError> {
    let doc = formats::markdown::parser::parse_from_markdown(source)?;
    Ok(render_with_rules(&doc, rules)?)
}
