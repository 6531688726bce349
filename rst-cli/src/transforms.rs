//! CLI-specific transforms
//!
//! This module defines the views `md2rst inspect` can produce for a document.
//! The source is parsed into the node tree first (Markdown, or JSON when the
//! `from` parameter says so), then handed to one of:
//!
//! - `ir-json`: the node tree as JSON
//! - `ir-treeviz`: tree visualization with Unicode icons
//! - `rst`: the rendered reStructuredText
//!
//! ## Extra Parameters
//!
//! - `from`: `markdown` (default) or `json`
//! - `smart`: "true" to enable smart punctuation while parsing Markdown
//! - `width`: label truncation width for `ir-treeviz`
//!
//! Example: `md2rst inspect README.md ir-treeviz --extra-width 60`

use rst_babel::format::Format;
use rst_babel::formats::json::{parse_from_json, to_json};
use rst_babel::formats::markdown::{parser::parse_from_markdown_with_options, MarkdownOptions};
use rst_babel::formats::treeviz::TreevizFormat;
use rst_babel::{render_with_rules, Node, RstRules};
use std::collections::HashMap;

/// All available CLI transforms
pub const AVAILABLE_TRANSFORMS: &[&str] = &["ir-json", "ir-treeviz", "rst"];

/// Execute a named transform on a source text with optional extra parameters
///
/// `rules` only affects the `rst` transform.
///
/// # Examples
///
/// ```ignore
/// let output = execute_transform("# Title\n", "ir-treeviz", &RstRules::default(), &HashMap::new())?;
/// ```
pub fn execute_transform(
    source: &str,
    transform_name: &str,
    rules: &RstRules,
    extra_params: &HashMap<String, String>,
) -> Result<String, String> {
    let doc = parse_source(source, extra_params)?;

    match transform_name {
        "ir-json" => {
            let mut json = to_json(&doc).map_err(|e| format!("JSON serialization failed: {e}"))?;
            json.push('\n');
            Ok(json)
        }
        "ir-treeviz" => {
            let mut params = HashMap::new();
            if let Some(width) = extra_params.get("width") {
                params.insert("width".to_string(), width.clone());
            }
            TreevizFormat
                .serialize_with_options(&doc, &params)
                .map_err(|e| format!("Transform failed: {e}"))
        }
        "rst" => render_with_rules(&doc, rules).map_err(|e| format!("Render failed: {e}")),
        other => Err(format!(
            "Unknown transform '{other}'. Available: {}",
            AVAILABLE_TRANSFORMS.join(", ")
        )),
    }
}

fn parse_source(source: &str, params: &HashMap<String, String>) -> Result<Node, String> {
    match params.get("from").map(String::as_str).unwrap_or("markdown") {
        "markdown" => {
            let options = MarkdownOptions {
                smart: params.get("smart").is_some_and(|v| v == "true"),
            };
            parse_from_markdown_with_options(source, &options)
                .map_err(|e| format!("Parse failed: {e}"))
        }
        "json" => parse_from_json(source).map_err(|e| format!("Parse failed: {e}")),
        other => Err(format!("Cannot inspect '{other}' sources")),
    }
}
