//! Format implementations
//!
//! This module contains all format implementations that convert between
//! the node tree and text representations.

pub mod json;
pub mod markdown;
pub mod rst;
pub mod treeviz;

pub use json::JsonFormat;
pub use markdown::{MarkdownFormat, MarkdownOptions};
pub use rst::RstFormat;
pub use treeviz::TreevizFormat;
