//! Intermediate Representation (IR) for parsed documents.
//!
//! This module defines the format-agnostic node tree that parsers produce
//! (see ../formats/markdown and ../formats/json) and that the RST renderer
//! consumes.

pub mod nodes;

pub use nodes::{Node, NodeKind};
