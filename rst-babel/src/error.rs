//! Error types for rendering and format operations

/// Errors raised while walking a node tree.
///
/// Both variants abort the current render; no partial output is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// A node kind that is unknown, or not allowed where it appears
    /// (e.g. a block inside inline content, an item outside a list).
    #[error("unsupported node `{kind}` inside `{parent}`")]
    UnsupportedNode { kind: String, parent: String },

    /// A node lacks an attribute it cannot be rendered without.
    #[error("node `{kind}` is missing required attribute `{attribute}`")]
    MissingAttribute { kind: String, attribute: String },
}

impl RenderError {
    pub fn unsupported(kind: impl Into<String>, parent: impl Into<String>) -> Self {
        RenderError::UnsupportedNode {
            kind: kind.into(),
            parent: parent.into(),
        }
    }

    pub fn missing(kind: impl Into<String>, attribute: impl Into<String>) -> Self {
        RenderError::MissingAttribute {
            kind: kind.into(),
            attribute: attribute.into(),
        }
    }

    /// Name of the node kind that caused the failure
    pub fn kind(&self) -> &str {
        match self {
            RenderError::UnsupportedNode { kind, .. } => kind,
            RenderError::MissingAttribute { kind, .. } => kind,
        }
    }
}

/// Errors that can occur during format operations
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FormatError {
    /// Format not found in registry
    #[error("Format '{0}' not found")]
    FormatNotFound(String),
    /// Error during parsing
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Error during serialization
    #[error("Serialization error: {0}")]
    SerializationError(String),
    /// Format does not support the requested operation
    #[error("Operation not supported: {0}")]
    NotSupported(String),
    /// The node tree could not be rendered
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}
