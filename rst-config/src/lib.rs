//! Shared configuration loader for the rst-tools toolchain.
//!
//! `defaults/rst.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`RstConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat, ValueKind};
use rst_babel::formats::markdown::MarkdownOptions;
use rst_babel::RstRules;
use serde::Deserialize;
use std::path::Path;

pub use config::ConfigError;

const DEFAULT_TOML: &str = include_str!("../defaults/rst.default.toml");

/// File name picked up from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "rst.toml";

/// Top-level configuration consumed by rst-tools applications.
#[derive(Debug, Clone, Deserialize)]
pub struct RstConfig {
    pub rendering: RenderingConfig,
    pub parsing: ParsingConfig,
    pub inspect: InspectConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderingConfig {
    pub rules: RenderingRulesConfig,
}

/// Mirrors the knobs exposed by the RST renderer.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderingRulesConfig {
    pub heading_chars: String,
    pub indent_string: String,
    pub bullet_marker: char,
    pub escape_inline_markup: bool,
    pub anonymous_links: bool,
}

impl From<RenderingRulesConfig> for RstRules {
    fn from(config: RenderingRulesConfig) -> Self {
        RstRules {
            heading_chars: config.heading_chars,
            indent_string: config.indent_string,
            bullet_marker: config.bullet_marker,
            escape_inline_markup: config.escape_inline_markup,
            anonymous_links: config.anonymous_links,
        }
    }
}

impl From<&RenderingRulesConfig> for RstRules {
    fn from(config: &RenderingRulesConfig) -> Self {
        config.clone().into()
    }
}

/// Markdown parser settings.
#[derive(Debug, Clone, Deserialize)]
pub struct ParsingConfig {
    pub smart: bool,
}

impl From<&ParsingConfig> for MarkdownOptions {
    fn from(config: &ParsingConfig) -> Self {
        MarkdownOptions {
            smart: config.smart,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct InspectConfig {
    pub treeviz_width: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive string
    pub filter: String,
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    ///
    /// Rendering rules go through the same checks as `--extra-*` overrides.
    pub fn build(self) -> Result<RstConfig, ConfigError> {
        let config: RstConfig = self.builder.build()?.try_deserialize()?;
        RstRules::from(&config.rendering.rules)
            .validate()
            .map_err(|err| ConfigError::Message(format!("rendering.rules: {err}")))?;
        Ok(config)
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<RstConfig, ConfigError> {
    Loader::new().build()
}
