//! Shared configuration loader for the pyexplain tools.
//!
//! `defaults/pyexplain.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`PyexplainConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use pyexplain_render::explain::PromptTemplate;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/pyexplain.default.toml");

/// Top-level configuration consumed by pyexplain applications.
#[derive(Debug, Clone, Deserialize)]
pub struct PyexplainConfig {
    pub convert: ConvertConfig,
    pub explain: ExplainConfig,
}

/// Format-specific conversion knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct ConvertConfig {
    pub html: HtmlConfig,
    pub json: JsonConfig,
    pub treeviz: TreevizConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HtmlConfig {
    pub standalone: bool,
    pub title: String,
    /// Path of a stylesheet appended after the baseline CSS
    #[serde(default)]
    pub custom_css: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonConfig {
    pub pretty: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreevizConfig {
    pub label_width: usize,
}

/// Settings of the `explain` and `request` commands.
#[derive(Debug, Clone, Deserialize)]
pub struct ExplainConfig {
    pub default_format: String,
    pub prompt_prefix: String,
    pub code_prompt_prefix: String,
}

impl From<&ExplainConfig> for PromptTemplate {
    fn from(config: &ExplainConfig) -> Self {
        PromptTemplate {
            prefix: config.prompt_prefix.clone(),
            code_prefix: config.code_prompt_prefix.clone(),
        }
    }
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
    pub fn build(self) -> Result<PyexplainConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<PyexplainConfig, ConfigError> {
    Loader::new().build()
}
