//! Shared configuration loader for the ebnf toolchain.
//!
//! `defaults/ebnf.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`EbnfConfig`].

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use ebnf_core::RenderOptions;
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/ebnf.default.toml");

/// Top-level configuration consumed by ebnf applications.
#[derive(Debug, Clone, Deserialize)]
pub struct EbnfConfig {
    pub render: RenderConfig,
    pub yaml: YamlConfig,
    pub log: LogConfig,
}

/// Mirrors the knobs exposed by the EBNF renderer.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub line_width: usize,
    pub indent: String,
    pub max_depth: usize,
}

impl From<&RenderConfig> for RenderOptions {
    fn from(config: &RenderConfig) -> Self {
        RenderOptions {
            line_width: config.line_width,
            indent: config.indent.clone(),
            max_depth: config.max_depth,
        }
    }
}

/// Tagged-node output settings.
#[derive(Debug, Clone, Deserialize)]
pub struct YamlConfig {
    pub namespace: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    pub level: String,
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
    pub fn build(self) -> Result<EbnfConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<EbnfConfig, ConfigError> {
    Loader::new().build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_default_config() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(config.render.line_width, 80);
        assert_eq!(config.render.indent, "\t");
        assert_eq!(config.render.max_depth, 256);
        assert_eq!(config.yaml.namespace, ebnf_core::DEFAULT_NAMESPACE);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn defaults_match_render_options() {
        let config = load_defaults().expect("defaults to deserialize");
        assert_eq!(RenderOptions::from(&config.render), RenderOptions::default());
    }

    #[test]
    fn supports_overrides() {
        let config = Loader::new()
            .set_override("render.line_width", 40i64)
            .expect("override to apply")
            .set_override("yaml.namespace", "tag:example.org,2024:")
            .expect("override to apply")
            .build()
            .expect("config to build");
        assert_eq!(config.render.line_width, 40);
        assert_eq!(config.yaml.namespace, "tag:example.org,2024:");
    }

    #[test]
    fn layers_user_file() {
        let dir = std::env::temp_dir().join(format!("ebnf-config-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join("ebnf.toml");
        let mut file = std::fs::File::create(&path).expect("config file");
        writeln!(file, "[render]\nindent = \"  \"").expect("write config");

        let config = Loader::new().with_file(&path).build().expect("config to build");
        assert_eq!(config.render.indent, "  ");
        assert_eq!(config.render.line_width, 80);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn missing_optional_file_is_ignored() {
        let config = Loader::new()
            .with_optional_file("/nonexistent/ebnf.toml")
            .build()
            .expect("config to build");
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn missing_required_file_fails() {
        assert!(Loader::new().with_file("/nonexistent/ebnf.toml").build().is_err());
    }
}
