//! Site configuration management.
//!
//! Handles loading, parsing, and validating the `config.yaml` configuration
//! file at the project root.

use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("Unknown template key `{0}`")]
    UnknownTemplate(String),
}

/// Filesystem layout errors, reported before any traversal starts.
#[derive(Debug, Error)]
pub enum PathError {
    #[error("`{0}` is not a valid directory")]
    NotADirectory(PathBuf),

    #[error("content directory not found: `{0}`")]
    MissingContent(PathBuf),
}

/// Default values for serde deserialization
pub mod config_defaults {
    use std::path::PathBuf;

    pub fn title() -> String {
        "My Website".into()
    }
    pub fn content_dir() -> PathBuf {
        "content".into()
    }
    pub fn output_dir() -> PathBuf {
        "output".into()
    }
    pub fn templates_dir() -> PathBuf {
        "templates".into()
    }
}

/// Site configuration from `config.yaml`.
///
/// Unknown keys are tolerated; every recognized key has a default, so an
/// absent config file yields a usable configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site display name
    pub title: String,

    /// Content directory (relative to project root)
    pub content_dir: PathBuf,

    /// Output directory (relative to project root)
    pub output_dir: PathBuf,

    /// Templates directory (relative to project root)
    pub templates_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: config_defaults::title(),
            content_dir: config_defaults::content_dir(),
            output_dir: config_defaults::output_dir(),
            templates_dir: config_defaults::templates_dir(),
        }
    }
}

impl SiteConfig {
    /// Parse configuration from YAML string.
    ///
    /// An empty document yields the defaults, matching an absent file.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: SiteConfig = serde_yaml_ng::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Resolve directory paths relative to the project root.
    pub fn resolve_root(&mut self, root: &Path) {
        self.content_dir = root.join(&self.content_dir);
        self.output_dir = root.join(&self.output_dir);
        self.templates_dir = root.join(&self.templates_dir);
    }

    /// Validate the on-disk layout before traversal.
    pub fn validate(&self) -> Result<(), PathError> {
        if !self.content_dir.is_dir() {
            return Err(PathError::MissingContent(self.content_dir.clone()));
        }
        Ok(())
    }
}

#[test]
fn test_from_str_full() {
    let config = SiteConfig::from_str(
        r#"
title: "My Blog"
content_dir: docs
output_dir: site
"#,
    )
    .unwrap();

    assert_eq!(config.title, "My Blog");
    assert_eq!(config.content_dir, PathBuf::from("docs"));
    assert_eq!(config.output_dir, PathBuf::from("site"));
    assert_eq!(config.templates_dir, PathBuf::from("templates"));
}

#[test]
fn test_from_str_title_only() {
    let config = SiteConfig::from_str("title: Notes\n").unwrap();

    assert_eq!(config.title, "Notes");
    assert_eq!(config.content_dir, PathBuf::from("content"));
    assert_eq!(config.output_dir, PathBuf::from("output"));
}

#[test]
fn test_from_str_empty_is_default() {
    let config = SiteConfig::from_str("").unwrap();
    assert_eq!(config.title, "My Website");
}

#[test]
fn test_from_str_unknown_keys_tolerated() {
    let config = SiteConfig::from_str("title: X\nauthor: someone\n").unwrap();
    assert_eq!(config.title, "X");
}

#[test]
fn test_from_str_malformed_yaml() {
    let result = SiteConfig::from_str("title: [unclosed\n");
    assert!(matches!(result, Err(ConfigError::Yaml(_))));
}

#[test]
fn test_defaults() {
    let config = SiteConfig::default();
    assert_eq!(config.title, "My Website");
    assert_eq!(config.content_dir, PathBuf::from("content"));
    assert_eq!(config.output_dir, PathBuf::from("output"));
    assert_eq!(config.templates_dir, PathBuf::from("templates"));
}

#[test]
fn test_resolve_root() {
    let mut config = SiteConfig::default();
    config.resolve_root(Path::new("/srv/site"));

    assert_eq!(config.content_dir, PathBuf::from("/srv/site/content"));
    assert_eq!(config.output_dir, PathBuf::from("/srv/site/output"));
    assert_eq!(config.templates_dir, PathBuf::from("/srv/site/templates"));
}

#[test]
fn test_validate_missing_content_dir() {
    let mut config = SiteConfig::default();
    config.resolve_root(Path::new("/nonexistent-mdsite-project"));

    let err = config.validate().unwrap_err();
    assert!(matches!(err, PathError::MissingContent(_)));
}

#[test]
fn test_config_error_display() {
    let io_err = ConfigError::Io(
        PathBuf::from("config.yaml"),
        std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
    );
    let display = format!("{}", io_err);
    assert!(display.contains("IO error"));
    assert!(display.contains("config.yaml"));

    let template_err = ConfigError::UnknownTemplate("post".into());
    assert!(format!("{}", template_err).contains("post"));
}
