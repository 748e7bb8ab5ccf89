//! Declarative convention configuration, read from YAML.
//!
//! ```yaml
//! name: integration
//! lifecycle: per_fixture
//! assertion_library:
//!   namespaces: [Should, pretty_assertions]
//!   types: [Acme.Testing.Verify]
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Which type behavior a convention uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    #[default]
    PerCase,
    PerFixture,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AssertionLibraryConfig {
    #[serde(default)]
    pub namespaces: Vec<String>,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConventionConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub lifecycle: Lifecycle,
    #[serde(default)]
    pub assertion_library: AssertionLibraryConfig,
}

fn default_name() -> String {
    "default".to_string()
}

impl Default for ConventionConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            lifecycle: Lifecycle::default(),
            assertion_library: AssertionLibraryConfig::default(),
        }
    }
}

impl ConventionConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, ConfigError> {
        Self::parse_named("<inline>", source)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded convention configuration from {}", path.display());
        Self::parse_named(&path.display().to_string(), &content)
    }

    fn parse_named(name: &str, content: &str) -> Result<Self, ConfigError> {
        // An empty document means "all defaults".
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).map_err(|e| ConfigError::parse(name, content, e))
    }
}
