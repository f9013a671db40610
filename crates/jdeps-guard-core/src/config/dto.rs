//! TOML deserialization types (DTO layer).
//!
//! These types exist solely for serde deserialization.
//! They are converted to validated rules via the loader.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::ConfigError;

/// Raw TOML representation of a `jdeps-guard.toml` file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    /// Severity for internal dependencies no rule covers (default: "FAIL").
    #[serde(default)]
    pub default_severity: Option<String>,

    /// Rules with one field per part.
    #[serde(default)]
    pub dependency_rules: Vec<DependencyRuleDto>,

    /// Rules in the compact `dependent -> dependency: SEVERITY` form.
    #[serde(default)]
    pub arrow_rules: ArrowRulesDto,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

/// TOML representation of a `[[dependency-rules]]` entry.
///
/// Names are optional here so that a missing name is reported by rule
/// validation, together with the rule it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyRuleDto {
    /// Package, type or `*`.
    #[serde(default)]
    pub dependent: Option<String>,
    /// Internal API.
    #[serde(default)]
    pub dependency: Option<String>,
    /// Severity name.
    pub severity: String,
}

/// Arrow rules, either as a list or as one multi-line string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArrowRulesDto {
    /// One rule per entry.
    List(Vec<String>),
    /// One rule per non-blank line.
    Block(String),
}

impl Default for ArrowRulesDto {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl ArrowRulesDto {
    /// Returns the non-blank rule lines.
    #[must_use]
    pub fn lines(&self) -> Vec<&str> {
        match self {
            Self::List(rules) => rules.iter().map(String::as_str).collect(),
            Self::Block(block) => block.lines().filter(|l| !l.trim().is_empty()).collect(),
        }
    }
}
