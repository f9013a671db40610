//! Rule configuration driven by TOML.
//!
//! # Architecture
//!
//! ```text
//! TOML text
//!   ↓ serde (DTO layer)
//! Config
//!   ↓ validate + convert (loader)
//! RuleSet (rules, judge, default severity)
//! ```
//!
//! A configuration with contradicting rules is rejected when it is loaded,
//! so a [`RuleSet`] can always judge.

use std::path::PathBuf;

use crate::aggregator::Aggregator;
use crate::judge::HierarchyMapJudge;
use crate::rule::DependencyRule;
use crate::types::Severity;

pub mod dto;
pub mod loader;

pub use dto::{ArrowRulesDto, Config, DependencyRuleDto};
pub use loader::{load, LoadError};

/// Configuration file errors.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    #[diagnostic(code(jdeps_guard::config::io))]
    Io {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// Failed to parse configuration.
    #[error("Failed to parse config: {message}")]
    #[diagnostic(code(jdeps_guard::config::parse))]
    Parse {
        /// Error message.
        message: String,
    },
}

/// Errors from parsing TOML and loading rules.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum LoadRulesError {
    /// TOML deserialization failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    /// Rule validation failed.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LoadError),
}

/// Validated rules together with the judge built from them.
#[derive(Debug)]
pub struct RuleSet {
    pub(crate) rules: Vec<DependencyRule>,
    pub(crate) judge: HierarchyMapJudge,
    pub(crate) default_severity: Severity,
}

impl RuleSet {
    /// Returns the rules in configuration order.
    #[must_use]
    pub fn rules(&self) -> &[DependencyRule] {
        &self.rules
    }

    /// Returns the judge over all rules.
    #[must_use]
    pub fn judge(&self) -> &HierarchyMapJudge {
        &self.judge
    }

    /// Returns the severity for internal dependencies no rule covers.
    #[must_use]
    pub fn default_severity(&self) -> Severity {
        self.default_severity
    }

    /// Creates an aggregator using this rule set's judge and default severity.
    #[must_use]
    pub fn aggregator(&self) -> Aggregator<'_, HierarchyMapJudge> {
        Aggregator::new(&self.judge).with_default_severity(self.default_severity)
    }
}

/// Parses TOML content and validates all rules in it.
///
/// An empty document yields an empty rule set.
///
/// # Errors
///
/// Returns an error if TOML parsing or rule validation fails.
pub fn load_rule_set_from_toml(content: &str) -> Result<RuleSet, LoadRulesError> {
    let config = Config::parse(content)?;
    Ok(load(config)?)
}
