//! DTO → rule set conversion with validation.

use tracing::debug;

use crate::aggregator::DEFAULT_SEVERITY;
use crate::judge::{DependencyJudgeBuilder, HierarchyMapJudge, JudgeError};
use crate::rule::{parse_arrow_rule, DependencyRule, RuleError};
use crate::types::Severity;

use super::dto::{Config, DependencyRuleDto};
use super::RuleSet;

/// Errors during DTO → rule set conversion.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum LoadError {
    /// A rule or severity entry is invalid.
    #[error("{context}: {source}")]
    #[diagnostic(code(jdeps_guard::config::invalid_rule))]
    Rule {
        /// Where the error occurred (e.g., "dependency-rules[0]").
        context: String,
        /// The underlying rule error.
        #[diagnostic_source]
        source: RuleError,
    },

    /// Two rules contradict each other.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Judge(#[from] JudgeError),
}

/// Converts a parsed [`Config`] to a validated [`RuleSet`].
///
/// Rules from `dependency-rules` come first, followed by the arrow rules
/// in the order they are written.
///
/// # Errors
///
/// Returns the first error encountered during conversion.
pub fn load(config: Config) -> Result<RuleSet, LoadError> {
    let default_severity = match config.default_severity.as_deref() {
        Some(value) => parse_severity(value, "default-severity")?,
        None => DEFAULT_SEVERITY,
    };

    let mut rules = config
        .dependency_rules
        .iter()
        .enumerate()
        .map(|(i, dto)| convert_dependency_rule(dto, i))
        .collect::<Result<Vec<_>, _>>()?;

    for (i, line) in config.arrow_rules.lines().into_iter().enumerate() {
        let parsed = parse_arrow_rule(line).map_err(|source| LoadError::Rule {
            context: format!("arrow-rules[{i}]"),
            source,
        })?;
        rules.extend(parsed);
    }

    let judge = HierarchyMapJudge::builder()
        .with_rules(rules.iter().cloned())
        .build()?;
    debug!(
        "Loaded {} rules, default severity {}",
        rules.len(),
        default_severity
    );

    Ok(RuleSet {
        rules,
        judge,
        default_severity,
    })
}

fn convert_dependency_rule(dto: &DependencyRuleDto, index: usize) -> Result<DependencyRule, LoadError> {
    let context = format!("dependency-rules[{index}]");
    let severity = parse_severity(&dto.severity, &context)?;
    DependencyRule::from_optional(dto.dependent.as_deref(), dto.dependency.as_deref(), severity)
        .map_err(|source| LoadError::Rule { context, source })
}

fn parse_severity(value: &str, context: &str) -> Result<Severity, LoadError> {
    value.parse().map_err(|e| LoadError::Rule {
        context: context.to_string(),
        source: RuleError::UnknownSeverity(e),
    })
}
