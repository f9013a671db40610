//! Dependency rules: which dependent may use which internal API, at what severity.

use miette::Diagnostic;
use std::fmt;
use std::str::FromStr;

use crate::identifier::{self, check_name, IdentifierError, Role};
use crate::types::{ParseSeverityError, Severity};

/// Separates dependent and dependency in the arrow form.
const ARROW: &str = "->";

/// An immutable, validated rule `(dependent -> dependency: SEVERITY)`.
///
/// The dependent is a package, a type or the wildcard `*`. The dependency is
/// the internal API the rule is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DependencyRule {
    dependent: String,
    dependency: String,
    severity: Severity,
}

impl DependencyRule {
    /// Creates a new rule after validating both names.
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::Identifier`] if either name is empty or not a
    /// valid qualified name.
    pub fn new(
        dependent: impl Into<String>,
        dependency: impl Into<String>,
        severity: Severity,
    ) -> Result<Self, RuleError> {
        let dependent = dependent.into();
        let dependency = dependency.into();
        Self::check(Some(&dependent), Some(&dependency), severity)?;
        Ok(Self {
            dependent,
            dependency,
            severity,
        })
    }

    /// Creates a rule from names that may be missing, as found in configuration.
    ///
    /// # Errors
    ///
    /// Returns [`IdentifierError::Undefined`] for a missing name and the
    /// same errors as [`DependencyRule::new`] otherwise.
    pub fn from_optional(
        dependent: Option<&str>,
        dependency: Option<&str>,
        severity: Severity,
    ) -> Result<Self, RuleError> {
        Self::check(dependent, dependency, severity)?;
        Ok(Self {
            dependent: dependent.unwrap_or_default().to_string(),
            dependency: dependency.unwrap_or_default().to_string(),
            severity,
        })
    }

    fn check(
        dependent: Option<&str>,
        dependency: Option<&str>,
        severity: Severity,
    ) -> Result<(), IdentifierError> {
        let description = describe(
            dependent.unwrap_or_default(),
            dependency.unwrap_or_default(),
            severity,
        );
        check_name(dependent, &description, Role::Dependent)?;
        check_name(dependency, &description, Role::Dependency)
    }

    /// Returns the dependent name (package, type or `*`).
    #[must_use]
    pub fn dependent(&self) -> &str {
        &self.dependent
    }

    /// Returns the internal API this rule is about.
    #[must_use]
    pub fn dependency(&self) -> &str {
        &self.dependency
    }

    /// Returns the severity.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns true if the rule applies to every dependent.
    #[must_use]
    pub fn has_wildcard_dependent(&self) -> bool {
        identifier::is_wildcard(&self.dependent)
    }

    /// Returns a copy of this rule with another severity.
    pub(crate) fn with_severity(&self, severity: Severity) -> Self {
        Self {
            severity,
            ..self.clone()
        }
    }

    /// Returns true if both rules constrain the same dependent/dependency pair.
    #[must_use]
    pub fn same_pair(&self, other: &Self) -> bool {
        self.dependent == other.dependent && self.dependency == other.dependency
    }
}

/// Canonical form: `(dependent -> dependency: SEVERITY)`.
impl fmt::Display for DependencyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&describe(&self.dependent, &self.dependency, self.severity))
    }
}

fn describe(dependent: &str, dependency: &str, severity: Severity) -> String {
    format!("({dependent} {ARROW} {dependency}: {severity})")
}

/// Parses a single arrow rule, e.g. `com.foo -> sun.misc.Unsafe: WARN`.
///
/// The canonical form with surrounding parentheses is accepted as well.
impl FromStr for DependencyRule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rules = parse_arrow_rule(s)?;
        match (rules.pop(), rules.is_empty()) {
            (Some(rule), true) => Ok(rule),
            _ => Err(RuleError::MalformedArrowRule {
                rule: s.trim().to_string(),
                reason: "expected exactly one dependency",
            }),
        }
    }
}

/// Parses an arrow rule that may name several comma-separated dependencies.
///
/// `com.foo -> sun.misc.Unsafe, sun.misc.Signal: WARN` yields two rules
/// with the same dependent and severity.
///
/// # Errors
///
/// Returns [`RuleError::MalformedArrowRule`] if the arrow or severity is
/// missing, [`RuleError::UnknownSeverity`] for an unknown severity, and
/// [`RuleError::Identifier`] for invalid names.
pub fn parse_arrow_rule(line: &str) -> Result<Vec<DependencyRule>, RuleError> {
    let trimmed = line.trim();
    let malformed = |reason| RuleError::MalformedArrowRule {
        rule: trimmed.to_string(),
        reason,
    };

    let body = match trimmed.strip_prefix('(') {
        Some(inner) => inner
            .strip_suffix(')')
            .ok_or_else(|| malformed("unbalanced parentheses"))?,
        None => trimmed,
    };
    let (dependent, rest) = body
        .split_once(ARROW)
        .ok_or_else(|| malformed("missing '->'"))?;
    let (dependencies, severity) = rest
        .rsplit_once(':')
        .ok_or_else(|| malformed("missing ': SEVERITY'"))?;
    let severity: Severity = severity.parse()?;

    dependencies
        .split(',')
        .map(|dependency| DependencyRule::new(dependent.trim(), dependency.trim(), severity))
        .collect()
}

/// Errors from constructing or parsing a rule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum RuleError {
    /// A name in the rule is invalid.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Identifier(#[from] IdentifierError),

    /// An arrow rule does not have the form `dependent -> dependency: SEVERITY`.
    #[error("the arrow rule '{rule}' is malformed: {reason}")]
    #[diagnostic(
        code(jdeps_guard::rule::malformed),
        help("write rules as `com.foo.Bar -> sun.misc.Unsafe: WARN`")
    )]
    MalformedArrowRule {
        /// The offending text.
        rule: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// The severity is not one of IGNORE, INFORM, WARN, FAIL.
    #[error(transparent)]
    #[diagnostic(code(jdeps_guard::rule::unknown_severity))]
    UnknownSeverity(#[from] ParseSeverityError),
}
