//! Core types for severities, violations and analysis results.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

/// Severity assigned to a dependency on an internal API.
///
/// Variants are declared from least to most severe, so the derived `Ord`
/// gives `Ignore < Inform < Warn < Fail`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    /// The dependency is accepted silently (only counted).
    Ignore,
    /// The dependency is listed in the build output.
    Inform,
    /// The dependency is reported as a warning.
    Warn,
    /// The dependency fails the build.
    Fail,
}

impl Severity {
    /// All severities, from least to most severe.
    pub const ALL: [Self; 4] = [Self::Ignore, Self::Inform, Self::Warn, Self::Fail];

    /// Returns the upper-case name used in rules and configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ignore => "IGNORE",
            Self::Inform => "INFORM",
            Self::Warn => "WARN",
            Self::Fail => "FAIL",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no [`Severity`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown severity `{value}`, expected one of: IGNORE, INFORM, WARN, FAIL")]
pub struct ParseSeverityError {
    value: String,
}

impl ParseSeverityError {
    /// Returns the string that failed to parse.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    /// Parses a severity name, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|severity| severity.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseSeverityError {
                value: s.to_string(),
            })
    }
}

/// One analyzed type and the internal APIs it depends on, all judged at
/// the same severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    #[serde(rename = "type")]
    type_name: String,
    internal_dependencies: BTreeSet<String>,
    severity: Severity,
}

impl Violation {
    /// Creates a new violation.
    #[must_use]
    pub fn new(
        type_name: impl Into<String>,
        internal_dependencies: BTreeSet<String>,
        severity: Severity,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            internal_dependencies,
            severity,
        }
    }

    /// Returns the fully qualified name of the analyzed type.
    #[must_use]
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Returns the internal APIs the type depends on, in sorted order.
    #[must_use]
    pub fn internal_dependencies(&self) -> &BTreeSet<String> {
        &self.internal_dependencies
    }

    /// Returns the severity shared by all dependencies of this violation.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Formats the violation for a multi-line report.
    ///
    /// A single dependency stays on the type's line; several dependencies
    /// are listed below it, one per line.
    #[must_use]
    pub fn to_multi_line_string(&self) -> String {
        let mut dependencies = self.internal_dependencies.iter();
        match (dependencies.next(), dependencies.next()) {
            (Some(only), None) => format!("{} -> {only}", self.type_name),
            _ => self
                .internal_dependencies
                .iter()
                .fold(self.type_name.clone(), |mut output, dependency| {
                    output.push_str("\n\t-> ");
                    output.push_str(dependency);
                    output
                }),
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let dependencies = self
            .internal_dependencies
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{} {} -> {}", self.severity, self.type_name, dependencies)
    }
}

/// Violations of one analysis run, partitioned by severity.
///
/// Built by the [`Aggregator`](crate::Aggregator); read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    violations_to_ignore: Vec<Violation>,
    violations_to_inform: Vec<Violation>,
    violations_to_warn: Vec<Violation>,
    violations_to_fail: Vec<Violation>,
}

impl AnalysisResult {
    /// Creates an empty result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts each violation into the bucket of its severity.
    pub(crate) fn from_violations(violations: impl IntoIterator<Item = Violation>) -> Self {
        let mut result = Self::new();
        for violation in violations {
            result.bucket_mut(violation.severity).push(violation);
        }
        result
    }

    fn bucket_mut(&mut self, severity: Severity) -> &mut Vec<Violation> {
        match severity {
            Severity::Ignore => &mut self.violations_to_ignore,
            Severity::Inform => &mut self.violations_to_inform,
            Severity::Warn => &mut self.violations_to_warn,
            Severity::Fail => &mut self.violations_to_fail,
        }
    }

    /// Returns the violations judged at exactly `severity`.
    #[must_use]
    pub fn violations(&self, severity: Severity) -> &[Violation] {
        match severity {
            Severity::Ignore => &self.violations_to_ignore,
            Severity::Inform => &self.violations_to_inform,
            Severity::Warn => &self.violations_to_warn,
            Severity::Fail => &self.violations_to_fail,
        }
    }

    /// Violations that are configured to be ignored.
    pub fn violations_to_ignore(&self) -> impl Iterator<Item = &Violation> {
        self.violations_to_ignore.iter()
    }

    /// Violations that are configured to be logged.
    pub fn violations_to_inform(&self) -> impl Iterator<Item = &Violation> {
        self.violations_to_inform.iter()
    }

    /// Violations that are configured to be warned about.
    pub fn violations_to_warn(&self) -> impl Iterator<Item = &Violation> {
        self.violations_to_warn.iter()
    }

    /// Violations that are configured to fail the build.
    pub fn violations_to_fail(&self) -> impl Iterator<Item = &Violation> {
        self.violations_to_fail.iter()
    }

    /// Counts the internal dependencies judged at exactly `severity`.
    #[must_use]
    pub fn dependency_count(&self, severity: Severity) -> usize {
        self.violations(severity)
            .iter()
            .map(|v| v.internal_dependencies.len())
            .sum()
    }

    /// Counts the internal dependencies across all severities.
    #[must_use]
    pub fn total_dependency_count(&self) -> usize {
        Severity::ALL
            .into_iter()
            .map(|severity| self.dependency_count(severity))
            .sum()
    }

    /// Returns true if no internal dependency was reported at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        Severity::ALL
            .into_iter()
            .all(|severity| self.violations(severity).is_empty())
    }

    /// Checks if any violations meet or exceed the given severity threshold.
    #[must_use]
    pub fn has_violations_at(&self, severity: Severity) -> bool {
        Severity::ALL
            .into_iter()
            .filter(|s| *s >= severity)
            .any(|s| !self.violations(s).is_empty())
    }

    /// Returns true if the build should fail.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        !self.violations_to_fail.is_empty()
    }
}
