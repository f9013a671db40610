//! Turns dependency facts into a severity-partitioned [`AnalysisResult`].

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use crate::judge::DependencyJudge;
use crate::types::{AnalysisResult, Severity, Violation};

/// Severity for internal dependencies no rule applies to.
///
/// An internal dependency nobody has configured fails the build.
pub const DEFAULT_SEVERITY: Severity = Severity::Fail;

/// The internal APIs one analyzed type depends on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalDependencies {
    dependent: String,
    dependencies: BTreeSet<String>,
}

impl InternalDependencies {
    /// Creates the facts for one type. Duplicate dependencies collapse.
    #[must_use]
    pub fn new<I, S>(dependent: impl Into<String>, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            dependent: dependent.into(),
            dependencies: dependencies.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the fully qualified name of the analyzed type.
    #[must_use]
    pub fn dependent(&self) -> &str {
        &self.dependent
    }

    /// Returns the internal APIs the type depends on.
    #[must_use]
    pub fn dependencies(&self) -> &BTreeSet<String> {
        &self.dependencies
    }
}

/// Judges every fact and groups the outcome into violations.
///
/// The aggregator holds no state besides its configuration, so the same
/// facts always produce the same result.
#[derive(Debug)]
pub struct Aggregator<'a, J: DependencyJudge + ?Sized> {
    judge: &'a J,
    default_severity: Severity,
}

impl<'a, J: DependencyJudge + ?Sized> Aggregator<'a, J> {
    /// Creates an aggregator using [`DEFAULT_SEVERITY`] for unmatched facts.
    #[must_use]
    pub fn new(judge: &'a J) -> Self {
        Self {
            judge,
            default_severity: DEFAULT_SEVERITY,
        }
    }

    /// Sets the severity for facts no rule applies to.
    #[must_use]
    pub fn with_default_severity(mut self, severity: Severity) -> Self {
        self.default_severity = severity;
        self
    }

    /// Returns the severity used for facts no rule applies to.
    #[must_use]
    pub fn default_severity(&self) -> Severity {
        self.default_severity
    }

    /// Judges each `(type, dependency)` pair and buckets the results.
    ///
    /// All dependencies of a type that resolve to the same severity end up
    /// in one [`Violation`]. Facts for the same type given more than once
    /// are merged. Violations within a bucket are ordered by type name.
    pub fn aggregate<I>(&self, facts: I) -> AnalysisResult
    where
        I: IntoIterator<Item = InternalDependencies>,
    {
        let mut grouped: BTreeMap<String, BTreeMap<Severity, BTreeSet<String>>> = BTreeMap::new();
        let mut fact_count = 0_usize;

        for fact in facts {
            let by_severity = grouped.entry(fact.dependent.clone()).or_default();
            for dependency in fact.dependencies {
                let severity = self.severity_of(&fact.dependent, &dependency);
                if by_severity.entry(severity).or_default().insert(dependency) {
                    fact_count += 1;
                }
            }
        }

        let violations = grouped.into_iter().flat_map(|(dependent, by_severity)| {
            by_severity.into_iter().map(move |(severity, dependencies)| {
                Violation::new(dependent.clone(), dependencies, severity)
            })
        });
        let result = AnalysisResult::from_violations(violations);

        info!(
            "Judged {} internal dependencies: {} fail, {} warn, {} inform, {} ignore",
            fact_count,
            result.dependency_count(Severity::Fail),
            result.dependency_count(Severity::Warn),
            result.dependency_count(Severity::Inform),
            result.dependency_count(Severity::Ignore),
        );
        result
    }

    fn severity_of(&self, dependent: &str, dependency: &str) -> Severity {
        self.judge.judge(dependent, dependency).unwrap_or_else(|| {
            debug!(
                "No rule for {dependent} -> {dependency}, using default severity {}",
                self.default_severity
            );
            self.default_severity
        })
    }
}
