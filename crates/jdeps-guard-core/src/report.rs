//! Rendering of an [`AnalysisResult`] for the build output.
//!
//! The report only produces text and tags each section with the [`Action`]
//! the host should take. Logging and failing the build are up to the host.

use serde::Serialize;

use crate::types::{AnalysisResult, Severity, Violation};

const NO_DEPENDENCIES: &str = "JDeps reported no dependencies on JDK-internal APIs.";

/// What the host does with a report section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Action {
    /// Log the section at info level.
    LogInfo,
    /// Log the section at warning level.
    LogWarning,
    /// Fail the build with the section as message.
    FailBuild,
}

impl From<Severity> for Action {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Ignore | Severity::Inform => Self::LogInfo,
            Severity::Warn => Self::LogWarning,
            Severity::Fail => Self::FailBuild,
        }
    }
}

/// The rendered violations of one severity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Section {
    severity: Severity,
    action: Action,
    dependency_count: usize,
    message: String,
}

impl Section {
    fn new(severity: Severity, violations: &[Violation]) -> Option<Self> {
        let dependency_count: usize = violations
            .iter()
            .map(|v| v.internal_dependencies().len())
            .sum();
        if dependency_count == 0 {
            return None;
        }

        let listing = violations
            .iter()
            .map(Violation::to_multi_line_string)
            .collect::<Vec<_>>()
            .join("\n");
        let message = match severity {
            Severity::Ignore => format!(
                "JDeps reported {dependency_count} dependencies on JDK-internal APIs that are configured to be ignored."
            ),
            Severity::Inform => format!(
                "JDeps reported {dependency_count} dependencies on JDK-internal APIs that are configured to be logged:\n{listing}"
            ),
            Severity::Warn => format!(
                "JDeps reported {dependency_count} dependencies on JDK-internal APIs that are configured to be warned about:\n{listing}"
            ),
            Severity::Fail => format!(
                "JDeps reported {dependency_count} dependencies on JDK-internal APIs that are configured to fail the build:\n{listing}"
            ),
        };

        Some(Self {
            severity,
            action: severity.into(),
            dependency_count,
            message,
        })
    }

    /// Returns the severity of the reported violations.
    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Returns what the host should do with this section.
    #[must_use]
    pub fn action(&self) -> Action {
        self.action
    }

    /// Returns the number of internal dependencies in this section.
    #[must_use]
    pub fn dependency_count(&self) -> usize {
        self.dependency_count
    }

    /// Returns the rendered message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Report over all severities of one analysis run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    sections: Vec<Section>,
}

impl Report {
    /// Renders the result. Severities without violations get no section.
    #[must_use]
    pub fn new(result: &AnalysisResult) -> Self {
        let sections = Severity::ALL
            .into_iter()
            .filter_map(|severity| Section::new(severity, result.violations(severity)))
            .collect();
        Self { sections }
    }

    /// Returns the sections from least to most severe.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Returns true if no internal dependency was reported.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.sections.is_empty()
    }

    /// Returns the message the build should fail with, if any.
    #[must_use]
    pub fn failure(&self) -> Option<&str> {
        self.sections
            .iter()
            .find(|s| s.action == Action::FailBuild)
            .map(Section::message)
    }

    /// Renders all sections, separated by blank lines.
    #[must_use]
    pub fn render(&self) -> String {
        if self.is_clean() {
            return NO_DEPENDENCIES.to_string();
        }
        self.sections
            .iter()
            .map(Section::message)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl std::fmt::Display for Report {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn violation(type_name: &str, deps: &[&str], severity: Severity) -> Violation {
        let deps: BTreeSet<String> = deps.iter().map(ToString::to_string).collect();
        Violation::new(type_name, deps, severity)
    }

    fn sample_result() -> AnalysisResult {
        AnalysisResult::from_violations([
            violation("com.foo.Ignored", &["sun.misc.Cleaner"], Severity::Ignore),
            violation("com.foo.Logged", &["sun.misc.Signal"], Severity::Inform),
            violation("com.foo.Warned", &["sun.misc.Unsafe"], Severity::Warn),
            violation("com.foo.bar.Warned", &["sun.misc.BASE64Encoder"], Severity::Warn),
            violation("com.foo.Failed", &["sun.reflect.Reflection"], Severity::Fail),
        ])
    }

    #[test]
    fn severity_maps_to_action() {
        assert_eq!(Action::from(Severity::Ignore), Action::LogInfo);
        assert_eq!(Action::from(Severity::Inform), Action::LogInfo);
        assert_eq!(Action::from(Severity::Warn), Action::LogWarning);
        assert_eq!(Action::from(Severity::Fail), Action::FailBuild);
    }

    #[test]
    fn empty_result_is_clean() {
        let report = Report::new(&AnalysisResult::new());
        assert!(report.is_clean());
        assert!(report.failure().is_none());
        assert_eq!(report.render(), NO_DEPENDENCIES);
    }

    #[test]
    fn sections_skip_empty_severities() {
        let result = AnalysisResult::from_violations([violation(
            "com.foo.Warned",
            &["sun.misc.Unsafe"],
            Severity::Warn,
        )]);
        let report = Report::new(&result);

        assert_eq!(report.sections().len(), 1);
        assert_eq!(report.sections()[0].action(), Action::LogWarning);
        assert_eq!(report.sections()[0].dependency_count(), 1);
        assert!(report.failure().is_none());
    }

    #[test]
    fn failure_carries_fail_section() {
        let report = Report::new(&sample_result());
        let failure = report.failure().unwrap();
        assert!(failure.starts_with("JDeps reported 1 dependencies"));
        assert!(failure.ends_with("com.foo.Failed -> sun.reflect.Reflection"));
    }

    #[test]
    fn render_full_report() {
        let report = Report::new(&sample_result());
        insta::assert_snapshot!(report.render(), @r"
        JDeps reported 1 dependencies on JDK-internal APIs that are configured to be ignored.

        JDeps reported 1 dependencies on JDK-internal APIs that are configured to be logged:
        com.foo.Logged -> sun.misc.Signal

        JDeps reported 2 dependencies on JDK-internal APIs that are configured to be warned about:
        com.foo.Warned -> sun.misc.Unsafe
        com.foo.bar.Warned -> sun.misc.BASE64Encoder

        JDeps reported 1 dependencies on JDK-internal APIs that are configured to fail the build:
        com.foo.Failed -> sun.reflect.Reflection
        ");
    }
}
