//! Output formatting for check results.

use anyhow::Result;
use jdeps_guard_core::{Action, AnalysisResult, Report, Section, Severity};
use serde::Serialize;

use crate::OutputFormat;

/// Print check results in the specified format.
pub fn print(result: &AnalysisResult, default_severity: Severity, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => print!("{}", text(result)),
        OutputFormat::Json => return print_json(result, default_severity),
        OutputFormat::Compact => print!("{}", compact(result)),
    }
    Ok(())
}

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const GREEN: &str = "\x1b[32m";

/// Report sections with colored action labels, followed by a summary line.
fn text(result: &AnalysisResult) -> String {
    let report = Report::new(result);
    if report.is_clean() {
        return format!("{GREEN}{report}{RESET}\n");
    }

    let mut out = String::new();
    for section in report.sections() {
        let (color, label) = match section.action() {
            Action::LogInfo => (BLUE, "info"),
            Action::LogWarning => (YELLOW, "warning"),
            Action::FailBuild => (RED, "error"),
        };
        out.push_str(&format!("{color}{label}{RESET}: {}\n\n", section.message()));
    }

    let summary_color = if result.has_failures() {
        RED
    } else if result.has_violations_at(Severity::Warn) {
        YELLOW
    } else {
        GREEN
    };
    out.push_str(&format!(
        "{summary_color}Found {} failing, {} warned, {} logged and {} ignored internal dependencies{RESET}\n",
        result.dependency_count(Severity::Fail),
        result.dependency_count(Severity::Warn),
        result.dependency_count(Severity::Inform),
        result.dependency_count(Severity::Ignore),
    ));
    out
}

/// JSON document printed by `--format json`.
#[derive(Serialize)]
struct JsonOutput<'a> {
    default_severity: Severity,
    result: &'a AnalysisResult,
    sections: Vec<Section>,
}

fn print_json(result: &AnalysisResult, default_severity: Severity) -> Result<()> {
    let output = JsonOutput {
        default_severity,
        result,
        sections: Report::new(result).sections().to_vec(),
    };
    let json = serde_json::to_string_pretty(&output)?;
    println!("{json}");
    Ok(())
}

/// One `SEVERITY type -> dependency` line per internal dependency.
fn compact(result: &AnalysisResult) -> String {
    let mut out = String::new();
    for severity in Severity::ALL.into_iter().rev() {
        for violation in result.violations(severity) {
            for dependency in violation.internal_dependencies() {
                out.push_str(&format!(
                    "{severity} {} -> {dependency}\n",
                    violation.type_name()
                ));
            }
        }
    }
    out
}
