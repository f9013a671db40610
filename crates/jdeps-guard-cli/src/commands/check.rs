//! Check command implementation.

use anyhow::Result;
use std::path::Path;

use crate::config_resolver::ConfigSource;
use crate::OutputFormat;

/// Whether the build may continue after a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// No internal dependency is configured to fail the build.
    Passed,
    /// At least one internal dependency is configured to fail the build.
    Failed,
}

/// Runs the check command and reports whether the build should fail.
pub fn run(facts_path: &Path, format: OutputFormat, source: &ConfigSource) -> Result<Outcome> {
    let rules = source.load_rules()?;
    let facts = crate::facts::load(facts_path)?;

    tracing::info!(
        "Judging {} types with {} rules (default severity {})",
        facts.len(),
        rules.rules().len(),
        rules.default_severity()
    );

    let result = rules.aggregator().aggregate(facts);

    super::output::print(&result, rules.default_severity(), format)?;

    Ok(if result.has_failures() {
        Outcome::Failed
    } else {
        Outcome::Passed
    })
}
