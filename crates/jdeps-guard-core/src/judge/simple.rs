//! Judge that scans the full rule list for every query.

use super::{specificity, DependencyJudge, DependencyJudgeBuilder, JudgeError};
use crate::rule::DependencyRule;
use crate::types::Severity;

/// Builder for a [`SimpleJudge`].
#[derive(Debug, Default)]
pub struct SimpleJudgeBuilder {
    rules: Vec<DependencyRule>,
}

impl SimpleJudgeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DependencyJudgeBuilder for SimpleJudgeBuilder {
    type Judge = SimpleJudge;

    fn add_rule(&mut self, rule: DependencyRule) {
        self.rules.push(rule);
    }

    fn build(self) -> Result<SimpleJudge, JudgeError> {
        for (index, rule) in self.rules.iter().enumerate() {
            if let Some(existing) = self.rules[..index].iter().find(|r| r.same_pair(rule)) {
                return Err(JudgeError::ConflictingRules {
                    existing: existing.clone(),
                    conflicting: rule.clone(),
                });
            }
        }
        Ok(SimpleJudge { rules: self.rules })
    }
}

/// Judge with linear lookup; the rule count is expected to be small.
#[derive(Debug)]
pub struct SimpleJudge {
    rules: Vec<DependencyRule>,
}

impl SimpleJudge {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> SimpleJudgeBuilder {
        SimpleJudgeBuilder::new()
    }

    /// Returns the rules in registration order.
    #[must_use]
    pub fn rules(&self) -> &[DependencyRule] {
        &self.rules
    }
}

impl DependencyJudge for SimpleJudge {
    fn judge(&self, dependent: &str, dependency: &str) -> Option<Severity> {
        self.rules
            .iter()
            .filter(|rule| rule.dependency() == dependency)
            .filter_map(|rule| Some((specificity(rule.dependent(), dependent)?, rule.severity())))
            .max_by_key(|(depth, _)| *depth)
            .map(|(_, severity)| severity)
    }
}
