//! Judges decide which severity applies to a dependency on an internal API.
//!
//! # Architecture
//!
//! ```text
//! DependencyRule*
//!   ↓ DependencyJudgeBuilder::with_rule / with_rules
//! builder (mutable, collects rules)
//!   ↓ build() (rejects conflicting rules)
//! DependencyJudge (immutable, shared by reference)
//!   ↓ judge(dependent, dependency)
//! Option<Severity>
//! ```
//!
//! Two strategies share one contract: [`HierarchyMapJudge`] indexes rules by
//! the parts of their dependent names, [`SimpleJudge`] scans the rule list.

mod hierarchy;
mod simple;

pub use hierarchy::{HierarchyMapJudge, HierarchyMapJudgeBuilder};
pub use simple::{SimpleJudge, SimpleJudgeBuilder};

use miette::Diagnostic;

use crate::rule::DependencyRule;
use crate::types::Severity;

/// Answers "what severity applies when `dependent` uses `dependency`?".
///
/// The most specific rule wins: among the rules for the exact dependency,
/// the one whose dependent shares the longest package/type prefix with the
/// queried dependent. A wildcard dependent only applies if no prefix matches.
pub trait DependencyJudge: Send + Sync {
    /// Returns the severity of the most specific matching rule, or `None`
    /// if no rule applies.
    fn judge(&self, dependent: &str, dependency: &str) -> Option<Severity>;

    /// Like [`judge`](Self::judge) but falls back to `default` if no rule applies.
    fn judge_or(&self, dependent: &str, dependency: &str, default: Severity) -> Severity {
        self.judge(dependent, dependency).unwrap_or(default)
    }
}

/// Type alias for boxed judges.
pub type JudgeBox = Box<dyn DependencyJudge>;

/// Collects rules and turns them into an immutable judge.
pub trait DependencyJudgeBuilder: Sized {
    /// The judge this builder produces.
    type Judge: DependencyJudge;

    /// Registers a rule.
    fn add_rule(&mut self, rule: DependencyRule);

    /// Consumes the builder and creates the judge.
    ///
    /// # Errors
    ///
    /// Returns [`JudgeError::ConflictingRules`] if two rules constrain the
    /// same dependent/dependency pair.
    fn build(self) -> Result<Self::Judge, JudgeError>;

    /// Registers a rule, builder style.
    #[must_use]
    fn with_rule(mut self, rule: DependencyRule) -> Self {
        self.add_rule(rule);
        self
    }

    /// Registers several rules, builder style.
    #[must_use]
    fn with_rules<I>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = DependencyRule>,
    {
        for rule in rules {
            self.add_rule(rule);
        }
        self
    }
}

/// Errors while building a judge.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Diagnostic)]
pub enum JudgeError {
    /// Two rules name the same dependent and dependency.
    #[error(
        "The rules {existing} and {conflicting} both define how '{}' may depend on '{}'.",
        .existing.dependent(),
        .existing.dependency()
    )]
    #[diagnostic(
        code(jdeps_guard::judge::conflicting_rules),
        help("remove one of the two rules")
    )]
    ConflictingRules {
        /// The rule registered first.
        existing: DependencyRule,
        /// The rule that clashes with it.
        conflicting: DependencyRule,
    },
}

/// Specificity of a rule's dependent for a queried dependent.
///
/// `Some(0)` for the wildcard, `Some(n)` if the rule's dependent is a prefix
/// of `n` parts, `None` if it does not apply.
pub(crate) fn specificity(rule_dependent: &str, dependent: &str) -> Option<usize> {
    if crate::identifier::is_wildcard(rule_dependent) {
        return Some(0);
    }
    let mut queried = crate::identifier::parts(dependent);
    let mut depth = 0;
    for part in crate::identifier::parts(rule_dependent) {
        if queried.next() != Some(part) {
            return None;
        }
        depth += 1;
    }
    Some(depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specificity_of_wildcard_is_lowest() {
        assert_eq!(specificity("*", "com.foo.Bar"), Some(0));
    }

    #[test]
    fn specificity_counts_matching_parts() {
        assert_eq!(specificity("com", "com.foo.Bar"), Some(1));
        assert_eq!(specificity("com.foo", "com.foo.Bar"), Some(2));
        assert_eq!(specificity("com.foo.Bar", "com.foo.Bar"), Some(3));
    }

    #[test]
    fn specificity_requires_whole_parts() {
        assert_eq!(specificity("com.fo", "com.foo.Bar"), None);
        assert_eq!(specificity("com.foo.Bar.Inner", "com.foo.Bar"), None);
        assert_eq!(specificity("org", "com.foo.Bar"), None);
    }

    #[test]
    fn conflict_message_names_both_rules() {
        let err = JudgeError::ConflictingRules {
            existing: DependencyRule::new("com.foo", "sun.misc.Unsafe", Severity::Warn).unwrap(),
            conflicting: DependencyRule::new("com.foo", "sun.misc.Unsafe", Severity::Fail)
                .unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "The rules (com.foo -> sun.misc.Unsafe: WARN) and (com.foo -> sun.misc.Unsafe: FAIL) \
             both define how 'com.foo' may depend on 'sun.misc.Unsafe'."
        );
    }
}
