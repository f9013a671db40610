//! Judge that indexes rules by the parts of their dependent names.

use std::collections::HashMap;

use tracing::debug;

use super::{DependencyJudge, DependencyJudgeBuilder, JudgeError};
use crate::identifier;
use crate::rule::DependencyRule;
use crate::types::Severity;

/// One package or type level of the dependent hierarchy.
#[derive(Debug, Default)]
struct Node {
    /// Severity of the rule registered exactly at this path.
    severity: Option<Severity>,
    children: HashMap<String, Node>,
}

/// All rules for one dependency, keyed by dependent.
#[derive(Debug, Default)]
struct DependentTree {
    root: Node,
    wildcard: Option<Severity>,
}

impl DependentTree {
    fn insert(&mut self, rule: &DependencyRule) -> Result<(), JudgeError> {
        let slot = if rule.has_wildcard_dependent() {
            &mut self.wildcard
        } else {
            let node = identifier::parts(rule.dependent()).fold(&mut self.root, |node, part| {
                node.children.entry(part.to_string()).or_default()
            });
            &mut node.severity
        };

        if let Some(existing) = *slot {
            return Err(JudgeError::ConflictingRules {
                existing: rule.with_severity(existing),
                conflicting: rule.clone(),
            });
        }
        *slot = Some(rule.severity());
        Ok(())
    }

    /// Walks down the dependent's parts and keeps the deepest severity seen.
    fn judge(&self, dependent: &str) -> Option<Severity> {
        let mut node = &self.root;
        let mut most_specific = None;
        for part in identifier::parts(dependent) {
            let Some(child) = node.children.get(part) else {
                break;
            };
            node = child;
            most_specific = child.severity.or(most_specific);
        }
        most_specific.or(self.wildcard)
    }
}

/// Builder for a [`HierarchyMapJudge`].
#[derive(Debug, Default)]
pub struct HierarchyMapJudgeBuilder {
    rules: Vec<DependencyRule>,
}

impl HierarchyMapJudgeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl DependencyJudgeBuilder for HierarchyMapJudgeBuilder {
    type Judge = HierarchyMapJudge;

    fn add_rule(&mut self, rule: DependencyRule) {
        self.rules.push(rule);
    }

    fn build(self) -> Result<HierarchyMapJudge, JudgeError> {
        let mut trees: HashMap<String, DependentTree> = HashMap::new();
        for rule in &self.rules {
            debug!("Indexing rule {rule}");
            trees
                .entry(rule.dependency().to_string())
                .or_default()
                .insert(rule)?;
        }

        debug!(
            "Indexed {} rules for {} dependencies",
            self.rules.len(),
            trees.len()
        );
        Ok(HierarchyMapJudge {
            trees,
            rule_count: self.rules.len(),
        })
    }
}

/// Judge with a per-dependency tree over dependent name parts.
///
/// A query costs one hash lookup for the dependency plus one per part of
/// the dependent, independent of the number of rules.
///
/// ```
/// use jdeps_guard_core::{
///     DependencyJudge, DependencyJudgeBuilder, DependencyRule, HierarchyMapJudge, Severity,
/// };
///
/// let judge = HierarchyMapJudge::builder()
///     .with_rule(DependencyRule::new("com.foo", "sun.misc.Unsafe", Severity::Warn)?)
///     .with_rule(DependencyRule::new("com.foo.bar", "sun.misc.Unsafe", Severity::Fail)?)
///     .build()?;
///
/// assert_eq!(judge.judge("com.foo.bar.Baz", "sun.misc.Unsafe"), Some(Severity::Fail));
/// assert_eq!(judge.judge("com.foo.Qux", "sun.misc.Unsafe"), Some(Severity::Warn));
/// assert_eq!(judge.judge("org.Other", "sun.misc.Unsafe"), None);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct HierarchyMapJudge {
    trees: HashMap<String, DependentTree>,
    rule_count: usize,
}

impl HierarchyMapJudge {
    /// Creates a new builder.
    #[must_use]
    pub fn builder() -> HierarchyMapJudgeBuilder {
        HierarchyMapJudgeBuilder::new()
    }

    /// Returns the number of indexed rules.
    #[must_use]
    pub fn rule_count(&self) -> usize {
        self.rule_count
    }
}

impl DependencyJudge for HierarchyMapJudge {
    fn judge(&self, dependent: &str, dependency: &str) -> Option<Severity> {
        self.trees.get(dependency)?.judge(dependent)
    }
}
