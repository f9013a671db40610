//! # jdeps-guard-core
//!
//! Rules and judges for dependencies on JDK-internal APIs.
//!
//! `jdeps` reports which types of a project use JDK-internal APIs. This
//! crate decides how severe each such dependency is and groups the
//! findings for the build output. It includes:
//!
//! - [`DependencyRule`] for validated `(dependent -> dependency: SEVERITY)` rules
//! - [`DependencyJudge`] with the [`HierarchyMapJudge`] and [`SimpleJudge`] strategies
//! - [`Aggregator`] for partitioning findings into an [`AnalysisResult`]
//! - [`Report`] for rendering the result
//! - [`config`] for loading rules from TOML
//!
//! ## Example
//!
//! ```
//! use jdeps_guard_core::{load_rule_set_from_toml, InternalDependencies, Report, Severity};
//!
//! let rules = load_rule_set_from_toml(
//!     r#"arrow-rules = ["com.foo -> sun.misc.Unsafe: WARN"]"#,
//! )?;
//! let result = rules
//!     .aggregator()
//!     .aggregate([InternalDependencies::new("com.foo.Bar", ["sun.misc.Unsafe"])]);
//!
//! assert_eq!(result.dependency_count(Severity::Warn), 1);
//! assert!(Report::new(&result).failure().is_none());
//! # Ok::<(), jdeps_guard_core::LoadRulesError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aggregator;
mod judge;
mod report;
mod rule;
mod types;

pub mod config;
pub mod identifier;

pub use aggregator::{Aggregator, InternalDependencies, DEFAULT_SEVERITY};
pub use config::{load_rule_set_from_toml, Config, ConfigError, LoadRulesError, RuleSet};
pub use identifier::{check_name, IdentifierError, Role, ALL_TYPES_WILDCARD};
pub use judge::{
    DependencyJudge, DependencyJudgeBuilder, HierarchyMapJudge, HierarchyMapJudgeBuilder,
    JudgeBox, JudgeError, SimpleJudge, SimpleJudgeBuilder,
};
pub use report::{Action, Report, Section};
pub use rule::{parse_arrow_rule, DependencyRule, RuleError};
pub use types::{AnalysisResult, ParseSeverityError, Severity, Violation};
