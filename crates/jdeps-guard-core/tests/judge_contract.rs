//! Integration test: both judge strategies against the same rule tables.
//!
//! Every case runs once with `HierarchyMapJudge` and once with `SimpleJudge`
//! so the two stay interchangeable.

use jdeps_guard_core::{
    DependencyJudge, DependencyJudgeBuilder, DependencyRule, HierarchyMapJudgeBuilder, JudgeError,
    Severity, SimpleJudgeBuilder,
};

fn rules(lines: &[&str]) -> Vec<DependencyRule> {
    lines
        .iter()
        .map(|line| line.parse().expect("test rule should parse"))
        .collect()
}

fn build<B>(lines: &[&str]) -> B::Judge
where
    B: DependencyJudgeBuilder + Default,
{
    B::default()
        .with_rules(rules(lines))
        .build()
        .expect("test rules should not conflict")
}

macro_rules! judge_contract {
    ($module:ident, $builder:ty) => {
        mod $module {
            use super::*;

            #[test]
            fn exact_type_rule_matches() {
                let judge = build::<$builder>(&["com.foo.Bar -> sun.misc.Unsafe: WARN"]);
                assert_eq!(judge.judge("com.foo.Bar", "sun.misc.Unsafe"), Some(Severity::Warn));
            }

            #[test]
            fn package_rule_covers_nested_types() {
                let judge = build::<$builder>(&["com.foo -> sun.misc.Unsafe: INFORM"]);
                assert_eq!(
                    judge.judge("com.foo.bar.Baz", "sun.misc.Unsafe"),
                    Some(Severity::Inform)
                );
            }

            #[test]
            fn most_specific_rule_wins() {
                let judge = build::<$builder>(&[
                    "com -> sun.misc.Unsafe: IGNORE",
                    "com.foo.Bar -> sun.misc.Unsafe: FAIL",
                    "com.foo -> sun.misc.Unsafe: WARN",
                ]);
                assert_eq!(judge.judge("com.foo.Bar", "sun.misc.Unsafe"), Some(Severity::Fail));
                assert_eq!(judge.judge("com.foo.Qux", "sun.misc.Unsafe"), Some(Severity::Warn));
                assert_eq!(judge.judge("com.other.Qux", "sun.misc.Unsafe"), Some(Severity::Ignore));
            }

            #[test]
            fn wildcard_applies_when_nothing_else_matches() {
                let judge = build::<$builder>(&[
                    "* -> sun.misc.Unsafe: INFORM",
                    "com.foo -> sun.misc.Unsafe: FAIL",
                ]);
                assert_eq!(judge.judge("org.Bar", "sun.misc.Unsafe"), Some(Severity::Inform));
                assert_eq!(judge.judge("com.foo.Bar", "sun.misc.Unsafe"), Some(Severity::Fail));
            }

            #[test]
            fn less_severe_specific_rule_beats_wildcard() {
                let judge = build::<$builder>(&[
                    "* -> sun.misc.Unsafe: FAIL",
                    "com.foo -> sun.misc.Unsafe: IGNORE",
                ]);
                assert_eq!(judge.judge("com.foo.Bar", "sun.misc.Unsafe"), Some(Severity::Ignore));
            }

            #[test]
            fn partial_part_does_not_match() {
                let judge = build::<$builder>(&["com.foo -> sun.misc.Unsafe: WARN"]);
                assert_eq!(judge.judge("com.foobar.Baz", "sun.misc.Unsafe"), None);
            }

            #[test]
            fn rule_for_nested_package_ignores_parent_type() {
                let judge = build::<$builder>(&["com.foo.bar -> sun.misc.Unsafe: WARN"]);
                assert_eq!(judge.judge("com.foo.Baz", "sun.misc.Unsafe"), None);
            }

            #[test]
            fn dependency_must_match_exactly() {
                let judge = build::<$builder>(&["* -> sun.misc.Unsafe: IGNORE"]);
                assert_eq!(judge.judge("com.foo.Bar", "sun.misc"), None);
                assert_eq!(judge.judge("com.foo.Bar", "sun.misc.Unsafe.Inner"), None);
                assert_eq!(judge.judge("com.foo.Bar", "sun.misc.Signal"), None);
            }

            #[test]
            fn wildcard_dependency_is_literal() {
                let judge = build::<$builder>(&["com.foo -> *: IGNORE"]);
                assert_eq!(judge.judge("com.foo.Bar", "sun.misc.Unsafe"), None);
                assert_eq!(judge.judge("com.foo.Bar", "*"), Some(Severity::Ignore));
            }

            #[test]
            fn empty_judge_knows_nothing() {
                let judge = build::<$builder>(&[]);
                assert_eq!(judge.judge("com.foo.Bar", "sun.misc.Unsafe"), None);
                assert_eq!(
                    judge.judge_or("com.foo.Bar", "sun.misc.Unsafe", Severity::Warn),
                    Severity::Warn
                );
            }

            #[test]
            fn same_pair_twice_is_conflict() {
                let err = <$builder>::default()
                    .with_rules(rules(&[
                        "com.foo -> sun.misc.Unsafe: WARN",
                        "com.foo -> sun.misc.Unsafe: FAIL",
                    ]))
                    .build()
                    .unwrap_err();
                let JudgeError::ConflictingRules { existing, conflicting } = err;
                assert_eq!(existing.severity(), Severity::Warn);
                assert_eq!(conflicting.severity(), Severity::Fail);
            }

            #[test]
            fn identical_rules_conflict() {
                let result = <$builder>::default()
                    .with_rules(rules(&[
                        "com.foo -> sun.misc.Unsafe: WARN",
                        "com.foo -> sun.misc.Unsafe: WARN",
                    ]))
                    .build();
                assert!(result.is_err());
            }

            #[test]
            fn two_wildcards_for_one_dependency_conflict() {
                let result = <$builder>::default()
                    .with_rules(rules(&[
                        "* -> sun.misc.Unsafe: WARN",
                        "* -> sun.misc.Unsafe: IGNORE",
                    ]))
                    .build();
                assert!(result.is_err());
            }

            #[test]
            fn same_dependent_for_other_dependency_is_fine() {
                let judge = build::<$builder>(&[
                    "com.foo -> sun.misc.Unsafe: WARN",
                    "com.foo -> sun.misc.Signal: FAIL",
                ]);
                assert_eq!(judge.judge("com.foo.A", "sun.misc.Signal"), Some(Severity::Fail));
            }
        }
    };
}

judge_contract!(hierarchy_map, HierarchyMapJudgeBuilder);
judge_contract!(simple, SimpleJudgeBuilder);
