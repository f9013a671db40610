//! Integration test: TOML → rule set → aggregation → report.

use jdeps_guard_core::{
    load_rule_set_from_toml, Action, Config, DependencyJudge, InternalDependencies, Report,
    Severity,
};
use std::path::PathBuf;

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/jdeps-guard.toml")
}

fn fixture_content() -> String {
    std::fs::read_to_string(fixture_path()).expect("fixture TOML should exist")
}

fn facts() -> Vec<InternalDependencies> {
    vec![
        InternalDependencies::new(
            "com.example.core.Memory",
            ["sun.misc.Unsafe", "sun.misc.Signal"],
        ),
        InternalDependencies::new("com.example.core.Buffers", ["sun.misc.Unsafe"]),
        InternalDependencies::new(
            "com.example.legacy.codec.Base64Shim",
            ["sun.misc.BASE64Encoder", "sun.misc.BASE64Decoder"],
        ),
        InternalDependencies::new("org.thirdparty.Hack", ["sun.reflect.Reflection"]),
    ]
}

#[test]
fn fixture_loads_all_rules() {
    let rules = load_rule_set_from_toml(&fixture_content()).expect("fixture rules should load");

    assert_eq!(rules.rules().len(), 6);
    assert_eq!(rules.default_severity(), Severity::Fail);
    assert_eq!(rules.judge().rule_count(), 6);
}

#[test]
fn config_from_file_matches_parsed_content() {
    let from_file = Config::from_file(&fixture_path()).expect("fixture should be readable");
    assert_eq!(from_file.dependency_rules.len(), 2);
    assert_eq!(from_file.arrow_rules.lines().len(), 3);
}

#[test]
fn judge_uses_most_specific_rule() {
    let rules = load_rule_set_from_toml(&fixture_content()).unwrap();
    let judge = rules.judge();

    assert_eq!(
        judge.judge("com.example.core.Memory", "sun.misc.Unsafe"),
        Some(Severity::Inform)
    );
    assert_eq!(
        judge.judge("com.example.core.Buffers", "sun.misc.Unsafe"),
        Some(Severity::Warn)
    );
    assert_eq!(
        judge.judge("com.example.legacy.codec.Base64Shim", "sun.misc.BASE64Encoder"),
        Some(Severity::Inform)
    );
    assert_eq!(
        judge.judge("com.example.legacy.codec.Base64Shim", "sun.misc.BASE64Decoder"),
        Some(Severity::Warn)
    );
    assert_eq!(judge.judge("org.Any", "sun.misc.Signal"), Some(Severity::Ignore));
    assert_eq!(judge.judge("org.thirdparty.Hack", "sun.reflect.Reflection"), None);
}

#[test]
fn aggregation_partitions_fixture_facts() {
    let rules = load_rule_set_from_toml(&fixture_content()).unwrap();
    let result = rules.aggregator().aggregate(facts());

    assert_eq!(result.dependency_count(Severity::Ignore), 1);
    assert_eq!(result.dependency_count(Severity::Inform), 2);
    assert_eq!(result.dependency_count(Severity::Warn), 2);
    assert_eq!(result.dependency_count(Severity::Fail), 1);
    assert_eq!(result.total_dependency_count(), 6);

    let inform: Vec<_> = result
        .violations_to_inform()
        .map(|v| v.type_name().to_string())
        .collect();
    assert_eq!(
        inform,
        ["com.example.core.Memory", "com.example.legacy.codec.Base64Shim"]
    );

    let fail: Vec<_> = result.violations_to_fail().collect();
    assert_eq!(fail.len(), 1);
    assert_eq!(fail[0].type_name(), "org.thirdparty.Hack");
}

#[test]
fn report_fails_on_unconfigured_dependency() {
    let rules = load_rule_set_from_toml(&fixture_content()).unwrap();
    let report = Report::new(&rules.aggregator().aggregate(facts()));

    let actions: Vec<_> = report.sections().iter().map(|s| s.action()).collect();
    assert_eq!(
        actions,
        [Action::LogInfo, Action::LogInfo, Action::LogWarning, Action::FailBuild]
    );
    assert_eq!(
        report.failure(),
        Some(
            "JDeps reported 1 dependencies on JDK-internal APIs that are configured to fail the build:\n\
             org.thirdparty.Hack -> sun.reflect.Reflection"
        )
    );
}

#[test]
fn lenient_default_keeps_build_green() {
    let content = fixture_content().replace(
        r#"default-severity = "FAIL""#,
        r#"default-severity = "WARN""#,
    );
    let rules = load_rule_set_from_toml(&content).unwrap();
    let result = rules.aggregator().aggregate(facts());

    assert!(!result.has_failures());
    assert!(Report::new(&result).failure().is_none());
}
