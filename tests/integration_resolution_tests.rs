// tests/integration_resolution_tests.rs

mod common;

use common::DefinitionDir;
use serde_json::json;
use suite_graph::config::AttachmentOrder;
use suite_graph::diagnostics::{EventCode, Level};
use suite_graph::models::{EntityKind, TestEntity};

#[test]
fn test_suite_without_test_list_warns_and_is_kept() {
    let dir = DefinitionDir::new();
    dir.write_json("absent.json", json!({ "type": "suite" }));
    dir.write_json("null.json", json!({ "type": "suite", "tests": null }));
    dir.write_json("scalar.json", json!({ "type": "suite", "tests": "login" }));
    dir.write_json("login.json", json!({ "type": "test" }));

    let (manager, sink) = dir.load();

    assert_eq!(manager.functional_suites().len(), 3);
    assert!(manager.functional_suites().iter().all(|s| s.tests.is_empty()));
    let warnings = sink.with_code(EventCode::SuiteWithoutTests);
    assert_eq!(warnings.len(), 3);
    assert!(warnings.iter().all(|w| w.level == Level::Warn));
}

#[test]
fn test_non_string_references_are_ignored() {
    let dir = DefinitionDir::new();
    dir.write_json("login.json", json!({ "type": "test" }));
    dir.write_json("smoke.json", json!({ "type": "suite", "tests": [42, "login", { "name": "x" }] }));

    let (manager, sink) = dir.load();

    assert_eq!(manager.functional_suites()[0].test_names(), vec!["login"]);
    assert!(sink.warnings().is_empty());
}

#[test]
fn test_reference_lists_without_names_warn_at_every_level() {
    let dir = DefinitionDir::new();
    dir.write_json("login.json", json!({ "type": "test" }));
    dir.write_json("run.json", json!({ "type": "perfRun" }));
    dir.write_json("smoke.json", json!({ "type": "suite", "tests": [42, { "n": 1 }] }));
    dir.write_json("ramp.json", json!({ "type": "perfPattern", "runs": [false, 3.5] }));
    dir.write_json("nightly.json", json!({ "type": "perfSuite", "patterns": ["ramp"] }));
    dir.write_json("weekly.json", json!({ "type": "perfSuite", "patterns": [null, [1]] }));

    let (manager, sink) = dir.load();

    assert!(manager.functional_suites()[0].tests.is_empty());
    let perf = manager.performance_suites();
    assert_eq!(perf[0].name, "nightly");
    assert!(perf[0].patterns[0].runs.is_empty());
    assert!(perf[1].patterns.is_empty());

    assert_eq!(sink.with_code(EventCode::SuiteWithoutTests).len(), 1);
    assert_eq!(sink.with_code(EventCode::PatternWithoutRuns).len(), 1);
    assert_eq!(sink.with_code(EventCode::PerformanceSuiteWithoutPatterns).len(), 1);
    assert_eq!(sink.warnings().len(), 3);
}

#[test]
fn test_each_suite_gets_its_own_test_instance() {
    let dir = DefinitionDir::new();
    dir.write_json("login.json", json!({ "type": "test" }));
    dir.write_json("nightly.json", json!({ "type": "suite", "tests": ["login"] }));
    dir.write_json("smoke.json", json!({ "type": "suite", "tests": ["login"] }));

    let (manager, _) = dir.load();
    let suites = manager.functional_suites();

    assert_eq!(suites[0].tests[0].suite.as_deref(), Some("nightly"));
    assert_eq!(suites[1].tests[0].suite.as_deref(), Some("smoke"));
    assert_eq!(suites[0].tests[0].config, suites[1].tests[0].config);
}

#[test]
fn test_reference_matches_only_records_of_the_referenced_kind() {
    let dir = DefinitionDir::new();
    dir.write_json("login.json", json!({ "type": "fixture" }));
    dir.write_json("smoke.json", json!({ "type": "suite", "tests": ["login"] }));

    let (manager, _) = dir.load();

    assert!(manager.functional_suites()[0].tests.is_empty());
    assert_eq!(manager.all_fixtures().len(), 1);
}

#[test]
fn test_declared_order_follows_reference_list() {
    let dir = DefinitionDir::new();
    dir.write_json("a.json", json!({ "type": "test" }));
    dir.write_json("b.json", json!({ "type": "test" }));
    dir.write_json("c.json", json!({ "type": "test" }));
    dir.write_json("suite.json", json!({ "type": "suite", "tests": ["c", "a", "c", "b"] }));

    let (discovery, _) = dir.load();
    assert_eq!(discovery.functional_suites()[0].test_names(), vec!["a", "b", "c"]);

    let mut config = dir.config();
    config.attachment_order = AttachmentOrder::Declared;
    let (declared, _) = dir.load_with(config);
    assert_eq!(declared.functional_suites()[0].test_names(), vec!["c", "a", "b"]);
}

#[test]
fn test_declared_order_applies_to_patterns_and_runs() {
    let dir = DefinitionDir::new();
    dir.write_json("r1.json", json!({ "type": "perfRun" }));
    dir.write_json("r2.json", json!({ "type": "perfRun" }));
    dir.write_json("p1.json", json!({ "type": "perfPattern", "runs": ["r2", "r1"] }));
    dir.write_json("p2.json", json!({ "type": "perfPattern", "runs": ["r1"] }));
    dir.write_json("suite.json", json!({ "type": "perfSuite", "patterns": ["p2", "p1"] }));

    let mut config = dir.config();
    config.attachment_order = AttachmentOrder::Declared;
    let (manager, _) = dir.load_with(config);
    let suite = manager.performance_suites()[0];

    assert_eq!(suite.pattern_names(), vec!["p2", "p1"]);
    assert_eq!(suite.patterns[1].run_names(), vec!["r2", "r1"]);
}

#[test]
fn test_unresolved_pattern_warns_once_per_name() {
    let dir = DefinitionDir::new();
    dir.write_json("run.json", json!({ "type": "perfRun" }));
    dir.write_json("ramp.json", json!({ "type": "perfPattern", "runs": ["run"] }));
    dir.write_json(
        "suite.json",
        json!({ "type": "perfSuite", "patterns": ["ramp", "ghost", "ghost"] }),
    );

    let (manager, sink) = dir.load();
    let suite = manager.performance_suites()[0];

    assert_eq!(suite.pattern_names(), vec!["ramp"]);
    let warnings = sink.warnings();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].code, EventCode::UnresolvedPattern);
    assert_eq!(warnings[0].context.get("pattern").map(String::as_str), Some("ghost"));
    assert_eq!(warnings[0].context.get("suite").map(String::as_str), Some("suite"));
}

#[test]
fn test_unresolved_run_and_missing_run_list_warn() {
    let dir = DefinitionDir::new();
    dir.write_json("partial.json", json!({ "type": "perfPattern", "runs": ["missing"] }));
    dir.write_json("bare.json", json!({ "type": "perfPattern" }));
    dir.write_json(
        "suite.json",
        json!({ "type": "perfSuite", "patterns": ["partial", "bare"] }),
    );

    let (manager, sink) = dir.load();
    let suite = manager.performance_suites()[0];

    assert_eq!(suite.patterns.len(), 2);
    assert!(suite.patterns.iter().all(|p| p.runs.is_empty()));
    assert_eq!(sink.with_code(EventCode::UnresolvedRun).len(), 1);
    assert_eq!(sink.with_code(EventCode::PatternWithoutRuns).len(), 1);
    assert_eq!(sink.warnings().len(), 2);
}

#[test]
fn test_patterns_never_appear_at_top_level() {
    let dir = DefinitionDir::new();
    dir.write_json("run.json", json!({ "type": "perfRun" }));
    dir.write_json("orphan.json", json!({ "type": "perfPattern", "runs": ["run"] }));

    let (manager, sink) = dir.load();

    assert!(manager.entities().iter().all(|e| e.kind() != EntityKind::PerformancePattern));
    assert_eq!(manager.len(), 1);
    assert!(sink.warnings().is_empty());
}

#[test]
fn test_pattern_shared_by_suites_is_resolved_per_suite() {
    let dir = DefinitionDir::new();
    dir.write_json("run.json", json!({ "type": "perfRun" }));
    dir.write_json("ramp.json", json!({ "type": "perfPattern", "runs": ["run"] }));
    dir.write_json("a.json", json!({ "type": "perfSuite", "patterns": ["ramp"] }));
    dir.write_json("b.json", json!({ "type": "perfSuite", "patterns": ["ramp"] }));

    let (manager, _) = dir.load();
    let suites = manager.performance_suites();

    assert_eq!(suites.len(), 2);
    assert_eq!(suites[0].patterns, suites[1].patterns);
    assert_eq!(manager.summary().attached_runs, 2);
}

#[test]
fn test_standalone_tests_are_opt_in() {
    let dir = DefinitionDir::new();
    dir.write_json("login.json", json!({ "type": "test" }));
    dir.write_json("orphan.json", json!({ "type": "test" }));
    dir.write_json("smoke.json", json!({ "type": "suite", "tests": ["login"] }));

    let (default, _) = dir.load();
    assert!(default.independent_functional_tests().is_empty());

    let mut config = dir.config();
    config.include_standalone_tests = true;
    let (manager, _) = dir.load_with(config);
    let standalone = manager.independent_functional_tests();

    assert_eq!(standalone.len(), 1);
    assert_eq!(standalone[0].name, "orphan");
    assert!(standalone[0].suite.is_none());
    assert_eq!(manager.summary().standalone_tests, 1);
}

#[test]
fn test_standalone_tests_follow_functional_suites() {
    let dir = DefinitionDir::new();
    dir.write_json("a-orphan.json", json!({ "type": "test" }));
    dir.write_json("b-suite.json", json!({ "type": "suite", "tests": [] }));
    dir.write_json("c-perf.json", json!({ "type": "perfSuite", "patterns": ["x"] }));

    let mut config = dir.config();
    config.include_standalone_tests = true;
    let (manager, _) = dir.load_with(config);

    let kinds: Vec<EntityKind> = manager.entities().iter().map(|e| e.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            EntityKind::FunctionalSuite,
            EntityKind::FunctionalTest,
            EntityKind::PerformanceSuite,
        ]
    );
}

#[test]
fn test_duplicate_names_are_kept_and_reported() {
    let dir = DefinitionDir::new();
    dir.write_json("one/login.json", json!({ "type": "test", "variant": 1 }));
    dir.write_json("two/login.json", json!({ "type": "test", "variant": 2 }));
    dir.write_json("smoke.json", json!({ "type": "suite", "tests": ["login"] }));

    let (manager, sink) = dir.load();
    let suite = manager.functional_suites()[0];

    assert_eq!(suite.tests.len(), 2);
    assert_eq!(suite.tests[0].config.get("variant"), Some(&json!(1)));
    assert_eq!(suite.tests[1].config.get("variant"), Some(&json!(2)));

    let duplicates = sink.with_code(EventCode::DuplicateName);
    assert_eq!(duplicates.len(), 1);
    assert_eq!(duplicates[0].context.get("name").map(String::as_str), Some("login"));
    assert_eq!(duplicates[0].context.get("count").map(String::as_str), Some("2"));
}

#[test]
fn test_same_name_across_kinds_is_not_a_collision() {
    let dir = DefinitionDir::new();
    dir.write_json("fixtures/checkout.json", json!({ "type": "fixture" }));
    dir.write_json("perf/checkout.json", json!({ "type": "perfRun" }));

    let (manager, sink) = dir.load();

    assert_eq!(manager.len(), 2);
    assert!(sink.with_code(EventCode::DuplicateName).is_empty());
}

#[test]
fn test_functional_suite_by_returns_first_match() {
    let dir = DefinitionDir::new();
    dir.write_json("a.json", json!({ "type": "suite", "tests": [], "owner": "qa" }));
    dir.write_json("b.json", json!({ "type": "suite", "tests": [], "owner": "dev" }));
    dir.write_json("c.json", json!({ "type": "suite", "tests": [], "owner": "dev" }));

    let (manager, _) = dir.load();

    let found = manager.functional_suite_by("owner", &json!("dev")).unwrap();
    assert_eq!(found.name, "b");
    assert!(manager.functional_suite_by("owner", &json!("ops")).is_none());
}

#[test]
fn test_functional_suite_by_matches_structured_values() {
    let dir = DefinitionDir::new();
    dir.write_json("a.json", json!({ "type": "suite", "tests": [], "priority": 1 }));
    dir.write_json("b.json", json!({ "type": "suite", "tests": [], "priority": 2 }));

    let (manager, _) = dir.load();

    assert_eq!(manager.functional_suite_by("priority", &json!(2)).unwrap().name, "b");
    assert!(manager.functional_suite_by("priority", &json!("2")).is_none());
}

#[test]
fn test_functional_suite_by_reports_suites_missing_the_field() {
    let dir = DefinitionDir::new();
    dir.write_json("a.json", json!({ "type": "suite", "tests": [] }));
    dir.write_json("b.json", json!({ "type": "suite", "tests": [] }));
    dir.write_json("c.json", json!({ "type": "suite", "tests": [], "owner": "qa" }));

    let (manager, sink) = dir.load();
    let found = manager.functional_suite_by("owner", &json!("qa"));

    assert_eq!(found.map(|s| s.name.as_str()), Some("c"));
    let unknown = sink.with_code(EventCode::UnknownQueryField);
    assert_eq!(unknown.len(), 2);
    assert_eq!(unknown[0].context.get("suite").map(String::as_str), Some("a"));
    assert_eq!(unknown[1].context.get("suite").map(String::as_str), Some("b"));
}

#[test]
fn test_functional_suite_by_stops_at_first_match() {
    let dir = DefinitionDir::new();
    dir.write_json("a.json", json!({ "type": "suite", "tests": [], "owner": "qa" }));
    dir.write_json("b.json", json!({ "type": "suite", "tests": [] }));

    let (manager, sink) = dir.load();
    let found = manager.functional_suite_by("owner", &json!("qa"));

    assert_eq!(found.map(|s| s.name.as_str()), Some("a"));
    assert!(sink.with_code(EventCode::UnknownQueryField).is_empty());
}

#[test]
fn test_functional_suite_by_without_match_reports_every_suite_missing_the_field() {
    let dir = DefinitionDir::new();
    dir.write_json("a.json", json!({ "type": "suite", "tests": [] }));
    dir.write_json("b.json", json!({ "type": "suite", "tests": [], "owner": "dev" }));
    dir.write_json("c.json", json!({ "type": "suite", "tests": [] }));

    let (manager, sink) = dir.load();

    assert!(manager.functional_suite_by("owner", &json!("qa")).is_none());
    assert_eq!(sink.with_code(EventCode::UnknownQueryField).len(), 2);
}
