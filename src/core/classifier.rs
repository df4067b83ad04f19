//! # Classifier Module / 分类器模块
//!
//! Six pure predicates over a record's configuration, one per entity kind.
//! A record's kind is selected by the discriminator field `type`; because the
//! field holds a single value, at most one predicate can match.
//!
//! 六个作用于记录配置的纯谓词，每种实体类型一个。
//! 记录的类型由判别字段 `type` 决定；由于该字段只有一个值，最多只有一个谓词匹配。

use crate::core::models::{DefinitionConfig, EntityKind, RawTestRecord};
use serde_json::Value;

/// Name of the discriminator field inside a definition.
pub const DISCRIMINATOR_FIELD: &str = "type";

pub const FIXTURE_TYPE: &str = "fixture";
pub const FUNCTIONAL_TEST_TYPE: &str = "test";
pub const FUNCTIONAL_SUITE_TYPE: &str = "suite";
pub const PERFORMANCE_RUN_TYPE: &str = "perfRun";
pub const PERFORMANCE_PATTERN_TYPE: &str = "perfPattern";
pub const PERFORMANCE_SUITE_TYPE: &str = "perfSuite";

/// Field holding the test names a functional suite references.
pub const SUITE_TESTS_FIELD: &str = "tests";
/// Field holding the run names a performance pattern references.
pub const PATTERN_RUNS_FIELD: &str = "runs";
/// Field holding the pattern names a performance suite references.
pub const SUITE_PATTERNS_FIELD: &str = "patterns";

fn discriminator(config: &DefinitionConfig) -> Option<&str> {
    config.get(DISCRIMINATOR_FIELD).and_then(Value::as_str)
}

pub fn is_fixture(config: &DefinitionConfig) -> bool {
    discriminator(config) == Some(FIXTURE_TYPE)
}

pub fn is_functional_test(config: &DefinitionConfig) -> bool {
    discriminator(config) == Some(FUNCTIONAL_TEST_TYPE)
}

pub fn is_functional_suite(config: &DefinitionConfig) -> bool {
    discriminator(config) == Some(FUNCTIONAL_SUITE_TYPE)
}

pub fn is_performance_run(config: &DefinitionConfig) -> bool {
    discriminator(config) == Some(PERFORMANCE_RUN_TYPE)
}

pub fn is_performance_pattern(config: &DefinitionConfig) -> bool {
    discriminator(config) == Some(PERFORMANCE_PATTERN_TYPE)
}

pub fn is_performance_suite(config: &DefinitionConfig) -> bool {
    discriminator(config) == Some(PERFORMANCE_SUITE_TYPE)
}

/// Returns the predicate that selects `kind`.
pub fn predicate_for(kind: EntityKind) -> fn(&DefinitionConfig) -> bool {
    match kind {
        EntityKind::Fixture => is_fixture,
        EntityKind::FunctionalTest => is_functional_test,
        EntityKind::FunctionalSuite => is_functional_suite,
        EntityKind::PerformanceRun => is_performance_run,
        EntityKind::PerformancePattern => is_performance_pattern,
        EntityKind::PerformanceSuite => is_performance_suite,
    }
}

/// Classifies a record, or returns `None` when no predicate matches.
///
/// 对记录进行分类；若没有谓词匹配则返回 `None`。
pub fn classify(record: &RawTestRecord) -> Option<EntityKind> {
    EntityKind::ALL
        .into_iter()
        .find(|kind| predicate_for(*kind)(&record.config))
}

/// Reads the ordered list of names a container declares under `field`.
///
/// Returns `None` when the container declares nothing: the field is absent,
/// `null`, not a list, or a list without a single string. Non-string items are skipped.
///
/// 读取容器在 `field` 下声明的有序名称列表。
/// 当容器未声明任何内容时（字段缺失、为 `null`、不是列表或列表中没有字符串）返回 `None`。
/// 非字符串元素会被跳过。
pub fn declared_references(config: &DefinitionConfig, field: &str) -> Option<Vec<String>> {
    let names: Vec<String> = config
        .get(field)?
        .as_array()?
        .iter()
        .filter_map(Value::as_str)
        .map(str::to_string)
        .collect();
    (!names.is_empty()).then_some(names)
}
