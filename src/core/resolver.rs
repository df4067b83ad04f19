//! # Reference Resolution Module / 引用解析模块
//!
//! This module turns container records into container entities by matching
//! the names they declare against the record index and attaching a fresh
//! child instance per match. Children are never shared between parents.
//!
//! Missing reference lists and unresolved names are not errors: the container
//! is kept with whatever children could be resolved and the event is reported
//! to the diagnostics sink. Unresolved test names are skipped silently, while
//! unresolved pattern and run names are reported.
//!
//! 此模块通过将容器记录中声明的名称与记录索引进行匹配，并为每个匹配项附加一个
//! 新的子实例，从而把容器记录转换为容器实体。子实体从不在父实体之间共享。
//!
//! 缺失的引用列表和无法解析的名称都不是错误：容器会保留已解析的子实体，
//! 并将事件报告给诊断接收器。无法解析的测试名称会被静默跳过，
//! 而无法解析的模式和运行名称会被报告。

use crate::core::classifier::{
    declared_references, PATTERN_RUNS_FIELD, SUITE_PATTERNS_FIELD, SUITE_TESTS_FIELD,
};
use crate::core::config::{AttachmentOrder, GraphConfig};
use crate::core::index::RecordIndex;
use crate::core::models::{
    EntityKind, FunctionalSuite, FunctionalTest, PerformancePattern, PerformanceRun,
    PerformanceSuite, RawTestRecord,
};
use crate::infra::diagnostics::{DiagnosticEvent, DiagnosticsSink, EventCode};
use crate::infra::t;
use std::collections::HashSet;

/// Knobs that change how containers are resolved.
/// 改变容器解析方式的选项。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    pub attachment_order: AttachmentOrder,
    pub include_standalone_tests: bool,
}

impl From<&GraphConfig> for ResolveOptions {
    fn from(config: &GraphConfig) -> Self {
        Self {
            attachment_order: config.attachment_order,
            include_standalone_tests: config.include_standalone_tests,
        }
    }
}

/// Resolves container records against an index, reporting to `sink`.
pub struct Resolver<'i, 'a> {
    index: &'i RecordIndex<'a>,
    options: ResolveOptions,
    sink: &'i dyn DiagnosticsSink,
}

impl<'i, 'a> Resolver<'i, 'a> {
    pub fn new(
        index: &'i RecordIndex<'a>,
        options: ResolveOptions,
        sink: &'i dyn DiagnosticsSink,
    ) -> Self {
        Self {
            index,
            options,
            sink,
        }
    }

    /// Builds a functional suite and attaches the tests it references.
    ///
    /// 构建功能测试套件并附加其引用的测试。
    pub fn functional_suite(&self, record: &RawTestRecord) -> FunctionalSuite {
        let mut suite = FunctionalSuite::from_record(record);

        let Some(declared) = declared_references(&record.config, SUITE_TESTS_FIELD) else {
            self.sink.emit(
                DiagnosticEvent::warn(
                    EventCode::SuiteWithoutTests,
                    t!("diagnostics.suite_without_tests", suite = record.name),
                )
                .with("suite", &record.name)
                .with("path", record.path.display()),
            );
            return suite;
        };

        suite.tests = self
            .index
            .resolve(EntityKind::FunctionalTest, &declared, self.options.attachment_order)
            .into_iter()
            .map(|test| FunctionalTest::attached(test, &record.name))
            .collect();
        suite
    }

    /// Builds a performance suite, resolving its patterns and, through them, their runs.
    ///
    /// 构建性能测试套件，解析其模式，并通过模式解析其运行。
    pub fn performance_suite(&self, record: &RawTestRecord) -> PerformanceSuite {
        let mut suite = PerformanceSuite::from_record(record);

        let Some(declared) = declared_references(&record.config, SUITE_PATTERNS_FIELD) else {
            self.sink.emit(
                DiagnosticEvent::warn(
                    EventCode::PerformanceSuiteWithoutPatterns,
                    t!("diagnostics.perf_suite_without_patterns", suite = record.name),
                )
                .with("suite", &record.name)
                .with("path", record.path.display()),
            );
            return suite;
        };

        for missing in self.unresolved(EntityKind::PerformancePattern, &declared) {
            self.sink.emit(
                DiagnosticEvent::warn(
                    EventCode::UnresolvedPattern,
                    t!(
                        "diagnostics.unresolved_pattern",
                        suite = record.name,
                        pattern = missing
                    ),
                )
                .with("suite", &record.name)
                .with("pattern", missing),
            );
        }

        suite.patterns = self
            .index
            .resolve(EntityKind::PerformancePattern, &declared, self.options.attachment_order)
            .into_iter()
            .map(|pattern| self.performance_pattern(pattern))
            .collect();
        suite
    }

    /// Builds a performance pattern and attaches the runs it references.
    ///
    /// 构建性能模式并附加其引用的运行。
    pub fn performance_pattern(&self, record: &RawTestRecord) -> PerformancePattern {
        let mut pattern = PerformancePattern::from_record(record);

        let Some(declared) = declared_references(&record.config, PATTERN_RUNS_FIELD) else {
            self.sink.emit(
                DiagnosticEvent::warn(
                    EventCode::PatternWithoutRuns,
                    t!("diagnostics.pattern_without_runs", pattern = record.name),
                )
                .with("pattern", &record.name)
                .with("path", record.path.display()),
            );
            return pattern;
        };

        for missing in self.unresolved(EntityKind::PerformanceRun, &declared) {
            self.sink.emit(
                DiagnosticEvent::warn(
                    EventCode::UnresolvedRun,
                    t!(
                        "diagnostics.unresolved_run",
                        pattern = record.name,
                        run = missing
                    ),
                )
                .with("pattern", &record.name)
                .with("run", missing),
            );
        }

        pattern.runs = self
            .index
            .resolve(EntityKind::PerformanceRun, &declared, self.options.attachment_order)
            .into_iter()
            .map(PerformanceRun::from_record)
            .collect();
        pattern
    }

    /// Functional tests that no functional suite references, as standalone entities.
    ///
    /// 未被任何功能测试套件引用的功能测试，作为独立实体返回。
    pub fn standalone_tests(&self) -> Vec<FunctionalTest> {
        let referenced: HashSet<String> = self
            .index
            .of_kind(EntityKind::FunctionalSuite)
            .filter_map(|suite| declared_references(&suite.config, SUITE_TESTS_FIELD))
            .flatten()
            .collect();

        self.index
            .of_kind(EntityKind::FunctionalTest)
            .filter(|test| !referenced.contains(&test.name))
            .map(FunctionalTest::standalone)
            .collect()
    }

    /// Distinct declared names with no record of `kind`, in declaration order.
    fn unresolved<'d>(&self, kind: EntityKind, declared: &'d [String]) -> Vec<&'d str> {
        let mut seen = HashSet::new();
        declared
            .iter()
            .map(String::as_str)
            .filter(|name| seen.insert(*name))
            .filter(|name| !self.index.contains(kind, name))
            .collect()
    }
}
