//! # Entity Manager Module / 实体管理模块
//!
//! The entity manager runs the whole pipeline once, at construction, and then
//! answers read-only queries over the resulting collection.
//!
//! Phase order:
//! 1. load every definition record under the root directory
//! 2. leaves: fixtures, then standalone performance runs
//! 3. functional suites, each with its referenced tests
//! 4. performance suites, each with its patterns and their runs
//!
//! Every phase is an independent pass over the full, indexed record set.
//!
//! 实体管理器在构建时一次性运行整个流水线，之后对生成的集合提供只读查询。
//!
//! 阶段顺序：
//! 1. 加载根目录下的所有定义记录
//! 2. 叶子实体：先是 fixture，然后是独立的性能运行
//! 3. 功能测试套件，各自附带其引用的测试
//! 4. 性能测试套件，各自附带其模式及模式下的运行
//!
//! 每个阶段都是对完整的、已建立索引的记录集的独立遍历。

use crate::core::config::GraphConfig;
use crate::core::index::RecordIndex;
use crate::core::loader::{self, LoadError};
use crate::core::models::{
    Entity, EntityKind, Fixture, FunctionalSuite, FunctionalTest, PerformanceRun,
    PerformanceSuite, RawTestRecord, TestEntity,
};
use crate::core::resolver::{ResolveOptions, Resolver};
use crate::infra::diagnostics::{DiagnosticEvent, DiagnosticsSink, EventCode};
use crate::infra::t;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Per-kind counts over a built graph.
/// 已构建实体图的各类型计数。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GraphSummary {
    /// Definition files loaded from disk / 从磁盘加载的定义文件数
    pub records: usize,
    /// Records no predicate matched / 未被任何谓词匹配的记录数
    pub unclassified: usize,
    pub fixtures: usize,
    pub performance_runs: usize,
    pub functional_suites: usize,
    pub attached_tests: usize,
    pub standalone_tests: usize,
    pub performance_suites: usize,
    pub attached_patterns: usize,
    pub attached_runs: usize,
}

impl GraphSummary {
    /// Number of top-level entities.
    pub fn top_level(&self) -> usize {
        self.fixtures
            + self.performance_runs
            + self.functional_suites
            + self.standalone_tests
            + self.performance_suites
    }
}

/// Owns the entity collection built from one definitions directory.
///
/// 持有从一个定义目录构建出的实体集合。
pub struct EntityManager {
    entities: Vec<Entity>,
    records: usize,
    unclassified: usize,
    sink: Arc<dyn DiagnosticsSink>,
}

impl fmt::Debug for EntityManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityManager")
            .field("entities", &self.entities.len())
            .field("records", &self.records)
            .finish_non_exhaustive()
    }
}

impl EntityManager {
    /// Loads every definition under the configured root and builds the graph.
    ///
    /// # Arguments
    /// * `config` - Root directory, extensions and resolution options
    /// * `sink` - Receives every non-fatal event raised while building and querying
    ///
    /// # Returns
    /// The finished manager, or the `LoadError` that aborted construction
    ///
    /// 加载配置根目录下的所有定义并构建实体图。
    pub fn load(config: &GraphConfig, sink: Arc<dyn DiagnosticsSink>) -> Result<Self, LoadError> {
        config.validate().map_err(|e| LoadError::InvalidConfig {
            reason: format!("{:#}", e),
        })?;
        let root = config
            .tests_dir()
            .map_err(|e| LoadError::InvalidRoot {
                raw: config.tests_dir_path.clone(),
                reason: format!("{:#}", e),
            })?;
        let records = loader::load_records(&root, &config.extensions)?;
        Ok(Self::from_records(records, ResolveOptions::from(config), sink))
    }

    /// Builds the graph from records that are already in memory.
    ///
    /// `records` must be in discovery order; that order is preserved in the collection.
    pub fn from_records(
        records: Vec<RawTestRecord>,
        options: ResolveOptions,
        sink: Arc<dyn DiagnosticsSink>,
    ) -> Self {
        let index = RecordIndex::build(&records);
        report_collisions(&index, sink.as_ref());

        let entities = build_entities(&index, options, sink.as_ref());
        let manager = Self {
            entities,
            records: index.total(),
            unclassified: index.unclassified(),
            sink,
        };

        manager.sink.emit(
            DiagnosticEvent::info(
                EventCode::GraphBuilt,
                t!(
                    "diagnostics.graph_built",
                    entities = manager.entities.len(),
                    records = manager.records
                ),
            )
            .with("entities", manager.entities.len())
            .with("records", manager.records)
            .with("unclassified", manager.unclassified),
        );
        manager
    }

    /// The top-level collection, in phase order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Number of definition files the graph was built from.
    pub fn record_count(&self) -> usize {
        self.records
    }

    /// Number of definition files that matched no entity kind.
    pub fn unclassified_count(&self) -> usize {
        self.unclassified
    }

    pub fn functional_suites(&self) -> Vec<&FunctionalSuite> {
        self.entities.iter().filter_map(Entity::as_functional_suite).collect()
    }

    pub fn performance_suites(&self) -> Vec<&PerformanceSuite> {
        self.entities.iter().filter_map(Entity::as_performance_suite).collect()
    }

    /// Performance runs that are top-level entities (not the copies inside patterns).
    pub fn performance_runs(&self) -> Vec<&PerformanceRun> {
        self.entities.iter().filter_map(Entity::as_performance_run).collect()
    }

    /// Fixtures as tagged entities.
    pub fn fixture_entities(&self) -> Vec<&Entity> {
        self.entities
            .iter()
            .filter(|e| e.kind() == EntityKind::Fixture)
            .collect()
    }

    /// Fixtures flattened to a plain sequence.
    pub fn all_fixtures(&self) -> Vec<&Fixture> {
        self.entities.iter().filter_map(Entity::as_fixture).collect()
    }

    /// Top-level functional tests that belong to no suite.
    ///
    /// Suites absorb the tests they reference, so this is empty unless the graph
    /// was built with `include_standalone_tests`.
    ///
    /// 不属于任何测试套件的顶层功能测试。
    /// 测试套件会吸收其引用的测试，因此除非构建时启用了 `include_standalone_tests`，否则结果为空。
    pub fn independent_functional_tests(&self) -> Vec<&FunctionalTest> {
        self.entities
            .iter()
            .filter_map(Entity::as_functional_test)
            .filter(|t| t.is_independent())
            .collect()
    }

    /// Finds the first functional suite whose config `field` equals `value`.
    ///
    /// Suites are examined in collection order up to the first match. A suite
    /// without `field` is reported to the diagnostics sink and treated as
    /// non-matching; the lookup itself never fails.
    ///
    /// 查找配置中 `field` 等于 `value` 的第一个功能测试套件。
    /// 按集合顺序检查测试套件，直到第一个匹配项为止。缺少 `field` 的套件会被报告给
    /// 诊断接收器并视为不匹配；查找本身永远不会失败。
    pub fn functional_suite_by(&self, field: &str, value: &Value) -> Option<&FunctionalSuite> {
        for suite in self.functional_suites() {
            match suite.field(field) {
                Some(candidate) if candidate == value => return Some(suite),
                Some(_) => {}
                None => self.sink.emit(
                    DiagnosticEvent::warn(
                        EventCode::UnknownQueryField,
                        t!("diagnostics.unknown_query_field", suite = suite.name, field = field),
                    )
                    .with("suite", &suite.name)
                    .with("field", field),
                ),
            }
        }
        None
    }

    /// Per-kind counts over the collection, children included.
    pub fn summary(&self) -> GraphSummary {
        let mut summary = GraphSummary {
            records: self.records,
            unclassified: self.unclassified,
            ..GraphSummary::default()
        };
        for entity in &self.entities {
            match entity {
                Entity::Fixture(_) => summary.fixtures += 1,
                Entity::PerformanceRun(_) => summary.performance_runs += 1,
                Entity::FunctionalTest(_) => summary.standalone_tests += 1,
                Entity::FunctionalSuite(suite) => {
                    summary.functional_suites += 1;
                    summary.attached_tests += suite.tests.len();
                }
                Entity::PerformanceSuite(suite) => {
                    summary.performance_suites += 1;
                    summary.attached_patterns += suite.patterns.len();
                    summary.attached_runs +=
                        suite.patterns.iter().map(|p| p.runs.len()).sum::<usize>();
                }
                Entity::PerformancePattern(pattern) => {
                    summary.attached_runs += pattern.runs.len();
                }
            }
        }
        summary
    }
}

fn build_entities(
    index: &RecordIndex<'_>,
    options: ResolveOptions,
    sink: &dyn DiagnosticsSink,
) -> Vec<Entity> {
    let resolver = Resolver::new(index, options, sink);
    let mut entities = Vec::with_capacity(index.total());

    entities.extend(
        index
            .of_kind(EntityKind::Fixture)
            .map(|r| Entity::Fixture(Fixture::from_record(r))),
    );
    entities.extend(
        index
            .of_kind(EntityKind::PerformanceRun)
            .map(|r| Entity::PerformanceRun(PerformanceRun::from_record(r))),
    );

    entities.extend(
        index
            .of_kind(EntityKind::FunctionalSuite)
            .map(|r| Entity::FunctionalSuite(resolver.functional_suite(r))),
    );
    if options.include_standalone_tests {
        entities.extend(resolver.standalone_tests().into_iter().map(Entity::FunctionalTest));
    }

    entities.extend(
        index
            .of_kind(EntityKind::PerformanceSuite)
            .map(|r| Entity::PerformanceSuite(resolver.performance_suite(r))),
    );

    entities
}

fn report_collisions(index: &RecordIndex<'_>, sink: &dyn DiagnosticsSink) {
    for collision in index.collisions() {
        sink.emit(
            DiagnosticEvent::warn(
                EventCode::DuplicateName,
                t!(
                    "diagnostics.duplicate_name",
                    count = collision.count,
                    kind = collision.kind,
                    name = collision.name
                ),
            )
            .with("kind", collision.kind)
            .with("name", collision.name)
            .with("count", collision.count),
        );
    }
}
