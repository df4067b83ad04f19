//! # Data Models Module / 数据模型模块
//!
//! This module defines the raw records read from disk and the six entity kinds
//! they are turned into. Every entity carries its kind as an explicit tag; no
//! consumer ever needs to inspect a type name.
//!
//! 此模块定义了从磁盘读取的原始记录以及由它们生成的六种实体类型。
//! 每个实体都显式携带其类型标签；使用方无需检查类型名称。

use serde_json::{Map, Value};
use std::fmt;
use std::path::{Path, PathBuf};

/// The parsed contents of one definition file.
/// 单个定义文件解析后的内容。
pub type DefinitionConfig = Map<String, Value>;

/// A definition file after parsing and before classification.
/// Immutable once loaded.
///
/// 解析后、分类前的定义文件。加载后不可变。
#[derive(Debug, Clone, PartialEq)]
pub struct RawTestRecord {
    /// The file stem, e.g. `login` for `.../login.json`.
    /// 文件名主干，例如 `.../login.json` 对应 `login`。
    pub name: String,
    /// Absolute path of the definition file.
    /// 定义文件的绝对路径。
    pub path: PathBuf,
    /// The mapping parsed from the file.
    /// 从文件解析出的映射。
    pub config: DefinitionConfig,
}

impl RawTestRecord {
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, config: DefinitionConfig) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            config,
        }
    }
}

/// The six entity kinds a record can be classified into.
/// 记录可被分类成的六种实体类型。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Fixture,
    FunctionalTest,
    FunctionalSuite,
    PerformanceRun,
    PerformancePattern,
    PerformanceSuite,
}

impl EntityKind {
    pub const ALL: [EntityKind; 6] = [
        EntityKind::Fixture,
        EntityKind::FunctionalTest,
        EntityKind::FunctionalSuite,
        EntityKind::PerformanceRun,
        EntityKind::PerformancePattern,
        EntityKind::PerformanceSuite,
    ];

    /// Containers declare references to other entities; leaves never do.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            EntityKind::FunctionalSuite | EntityKind::PerformancePattern | EntityKind::PerformanceSuite
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntityKind::Fixture => "fixture",
            EntityKind::FunctionalTest => "functional test",
            EntityKind::FunctionalSuite => "functional suite",
            EntityKind::PerformanceRun => "performance run",
            EntityKind::PerformancePattern => "performance pattern",
            EntityKind::PerformanceSuite => "performance suite",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accessors shared by every entity kind.
///
/// 所有实体类型共享的访问器。
pub trait TestEntity {
    fn kind(&self) -> EntityKind;
    fn name(&self) -> &str;
    fn path(&self) -> &Path;
    fn config(&self) -> &DefinitionConfig;

    /// Reads a top-level config field.
    fn field(&self, key: &str) -> Option<&Value> {
        self.config().get(key)
    }
}

macro_rules! impl_test_entity {
    ($ty:ty, $kind:expr) => {
        impl TestEntity for $ty {
            fn kind(&self) -> EntityKind {
                $kind
            }
            fn name(&self) -> &str {
                &self.name
            }
            fn path(&self) -> &Path {
                &self.path
            }
            fn config(&self) -> &DefinitionConfig {
                &self.config
            }
        }
    };
}

/// Shared setup data referenced by tests. Leaf.
/// 测试引用的共享准备数据。叶子实体。
#[derive(Debug, Clone, PartialEq)]
pub struct Fixture {
    pub name: String,
    pub path: PathBuf,
    pub config: DefinitionConfig,
}

impl Fixture {
    pub fn from_record(record: &RawTestRecord) -> Self {
        Self {
            name: record.name.clone(),
            path: record.path.clone(),
            config: record.config.clone(),
        }
    }
}

/// A single performance run. Leaf.
/// 单次性能运行。叶子实体。
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRun {
    pub name: String,
    pub path: PathBuf,
    pub config: DefinitionConfig,
}

impl PerformanceRun {
    pub fn from_record(record: &RawTestRecord) -> Self {
        Self {
            name: record.name.clone(),
            path: record.path.clone(),
            config: record.config.clone(),
        }
    }
}

/// A functional test. Each suite that references it gets its own instance.
///
/// 功能测试。每个引用它的测试套件都会获得一个独立的实例。
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionalTest {
    pub name: String,
    pub path: PathBuf,
    pub config: DefinitionConfig,
    /// Name of the suite this instance was attached to; `None` when standalone.
    /// 此实例所附加的测试套件名称；独立存在时为 `None`。
    pub suite: Option<String>,
}

impl FunctionalTest {
    /// Creates an instance attached to `suite`.
    pub fn attached(record: &RawTestRecord, suite: &str) -> Self {
        Self {
            name: record.name.clone(),
            path: record.path.clone(),
            config: record.config.clone(),
            suite: Some(suite.to_string()),
        }
    }

    /// Creates an instance with no owning suite.
    pub fn standalone(record: &RawTestRecord) -> Self {
        Self {
            name: record.name.clone(),
            path: record.path.clone(),
            config: record.config.clone(),
            suite: None,
        }
    }

    pub fn is_independent(&self) -> bool {
        self.suite.is_none()
    }
}

/// A functional suite and the tests resolved from its declared references.
///
/// 功能测试套件及从其声明的引用中解析出的测试。
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionalSuite {
    pub name: String,
    pub path: PathBuf,
    pub config: DefinitionConfig,
    pub tests: Vec<FunctionalTest>,
}

impl FunctionalSuite {
    /// Creates the suite with no tests attached yet.
    pub fn from_record(record: &RawTestRecord) -> Self {
        Self {
            name: record.name.clone(),
            path: record.path.clone(),
            config: record.config.clone(),
            tests: Vec::new(),
        }
    }

    pub fn test_names(&self) -> Vec<&str> {
        self.tests.iter().map(|t| t.name.as_str()).collect()
    }
}

/// A performance pattern and the runs resolved from its declared references.
///
/// 性能模式及从其声明的引用中解析出的运行。
#[derive(Debug, Clone, PartialEq)]
pub struct PerformancePattern {
    pub name: String,
    pub path: PathBuf,
    pub config: DefinitionConfig,
    pub runs: Vec<PerformanceRun>,
}

impl PerformancePattern {
    pub fn from_record(record: &RawTestRecord) -> Self {
        Self {
            name: record.name.clone(),
            path: record.path.clone(),
            config: record.config.clone(),
            runs: Vec::new(),
        }
    }

    pub fn run_names(&self) -> Vec<&str> {
        self.runs.iter().map(|r| r.name.as_str()).collect()
    }
}

/// A performance suite and the patterns resolved from its declared references.
///
/// 性能测试套件及从其声明的引用中解析出的模式。
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceSuite {
    pub name: String,
    pub path: PathBuf,
    pub config: DefinitionConfig,
    pub patterns: Vec<PerformancePattern>,
}

impl PerformanceSuite {
    pub fn from_record(record: &RawTestRecord) -> Self {
        Self {
            name: record.name.clone(),
            path: record.path.clone(),
            config: record.config.clone(),
            patterns: Vec::new(),
        }
    }

    pub fn pattern_names(&self) -> Vec<&str> {
        self.patterns.iter().map(|p| p.name.as_str()).collect()
    }
}

impl_test_entity!(Fixture, EntityKind::Fixture);
impl_test_entity!(PerformanceRun, EntityKind::PerformanceRun);
impl_test_entity!(FunctionalTest, EntityKind::FunctionalTest);
impl_test_entity!(FunctionalSuite, EntityKind::FunctionalSuite);
impl_test_entity!(PerformancePattern, EntityKind::PerformancePattern);
impl_test_entity!(PerformanceSuite, EntityKind::PerformanceSuite);

/// Any entity, tagged with its kind.
///
/// The entity collection holds values of this type; consumers `match` on the
/// variant instead of comparing type names.
///
/// 任意实体，带有其类型标签。
/// 实体集合保存此类型的值；使用方通过 `match` 变体进行区分，而非比较类型名称。
#[derive(Debug, Clone, PartialEq)]
pub enum Entity {
    Fixture(Fixture),
    FunctionalTest(FunctionalTest),
    FunctionalSuite(FunctionalSuite),
    PerformanceRun(PerformanceRun),
    PerformancePattern(PerformancePattern),
    PerformanceSuite(PerformanceSuite),
}

impl Entity {
    fn inner(&self) -> &dyn TestEntity {
        match self {
            Entity::Fixture(e) => e,
            Entity::FunctionalTest(e) => e,
            Entity::FunctionalSuite(e) => e,
            Entity::PerformanceRun(e) => e,
            Entity::PerformancePattern(e) => e,
            Entity::PerformanceSuite(e) => e,
        }
    }

    pub fn as_fixture(&self) -> Option<&Fixture> {
        match self {
            Entity::Fixture(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_functional_test(&self) -> Option<&FunctionalTest> {
        match self {
            Entity::FunctionalTest(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_functional_suite(&self) -> Option<&FunctionalSuite> {
        match self {
            Entity::FunctionalSuite(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_performance_run(&self) -> Option<&PerformanceRun> {
        match self {
            Entity::PerformanceRun(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_performance_suite(&self) -> Option<&PerformanceSuite> {
        match self {
            Entity::PerformanceSuite(e) => Some(e),
            _ => None,
        }
    }

    /// Number of direct children; always 0 for leaves.
    pub fn child_count(&self) -> usize {
        match self {
            Entity::FunctionalSuite(s) => s.tests.len(),
            Entity::PerformancePattern(p) => p.runs.len(),
            Entity::PerformanceSuite(s) => s.patterns.len(),
            _ => 0,
        }
    }
}

impl TestEntity for Entity {
    fn kind(&self) -> EntityKind {
        self.inner().kind()
    }
    fn name(&self) -> &str {
        self.inner().name()
    }
    fn path(&self) -> &Path {
        self.inner().path()
    }
    fn config(&self) -> &DefinitionConfig {
        self.inner().config()
    }
}
