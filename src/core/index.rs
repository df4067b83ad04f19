//! # Record Index Module / 记录索引模块
//!
//! Classifies every loaded record once and indexes it by kind and by name,
//! so resolving a container's references is a table lookup instead of a scan
//! over the whole record pool. Lookups always yield records in discovery order.
//!
//! 对每条已加载记录只分类一次，并按类型和名称建立索引，
//! 使解析容器引用变为查表而不是扫描整个记录池。查找结果始终保持发现顺序。

use crate::core::classifier::classify;
use crate::core::config::AttachmentOrder;
use crate::core::models::{EntityKind, RawTestRecord};
use std::collections::{BTreeMap, HashMap, HashSet};

/// A (kind, name) pair shared by more than one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCollision<'a> {
    pub kind: EntityKind,
    pub name: &'a str,
    pub count: usize,
}

/// Read-only index over a slice of records.
///
/// 记录切片上的只读索引。
#[derive(Debug)]
pub struct RecordIndex<'a> {
    records: &'a [RawTestRecord],
    by_kind: HashMap<EntityKind, Vec<usize>>,
    by_name: HashMap<EntityKind, HashMap<&'a str, Vec<usize>>>,
    unclassified: usize,
}

impl<'a> RecordIndex<'a> {
    pub fn build(records: &'a [RawTestRecord]) -> Self {
        let mut by_kind: HashMap<EntityKind, Vec<usize>> = HashMap::new();
        let mut by_name: HashMap<EntityKind, HashMap<&'a str, Vec<usize>>> = HashMap::new();
        let mut unclassified = 0;

        for (position, record) in records.iter().enumerate() {
            let Some(kind) = classify(record) else {
                unclassified += 1;
                continue;
            };
            by_kind.entry(kind).or_default().push(position);
            by_name
                .entry(kind)
                .or_default()
                .entry(record.name.as_str())
                .or_default()
                .push(position);
        }

        Self {
            records,
            by_kind,
            by_name,
            unclassified,
        }
    }

    /// Every record of `kind`, in discovery order.
    pub fn of_kind(&self, kind: EntityKind) -> impl Iterator<Item = &'a RawTestRecord> + '_ {
        let records = self.records;
        self.positions_of_kind(kind).iter().map(move |&p| &records[p])
    }

    pub fn count(&self, kind: EntityKind) -> usize {
        self.positions_of_kind(kind).len()
    }

    /// Records of `kind` named `name`, in discovery order.
    pub fn named(&self, kind: EntityKind, name: &str) -> impl Iterator<Item = &'a RawTestRecord> + '_ {
        let records = self.records;
        self.positions_named(kind, name).iter().map(move |&p| &records[p])
    }

    pub fn contains(&self, kind: EntityKind, name: &str) -> bool {
        !self.positions_named(kind, name).is_empty()
    }

    /// Records of `kind` whose name appears in `declared`.
    ///
    /// With `Discovery` order the result is exactly the kind's pool filtered
    /// by membership in `declared`. With `Declared` order the names are walked
    /// in declaration order, each distinct name once; records sharing a name
    /// keep discovery order among themselves.
    ///
    /// 返回名称出现在 `declared` 中的 `kind` 类型记录。
    pub fn resolve(
        &self,
        kind: EntityKind,
        declared: &[String],
        order: AttachmentOrder,
    ) -> Vec<&'a RawTestRecord> {
        let mut seen = HashSet::new();
        let unique_names = declared.iter().filter(|name| seen.insert(name.as_str()));

        let mut positions: Vec<usize> = unique_names
            .flat_map(|name| self.positions_named(kind, name).iter().copied())
            .collect();
        if order == AttachmentOrder::Discovery {
            positions.sort_unstable();
        }
        let records = self.records;
        positions.into_iter().map(|p| &records[p]).collect()
    }

    /// Names used by more than one record of the same kind, sorted by kind then name.
    pub fn collisions(&self) -> Vec<NameCollision<'a>> {
        let mut sorted: BTreeMap<(EntityKind, &'a str), usize> = BTreeMap::new();
        for (kind, names) in &self.by_name {
            for (name, positions) in names {
                if positions.len() > 1 {
                    sorted.insert((*kind, *name), positions.len());
                }
            }
        }
        sorted
            .into_iter()
            .map(|((kind, name), count)| NameCollision { kind, name, count })
            .collect()
    }

    /// Number of records no predicate matched.
    pub fn unclassified(&self) -> usize {
        self.unclassified
    }

    pub fn total(&self) -> usize {
        self.records.len()
    }

    fn positions_of_kind(&self, kind: EntityKind) -> &[usize] {
        self.by_kind.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    fn positions_named(&self, kind: EntityKind, name: &str) -> &[usize] {
        self.by_name
            .get(&kind)
            .and_then(|names| names.get(name))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
