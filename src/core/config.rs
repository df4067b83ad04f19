//! # Configuration Module / 配置模块
//!
//! This module defines the settings the graph is built from, loaded from a
//! `SuiteGraph.toml` file or constructed in code.
//!
//! 此模块定义构建实体图所需的设置，可从 `SuiteGraph.toml` 文件加载，也可在代码中构造。

use crate::core::loader::DefinitionFormat;
use crate::infra::fs::{expand_path, resolve_against};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up when no configuration path is given.
pub const DEFAULT_CONFIG_FILE: &str = "SuiteGraph.toml";

/// How resolved children are ordered inside their container.
/// 已解析的子实体在容器内的排序方式。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AttachmentOrder {
    /// Children follow file-discovery order of the referenced records.
    /// 子实体按被引用记录的文件发现顺序排列。
    #[default]
    Discovery,
    /// Children follow the order the container declares them in.
    /// 子实体按容器声明的顺序排列。
    Declared,
}

/// Settings for building an entity graph.
///
/// 构建实体图的设置。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GraphConfig {
    /// The language for the tool's output messages (e.g., "en", "zh-CN").
    /// Defaults to "en" if not specified.
    ///
    /// 工具输出消息的语言（例如 "en", "zh-CN"）。
    /// 如果未指定，则默认为 "en"。
    #[serde(default = "default_language")]
    pub language: String,

    /// Root directory scanned for definition files. `~` and `$VAR` are expanded.
    /// 扫描定义文件的根目录。会展开 `~` 和 `$VAR`。
    #[serde(default = "default_tests_dir_path")]
    pub tests_dir_path: String,

    /// File extensions treated as definition files.
    /// 被视为定义文件的文件扩展名。
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Append functional tests that no suite references as top-level entities.
    /// 将未被任何测试套件引用的功能测试作为顶层实体追加。
    #[serde(default)]
    pub include_standalone_tests: bool,

    /// Ordering of resolved children.
    /// 已解析子实体的排序方式。
    #[serde(default)]
    pub attachment_order: AttachmentOrder,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
            tests_dir_path: default_tests_dir_path(),
            extensions: default_extensions(),
            include_standalone_tests: false,
            attachment_order: AttachmentOrder::default(),
        }
    }
}

fn default_language() -> String {
    "en".to_string()
}

fn default_tests_dir_path() -> String {
    "tests/definitions".to_string()
}

fn default_extensions() -> Vec<String> {
    vec!["json".to_string()]
}

impl GraphConfig {
    /// A default configuration rooted at `dir`.
    pub fn for_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            tests_dir_path: dir.as_ref().to_string_lossy().into_owned(),
            ..Self::default()
        }
    }

    /// Rejects configurations the loader could not honor.
    pub fn validate(&self) -> Result<()> {
        if self.extensions.is_empty() {
            bail!("At least one definition file extension must be configured.");
        }
        for ext in &self.extensions {
            if DefinitionFormat::from_extension(ext).is_none() {
                bail!(
                    "Unsupported definition file extension '{}'; expected 'json' or 'toml'.",
                    ext
                );
            }
        }
        Ok(())
    }

    /// The definitions root with `~` and environment variables expanded.
    pub fn tests_dir(&self) -> Result<PathBuf> {
        expand_path(&self.tests_dir_path)
    }
}

/// Loads and validates a `GraphConfig` from a TOML file.
///
/// A relative `tests_dir_path` is resolved against the directory holding the
/// configuration file, so the file works regardless of the caller's cwd.
///
/// 从 TOML 文件加载并校验 `GraphConfig`。
/// 相对的 `tests_dir_path` 会相对于配置文件所在目录进行解析。
pub fn load_graph_config(path: &Path) -> Result<GraphConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    let mut config: GraphConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
    config.validate()?;

    let tests_dir = config.tests_dir()?;
    if let Some(base) = path.parent() {
        config.tests_dir_path = resolve_against(base, &tests_dir)
            .to_string_lossy()
            .into_owned();
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let config: GraphConfig = toml::from_str("").unwrap();
        assert_eq!(config, GraphConfig::default());
    }

    #[test]
    fn attachment_order_is_lowercase_in_toml() {
        let config: GraphConfig = toml::from_str("attachment_order = \"declared\"").unwrap();
        assert_eq!(config.attachment_order, AttachmentOrder::Declared);
    }

    #[test]
    fn validate_rejects_unknown_extensions() {
        let mut config = GraphConfig::default();
        config.extensions = vec!["yaml".to_string()];
        assert!(config.validate().is_err());
        config.extensions.clear();
        assert!(config.validate().is_err());
        config.extensions = vec!["json".to_string(), "TOML".to_string()];
        assert!(config.validate().is_ok());
    }
}
