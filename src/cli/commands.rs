//! # Commands Module / 命令模块
//!
//! Each subcommand of the `suite-graph` CLI lives in its own submodule.
//! The helpers here turn command-line arguments into a `GraphConfig` and
//! build the entity graph from it.
//!
//! `suite-graph` CLI 的每个子命令都位于各自的子模块中。
//! 这里的辅助函数将命令行参数转换为 `GraphConfig` 并据此构建实体图。

use anyhow::{Context, Result};
use colored::*;
use std::path::Path;
use std::sync::Arc;

use crate::cli::ConfigSource;
use crate::core::config::{load_graph_config, GraphConfig, DEFAULT_CONFIG_FILE};
use crate::core::manager::EntityManager;
use crate::infra::diagnostics::{ConsoleSink, Level};
use crate::infra::t;

pub mod find_suite;
pub mod init;
pub mod inspect;

/// Resolves the configuration for a command.
///
/// An explicit `--config` must exist. Without one, `SuiteGraph.toml` in the
/// current directory is used when present, defaults otherwise. `--tests-dir`
/// replaces `tests_dir_path`, and `--lang` wins over the configured language.
///
/// 解析命令所用的配置。
/// 显式指定的 `--config` 必须存在。未指定时，若当前目录存在 `SuiteGraph.toml` 则使用它，
/// 否则使用默认配置。`--tests-dir` 会替换 `tests_dir_path`，`--lang` 优先于配置的语言。
pub fn resolve_config(source: &ConfigSource) -> Result<GraphConfig> {
    let mut config = match &source.config {
        Some(path) => load_graph_config(path)?,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.exists() {
                load_graph_config(default_path)?
            } else {
                println!(
                    "{}",
                    t!("cli.config_not_found", path = default_path.display()).dimmed()
                );
                GraphConfig::default()
            }
        }
    };

    if let Some(dir) = &source.tests_dir {
        config.tests_dir_path = dir.to_string_lossy().into_owned();
    }
    match &source.lang {
        Some(lang) => config.language = lang.clone(),
        None => crate::set_language(&config.language),
    }
    Ok(config)
}

/// Builds the graph, printing diagnostics at or above `min_level` to the console.
pub fn build_graph(config: &GraphConfig, min_level: Level) -> Result<EntityManager> {
    let locale = config.language.as_str();
    let tests_dir = config.tests_dir()?;
    println!(
        "{}",
        t!("cli.loading_definitions", locale = locale, path = tests_dir.display()).cyan()
    );

    EntityManager::load(config, Arc::new(ConsoleSink::new(min_level)))
        .with_context(|| t!("cli.build_failed", locale = locale).to_string())
}
