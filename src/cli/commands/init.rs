//! # Init Command Module / 初始化命令模块
//!
//! This module implements the `init` command for the Suite Graph CLI,
//! which creates a new `SuiteGraph.toml` configuration file.
//!
//! 此模块实现了 Suite Graph CLI 的 `init` 命令，
//! 用于创建新的 `SuiteGraph.toml` 配置文件。

use anyhow::{Context, Result};
use colored::*;
use std::{fs, path::Path};
use crate::infra::t;

pub const DEFAULT_CONFIG: &str = r#"# Suite Graph Configuration / Suite Graph 配置

# Language for output messages / 输出消息的语言
language = "en"

# Directory scanned recursively for definition files; relative to this file.
# 递归扫描定义文件的目录；相对于此文件。
tests_dir_path = "tests/definitions"

# Definition file extensions ("json" and/or "toml") / 定义文件扩展名（"json" 和/或 "toml"）
extensions = ["json"]

# Append functional tests that no suite references as top-level entities.
# 将未被任何测试套件引用的功能测试作为顶层实体追加。
include_standalone_tests = false

# Order of resolved children: "discovery" (file order) or "declared" (reference order).
# 已解析子实体的顺序："discovery"（文件顺序）或 "declared"（引用声明顺序）。
attachment_order = "discovery"
"#;

/// Executes the init command with the provided arguments.
///
/// # Arguments
/// * `output` - Path for the new configuration file
/// * `force` - Whether to overwrite an existing file
/// * `locale` - Language for output messages
///
/// # Returns
/// A Result indicating success or failure of the command execution
pub fn execute(output: &Path, force: bool, locale: &str) -> Result<()> {
    // Check if file already exists
    if output.exists() && !force {
        println!(
            "{}",
            t!("init.file_exists", locale = locale, path = output.display()).red()
        );
        println!("{}", t!("init.use_force", locale = locale).yellow());
        return Ok(());
    }

    // Create parent directories if needed
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                t!("init.create_parent_dir_failed", locale = locale, path = parent.display())
                    .to_string()
            })?;
        }
    }

    fs::write(output, DEFAULT_CONFIG).with_context(|| {
        t!("init.write_failed", locale = locale, path = output.display()).to_string()
    })?;

    println!(
        "{}",
        t!("init.success", locale = locale, path = output.display()).green()
    );
    println!("{}", t!("init.next_steps", locale = locale));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::{GraphConfig, AttachmentOrder};

    #[test]
    fn default_config_parses_to_defaults() {
        let config: GraphConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config, GraphConfig::default());
        assert_eq!(config.attachment_order, AttachmentOrder::Discovery);
    }
}
