//! # File System Operations Module / 文件系统操作模块
//!
//! This module provides utilities for resolving user-supplied paths,
//! such as the definitions root directory.
//!
//! 此模块提供解析用户提供路径的实用功能，
//! 例如测试定义的根目录。

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Expands `~` and environment variables (`$VAR`, `${VAR}`) in a path string.
///
/// # Arguments
/// * `raw` - The path as written in configuration or on the command line
///
/// # Returns
/// The expanded path, or an error naming the variable that could not be resolved
pub fn expand_path(raw: &str) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw)
        .with_context(|| format!("Failed to expand path: {}", raw))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Resolves `path` against `base` when it is relative; absolute paths pass through.
pub fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
