//! # Test File Loader Module / 测试文件加载模块
//!
//! This module discovers definition files under a root directory and parses
//! each of them into a `RawTestRecord`. Any failure here is fatal: the graph
//! is never built from a partially loaded directory.
//!
//! 此模块在根目录下发现定义文件，并将每个文件解析为 `RawTestRecord`。
//! 这里的任何失败都是致命的：实体图永远不会基于部分加载的目录构建。

use crate::core::models::{DefinitionConfig, RawTestRecord};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors that abort graph construction.
/// 中止实体图构建的错误。
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid graph configuration: {reason}")]
    InvalidConfig { reason: String },
    #[error("definitions root '{raw}' cannot be resolved: {reason}")]
    InvalidRoot { raw: String, reason: String },
    #[error("definitions directory '{}' is not accessible: {source}", .path.display())]
    RootInaccessible {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("definitions root '{}' is not a directory", .path.display())]
    RootNotADirectory { path: PathBuf },
    #[error("failed to walk definitions directory: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("failed to read definition file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed JSON in '{}': {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed TOML in '{}': {source}", .path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("definition file '{}' does not contain a mapping", .path.display())]
    NotAMapping { path: PathBuf },
    #[error("no parser for definition file '{}'", .path.display())]
    UnsupportedFormat { path: PathBuf },
}

/// Structured formats a definition file may be written in.
/// 定义文件可使用的结构化格式。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionFormat {
    Json,
    Toml,
}

impl DefinitionFormat {
    /// Picks the format from a file extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "json" => Some(DefinitionFormat::Json),
            "toml" => Some(DefinitionFormat::Toml),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    fn parse(self, path: &Path, source: &str) -> Result<Value, LoadError> {
        match self {
            DefinitionFormat::Json => serde_json::from_str(source).map_err(|e| LoadError::Json {
                path: path.to_path_buf(),
                source: e,
            }),
            DefinitionFormat::Toml => toml::from_str(source).map_err(|e| LoadError::Toml {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }
}

/// Recursively scans `root` for files whose extension is in `extensions`.
///
/// Directory entries are visited in file-name order at every level, so the
/// returned list is deterministic. Paths are absolute. Symbolic links are
/// followed; a link cycle is a `LoadError::Walk`.
///
/// 递归扫描 `root`，查找扩展名属于 `extensions` 的文件。
/// 每一层目录的条目都按文件名顺序访问，因此返回的列表是确定的。路径均为绝对路径。
/// 会跟随符号链接；链接循环会返回 `LoadError::Walk`。
pub fn discover_definition_files<P: AsRef<Path>>(
    root: P,
    extensions: &[String],
) -> Result<Vec<PathBuf>, LoadError> {
    let root = root.as_ref();
    let root = fs::canonicalize(root).map_err(|e| LoadError::RootInaccessible {
        path: root.to_path_buf(),
        source: e,
    })?;
    if !root.is_dir() {
        return Err(LoadError::RootNotADirectory { path: root });
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(&root).follow_links(true).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        if !has_extension(entry.path(), extensions) {
            continue;
        }
        files.push(entry.into_path());
    }
    Ok(files)
}

/// Loads and parses a single definition file.
///
/// The record name is the file stem; the path is kept as given.
///
/// 加载并解析单个定义文件。记录名称为文件名主干；路径保持原样。
pub fn load_record(path: &Path) -> Result<RawTestRecord, LoadError> {
    let format =
        DefinitionFormat::from_path(path).ok_or_else(|| LoadError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
    let source = fs::read_to_string(path).map_err(|e| LoadError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let config = into_mapping(path, format.parse(path, &source)?)?;
    let name = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(RawTestRecord::new(name, path, config))
}

/// Discovers and loads every definition file under `root`, in discovery order.
///
/// 发现并加载 `root` 下的所有定义文件，保持发现顺序。
pub fn load_records<P: AsRef<Path>>(
    root: P,
    extensions: &[String],
) -> Result<Vec<RawTestRecord>, LoadError> {
    discover_definition_files(root, extensions)?
        .iter()
        .map(|path| load_record(path))
        .collect()
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

fn into_mapping(path: &Path, value: Value) -> Result<DefinitionConfig, LoadError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(LoadError::NotAMapping {
            path: path.to_path_buf(),
        }),
    }
}
