//! # Inspect Command Module / 检查命令模块
//!
//! This module implements the `inspect` command, which builds the entity graph
//! and prints it as a tree followed by a summary.
//!
//! 此模块实现 `inspect` 命令：构建实体图，并以树形结构打印，随后打印摘要。

use anyhow::Result;

use crate::cli::ConfigSource;
use crate::cli::commands::{build_graph, resolve_config};
use crate::infra::diagnostics::Level;
use crate::reporting::{print_summary, print_tree};

/// Executes the inspect command.
///
/// # Arguments
/// * `source` - Configuration file and overrides from the command line
/// * `verbose` - Also print informational diagnostics
pub fn execute(source: &ConfigSource, verbose: bool) -> Result<()> {
    let config = resolve_config(source)?;
    let min_level = if verbose { Level::Info } else { Level::Warn };
    let manager = build_graph(&config, min_level)?;

    print_tree(&manager, &config.language);
    print_summary(&manager.summary(), &config.language);
    Ok(())
}
