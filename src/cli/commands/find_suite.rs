//! # Find Suite Command Module / 查找套件命令模块
//!
//! This module implements the `find-suite` command, a thin wrapper over
//! `EntityManager::functional_suite_by`.
//!
//! 此模块实现 `find-suite` 命令，是对 `EntityManager::functional_suite_by` 的简单封装。

use anyhow::{bail, Result};
use colored::*;
use serde_json::Value;

use crate::cli::ConfigSource;
use crate::cli::commands::{build_graph, resolve_config};
use crate::infra::diagnostics::Level;
use crate::infra::t;
use crate::reporting::console::render_functional_suite;

/// Parses a command-line value: JSON when it parses, a plain string otherwise.
///
/// `--value 3` compares against the number 3, `--value smoke` against the string "smoke".
pub fn parse_query_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Executes the find-suite command. Fails when no suite matches.
pub fn execute(source: &ConfigSource, field: &str, raw_value: &str) -> Result<()> {
    let config = resolve_config(source)?;
    let locale = config.language.as_str();
    let manager = build_graph(&config, Level::Warn)?;
    let value = parse_query_value(raw_value);

    let Some(suite) = manager.functional_suite_by(field, &value) else {
        bail!(
            "{}",
            t!("report.suite_not_found", locale = locale, field = field, value = value)
        );
    };

    println!(
        "{}",
        t!(
            "report.suite_found",
            locale = locale,
            name = suite.name,
            path = suite.path.display()
        )
        .green()
    );
    let mut out = String::new();
    render_functional_suite(&mut out, suite, locale);
    print!("{}", out);
    Ok(())
}
