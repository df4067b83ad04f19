//! # Console Reporting Module / 控制台报告模块
//!
//! This module renders a built entity graph in the console: a colored tree of
//! top-level entities and their resolved children, followed by a summary.
//!
//! 此模块在控制台中渲染已构建的实体图：
//! 一棵彩色的顶层实体及其已解析子实体的树，随后是摘要。

use crate::core::manager::{EntityManager, GraphSummary};
use crate::core::models::{Entity, FunctionalSuite, PerformanceSuite};
use crate::infra::t;
use colored::*;
use std::fmt::Write;

/// Renders the entity tree as text.
///
/// 将实体树渲染为文本。
///
/// # Output Format / 输出格式
/// ```text
/// [fixture] database
/// [performance run] checkout-load
/// [functional suite] smoke
///   - [functional test] login
/// [performance suite] nightly
///   - [performance pattern] ramp-up
///     - [performance run] checkout-load
/// ```
pub fn render_tree(manager: &EntityManager, locale: &str) -> String {
    let mut out = String::new();
    for entity in manager.entities() {
        match entity {
            Entity::FunctionalSuite(suite) => render_functional_suite(&mut out, suite, locale),
            Entity::PerformanceSuite(suite) => render_performance_suite(&mut out, suite, locale),
            Entity::Fixture(e) => line(&mut out, 0, "fixture".blue(), &e.name),
            Entity::PerformanceRun(e) => line(&mut out, 0, "performance run".magenta(), &e.name),
            Entity::FunctionalTest(e) => line(&mut out, 0, "functional test".green(), &e.name),
            Entity::PerformancePattern(e) => {
                line(&mut out, 0, "performance pattern".yellow(), &e.name)
            }
        }
    }
    out
}

/// Renders a single functional suite with its tests.
pub fn render_functional_suite(out: &mut String, suite: &FunctionalSuite, locale: &str) {
    line(out, 0, "functional suite".cyan().bold(), &suite.name);
    if suite.tests.is_empty() {
        placeholder(out, 1, &t!("report.no_tests", locale = locale));
    }
    for test in &suite.tests {
        line(out, 1, "functional test".green(), &test.name);
    }
}

fn render_performance_suite(out: &mut String, suite: &PerformanceSuite, locale: &str) {
    line(out, 0, "performance suite".cyan().bold(), &suite.name);
    if suite.patterns.is_empty() {
        placeholder(out, 1, &t!("report.no_patterns", locale = locale));
    }
    for pattern in &suite.patterns {
        line(out, 1, "performance pattern".yellow(), &pattern.name);
        if pattern.runs.is_empty() {
            placeholder(out, 2, &t!("report.no_runs", locale = locale));
        }
        for run in &pattern.runs {
            line(out, 2, "performance run".magenta(), &run.name);
        }
    }
}

fn line(out: &mut String, depth: usize, tag: ColoredString, name: &str) {
    let indent = "  ".repeat(depth);
    let bullet = if depth == 0 { "" } else { "- " };
    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}{}[{}] {}", indent, bullet, tag, name);
}

fn placeholder(out: &mut String, depth: usize, text: &str) {
    let _ = writeln!(out, "{}- {}", "  ".repeat(depth), text.dimmed());
}

/// Prints the entity tree, or a notice when the graph is empty.
///
/// 打印实体树；若实体图为空则打印提示。
pub fn print_tree(manager: &EntityManager, locale: &str) {
    println!("\n{}", t!("report.tree_banner", locale = locale).bold());
    if manager.is_empty() {
        println!("{}", t!("report.empty_graph", locale = locale).yellow());
        return;
    }
    print!("{}", render_tree(manager, locale));
}

/// Prints per-kind counts.
///
/// 打印各类型计数。
pub fn print_summary(summary: &GraphSummary, locale: &str) {
    println!("\n{}", t!("report.summary_banner", locale = locale).bold());
    println!(
        "  - {}",
        t!(
            "report.records_line",
            locale = locale,
            records = summary.records,
            unclassified = summary.unclassified
        )
    );
    println!(
        "  - {}",
        t!("report.fixtures_line", locale = locale, count = summary.fixtures)
    );
    println!(
        "  - {}",
        t!("report.runs_line", locale = locale, count = summary.performance_runs)
    );
    println!(
        "  - {}",
        t!(
            "report.functional_line",
            locale = locale,
            suites = summary.functional_suites,
            tests = summary.attached_tests
        )
    );
    if summary.standalone_tests > 0 {
        println!(
            "  - {}",
            t!("report.standalone_line", locale = locale, count = summary.standalone_tests)
        );
    }
    println!(
        "  - {}",
        t!(
            "report.performance_line",
            locale = locale,
            suites = summary.performance_suites,
            patterns = summary.attached_patterns,
            runs = summary.attached_runs
        )
    );
}
