//! # Suite Graph Library / Suite Graph 库
//!
//! This library discovers test-definition files on disk, classifies each one
//! into a fixture, functional test, functional suite, performance run,
//! performance pattern or performance suite, resolves the named references
//! between them, and exposes the result as a queryable in-memory graph for
//! test execution engines.
//!
//! 此库在磁盘上发现测试定义文件，将每个文件分类为 fixture、功能测试、功能测试套件、
//! 性能运行、性能模式或性能测试套件，解析它们之间的命名引用，
//! 并将结果作为可查询的内存图提供给测试执行引擎。
//!
//! ## Modules / 模块
//!
//! - `core` - Data models, loading, classification, resolution and the entity manager
//! - `infra` - Infrastructure services like diagnostics and file system helpers
//! - `reporting` - Console rendering of a built graph
//! - `cli` - Command-line interface and commands
//!
//! - `core` - 数据模型、加载、分类、解析以及实体管理器
//! - `infra` - 基础设施服务，如诊断和文件系统辅助功能
//! - `reporting` - 已构建实体图的控制台渲染
//! - `cli` - 命令行接口和命令

pub mod cli;
pub mod core;
pub mod infra;
pub mod reporting;

// Re-export commonly used items
pub use crate::core::config;
pub use crate::core::manager::EntityManager;
pub use crate::core::models;
pub use crate::infra::diagnostics;

/// Initializes the application's internationalization (i18n) based on the system locale.
///
/// This function detects the user's system locale and sets the appropriate
/// language for the application's user interface. It attempts to match the full
/// locale (e.g., "zh-CN"), then just the language code (e.g., "en"), and
/// finally falls back to the default language ("en").
pub fn init() {
    let locale = sys_locale::get_locale().unwrap_or_else(|| "en".to_string());
    set_language(&locale);
}

/// Sets the output language, falling back to the language code and then to "en".
///
/// 设置输出语言，依次回退到语言代码和 "en"。
pub fn set_language(locale: &str) {
    let available_locales = rust_i18n::available_locales!();

    // Try to match the full locale first (e.g., "zh-CN")
    // Then try to match the language part only (e.g., "en" from "en-US")
    // Finally, fall back to "en"
    let lang = if available_locales.contains(&locale) {
        locale
    } else {
        locale
            .split('-')
            .next()
            .filter(|lang_code| available_locales.contains(lang_code))
            .unwrap_or("en")
    };

    rust_i18n::set_locale(lang);
}

// Initialize i18n
rust_i18n::i18n!("locales", fallback = "en");
