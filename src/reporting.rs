//! # Reporting Module / 报告模块
//!
//! This module handles the display of a built entity graph in the console,
//! with colored output and internationalization support.
//!
//! 此模块处理已构建实体图在控制台中的显示，支持彩色输出和国际化。

pub mod console;

// Re-export common reporting functions
pub use console::{print_summary, print_tree, render_tree};
