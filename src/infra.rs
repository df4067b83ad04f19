//! # Infrastructure Module / 基础设施模块
//!
//! This module provides infrastructure services for Suite Graph,
//! including the diagnostics port, file system helpers, and i18n support.
//!
//! 此模块为 Suite Graph 提供基础设施服务，
//! 包括诊断端口、文件系统辅助功能和国际化支持。

pub mod diagnostics;
pub mod fs;

// Re-export i18n functions for easier access
pub use rust_i18n::t;
