//! # Core Module / 核心模块
//!
//! This module contains the core functionality of Suite Graph:
//! the data models, the loader and classifier, reference resolution,
//! and the entity manager that ties them together.
//!
//! 此模块包含 Suite Graph 的核心功能：
//! 数据模型、加载器与分类器、引用解析，以及将它们串联起来的实体管理器。

pub mod classifier;
pub mod config;
pub mod index;
pub mod loader;
pub mod manager;
pub mod models;
pub mod resolver;

// Re-exports
pub use config::GraphConfig;
pub use loader::LoadError;
pub use manager::{EntityManager, GraphSummary};
pub use models::{Entity, EntityKind, TestEntity};
