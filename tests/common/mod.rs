// Shared test helpers for integration tests
#![allow(dead_code)]

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use suite_graph::config::GraphConfig;
use suite_graph::diagnostics::MemorySink;
use suite_graph::EntityManager;
use tempfile::{tempdir, TempDir};

/// A temporary definitions directory that is deleted when dropped.
pub struct DefinitionDir {
    dir: TempDir,
}

impl DefinitionDir {
    pub fn new() -> Self {
        Self {
            dir: tempdir().expect("Failed to create temporary directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `value` as pretty JSON to `relative`, creating parent directories.
    pub fn write_json(&self, relative: &str, value: Value) -> PathBuf {
        let content = serde_json::to_string_pretty(&value).expect("Failed to serialize definition");
        self.write_raw(relative, &content)
    }

    pub fn write_raw(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.dir.path().join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create definition directory");
        }
        fs::write(&path, content).expect("Failed to write definition file");
        path
    }

    pub fn config(&self) -> GraphConfig {
        GraphConfig::for_dir(self.path())
    }

    /// Builds a manager with default settings and returns it with its event sink.
    pub fn load(&self) -> (EntityManager, Arc<MemorySink>) {
        self.load_with(self.config())
    }

    pub fn load_with(&self, config: GraphConfig) -> (EntityManager, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let manager = EntityManager::load(&config, sink.clone()).expect("Failed to build graph");
        (manager, sink)
    }
}

/// A small corpus touching every entity kind:
///
/// ```text
/// fixtures/database.json          fixture
/// functional/login.json           test
/// functional/logout.json          test
/// functional/search.json          test
/// functional/smoke.json           suite -> [search, login]
/// performance/checkout.json       perfRun
/// performance/browse.json         perfRun
/// performance/ramp.json           perfPattern -> [checkout, browse]
/// performance/nightly.json        perfSuite -> [ramp]
/// README.json                     (no discriminator)
/// ```
pub fn write_full_corpus(dir: &DefinitionDir) {
    use serde_json::json;
    dir.write_json("fixtures/database.json", json!({ "type": "fixture", "url": "postgres://localhost" }));
    dir.write_json("functional/login.json", json!({ "type": "test", "steps": ["open", "submit"] }));
    dir.write_json("functional/logout.json", json!({ "type": "test" }));
    dir.write_json("functional/search.json", json!({ "type": "test", "query": "rust" }));
    dir.write_json(
        "functional/smoke.json",
        json!({ "type": "suite", "owner": "qa", "tests": ["search", "login"] }),
    );
    dir.write_json("performance/checkout.json", json!({ "type": "perfRun", "users": 50 }));
    dir.write_json("performance/browse.json", json!({ "type": "perfRun", "users": 200 }));
    dir.write_json(
        "performance/ramp.json",
        json!({ "type": "perfPattern", "runs": ["checkout", "browse"] }),
    );
    dir.write_json("performance/nightly.json", json!({ "type": "perfSuite", "patterns": ["ramp"] }));
    dir.write_json("README.json", json!({ "description": "not a definition" }));
}
