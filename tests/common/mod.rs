//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file, but they're shared across tests.
#![allow(dead_code)]

use std::path::PathBuf;

use vbump::Config;

/// A project directory with a VERSION file and a `build/` directory.
pub struct TestProject {
    pub dir: tempfile::TempDir,
}

impl TestProject {
    /// Create a project whose VERSION file holds `version`.
    pub fn new(version: &str) -> Self {
        let project = Self::without_build_dir(version);
        std::fs::create_dir(project.dir.path().join("build"))
            .expect("Failed to create build directory");
        project
    }

    /// Create a project with no `build/` directory.
    pub fn without_build_dir(version: &str) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        std::fs::write(dir.path().join("VERSION"), version).expect("Failed to write VERSION");
        Self { dir }
    }

    pub fn version_path(&self) -> PathBuf {
        self.dir.path().join("VERSION")
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.dir.path().join("build").join("latest.json")
    }

    pub fn lock_path(&self) -> PathBuf {
        self.dir.path().join("VERSION.lock")
    }

    /// Config pointing at this project with the default URL template.
    pub fn config(&self) -> Config {
        Config::with_paths(self.version_path(), self.manifest_path())
    }

    pub fn read_version(&self) -> String {
        std::fs::read_to_string(self.version_path()).expect("Failed to read VERSION")
    }

    pub fn read_manifest(&self) -> String {
        std::fs::read_to_string(self.manifest_path()).expect("Failed to read manifest")
    }

    /// Parse the manifest as untyped JSON.
    pub fn manifest_json(&self) -> serde_json::Value {
        serde_json::from_str(&self.read_manifest()).expect("Manifest is not valid JSON")
    }
}
