#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Creates an `assert_cmd` Command for the inseki binary.
#[macro_export]
macro_rules! inseki {
    () => {
        assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("inseki"))
    };
}

/// Template from scenario A: `src/main.c` required, `README` optional.
pub const T1_PROJECT: &str = r#"{
  "name": "*",
  "isDirectory": true,
  "children": [
    { "name": "src", "isDirectory": true, "children": [
      { "name": "main.c", "isDirectory": false }
    ] },
    { "name": "README", "isDirectory": false, "optional": true }
  ]
}"#;

pub const T2_MAIN: &str = r#"{
  "name": "*",
  "isDirectory": true,
  "children": [ { "name": "main.c", "isDirectory": false } ]
}"#;

pub const T3_MAKE: &str = r#"{
  "name": "*",
  "isDirectory": true,
  "children": [
    { "name": "main.c", "isDirectory": false },
    { "name": "Makefile", "isDirectory": false }
  ]
}"#;

/// A temp directory split into a template library and a tree to scan.
pub struct TestFixture {
    pub dir: TempDir,
}

impl TestFixture {
    pub fn new() -> Self {
        let fixture = Self {
            dir: TempDir::new().expect("Failed to create temp directory"),
        };
        fixture.create_dir("structures");
        fixture.create_dir("tree");
        fixture
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn structures(&self) -> PathBuf {
        self.path().join("structures")
    }

    pub fn tree(&self) -> PathBuf {
        self.path().join("tree")
    }

    pub fn ignore_file(&self) -> PathBuf {
        self.path().join(".insekiignore")
    }

    /// Creates a file with the given content relative to the fixture root.
    pub fn create_file(&self, relative_path: &str, content: &str) {
        let path = self.path().join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&path, content).expect("Failed to write file");
    }

    pub fn create_dir(&self, relative_path: &str) {
        fs::create_dir_all(self.path().join(relative_path)).expect("Failed to create directory");
    }

    /// Adds `structures/<name>.json`.
    pub fn add_template(&self, name: &str, json: &str) {
        self.create_file(&format!("structures/{name}.json"), json);
    }

    /// Creates empty files below `tree/`.
    pub fn touch_tree(&self, relative_paths: &[&str]) {
        for rel in relative_paths {
            self.create_file(&format!("tree/{rel}"), "");
        }
    }

    pub fn write_ignore(&self, names: &[&str]) {
        self.create_file(".insekiignore", &(names.join("\n") + "\n"));
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}
