//! Test context and harness for integration testing
//!
//! A `TestContext` owns a temporary directory and, when built from a
//! [`ConfigBuilder`], the configuration and roots living inside it.

use crate::config_builder::ConfigBuilder;
use anyhow::Result;
use shared_config::config::{Config, ResolvedRoots};
use shared_config::managers::items::ItemManager;
use shared_config::merge::ConfigValue;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestContext {
    temp_dir: TempDir,
    setup: Option<(Config, ResolvedRoots)>,
}

impl TestContext {
    /// Empty temporary directory, no configuration
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp dir"),
            setup: None,
        }
    }

    /// Take over the builder's temp directory, config and roots
    pub fn from_builder(builder: ConfigBuilder) -> Self {
        let roots = builder.roots();
        let (config, temp_dir) = builder.persist();

        Self {
            temp_dir,
            setup: Some((config, roots)),
        }
    }

    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn config(&self) -> Option<&Config> {
        self.setup.as_ref().map(|(config, _)| config)
    }

    pub fn roots(&self) -> Option<&ResolvedRoots> {
        self.setup.as_ref().map(|(_, roots)| roots)
    }

    /// Item manager over the real filesystem
    ///
    /// Panics when the context was created without a configuration.
    pub fn manager(&self) -> ItemManager {
        let (config, roots) = self
            .setup
            .clone()
            .expect("TestContext has no configuration; use from_builder");
        ItemManager::new(config, roots)
    }

    pub fn create_subdir(&self, name: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::create_dir_all(&path).expect("Failed to create subdirectory");
        path
    }

    /// Write a file, creating parent directories
    pub fn create_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write file");
        path
    }

    pub fn create_json(&self, name: &str, value: &ConfigValue) -> PathBuf {
        let content = serde_json::to_string_pretty(value).expect("Failed to serialize JSON");
        self.create_file(name, &content)
    }

    pub fn read_json(&self, name: &str) -> Result<ConfigValue> {
        let contents = fs::read_to_string(self.temp_dir.path().join(name))?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Assertion helpers for `Result`
pub trait ResultAssertions<T> {
    /// Unwrap Ok, panicking with the error's debug output
    fn assert_ok(self) -> T;

    fn assert_ok_msg(self, msg: &str) -> T;

    /// Expect Err whose debug output (including any context chain) contains `needle`
    fn assert_err_contains(self, needle: &str);
}

impl<T: std::fmt::Debug, E: std::fmt::Debug> ResultAssertions<T> for Result<T, E> {
    fn assert_ok(self) -> T {
        self.assert_ok_msg("Expected Ok")
    }

    fn assert_ok_msg(self, msg: &str) -> T {
        match self {
            Ok(v) => v,
            Err(e) => panic!("{}, got Err: {:?}", msg, e),
        }
    }

    fn assert_err_contains(self, needle: &str) {
        match self {
            Ok(v) => panic!("Expected Err containing '{}', got Ok: {:?}", needle, v),
            Err(e) => {
                let err_msg = format!("{:?}", e);
                assert!(
                    err_msg.contains(needle),
                    "Error '{}' does not contain '{}'",
                    err_msg,
                    needle
                );
            }
        }
    }
}
