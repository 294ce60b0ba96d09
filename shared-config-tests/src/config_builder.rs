//! Fluent API for building test configurations
//!
//! Provides a builder pattern for creating test configurations backed by a
//! temporary backup root with a machine folder and a shared folder.

use shared_config::config::{Config, GlobalConfig, ItemConfig, ResolvedRoots};
use shared_config::merge::Mapping;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Machine name used by every builder unless overridden
pub const TEST_MACHINE: &str = "TEST-PC";

/// Builder for creating test configurations
pub struct ConfigBuilder {
    temp_dir: TempDir,
    global: GlobalConfig,
    items: HashMap<String, ItemConfig>,
}

impl ConfigBuilder {
    /// Create a new ConfigBuilder with a backup root but no folders inside it
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let backup_root = temp_dir.path().join("backups");
        fs::create_dir_all(&backup_root).expect("Failed to create backup_root");

        let log_directory = temp_dir.path().join("logs");
        fs::create_dir_all(&log_directory).expect("Failed to create log_directory");

        let global = GlobalConfig {
            backup_root: Some(backup_root),
            machine_name: Some(TEST_MACHINE.to_string()),
            shared_dir_name: "shared".to_string(),
            machine_root: None,
            shared_root: None,
            log_directory,
            log_level: "debug".to_string(),
            log_max_files: 5,
        };

        Self {
            temp_dir,
            global,
            items: HashMap::new(),
        }
    }

    /// Create a config whose machine and shared folders both exist
    pub fn minimal() -> Self {
        let builder = Self::new();
        fs::create_dir_all(builder.machine_root()).expect("Failed to create machine root");
        fs::create_dir_all(builder.shared_root()).expect("Failed to create shared root");
        builder
    }

    /// Set the machine name
    pub fn with_machine_name(mut self, name: &str) -> Self {
        self.global.machine_name = Some(name.to_string());
        self
    }

    /// Use explicit roots instead of deriving them from backup_root
    pub fn with_explicit_roots(mut self, machine_root: &Path, shared_root: &Path) -> Self {
        self.global.machine_root = Some(machine_root.to_path_buf());
        self.global.shared_root = Some(shared_root.to_path_buf());
        self
    }

    /// Add a simple item
    pub fn add_item(self, name: &str, path: &str) -> Self {
        self.add_item_config(name, item(name, path, true, false, Mapping::new()))
    }

    /// Add an item with default values
    pub fn add_item_with_defaults(self, name: &str, path: &str, defaults: Mapping) -> Self {
        self.add_item_config(name, item(name, path, true, false, defaults))
    }

    /// Add an item that must exist under one of the roots
    pub fn add_required_item(self, name: &str, path: &str) -> Self {
        self.add_item_config(name, item(name, path, true, true, Mapping::new()))
    }

    /// Add a disabled item
    pub fn add_disabled_item(self, name: &str, path: &str) -> Self {
        self.add_item_config(name, item(name, path, false, false, Mapping::new()))
    }

    /// Add an item with full configuration
    pub fn add_item_config(mut self, name: &str, config: ItemConfig) -> Self {
        self.items.insert(name.to_string(), config);
        self
    }

    /// Get the temp directory path
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Machine root as derived from the current settings
    pub fn machine_root(&self) -> PathBuf {
        match (&self.global.machine_root, &self.global.backup_root) {
            (Some(explicit), _) => explicit.clone(),
            (None, Some(root)) => root.join(self.global.machine_name.as_deref().unwrap_or(TEST_MACHINE)),
            (None, None) => self.temp_dir.path().join(TEST_MACHINE),
        }
    }

    /// Shared root as derived from the current settings
    pub fn shared_root(&self) -> PathBuf {
        match (&self.global.shared_root, &self.global.backup_root) {
            (Some(explicit), _) => explicit.clone(),
            (None, Some(root)) => root.join(&self.global.shared_dir_name),
            (None, None) => self.temp_dir.path().join("shared"),
        }
    }

    /// Roots matching the current settings
    pub fn roots(&self) -> ResolvedRoots {
        ResolvedRoots {
            machine_name: self.global.machine_name.clone(),
            machine_root: self.machine_root(),
            shared_root: self.shared_root(),
        }
    }

    /// Write a file under the machine root
    pub fn write_machine_file(&self, relative: &str, content: &str) -> PathBuf {
        write_file(&self.machine_root().join(relative), content)
    }

    /// Write a file under the shared root
    pub fn write_shared_file(&self, relative: &str, content: &str) -> PathBuf {
        write_file(&self.shared_root().join(relative), content)
    }

    /// Build the Config
    pub fn build(self) -> Config {
        Config {
            global: self.global,
            items: self.items,
        }
    }

    /// Keep the temp directory (don't delete on drop)
    pub fn persist(self) -> (Config, TempDir) {
        let config = Config {
            global: self.global,
            items: self.items,
        };
        (config, self.temp_dir)
    }

    /// Write the config as TOML into the temp directory
    pub fn persist_to_file(self) -> (PathBuf, Config, TempDir) {
        let (config, temp_dir) = self.persist();
        let path = temp_dir.path().join("shared-config.toml");
        let contents = toml::to_string_pretty(&config).expect("Failed to serialize config");
        fs::write(&path, contents).expect("Failed to write config file");
        (path, config, temp_dir)
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn item(name: &str, path: &str, enabled: bool, required: bool, defaults: Mapping) -> ItemConfig {
    ItemConfig {
        path: path.to_string(),
        description: format!("Test item: {}", name),
        enabled,
        required,
        defaults,
    }
}

fn write_file(path: &Path, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent directory");
    }
    fs::write(path, content).expect("Failed to write file");
    path.to_path_buf()
}
