use crate::merge::Mapping;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub global: GlobalConfig,
    #[serde(default)]
    pub items: HashMap<String, ItemConfig>,
}

/// Global configuration settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GlobalConfig {
    /// Directory holding one folder per machine plus the shared folder
    #[serde(default)]
    pub backup_root: Option<PathBuf>,

    /// Machine folder name (falls back to COMPUTERNAME / HOSTNAME)
    #[serde(default)]
    pub machine_name: Option<String>,

    /// Name of the shared folder under backup_root
    #[serde(default = "default_shared_dir_name")]
    pub shared_dir_name: String,

    /// Explicit root overrides
    #[serde(default)]
    pub machine_root: Option<PathBuf>,
    #[serde(default)]
    pub shared_root: Option<PathBuf>,

    /// Logging configuration
    #[serde(default = "default_log_directory")]
    pub log_directory: PathBuf,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_log_max_files")]
    pub log_max_files: u32,
}

/// A configuration item kept in the backup roots
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ItemConfig {
    /// Path of the item relative to either root
    pub path: String,

    #[serde(default)]
    pub description: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Fail loading when no backup exists under either root
    #[serde(default)]
    pub required: bool,

    /// Values the loaded document is merged onto
    #[serde(default)]
    pub defaults: Mapping,
}

/// Machine and shared roots after derivation and tilde expansion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoots {
    pub machine_name: Option<String>,
    pub machine_root: PathBuf,
    pub shared_root: PathBuf,
}

// Default value functions

fn default_shared_dir_name() -> String { "shared".to_string() }
fn default_log_directory() -> PathBuf { PathBuf::from("~/logs") }
fn default_log_level() -> String { "info".to_string() }
fn default_log_max_files() -> u32 { 10 }
fn default_enabled() -> bool { true }
