//! Configuration module for shared-config
//!
//! This module handles loading, validating, and deriving roots from the TOML
//! tool configuration.
//!
//! ## Root Derivation
//!
//! Both roots hang off a single backup root unless given explicitly:
//! 1. Machine root: `<backup_root>/<machine_name>` (or `machine_root`)
//! 2. Shared root: `<backup_root>/<shared_dir_name>` (or `shared_root`)
//!
//! ## Example Usage
//!
//! ```no_run
//! use shared_config::config;
//!
//! let config = config::load_config("shared-config.toml")?;
//! let roots = config::resolve_roots(&config.global, None)?;
//!
//! for (name, item) in config::enabled_items(&config) {
//!     println!("Item: {}, Path: {}", name, item.path);
//! }
//! # Ok::<(), config::ConfigError>(())
//! ```

mod loader;
mod types;

pub use loader::{get_item, load_config, resolve_roots, validate_config, ConfigError, Result};
pub use types::*;

use crate::resolver::ResolutionRequest;

/// Enabled items, sorted by name
pub fn enabled_items(config: &Config) -> Vec<(&str, &ItemConfig)> {
    let mut items: Vec<_> = config
        .items
        .iter()
        .filter(|(_, item)| item.enabled)
        .map(|(name, item)| (name.as_str(), item))
        .collect();
    items.sort_by(|a, b| a.0.cmp(b.0));
    items
}

/// Build the resolver request for an item under the given roots
pub fn resolution_request(item: &ItemConfig, roots: &ResolvedRoots) -> ResolutionRequest {
    ResolutionRequest::new(&item.path, &roots.machine_root, &roots.shared_root)
}
