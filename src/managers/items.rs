//! Item manager - resolves configuration items and merges them over defaults

use crate::config::{self, Config, ItemConfig, ResolvedRoots};
use crate::merge::{into_mapping, merge, ConfigValue, Mapping};
use crate::resolver::{ResolutionResult, Resolver};
use crate::utils::probe::{FsProbe, PathProbe};
use anyhow::{bail, Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// A configuration item after resolution and merging
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedItem {
    pub name: String,
    /// Where the document came from
    pub source: ResolutionResult,
    /// Defaults with the loaded document merged on top
    pub values: Mapping,
}

pub struct ItemManager<P: PathProbe = FsProbe> {
    config: Config,
    roots: ResolvedRoots,
    resolver: Resolver<P>,
}

impl ItemManager<FsProbe> {
    /// Create new item manager over the real filesystem
    pub fn new(config: Config, roots: ResolvedRoots) -> Self {
        Self::with_probe(config, roots, FsProbe)
    }
}

impl<P: PathProbe> ItemManager<P> {
    /// Create item manager with a specific existence probe
    pub fn with_probe(config: Config, roots: ResolvedRoots, probe: P) -> Self {
        Self {
            config,
            roots,
            resolver: Resolver::with_probe(probe),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn roots(&self) -> &ResolvedRoots {
        &self.roots
    }

    fn item(&self, name: &str) -> Result<&ItemConfig> {
        Ok(config::get_item(&self.config, name)?)
    }

    /// Find which root currently holds an item
    pub fn resolve_item(&self, name: &str) -> Result<ResolutionResult> {
        let item = self.item(name)?;
        let request = config::resolution_request(item, &self.roots);

        let result = self
            .resolver
            .resolve(&request)
            .with_context(|| format!("Failed to resolve item '{}'", name))?;

        debug!("Item '{}' resolved to {}", name, result);
        Ok(result)
    }

    /// Resolve an item, load its document and merge it over the item defaults
    ///
    /// A document found under the machine root is used even if it is broken:
    /// read and parse failures are errors, never a fallback to the shared root.
    pub fn load_item(&self, name: &str) -> Result<LoadedItem> {
        let item = self.item(name)?;
        let source = self.resolve_item(name)?;

        let values = match source.path() {
            Some(path) => {
                info!("Loading item '{}' from {}", name, source);
                let document = read_document(path)
                    .with_context(|| format!("Failed to load item '{}'", name))?;
                merge(&item.defaults, &document)
            }
            None if item.required => {
                bail!("No backup found for item '{}' ({})", name, item.path);
            }
            None => {
                warn!("No backup found for item '{}', using defaults", name);
                item.defaults.clone()
            }
        };

        Ok(LoadedItem {
            name: name.to_string(),
            source,
            values,
        })
    }

    /// Load every enabled item, sorted by name
    ///
    /// Failures are reported per item and do not stop the remaining items.
    pub fn load_all(&self) -> Vec<(String, Result<LoadedItem>)> {
        config::enabled_items(&self.config)
            .into_iter()
            .map(|(name, _)| (name.to_string(), self.load_item(name)))
            .collect()
    }
}

/// Read a JSON document whose top level must be a mapping
///
/// Shared by item loading and the `merge` command.
pub fn read_document(path: &Path) -> Result<Mapping> {
    if path.is_dir() {
        bail!("{:?} is a directory, expected a JSON document", path);
    }

    let contents =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let value: ConfigValue =
        serde_json::from_str(&contents).with_context(|| format!("Failed to parse {:?}", path))?;

    Ok(into_mapping(value, &path.display().to_string())?)
}
