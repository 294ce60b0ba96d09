use super::types::*;
use crate::utils::paths::{expand_tilde, is_rooted};
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Item '{0}' not found")]
    ItemNotFound(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Load and validate configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let contents = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&contents)?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate the configuration
pub fn validate_config(config: &Config) -> Result<()> {
    let global = &config.global;

    if let Some(ref root) = global.backup_root {
        if root.as_os_str().is_empty() {
            return Err(ConfigError::ValidationError(
                "backup_root must not be empty".to_string(),
            ));
        }
    }

    for (field, root) in [
        ("machine_root", &global.machine_root),
        ("shared_root", &global.shared_root),
    ] {
        match root {
            Some(path) if path.as_os_str().is_empty() => {
                return Err(ConfigError::ValidationError(format!(
                    "{} must not be empty",
                    field
                )));
            }
            None if global.backup_root.is_none() => {
                return Err(ConfigError::ValidationError(format!(
                    "{} cannot be derived: set backup_root or {}",
                    field, field
                )));
            }
            _ => {}
        }
    }

    if global.shared_dir_name.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "shared_dir_name must not be empty".to_string(),
        ));
    }

    if let Some(ref name) = global.machine_name {
        if name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "machine_name must not be empty".to_string(),
            ));
        }
    }

    for (name, item) in &config.items {
        validate_item(name, item)?;
    }

    Ok(())
}

fn validate_item(name: &str, item: &ItemConfig) -> Result<()> {
    if item.path.trim().is_empty() {
        return Err(ConfigError::ValidationError(format!(
            "Item '{}': path must not be empty",
            name
        )));
    }

    if is_rooted(Path::new(&item.path)) {
        return Err(ConfigError::ValidationError(format!(
            "Item '{}': path must be relative to the backup roots: {}",
            name, item.path
        )));
    }

    Ok(())
}

/// Look up an item by name
pub fn get_item<'a>(config: &'a Config, name: &str) -> Result<&'a ItemConfig> {
    config
        .items
        .get(name)
        .ok_or_else(|| ConfigError::ItemNotFound(name.to_string()))
}

/// Derive the machine and shared roots
///
/// Machine root: `<backup_root>/<machine>` when a machine override is given
/// (an override without `backup_root` is an error), otherwise the explicit `machine_root`, otherwise `<backup_root>/<machine>`
/// with the machine name taken from config or the environment.
/// Shared root: explicit `shared_root`, otherwise `<backup_root>/<shared_dir_name>`.
pub fn resolve_roots(global: &GlobalConfig, machine_override: Option<&str>) -> Result<ResolvedRoots> {
    let machine_name = machine_override
        .map(str::to_string)
        .or_else(|| global.machine_name.clone())
        .or_else(machine_name_from_env);

    let machine_root = match (machine_override, &global.machine_root, &global.backup_root) {
        (Some(name), _, Some(root)) => root.join(name),
        (Some(_), _, None) => {
            return Err(ConfigError::ValidationError(
                "--machine requires backup_root".to_string(),
            ));
        }
        (_, Some(explicit), _) => explicit.clone(),
        (_, None, Some(root)) => {
            let name = machine_name.as_deref().ok_or_else(|| {
                ConfigError::ValidationError(
                    "machine name unknown: set machine_name, COMPUTERNAME or HOSTNAME".to_string(),
                )
            })?;
            root.join(name)
        }
        (_, None, None) => {
            return Err(ConfigError::ValidationError(
                "machine root cannot be derived: set backup_root or machine_root".to_string(),
            ));
        }
    };

    let shared_root = match (&global.shared_root, &global.backup_root) {
        (Some(explicit), _) => explicit.clone(),
        (None, Some(root)) => root.join(&global.shared_dir_name),
        (None, None) => {
            return Err(ConfigError::ValidationError(
                "shared root cannot be derived: set backup_root or shared_root".to_string(),
            ));
        }
    };

    Ok(ResolvedRoots {
        machine_name,
        machine_root: expand_tilde(&machine_root),
        shared_root: expand_tilde(&shared_root),
    })
}

fn machine_name_from_env() -> Option<String> {
    ["COMPUTERNAME", "HOSTNAME"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
}
