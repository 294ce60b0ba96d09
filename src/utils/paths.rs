//! Path helpers

use std::path::{Component, Path, PathBuf};

/// Expand tilde (~) in path to home directory
pub fn expand_tilde(path: &Path) -> PathBuf {
    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    path.to_path_buf()
}

/// True if joining `path` onto a root would discard the root
pub fn is_rooted(path: &Path) -> bool {
    path.components()
        .any(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
}
