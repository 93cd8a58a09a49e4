//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from `start`.
///
/// Walks up parent directories until finding `config_name`.
/// Absolute `config_name` values are returned as-is when they exist.
///
/// # Example
/// ```text
/// /home/user/site/assets/css/     ← start
/// /home/user/site/assetline.toml  ← found!
/// ```
pub fn find_config_file(config_name: &Path, start: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.is_file() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None, // Reached filesystem root
        }
    }
}

/// Expand `~` and join relative paths onto `root`.
pub fn resolve_under(path: &Path, root: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    let path = PathBuf::from(expanded);
    if path.is_relative() {
        root.join(path)
    } else {
        path
    }
}

// ============================================================================
// tests
// ============================================================================
