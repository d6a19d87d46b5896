//! Path management for Wrangler
//!
//! ## Config File Resolution Order
//!
//! 1. `--config` command line flag
//! 2. `WRANGLER_CONFIG` environment variable (if set)
//! 3. `.wrangler.yaml` in the current working directory

use std::path::{Path, PathBuf};

use crate::error::WranglerError;

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "WRANGLER_CONFIG";

/// Default config file name
pub const DEFAULT_CONFIG_FILE: &str = ".wrangler.yaml";

/// Resolve the default config file in the current working directory
///
/// # Errors
///
/// Returns an error if the working directory cannot be determined.
pub fn default_config_file() -> Result<PathBuf, WranglerError> {
    let cwd = std::env::current_dir()
        .map_err(|e| WranglerError::Io(format!("Failed to determine working directory: {}", e)))?;
    Ok(cwd.join(DEFAULT_CONFIG_FILE))
}

/// Make a config path absolute for diagnostics
pub fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_file_name() {
        let path = default_config_file().unwrap();
        assert_eq!(path.file_name().unwrap(), DEFAULT_CONFIG_FILE);
        assert!(path.is_absolute());
    }

    #[test]
    fn test_absolute_keeps_absolute_paths() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("config.yaml");
        assert_eq!(absolute(&path), path);
    }

    #[test]
    fn test_absolute_joins_relative_paths() {
        let path = absolute(Path::new("config.yaml"));
        assert!(path.is_absolute());
        assert!(path.ends_with("config.yaml"));
    }
}
