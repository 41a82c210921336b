use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::core::SmpsgenConfig;
use super::CONFIG_FILE_NAME;
use crate::errors::Error;

/// Directories searched for `.smpsgen.toml`, the start directory included
const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse `.smpsgen.toml` contents.
pub fn parse_config(contents: &str) -> Result<SmpsgenConfig, String> {
    toml::from_str::<SmpsgenConfig>(contents)
        .map_err(|e| format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
}

/// Load an explicitly requested config file; unlike discovery, failures are errors.
pub fn load_config_file(path: &Path) -> crate::errors::Result<SmpsgenConfig> {
    let contents = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_config(&contents).map_err(|message| Error::Config {
        path: path.to_path_buf(),
        message,
    })
}

/// A discovered config file, if `path` holds a readable and valid one.
///
/// A missing file is silent; anything else that stops the file from
/// loading is logged and skipped.
fn discovered_config(path: &Path) -> Option<SmpsgenConfig> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => return None,
        Err(e) => {
            log::warn!("Skipping unreadable {}: {}", path.display(), e);
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Using configuration from {}", path.display());
            Some(config)
        }
        Err(message) => {
            log::warn!("{}. Using defaults.", message);
            None
        }
    }
}

/// `start` followed by at most `max_depth - 1` of its ancestors.
pub fn directory_ancestors(start: &Path, max_depth: usize) -> impl Iterator<Item = &Path> {
    start.ancestors().take(max_depth)
}

/// Search `start` and its ancestors for a config file.
pub fn load_config_from(start: PathBuf) -> SmpsgenConfig {
    directory_ancestors(&start, MAX_TRAVERSAL_DEPTH)
        .find_map(|dir| discovered_config(&dir.join(CONFIG_FILE_NAME)))
        .unwrap_or_else(|| {
            log::debug!(
                "No {} within {} directories of {}; using defaults",
                CONFIG_FILE_NAME,
                MAX_TRAVERSAL_DEPTH,
                start.display()
            );
            SmpsgenConfig::default()
        })
}

/// Search the working directory and its ancestors for a config file.
pub fn load_config() -> SmpsgenConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            SmpsgenConfig::default()
        }
    }
}
