use std::fs;
use std::path::{Path, PathBuf};

use super::core::Config;
use crate::errors::{Error, Result};

pub const CONFIG_FILE_NAME: &str = ".lintmux.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to parse and validate config from TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<Config> {
    let config = toml::from_str::<Config>(contents)?;

    for (i, rule) in config.issues.exclude_rules.iter().enumerate() {
        let is_empty = [&rule.text, &rule.source, &rule.path]
            .iter()
            .all(|field| field.as_deref().is_none_or(str::is_empty))
            && rule.engines.is_empty();
        if is_empty {
            return Err(Error::Configuration(format!(
                "exclude rule #{} has no text, source, path or engines",
                i + 1
            )));
        }
    }

    Ok(config)
}

/// Load a configuration file from an explicit path.
pub fn load_config_from_path(config_path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(config_path)
        .map_err(|e| Error::file_system("Failed to read config file", config_path, e))?;
    let config = parse_and_validate_config(&contents)
        .map_err(|e| e.with_context(format!("parsing {}", config_path.display())))?;
    log::debug!("Loaded config from {}", config_path.display());
    Ok(config)
}

/// Pure function to generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Search `start` and its ancestors for a config file.
pub fn find_config_file(start: &Path) -> Option<PathBuf> {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
}

/// Load the nearest config file, or defaults when none exists.
///
/// A config file that exists but cannot be parsed is an error rather than
/// being silently replaced by defaults.
pub fn load_config(start: &Path) -> Result<Config> {
    match find_config_file(start) {
        Some(path) => load_config_from_path(&path),
        None => {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            Ok(Config::default())
        }
    }
}
