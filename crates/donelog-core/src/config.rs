use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DonelogConfig {
    /// Heading line that opens the archive section. Defaults to "# History".
    pub history_heading: Option<String>,
    /// Indentation unit counted when reading outline depth, e.g. "  " for
    /// two-space outlines. Defaults to one tab.
    pub indent: Option<String>,
}

pub fn config_filename_candidates() -> [&'static str; 2] {
    [".donelog.toml", ".donelogrc"]
}

/// Nearest ancestor of `start` carrying a config file.
pub fn find_config_root(start: &Path) -> Option<PathBuf> {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    for candidate in start.ancestors() {
        for name in config_filename_candidates() {
            if candidate.join(name).is_file() {
                return Some(candidate.to_path_buf());
            }
        }
    }
    None
}

/// Best-effort load: unreadable or unparseable config yields `None` and
/// the defaults apply.
pub fn load_config(root: &Path) -> Option<DonelogConfig> {
    for name in config_filename_candidates() {
        let path = root.join(name);
        if path.is_file() {
            if let Ok(config) = read_config(&path) {
                return Some(config);
            }
        }
    }
    None
}

/// Typed load for callers that want the failure cause.
pub fn read_config(path: &Path) -> Result<DonelogConfig, ConfigError> {
    let text = fs::read_to_string(path)?;
    Ok(toml::from_str(&text)?)
}
