use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// On-disk configuration, loaded from an optional TOML file.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    tables_dir: Option<PathBuf>,
    delimiter: Option<char>,
}

/// Fully resolved settings, after layering CLI flags over the config file
/// over built-in defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub tables_dir: Option<PathBuf>,
    pub delimiter: char,
}

const DEFAULT_DELIMITER: char = ',';

impl Config {
    /// Load the config file at `path` if given, falling back to an empty
    /// configuration when `path` is `None`. CLI-supplied overrides always
    /// take precedence over whatever the file contains.
    pub fn load(path: Option<&Path>, tables_override: Option<PathBuf>, delimiter_override: Option<char>) -> Result<Config> {
        let raw = match path {
            Some(path) => {
                let text = std::fs::read_to_string(path)
                    .with_context(|| format!("reading config file {}", path.display()))?;
                toml::from_str(&text)
                    .with_context(|| format!("parsing config file {}", path.display()))?
            }
            None => RawConfig::default(),
        };

        Ok(Config {
            tables_dir: tables_override.or(raw.tables_dir),
            delimiter: delimiter_override.or(raw.delimiter).unwrap_or(DEFAULT_DELIMITER),
        })
    }
}
