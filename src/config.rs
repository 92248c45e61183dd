//! # Configuration Module
//!
//! Runtime configuration and data directory setup for Tunepick.
//!
//! ## Data Storage
//!
//! Tunepick looks for its catalog and optional `config.json` in the
//! platform-standard data directory:
//! - Linux: `~/.local/share/tunepick/`
//! - macOS: `~/Library/Application Support/tunepick/`
//! - Windows: `%APPDATA%\tunepick\`
//!
//! ## Precedence
//!
//! Command-line flags (or their `TUNEPICK_*` environment variables) win over
//! `config.json`, which wins over the built-in defaults.

use crate::catalog::DEFAULT_DELIMITER;
use anyhow::{anyhow, bail, Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the default catalog inside the data directory.
pub const CATALOG_FILE_NAME: &str = "Spotify.csv";

/// File name of the optional configuration file inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Returns the platform-appropriate data directory for Tunepick.
///
/// Only the path is resolved. Nothing is created, so an unusable data
/// directory matters only once a file inside it is actually read.
///
/// # Errors
///
/// This function will return an error if the system data directory cannot be
/// determined.
pub fn get_data_dir() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or_else(|| {
        anyhow!(
            "Could not determine system data directory. \
             Please ensure your platform supports standard data directories."
        )
    })?;

    Ok(data_dir.join("tunepick"))
}

/// Default catalog location: `<data dir>/Spotify.csv`.
///
/// # Errors
///
/// Same as [`get_data_dir`].
pub fn default_catalog_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join(CATALOG_FILE_NAME))
}

/// Parses a delimiter given as text. Must be exactly one ASCII character;
/// `\t` and `tab` are accepted for tab-separated files.
///
/// # Errors
///
/// Returns an error for empty, multi-character or non-ASCII input.
pub fn parse_delimiter(text: &str) -> Result<u8> {
    match text {
        "\\t" | "tab" => return Ok(b'\t'),
        _ => {}
    }

    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() => Ok(c as u8),
        _ => bail!("Delimiter must be a single ASCII character, got `{text}`"),
    }
}

/// Configuration for runtime behavior
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Path to the catalog file
    pub catalog_path: PathBuf,
    /// Field separator of the catalog file
    #[serde(with = "delimiter_text")]
    pub delimiter: u8,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            catalog_path: default_catalog_path()
                .unwrap_or_else(|_| PathBuf::from(CATALOG_FILE_NAME)),
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl RuntimeConfig {
    /// Loads `config.json` from the data directory, or defaults if there is
    /// no such file or no data directory at all.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        match get_data_dir() {
            Ok(dir) => Self::load_from(&dir.join(CONFIG_FILE_NAME)),
            Err(err) => {
                debug!("{err:#} Using default configuration");
                Ok(Self::default())
            }
        }
    }

    /// Loads configuration from an explicit file, or defaults if it does not
    /// exist. A path that cannot exist, such as one below a regular file,
    /// counts as missing.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        debug!("Loaded config from {}: {config:?}", path.display());
        Ok(config)
    }

    /// Create configuration with explicit catalog path
    #[must_use]
    pub fn with_catalog_path(catalog_path: PathBuf) -> Self {
        Self {
            catalog_path,
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Applies command-line overrides on top of this configuration.
    ///
    /// # Errors
    ///
    /// Fails if `delimiter` is not a single ASCII character.
    pub fn with_overrides(
        mut self,
        catalog_path: Option<PathBuf>,
        delimiter: Option<&str>,
    ) -> Result<Self> {
        if let Some(path) = catalog_path {
            self.catalog_path = path;
        }
        if let Some(text) = delimiter {
            self.delimiter = parse_delimiter(text)?;
        }
        Ok(self)
    }
}

/// Stores the delimiter as a one-character string in `config.json`.
mod delimiter_text {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(delimiter: &u8, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&char::from(*delimiter).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
        let text = String::deserialize(deserializer)?;
        super::parse_delimiter(&text).map_err(D::Error::custom)
    }
}
