use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{DocrefError, Result};

/// Name of the configuration file looked up next to the model.
pub const CONFIG_FILENAME: &str = "docref.config.json";

fn enabled() -> bool {
    true
}

/// Per-validator on/off switches. Everything is on by default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorToggles {
    #[serde(default = "enabled")]
    pub overloads: bool,
    #[serde(default = "enabled")]
    pub see: bool,
    #[serde(default = "enabled")]
    pub links: bool,
    #[serde(default = "enabled")]
    pub fires: bool,
}

impl Default for ValidatorToggles {
    fn default() -> Self {
        Self {
            overloads: true,
            see: true,
            links: true,
            fires: true,
        }
    }
}

/// Configuration for a validation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorConfig {
    /// Schema version of the configuration.
    pub version: u32,
    /// Whether reported errors fail the run.
    #[serde(default)]
    pub strict: bool,
    /// Glob patterns for source files of the project's own packages;
    /// reflections whose sources all fall outside are skipped.
    #[serde(default)]
    pub packages: Vec<String>,
    #[serde(default)]
    pub validators: ValidatorToggles,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            version: 1,
            strict: false,
            packages: Vec::new(),
            validators: ValidatorToggles::default(),
        }
    }
}

/// Returns the path to the configuration file within the given directory.
pub fn config_path(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILENAME)
}

/// Loads the configuration from a directory.
///
/// A missing configuration file yields the defaults, never an error.
pub fn load_config(dir: &Path) -> Result<ValidatorConfig> {
    let path = config_path(dir);

    if !path.exists() {
        return Ok(ValidatorConfig::default());
    }

    read_config(&path)
}

/// Reads a configuration file from an explicit path.
pub fn read_config(path: &Path) -> Result<ValidatorConfig> {
    let contents = fs::read_to_string(path).map_err(|e| DocrefError::Config {
        message: format!("failed to read config file '{}': {}", path.display(), e),
    })?;

    let config: ValidatorConfig =
        serde_json::from_str(&contents).map_err(|e| DocrefError::Config {
            message: format!("failed to parse config file '{}': {}", path.display(), e),
        })?;

    Ok(config)
}

/// Saves the configuration into a directory using an atomic write.
///
/// Writes to a temporary file first and then renames it to the final
/// location, ensuring that a partial write never corrupts the configuration.
pub fn save_config(dir: &Path, config: &ValidatorConfig) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| DocrefError::Config {
        message: format!("failed to create directory '{}': {}", dir.display(), e),
    })?;

    let path = config_path(dir);
    let tmp_path = path.with_extension("tmp");

    let json = serde_json::to_string_pretty(config).map_err(|e| DocrefError::Config {
        message: format!("failed to serialize config: {}", e),
    })?;

    fs::write(&tmp_path, &json).map_err(|e| DocrefError::Config {
        message: format!(
            "failed to write temporary config file '{}': {}",
            tmp_path.display(),
            e
        ),
    })?;

    fs::rename(&tmp_path, &path).map_err(|e| DocrefError::Config {
        message: format!(
            "failed to rename temporary config file '{}' to '{}': {}",
            tmp_path.display(),
            path.display(),
            e
        ),
    })?;

    Ok(())
}
