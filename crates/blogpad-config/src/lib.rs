use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_DIR: &str = "~/.config/blogpad";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Read a TOML file, `Ok(None)` if it does not exist
pub fn load_toml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let content =
        std::fs::read_to_string(path).map_err(|source| ConfigError::ConfigReadError {
            config_path: path.to_path_buf(),
            source,
        })?;

    let value = toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
        config_path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(value))
}

/// Write `value` as TOML, creating parent directories
pub fn save_toml<T: Serialize>(value: &T, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(value)?;
    std::fs::write(path, content)?;
    Ok(())
}

fn config_dir() -> PathBuf {
    PathBuf::from(shellexpand::tilde(CONFIG_DIR).as_ref())
}

/// Where front ends keep their local UI preferences
pub fn preferences_path() -> PathBuf {
    config_dir().join("preferences.toml")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root holding `posts/` and `images/`
    pub data_path: PathBuf,
    /// Base URL uploaded images are served from
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub public_url: String,
    /// Email of the single author allowed to sign in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl Config {
    pub fn new(data_path: PathBuf) -> Self {
        let public_url = Self::default_public_url(&data_path);
        Self {
            data_path,
            public_url,
            author: None,
        }
    }

    fn default_public_url(data_path: &Path) -> String {
        format!("file://{}/images", data_path.display())
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let Some(mut config) = load_toml::<Config>(config_path.as_ref())? else {
            return Ok(None);
        };

        // Expand shell variables and tilde in the loaded data path
        config.data_path = Self::expand_path(&config.data_path).unwrap_or(config.data_path);
        if config.public_url.is_empty() {
            config.public_url = Self::default_public_url(&config.data_path);
        }

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        save_toml(self, config_path.as_ref())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        config_dir().join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
