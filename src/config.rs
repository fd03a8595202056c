use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct Config {
    pub workspace_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_path: Option<String>,
}

pub const KEYS: [&str; 2] = ["workspace_path", "log_path"];

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&get_config_file_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            return Err(ConfigError::ConfigNotFound);
        }

        let content = fs::read_to_string(config_path)
            .map_err(|e| ConfigError::ReadError(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&get_config_file_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let content =
            toml::to_string(self).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

        fs::write(config_path, content).map_err(|e| ConfigError::WriteError(e.to_string()))
    }

    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        match key {
            "workspace_path" => Ok(self.workspace_path.clone()),
            "log_path" => Ok(self.log_path.clone().unwrap_or_default()),
            _ => Err(ConfigError::UnknownKey(key.to_string())),
        }
    }

    pub fn set(&mut self, key: &str, value: String) -> Result<(), ConfigError> {
        match key {
            "workspace_path" => self.workspace_path = value,
            "log_path" => self.log_path = Some(value).filter(|path| !path.is_empty()),
            _ => return Err(ConfigError::UnknownKey(key.to_string())),
        }
        Ok(())
    }

    /// Configured log file, or `app-header.log` next to the config file.
    pub fn log_file_path(&self) -> Result<PathBuf, ConfigError> {
        match &self.log_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => Ok(config_dir()?.join("app-header.log")),
        }
    }
}

fn config_dir() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(config_dir.join("app-header"))
}

fn get_config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.toml"))
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Configuration not found. Run 'app-header config set workspace_path <path>' to configure your workspace file location."
    )]
    ConfigNotFound,
    #[error("Could not find config directory")]
    ConfigDirNotFound,
    #[error("Unknown configuration key '{0}'. Supported keys: workspace_path, log_path.")]
    UnknownKey(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
    #[error("Failed to parse config file: {0}")]
    ParseError(String),
    #[error("Failed to serialize config: {0}")]
    SerializeError(String),
}
