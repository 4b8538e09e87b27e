use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use lake_dillon_core::TRIP_ID;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Hosted store settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RemoteConfig {
    /// Base URL of the store server (e.g. "http://localhost:8080")
    pub server_url: Option<String>,
}

impl RemoteConfig {
    pub fn is_configured(&self) -> bool {
        self.server_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory for the local document and photo stores
    pub data_dir: ConfigValue<PathBuf>,
    /// Timeline document key
    pub trip_id: ConfigValue<String>,
    /// Family member credited for uploaded photos
    pub uploaded_by: ConfigValue<Option<String>>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    pub remote: RemoteConfig,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    trip_id: Option<String>,
    uploaded_by: Option<String>,
    remote: Option<RemoteConfig>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut trip_id = ConfigValue::new(TRIP_ID.to_string(), ConfigSource::Default);
        let mut uploaded_by = ConfigValue::new(None, ConfigSource::Default);
        let mut config_file = None;
        let mut remote = RemoteConfig::default();

        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(dir) = file_config.data_dir {
                // Resolve relative paths against config file's directory
                let resolved = if dir.is_relative() {
                    path.parent().map(|p| p.join(&dir)).unwrap_or(dir)
                } else {
                    dir
                };
                data_dir = ConfigValue::new(resolved, ConfigSource::File);
            }
            if let Some(id) = file_config.trip_id {
                trip_id = ConfigValue::new(id, ConfigSource::File);
            }
            if let Some(member) = file_config.uploaded_by {
                uploaded_by = ConfigValue::new(Some(member), ConfigSource::File);
            }
            if let Some(remote_config) = file_config.remote {
                remote = remote_config;
            }
        }

        if let Ok(dir) = std::env::var("DILLON_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(id) = std::env::var("DILLON_TRIP_ID") {
            trip_id = ConfigValue::new(id, ConfigSource::Environment);
        }
        if let Ok(member) = std::env::var("DILLON_UPLOADED_BY") {
            uploaded_by = ConfigValue::new(Some(member), ConfigSource::Environment);
        }
        if let Ok(url) = std::env::var("DILLON_SERVER_URL") {
            remote.server_url = Some(url);
        }

        Ok(Self {
            data_dir,
            trip_id,
            uploaded_by,
            config_file,
            remote,
        })
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/dillon/
    /// - macOS: ~/Library/Application Support/dillon/
    /// - Windows: %APPDATA%/dillon/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dillon")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/dillon/
    /// - macOS: ~/Library/Application Support/dillon/
    /// - Windows: %APPDATA%/dillon/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dillon")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }

    pub fn documents_dir(&self) -> PathBuf {
        self.data_dir.value.join("documents")
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.data_dir.value.join("objects")
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
