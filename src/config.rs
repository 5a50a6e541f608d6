//! Runtime configuration
//!
//! Values come from built-in defaults, then an optional TOML file, then
//! environment variables:
//! - `VOKABEL_CONFIG`: config file (default `<data_dir>/config.toml`)
//! - `VOKABEL_DATA_DIR`: data directory
//! - `VOKABEL_DICTIONARY`: de-en dictionary file
//! - `VOKABEL_BIND`: listen address of the web server

use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path:?}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid bind address {0:?}")]
    BindAddr(String),

    #[error("Data directory not found")]
    DataDirNotFound,
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// On-disk form of the configuration; every key is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    pub data_dir: Option<PathBuf>,
    pub dictionary_path: Option<PathBuf>,
    pub bind_addr: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub dictionary_path: PathBuf,
    pub bind_addr: SocketAddr,
}

impl AppConfig {
    /// Get the default data directory
    pub fn default_data_dir() -> Result<PathBuf> {
        dirs::data_local_dir()
            .map(|p| p.join("vokabel"))
            .ok_or(ConfigError::DataDirNotFound)
    }

    /// Resolve the configuration from the process environment
    pub fn load() -> Result<Self> {
        Self::resolve(|key| std::env::var(key).ok())
    }

    pub fn resolve(env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env_data_dir = env("VOKABEL_DATA_DIR").map(PathBuf::from);
        let base_dir = match &env_data_dir {
            Some(dir) => dir.clone(),
            None => Self::default_data_dir()?,
        };

        let config_path = env("VOKABEL_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|| base_dir.join("config.toml"));
        let file = read_config_file(&config_path)?;

        let data_dir = env_data_dir.or(file.data_dir).unwrap_or(base_dir);
        let dictionary_path = env("VOKABEL_DICTIONARY")
            .map(PathBuf::from)
            .or(file.dictionary_path)
            .unwrap_or_else(|| data_dir.join("dict").join("de-en.txt"));

        let bind = env("VOKABEL_BIND")
            .or(file.bind_addr)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind.parse().map_err(|_| ConfigError::BindAddr(bind))?;

        Ok(Self {
            data_dir,
            dictionary_path,
            bind_addr,
        })
    }

    /// Path of the vocabulary JSON file
    pub fn vocab_path(&self) -> PathBuf {
        self.data_dir.join("vocab").join("vocabulary.json")
    }

    /// Directory holding uploaded and fetched texts
    pub fn texts_dir(&self) -> PathBuf {
        self.data_dir.join("texts")
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let file: ConfigFile = toml::from_str(&content).map_err(|source| ConfigError::Toml {
        path: path.to_path_buf(),
        source,
    })?;

    log::info!("Loaded config from {:?}", path);
    Ok(file)
}
