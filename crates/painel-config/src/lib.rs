//! Configuration loading for Painel.
//! Reads painel.toml from the current directory when present; every field
//! falls back to a default so the server starts without any file.

use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Default config file looked up in the working directory.
pub const CONFIG_FILE: &str = "painel.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid bind host '{0}'")]
    InvalidHost(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PainelConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16    { 8000 }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Filesystem locations of the analysis CSVs, the state map and the frontend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PathsConfig {
    /// Holds one subdirectory per analysis (`a1`..`a5`).
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Holds `br_geobr_mapas_uf.csv`.
    #[serde(default = "default_map_dir")]
    pub map_dir: PathBuf,
    /// Holds `index.html` and the static assets.
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: PathBuf,
}

fn default_data_dir()     -> PathBuf { PathBuf::from("data") }
fn default_map_dir()      -> PathBuf { PathBuf::from("data_uf") }
fn default_frontend_dir() -> PathBuf { PathBuf::from("frontend") }

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            map_dir: default_map_dir(),
            frontend_dir: default_frontend_dir(),
        }
    }
}

impl PainelConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load painel.toml from the working directory, or defaults when absent.
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let path = Path::new(CONFIG_FILE);
        if path.exists() {
            info!("Loading configuration from {:?}", path);
            Self::load(path)
        } else {
            info!("No {} found, using default configuration", CONFIG_FILE);
            Ok(Self::default())
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Address the HTTP server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self
            .server
            .host
            .parse()
            .map_err(|_| ConfigError::InvalidHost(self.server.host.clone()))?;
        Ok(SocketAddr::new(ip, self.server.port))
    }
}
