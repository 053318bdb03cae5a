//! Application configuration
//!
//! One YAML file names the artifacts, the models offered and every piece of
//! static copy, so a different team or model set is a different file rather
//! than a different binary.

use crate::content::SiteContent;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::{Path, PathBuf};
use tweetsense_classifiers::ArtifactConfig;
use tweetsense_core::{Error, Result};

/// Demo application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Artifact locations and the offered models
    pub artifacts: ArtifactConfig,

    /// Static copy shown on every page
    pub content: SiteContent,

    /// Directory served under `/assets` (logos, team photos)
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,

    /// Subject of the formatted prediction sentence
    #[serde(default = "default_topic")]
    pub topic: String,

    /// Initial contents of the prediction text box
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Maximum dataset rows rendered in the raw data table
    #[serde(default = "default_max_raw_rows")]
    pub max_raw_rows: usize,
}

impl AppConfig {
    /// Load from YAML string; paths are left as written
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Load from file, resolving relative paths against the file's directory
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| Error::load(path, e))?;
        let config = Self::from_yaml(&content).map_err(|e| Error::load(path, e))?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(config.resolve_paths(base))
    }

    /// Make every relative path relative to `base`
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        self.artifacts = self.artifacts.resolve_paths(base);
        if self.assets_dir.is_relative() {
            self.assets_dir = base.join(&self.assets_dir);
        }
        self
    }

    /// Apply CLI overrides
    pub fn with_overrides(mut self, address: Option<String>, port: Option<u16>) -> Self {
        if let Some(address) = address {
            self.server.address = address;
        }
        if let Some(port) = port {
            self.server.port = port;
        }
        self
    }

    /// Check settings that serde cannot
    pub fn validate(&self) -> Result<()> {
        self.artifacts.validate()?;
        if self.max_raw_rows == 0 {
            return Err(Error::config("max_raw_rows must be at least 1"));
        }
        Ok(())
    }
}

/// Listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Listen address
    #[serde(default = "default_address")]
    pub address: String,

    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
}

impl ServerConfig {
    /// Listen socket; the address must be an IPv4 or IPv6 literal
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let ip: IpAddr = self.address.trim().parse().map_err(|e| {
            Error::config(format!("invalid listen address '{}': {e}", self.address))
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }

    /// Browser origins allowed by CORS: local names plus the listen address
    pub fn local_origins(&self) -> Vec<String> {
        let mut origins = vec![
            format!("http://localhost:{}", self.port),
            format!("http://127.0.0.1:{}", self.port),
        ];
        if let Ok(addr) = self.socket_addr() {
            if !addr.ip().is_unspecified() {
                let origin = format!("http://{addr}");
                if !origins.contains(&origin) {
                    origins.push(origin);
                }
            }
        }
        origins
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            port: default_port(),
        }
    }
}

fn default_address() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8501
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_topic() -> String {
    tweetsense_classifiers::label::DEFAULT_TOPIC.to_string()
}

fn default_placeholder() -> String {
    "Type Here".to_string()
}

fn default_max_raw_rows() -> usize {
    200
}
