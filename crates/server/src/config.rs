//! Server settings, read from an optional TOML file.

use chess_core::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid PORT value {0:?}")]
    Port(String),
}

/// Host settings. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    pub host: String,
    pub port: u16,
    /// Built client to serve for every non-API path
    pub static_dir: PathBuf,
    /// Side played by the random agent
    pub agent_color: Color,
    /// How long the agent "thinks" before its move lands
    pub agent_delay_ms: u64,
    /// How long the agent's move stays highlighted after it lands
    pub flash_ms: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            static_dir: PathBuf::from("client/dist"),
            agent_color: Color::Black,
            agent_delay_ms: 1500,
            flash_ms: 450,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Load from `path`, or fall back to defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Apply a `PORT` environment value on top of the file settings.
    pub fn with_port_override(mut self, port: Option<String>) -> Result<Self, ConfigError> {
        if let Some(raw) = port {
            self.port = raw.trim().parse().map_err(|_| ConfigError::Port(raw))?;
        }
        Ok(self)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn agent_delay(&self) -> Duration {
        Duration::from_millis(self.agent_delay_ms)
    }

    pub fn flash(&self) -> Duration {
        Duration::from_millis(self.flash_ms)
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
