//! Service configuration
//!
//! Precedence, lowest first: built-in defaults, JSON config file,
//! environment (`PORT`, `STORE_URI`, `ROLLBOOK_LOG_JSON`), command-line flags.
//! `MONGO_URI` is read as a fallback for `STORE_URI` so older `.env` files
//! still name the store.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::config::{default_host, default_port};
use crate::http_server::HttpServerConfig;

pub const ENV_PORT: &str = "PORT";
pub const ENV_STORE: &str = "STORE_URI";
pub const ENV_STORE_FALLBACK: &str = "MONGO_URI";
pub const ENV_LOG_JSON: &str = "ROLLBOOK_LOG_JSON";

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Host to bind to (default "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default 4000)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Record store address (default "./data/studentsdb")
    #[serde(default = "default_store")]
    pub store: String,

    /// CORS origins; empty allows any
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Emit logs as JSON lines
    #[serde(default)]
    pub log_json: bool,
}

fn default_store() -> String {
    "./data/studentsdb".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            store: default_store(),
            cors_origins: Vec::new(),
            log_json: false,
        }
    }
}

impl Config {
    /// Loads the file (if given) and applies process environment overrides.
    pub fn load(path: Option<&Path>) -> CliResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Reads a JSON config file; missing keys take their defaults.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))
    }

    /// Applies overrides from `lookup`, normally the process environment.
    pub fn apply_env<F>(&mut self, lookup: F) -> CliResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port.trim().parse().map_err(|_| {
                CliError::config_error(format!("Invalid {}: '{}'", ENV_PORT, port))
            })?;
        }

        if let Some(store) = lookup(ENV_STORE).or_else(|| lookup(ENV_STORE_FALLBACK)) {
            self.store = store;
        }

        if let Some(flag) = lookup(ENV_LOG_JSON) {
            self.log_json = match flag.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => true,
                "0" | "false" | "no" | "off" | "" => false,
                _ => {
                    return Err(CliError::config_error(format!(
                        "Invalid {}: '{}'",
                        ENV_LOG_JSON, flag
                    )))
                }
            };
        }

        Ok(())
    }

    pub fn validate(&self) -> CliResult<()> {
        if self.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }
        if self.store.trim().is_empty() {
            return Err(CliError::config_error("store address must not be empty"));
        }
        Ok(())
    }

    pub fn http_config(&self) -> HttpServerConfig {
        HttpServerConfig {
            host: self.host.clone(),
            port: self.port,
            cors_origins: self.cors_origins.clone(),
        }
    }
}
