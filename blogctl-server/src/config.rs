//! Server configuration - file and environment loading
//!
//! Sources, later ones winning:
//! - built-in defaults
//! - TOML file (`~/.blogctl/config.toml`, or an explicit path)
//! - environment: `DATABASE_URL`, `BLOGCTL_BIND`
//!
//! Command-line flags are applied on top by the CLI.

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::db::pool::DEFAULT_MAX_CONNECTIONS;

/// Full configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

/// HTTP listener settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3030)
    pub bind: SocketAddr,

    /// Allow permissive CORS (default: false = localhost only)
    ///
    /// WARNING: Setting this to true allows any origin.
    pub cors_permissive: bool,

    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3030)),
            cors_permissive: false,
            request_timeout_secs: 30,
        }
    }
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL connection string
    pub url: Option<String>,
    pub max_connections: u32,
    /// Apply pending migrations on startup
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            run_migrations: true,
        }
    }
}

impl BlogConfig {
    /// Load config from `path`, or from the default location when present,
    /// then apply environment overrides.
    ///
    /// An explicit path that does not exist is an error; a missing default
    /// file just means defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env()?;
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file (invalid TOML): {:?}", path))
    }

    /// Get config file path: ~/.blogctl/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".blogctl/config.toml")
    }

    /// Apply `DATABASE_URL` and `BLOGCTL_BIND` overrides.
    fn apply_env(&mut self) -> Result<()> {
        if let Ok(url) = env::var("DATABASE_URL") {
            if !url.trim().is_empty() {
                self.database.url = Some(url);
            }
        }

        if let Ok(bind) = env::var("BLOGCTL_BIND") {
            self.server.bind = bind
                .parse()
                .with_context(|| format!("BLOGCTL_BIND is not a socket address: '{}'", bind))?;
        }

        Ok(())
    }

    /// Database URL, or an actionable error if none was configured.
    pub fn database_url(&self) -> Result<&str> {
        self.database.url.as_deref().context(
            "DATABASE_URL not set. Set via --database-url, DATABASE_URL env, .env, \
             or [database] url in ~/.blogctl/config.toml",
        )
    }
}
