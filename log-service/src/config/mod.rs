// 2022-2025 (c) Copyright Contributors to the GOSH DAO. All rights reserved.
//
mod default;
mod serde_config;

use std::path::PathBuf;
use std::time::Duration;

use database::MEMORY_DB;
pub use default::default_db_path;
pub use default::default_listen;
pub use default::default_request_timeout_secs;
use serde::Deserialize;
use serde::Serialize;
pub use serde_config::load_config_from_file;
pub use serde_config::save_config_to_file;


/// Service config, read from YAML. Every section is optional.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// HTTP listen address. Defaults to 127.0.0.1:8080
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Requests still running after this many seconds get 503.
    /// Defaults to 30
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageKind {
    Memory,
    #[default]
    Sqlite,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    #[serde(default)]
    pub kind: StorageKind,

    /// SQLite database file. Defaults to ./data/logs.db
    #[serde(default = "default_db_path")]
    pub path: PathBuf,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthConfig {
    /// HS256 secret shared with the token issuer.
    #[serde(default)]
    pub jwt_secret: Option<String>,
}

/// Values given on the command line. They win over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub listen: Option<String>,
    pub db: Option<PathBuf>,
    pub jwt_secret: Option<String>,
    pub request_timeout_secs: Option<u64>,
}

impl Config {
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(listen) = overrides.listen {
            self.server.listen = listen;
        }
        if let Some(timeout) = overrides.request_timeout_secs {
            self.server.request_timeout_secs = timeout;
        }
        if let Some(db) = overrides.db {
            if db.as_os_str() == MEMORY_DB {
                self.storage.kind = StorageKind::Memory;
            } else {
                self.storage.kind = StorageKind::Sqlite;
                self.storage.path = db;
            }
        }
        if let Some(secret) = overrides.jwt_secret {
            self.auth.jwt_secret = Some(secret);
        }
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.server.request_timeout_secs)
    }

    /// The JWT secret, which the service cannot run without.
    pub fn jwt_secret(&self) -> anyhow::Result<&str> {
        match self.auth.jwt_secret.as_deref() {
            Some(secret) if !secret.trim().is_empty() => Ok(secret),
            _ => anyhow::bail!(
                "JWT secret is not configured: set auth.jwt_secret, --jwt-secret or JWT_SECRET"
            ),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.jwt_secret()?;
        if self.server.request_timeout_secs == 0 {
            anyhow::bail!("server.request_timeout_secs must be positive");
        }
        if self.storage.kind == StorageKind::Sqlite && self.storage.path.as_os_str().is_empty() {
            anyhow::bail!("storage.path must be set for sqlite storage");
        }
        Ok(())
    }
}
