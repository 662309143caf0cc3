// Copyright (C) 2026  Sprig Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Configuration schema
//!
//! ```toml
//! [core]
//! cache_capacity = 1024
//! lock_timeout_ms = 5000
//!
//! [remote]
//! timeout_secs = 30
//!
//! [log]
//! level = "warn"
//! format = "compact"
//! ```
//!
//! Missing sections and fields take their defaults.

use crate::error::{ConfigError, ConfigResult};
use crate::loader::ConfigLoader;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// File name of the configuration inside the repository directory
pub const CONFIG_FILE: &str = "config.toml";

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SprigConfig {
    /// Object store and locking
    pub core: CoreConfig,

    /// Remote synchronisation
    pub remote: RemoteSettings,

    /// Logging
    pub log: LogSettings,
}

/// Object store and locking settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CoreConfig {
    /// Entries in the object read cache
    pub cache_capacity: u64,

    /// How long to wait for the repository lock, in milliseconds
    pub lock_timeout_ms: u64,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            cache_capacity: 1024,
            lock_timeout_ms: 5000,
        }
    }
}

impl CoreConfig {
    /// Lock timeout as a [`Duration`]
    pub fn lock_timeout(&self) -> Duration {
        Duration::from_millis(self.lock_timeout_ms)
    }
}

/// Remote synchronisation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RemoteSettings {
    /// Limit for each remote round trip, in seconds
    pub timeout_secs: u64,
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl RemoteSettings {
    /// Round-trip limit as a [`Duration`]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LogSettings {
    /// Level filter: trace, debug, info, warn, error or off
    pub level: String,

    /// Output format: pretty, compact or json
    pub format: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: "compact".to_string(),
        }
    }
}

impl SprigConfig {
    /// Load `config.toml` from the repository directory `repo_dir`, with
    /// environment overrides applied. A missing file yields the defaults.
    pub async fn load(repo_dir: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = repo_dir.as_ref().join(CONFIG_FILE);
        let loader = ConfigLoader::new();

        let mut config = if tokio::fs::try_exists(&path).await? {
            loader.load_file(&path).await?
        } else {
            debug!(path = %path.display(), "no configuration file, using defaults");
            Self::default()
        };
        loader.apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Write this configuration to `config.toml` in `repo_dir`.
    pub async fn save(&self, repo_dir: impl AsRef<Path>) -> ConfigResult<()> {
        let path = repo_dir.as_ref().join(CONFIG_FILE);
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;
        tokio::fs::write(&path, content).await?;
        debug!(path = %path.display(), "wrote configuration");
        Ok(())
    }
}
