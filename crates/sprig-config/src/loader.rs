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
use crate::error::{ConfigError, ConfigResult};
use crate::schema::SprigConfig;
use crate::validation::Validator;
use std::path::Path;
use std::str::FromStr;
use tokio::fs;
use tracing::{debug, info};

/// Prefix of every environment override
pub const ENV_PREFIX: &str = "SPRIG_";

/// Configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_path<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(ConfigFormat::Toml),
            Some("yaml") | Some("yml") => Ok(ConfigFormat::Yaml),
            Some("json") => Ok(ConfigFormat::Json),
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::InvalidPath(path.to_path_buf())),
        }
    }

    /// Get format name as string
    pub fn name(&self) -> &'static str {
        match self {
            ConfigFormat::Toml => "TOML",
            ConfigFormat::Yaml => "YAML",
            ConfigFormat::Json => "JSON",
        }
    }
}

/// Configuration loader
#[derive(Debug)]
pub struct ConfigLoader {
    validate: bool,
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        ConfigLoader { validate: true }
    }

    /// Create a loader without validation
    pub fn without_validation() -> Self {
        ConfigLoader { validate: false }
    }

    /// Load configuration from a file
    pub async fn load_file<P: AsRef<Path>>(&self, path: P) -> ConfigResult<SprigConfig> {
        let path = path.as_ref();
        debug!("Loading configuration from: {}", path.display());

        if !fs::try_exists(path).await? {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let format = ConfigFormat::from_path(path)?;
        let content = fs::read_to_string(path).await?;

        info!(
            "Loaded {} configuration file: {}",
            format.name(),
            path.display()
        );

        self.load_from_string(&content, format)
    }

    /// Load configuration from a string
    pub fn load_from_string(&self, content: &str, format: ConfigFormat) -> ConfigResult<SprigConfig> {
        let config: SprigConfig = match format {
            ConfigFormat::Toml => toml::from_str(content)?,
            ConfigFormat::Yaml => serde_yaml::from_str(content)?,
            ConfigFormat::Json => serde_json::from_str(content)?,
        };

        if self.validate {
            config.validate()?;
        }

        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub async fn load_with_overrides<P: AsRef<Path>>(&self, path: P) -> ConfigResult<SprigConfig> {
        let mut config = self.load_file(path).await?;
        self.apply_env_overrides(&mut config)?;
        Ok(config)
    }

    /// Apply `SPRIG_*` environment variable overrides
    pub fn apply_env_overrides(&self, config: &mut SprigConfig) -> ConfigResult<()> {
        self.apply_overrides_from(config, |name| std::env::var(name).ok())
    }

    /// Apply overrides looked up through `lookup`, which receives full
    /// variable names such as `SPRIG_CACHE_CAPACITY`.
    pub fn apply_overrides_from<F>(&self, config: &mut SprigConfig, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("SPRIG_CACHE_CAPACITY") {
            config.core.cache_capacity =
                parse_number("SPRIG_CACHE_CAPACITY", &value, "expected a positive integer")?;
        }
        if let Some(value) = lookup("SPRIG_LOCK_TIMEOUT_MS") {
            config.core.lock_timeout_ms =
                parse_number("SPRIG_LOCK_TIMEOUT_MS", &value, "expected milliseconds")?;
        }
        if let Some(value) = lookup("SPRIG_REMOTE_TIMEOUT_SECS") {
            config.remote.timeout_secs =
                parse_number("SPRIG_REMOTE_TIMEOUT_SECS", &value, "expected seconds")?;
        }
        if let Some(value) = lookup("SPRIG_LOG_LEVEL") {
            config.log.level = value;
        }
        if let Some(value) = lookup("SPRIG_LOG_FORMAT") {
            config.log.format = value;
        }

        if self.validate {
            config.validate()?;
        }
        Ok(())
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_number<T: FromStr>(variable: &str, value: &str, reason: &str) -> ConfigResult<T> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::env_var_parsing_error(variable, value, reason))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(ConfigFormat::from_path("config.toml").unwrap(), ConfigFormat::Toml);
        assert_eq!(ConfigFormat::from_path("config.yaml").unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path("config.yml").unwrap(), ConfigFormat::Yaml);
        assert_eq!(ConfigFormat::from_path("config.json").unwrap(), ConfigFormat::Json);
    }

    #[test]
    fn test_format_detection_error() {
        assert!(ConfigFormat::from_path("config.xml").is_err());
        assert!(ConfigFormat::from_path("config").is_err());
    }

    #[test]
    fn test_parse_each_format() {
        let loader = ConfigLoader::new();

        let toml = "[core]\ncache_capacity = 8\n";
        let yaml = "core:\n  cache_capacity: 8\n";
        let json = r#"{"core": {"cache_capacity": 8}}"#;

        for (content, format) in [
            (toml, ConfigFormat::Toml),
            (yaml, ConfigFormat::Yaml),
            (json, ConfigFormat::Json),
        ] {
            let config = loader.load_from_string(content, format).unwrap();
            assert_eq!(config.core.cache_capacity, 8);
            assert_eq!(config.core.lock_timeout_ms, 5000);
        }
    }

    #[test]
    fn test_validation_can_be_skipped() {
        let json = r#"{"remote": {"timeout_secs": 0}}"#;
        assert!(ConfigLoader::new().load_from_string(json, ConfigFormat::Json).is_err());
        assert!(ConfigLoader::without_validation()
            .load_from_string(json, ConfigFormat::Json)
            .is_ok());
    }

    #[test]
    fn test_env_overrides() {
        let loader = ConfigLoader::new();
        let mut config = SprigConfig::default();
        loader
            .apply_overrides_from(
                &mut config,
                env(&[
                    ("SPRIG_CACHE_CAPACITY", "64"),
                    ("SPRIG_REMOTE_TIMEOUT_SECS", " 5 "),
                    ("SPRIG_LOG_LEVEL", "debug"),
                ]),
            )
            .unwrap();

        assert_eq!(config.core.cache_capacity, 64);
        assert_eq!(config.remote.timeout_secs, 5);
        assert_eq!(config.log.level, "debug");
        assert_eq!(config.log.format, "compact");
    }

    #[test]
    fn test_env_override_parse_error() {
        let loader = ConfigLoader::new();
        let mut config = SprigConfig::default();
        let err = loader
            .apply_overrides_from(&mut config, env(&[("SPRIG_LOCK_TIMEOUT_MS", "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarParsing { .. }));
    }
}
