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
use crate::schema::{CoreConfig, LogSettings, RemoteSettings, SprigConfig};

/// Accepted log formats
pub const LOG_FORMATS: [&str; 3] = ["pretty", "compact", "json"];

/// Accepted plain log levels
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Validation for a configuration section.
pub trait Validator {
    /// Check every field, reporting the first invalid one.
    fn validate(&self) -> ConfigResult<()>;
}

impl Validator for SprigConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.core.validate()?;
        self.remote.validate()?;
        self.log.validate()?;
        Ok(())
    }
}

impl Validator for CoreConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.cache_capacity == 0 {
            return Err(ConfigError::invalid_value(
                "core.cache_capacity",
                "must be at least 1",
            ));
        }
        if self.lock_timeout_ms == 0 {
            return Err(ConfigError::invalid_value(
                "core.lock_timeout_ms",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Validator for RemoteSettings {
    fn validate(&self) -> ConfigResult<()> {
        if self.timeout_secs == 0 {
            return Err(ConfigError::invalid_value(
                "remote.timeout_secs",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}

impl Validator for LogSettings {
    fn validate(&self) -> ConfigResult<()> {
        if !LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::invalid_value(
                "log.level",
                format!("must be one of: {}", LOG_LEVELS.join(", ")),
            ));
        }
        if !LOG_FORMATS.contains(&self.format.to_lowercase().as_str()) {
            return Err(ConfigError::invalid_value(
                "log.format",
                format!("must be one of: {}", LOG_FORMATS.join(", ")),
            ));
        }
        Ok(())
    }
}
