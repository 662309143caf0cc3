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
//! Repository configuration for Sprig
//!
//! Every repository carries a `config.toml` inside its `.sprig` directory.
//! This crate defines its schema, loads it from TOML, YAML or JSON, applies
//! `SPRIG_*` environment overrides and validates the result.
//!
//! # Example
//!
//! ```no_run
//! use sprig_config::SprigConfig;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SprigConfig::load(".sprig").await?;
//!     println!("object cache: {} entries", config.core.cache_capacity);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod loader;
pub mod schema;
pub mod validation;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigFormat, ConfigLoader, ENV_PREFIX};
pub use schema::{CoreConfig, LogSettings, RemoteSettings, SprigConfig, CONFIG_FILE};
pub use validation::Validator;
