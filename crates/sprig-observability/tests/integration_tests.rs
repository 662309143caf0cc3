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
//! Integration tests for logging configuration
//!
//! Only configuration building is tested here; the global subscriber can be
//! installed once per process.

#![allow(clippy::unwrap_used)]

use sprig_observability::{build_env_filter, LogConfig, LogFormat, LogOutput, DEFAULT_LEVEL};

#[test]
fn test_config_builder_chaining() {
    let config = LogConfig::new()
        .with_format(LogFormat::Json)
        .with_level("debug")
        .with_timestamps(true)
        .with_color(false)
        .with_targets(false)
        .with_output(LogOutput::Stdout);

    assert_eq!(config.format, LogFormat::Json);
    assert_eq!(config.level, Some("debug".to_string()));
    assert!(config.use_timestamps);
    assert!(!config.use_color);
    assert!(!config.include_targets);
    assert_eq!(config.output, LogOutput::Stdout);
}

#[test]
fn test_level_fallbacks() {
    std::env::remove_var("RUST_LOG");
    assert_eq!(LogConfig::new().get_effective_level(), DEFAULT_LEVEL);

    std::env::set_var("RUST_LOG", "trace");
    assert_eq!(LogConfig::new().get_effective_level(), "trace");
    assert_eq!(LogConfig::new().with_level("warn").get_effective_level(), "warn");
    std::env::remove_var("RUST_LOG");
}

#[test]
fn test_every_format_builds_a_filter() {
    for format in [LogFormat::Pretty, LogFormat::Compact, LogFormat::Json] {
        let config = LogConfig::new().with_format(format).with_level("info");
        assert!(build_env_filter(&config).is_ok());
    }
}
