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
//! Logging initialization and setup.
//!
//! Builds a `Registry` with an `EnvFilter` and one `fmt` layer chosen by
//! [`LogConfig`], then installs it as the global default.

use crate::config::{LogConfig, LogError, LogFormat, LogOutput};
use std::io;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Initialize tracing with the specified format and optional log level.
///
/// `level` falls back to `RUST_LOG`, then to `warn`.
///
/// # Example
///
/// ```no_run
/// use sprig_observability::{init_tracing, LogFormat};
///
/// init_tracing(LogFormat::Pretty, Some("debug")).unwrap();
/// tracing::info!("started");
/// ```
pub fn init_tracing(format: LogFormat, level: Option<&str>) -> Result<(), LogError> {
    let mut config = LogConfig::new().with_format(format);
    if let Some(level) = level {
        config = config.with_level(level);
    }
    init_tracing_with_config(config)
}

/// Initialize tracing with a detailed configuration.
///
/// A disabled configuration installs nothing and succeeds.
///
/// # Errors
///
/// [`LogError::InvalidFilter`] for a malformed level, and
/// [`LogError::AlreadyInitialized`] when a global subscriber exists.
pub fn init_tracing_with_config(config: LogConfig) -> Result<(), LogError> {
    if config.disabled {
        return Ok(());
    }

    let env_filter = build_env_filter(&config)?;
    Registry::default()
        .with(build_layer(&config))
        .with(env_filter)
        .try_init()
        .map_err(|_| LogError::AlreadyInitialized)
}

fn build_layer(config: &LogConfig) -> BoxedLayer {
    let layer = fmt::layer()
        .with_writer(get_writer(config.output))
        .with_target(config.include_targets);

    match (config.format, config.use_timestamps) {
        (LogFormat::Pretty, true) => layer
            .pretty()
            .with_ansi(config.use_color)
            .with_span_events(FmtSpan::ACTIVE)
            .boxed(),
        (LogFormat::Pretty, false) => layer
            .pretty()
            .without_time()
            .with_ansi(config.use_color)
            .with_span_events(FmtSpan::ACTIVE)
            .boxed(),
        (LogFormat::Compact, true) => layer.compact().with_ansi(config.use_color).boxed(),
        (LogFormat::Compact, false) => layer
            .compact()
            .without_time()
            .with_ansi(config.use_color)
            .boxed(),
        (LogFormat::Json, true) => layer.json().with_span_events(FmtSpan::CLOSE).boxed(),
        (LogFormat::Json, false) => layer
            .json()
            .without_time()
            .with_span_events(FmtSpan::CLOSE)
            .boxed(),
    }
}

/// Get the writer for the specified output
fn get_writer(output: LogOutput) -> fn() -> Box<dyn io::Write + Send> {
    match output {
        LogOutput::Stderr => || Box::new(io::stderr()),
        LogOutput::Stdout => || Box::new(io::stdout()),
    }
}

/// Build the level filter for `config`.
pub fn build_env_filter(config: &LogConfig) -> Result<EnvFilter, LogError> {
    let filter = config.get_effective_level();

    EnvFilter::try_new(&filter).map_err(|e| LogError::InvalidFilter {
        filter: filter.clone(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Installing the global subscriber is covered by the CLI tests; it can
    // only happen once per process.

    #[test]
    fn test_env_filter_parsing() {
        assert!(build_env_filter(&LogConfig::new().with_level("debug")).is_ok());
        assert!(build_env_filter(&LogConfig::new().with_level("sprig_versioning=trace")).is_ok());
    }

    #[test]
    fn test_invalid_filter() {
        let err = build_env_filter(&LogConfig::new().with_level("sprig=[[")).unwrap_err();
        assert!(matches!(err, LogError::InvalidFilter { .. }));
    }

    #[test]
    fn test_disabled_config_installs_nothing() {
        assert!(init_tracing_with_config(LogConfig::new().disabled()).is_ok());
    }
}
