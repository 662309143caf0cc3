//! Sprig Observability Module
//!
//! Structured logging for the `sprig` binary and its library crates.
//!
//! # Features
//!
//! - **Multiple Output Formats**: Pretty, compact and JSON output
//! - **Environment-based Filtering**: level from configuration, then `RUST_LOG`, then `warn`
//! - **Quiet Mode**: logging can be switched off entirely
//! - **Stderr by Default**: standard output stays reserved for command results
//!
//! # Example
//!
//! ```no_run
//! use sprig_observability::{init_tracing, LogFormat};
//!
//! init_tracing(LogFormat::Compact, Some("debug")).unwrap();
//! tracing::info!("repository opened");
//! ```

pub mod config;
pub mod initialization;

pub use config::{LogConfig, LogError, LogFormat, LogOutput, DEFAULT_LEVEL};
pub use initialization::{build_env_filter, init_tracing, init_tracing_with_config};
