//! Shared library for mal-helper.
//!
//! This crate provides the ambient functionality the CLI depends on:
//! - Configuration management
//! - Logging infrastructure

pub mod config;
pub mod logging;

// Re-export commonly used types
pub use config::{Config, LoggingConfig, MalConfig};
pub use logging::LogConfig;
