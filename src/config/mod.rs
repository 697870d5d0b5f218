//! Configuration management for herald-rs
//!
//! Layered TOML files plus `HERALD_*` environment overrides, loaded with the
//! `config` crate into [`Settings`].
//!
//! # Configuration Priority (lowest to highest)
//! 1. `default.toml`
//! 2. `{environment}.toml`
//! 3. `local.toml`
//! 4. `HERALD_*` environment variables

pub mod environment;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use environment::Environment;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use settings::{ApplicationConfig, DeliveryConfig, LoggerSettings, Settings};
