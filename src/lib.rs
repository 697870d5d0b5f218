//! herald-rs
//!
//! Routes notification messages to chat, push, email and webhook services
//! selected by the scheme of a service URL.
//!
//! ```no_run
//! use herald_rs::{SendOptions, ServiceRouter};
//!
//! # async fn run() -> Result<(), herald_rs::RouterError> {
//! let router = ServiceRouter::default();
//! router
//!     .route("discord://token@1234567890", "Deploy finished", &SendOptions::new())
//!     .await
//! # }
//! ```

use shadow_rs::shadow;
shadow!(build);

pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod router;
pub mod services;

pub use error::{RouterError, RouterResult, ServiceError, ServiceResult};
pub use router::{
    LocatedService, LogSink, RegistryBuilder, ServiceRegistry, ServiceRouter, ServiceUrl,
    TracingSink,
};
pub use services::{SendOptions, Service, ServiceConfig};

pub fn pkg_version() -> &'static str {
    build::PKG_VERSION
}

pub fn clap_long_version() -> &'static str {
    build::CLAP_LONG_VERSION
}
