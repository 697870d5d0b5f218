//! Command handlers for CLI operations
//!
//! Handlers return their results; printing is left to the executor.

pub mod report;
pub mod send;
pub mod services;
pub mod verify;

pub use report::{UrlFailure, UrlOutcome, UrlReport};
pub use send::{SendCommandHandler, SendRequest, read_message};
pub use services::ServicesCommandHandler;
pub use verify::VerifyCommandHandler;
