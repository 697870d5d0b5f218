//! Core notification service trait and types.
//!
//! A service turns a [`ServiceUrl`] into its own configuration and performs
//! the delivery. Services are registered once and shared by every routing
//! call, so they keep no per-call state.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ServiceResult;
use crate::router::{ServiceLogger, ServiceUrl};

/// Per-call options forwarded to the service untouched
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendOptions {
    /// Message title/subject, overrides any title set in the URL
    pub title: Option<String>,
    /// Free-form parameters for services that accept them
    #[serde(default)]
    pub params: HashMap<String, String>,
}

impl SendOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }
}

/// Configuration derived from a service URL
pub trait ServiceConfig: Sized {
    fn from_url(url: &ServiceUrl) -> ServiceResult<Self>;
}

/// Trait for notification services (chat, push, email, ...)
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// All services must be Send + Sync for use behind the shared registry.
#[async_trait]
pub trait Service: Send + Sync {
    /// Scheme the service is registered under by default
    fn name(&self) -> &'static str;

    /// Delivers `message` to the destination described by `url`
    ///
    /// # Arguments
    /// * `url` - Parsed service URL carrying the destination and settings
    /// * `message` - Message body
    /// * `opts` - Per-call options
    /// * `logger` - Progress output for this call
    async fn send(
        &self,
        url: &ServiceUrl,
        message: &str,
        opts: &SendOptions,
        logger: &ServiceLogger,
    ) -> ServiceResult<()>;

    /// Checks that `url` yields a usable configuration without sending
    fn validate_url(&self, url: &ServiceUrl) -> ServiceResult<()>;
}

/// Splits a comma separated parameter into trimmed, non-empty items
pub(crate) fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses a yes/no style flag
pub(crate) fn parse_flag(field: &str, value: &str) -> ServiceResult<bool> {
    match value.to_lowercase().as_str() {
        "yes" | "true" | "1" | "on" => Ok(true),
        "no" | "false" | "0" | "off" => Ok(false),
        _ => Err(crate::error::ServiceError::invalid_config(
            field,
            format!("expected yes or no, got '{}'", value),
        )),
    }
}

/// Prefixes the message with the title when one is set
pub(crate) fn titled_message(title: Option<&str>, message: &str) -> String {
    match title {
        Some(title) if !title.is_empty() => format!("{}\n{}", title, message),
        _ => message.to_string(),
    }
}
