use thiserror::Error;

use super::ServiceError;

/// Errors surfaced by the service router.
///
/// Every stage of a routing call (parse, locate, send) fails with exactly one
/// of these variants. Backend failures are carried unchanged inside
/// [`RouterError::Delivery`].
#[derive(Error, Debug)]
pub enum RouterError {
    /// The raw address could not be parsed as a service URL
    #[error("Malformed service URL '{address}': {reason}")]
    MalformedAddress { address: String, reason: String },

    /// No service is registered for the scheme
    #[error("Unknown service scheme '{scheme}'")]
    UnknownScheme { scheme: String },

    /// A scheme was registered twice while building a registry
    #[error("Service scheme '{scheme}' is already registered")]
    DuplicateScheme { scheme: String },

    /// The service URL was routed but does not configure the service
    #[error("Invalid configuration for '{scheme}'")]
    Configuration {
        scheme: String,
        #[source]
        source: ServiceError,
    },

    /// The located service failed to deliver the message
    #[error("Failed to send via '{scheme}'")]
    Delivery {
        scheme: String,
        #[source]
        source: ServiceError,
    },
}

impl RouterError {
    pub fn malformed(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedAddress {
            address: address.into(),
            reason: reason.into(),
        }
    }

    /// Name of the routing stage that produced the error
    pub fn stage(&self) -> &'static str {
        match self {
            RouterError::MalformedAddress { .. } => "parse",
            RouterError::UnknownScheme { .. } => "locate",
            RouterError::DuplicateScheme { .. } => "register",
            RouterError::Configuration { .. } => "configure",
            RouterError::Delivery { .. } => "send",
        }
    }

    /// The service error, if the located service failed
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            RouterError::Configuration { source, .. } | RouterError::Delivery { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}

/// Type alias for Result with RouterError
pub type RouterResult<T> = Result<T, RouterError>;
