use thiserror::Error;

/// Errors raised by notification services while configuring or delivering.
///
/// These are opaque to the router, which only wraps them with the scheme
/// that produced them.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The service URL does not carry a usable configuration
    #[error("Invalid configuration for {field}: {reason}")]
    InvalidConfig { field: String, reason: String },

    /// Transport level HTTP failure
    #[error("HTTP request failed")]
    Http(#[from] reqwest::Error),

    /// The remote endpoint answered with a non-success status
    #[error("Request rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// The SMTP server answered a command with an unexpected reply
    #[error("SMTP {stage} failed: {reply}")]
    Smtp { stage: String, reply: String },

    /// Socket level I/O failure
    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    pub fn invalid_config(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field: field.into(),
            reason: reason.into(),
        }
    }

    pub fn smtp(stage: impl Into<String>, reply: impl Into<String>) -> Self {
        Self::Smtp {
            stage: stage.into(),
            reply: reply.into(),
        }
    }
}

/// Type alias for Result with ServiceError
pub type ServiceResult<T> = Result<T, ServiceError>;
