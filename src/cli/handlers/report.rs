//! Per-URL results printed by the `send` and `verify` commands

use std::error::Error as StdError;
use std::fmt;
use std::time::Duration;

use thiserror::Error;

use crate::error::RouterError;

/// Why a single URL did not succeed
#[derive(Debug, Error)]
pub enum UrlFailure {
    #[error(transparent)]
    Router(#[from] RouterError),

    #[error("Timed out after {}s", .0.as_secs())]
    TimedOut(Duration),
}

impl UrlFailure {
    pub fn stage(&self) -> &'static str {
        match self {
            UrlFailure::Router(err) => err.stage(),
            UrlFailure::TimedOut(_) => "send",
        }
    }
}

/// Result for the URL given at `position` (1-based) on the command line
#[derive(Debug)]
pub struct UrlOutcome {
    pub position: usize,
    /// Scheme as written, when the URL parsed far enough to have one
    pub scheme: Option<String>,
    pub result: Result<(), UrlFailure>,
}

impl UrlOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Outcomes of one command, in command line order
#[derive(Debug)]
pub struct UrlReport {
    /// Word printed for a successful URL ("sent", "valid")
    pub action: &'static str,
    pub outcomes: Vec<UrlOutcome>,
}

impl UrlReport {
    pub fn failures(&self) -> usize {
        self.outcomes.iter().filter(|o| !o.is_success()).count()
    }

    pub fn is_success(&self) -> bool {
        self.failures() == 0
    }

    /// Fails with a summary when any URL failed
    pub fn into_result(self) -> anyhow::Result<()> {
        let failures = self.failures();
        if failures > 0 {
            anyhow::bail!("{} of {} URLs failed", failures, self.outcomes.len());
        }
        Ok(())
    }
}

impl fmt::Display for UrlReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outcome in &self.outcomes {
            let scheme = outcome.scheme.as_deref().unwrap_or("?");
            match &outcome.result {
                Ok(()) => writeln!(f, "[{}] {}: {}", outcome.position, scheme, self.action)?,
                Err(err) => writeln!(
                    f,
                    "[{}] {}: failed at {}: {}",
                    outcome.position,
                    scheme,
                    err.stage(),
                    error_chain(err)
                )?,
            }
        }
        Ok(())
    }
}

/// Joins an error and its sources with ": "
pub(crate) fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
