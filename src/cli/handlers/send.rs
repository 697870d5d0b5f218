//! Send command handler

use std::time::Duration;

use futures::stream::{self, StreamExt};
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{info, warn};

use super::report::{UrlFailure, UrlOutcome, UrlReport};
use crate::config::DeliveryConfig;
use crate::router::ServiceRouter;
use crate::services::SendOptions;

/// Message and destinations for one `send` invocation
#[derive(Debug, Clone)]
pub struct SendRequest {
    pub urls: Vec<String>,
    pub message: String,
    pub options: SendOptions,
}

/// Routes one message to every requested URL
///
/// Each URL is delivered independently under its own timeout. At most
/// `concurrency` deliveries run at once and outcomes keep the input order.
pub struct SendCommandHandler<'a> {
    router: &'a ServiceRouter,
    timeout: Duration,
    concurrency: usize,
}

impl<'a> SendCommandHandler<'a> {
    pub fn new(router: &'a ServiceRouter, delivery: &DeliveryConfig) -> Self {
        Self {
            router,
            timeout: delivery.timeout(),
            concurrency: delivery.concurrency.max(1),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn execute(&self, request: &SendRequest) -> UrlReport {
        let outcomes = stream::iter(request.urls.iter().enumerate())
            .map(|(index, url)| self.deliver(index + 1, url, request))
            .buffered(self.concurrency)
            .collect::<Vec<_>>()
            .await;

        UrlReport {
            action: "sent",
            outcomes,
        }
    }

    async fn deliver(&self, position: usize, url: &str, request: &SendRequest) -> UrlOutcome {
        let scheme = self
            .router
            .extract_service_name(url)
            .ok()
            .map(|(scheme, _)| scheme);

        let routed = self
            .router
            .route(url, &request.message, &request.options);
        let result = match tokio::time::timeout(self.timeout, routed).await {
            Ok(result) => result.map_err(UrlFailure::from),
            Err(_) => Err(UrlFailure::TimedOut(self.timeout)),
        };

        match result {
            Ok(()) => info!(position, scheme = scheme.as_deref(), "Message delivered"),
            Err(ref e) => warn!(
                position,
                scheme = scheme.as_deref(),
                stage = e.stage(),
                error = %e,
                "Message delivery failed"
            ),
        }

        UrlOutcome {
            position,
            scheme,
            result,
        }
    }
}

/// Resolves the `--message` argument, reading `input` to the end for `-`
///
/// A single trailing newline from piped input is dropped.
pub async fn read_message<R>(arg: &str, mut input: R) -> std::io::Result<String>
where
    R: AsyncRead + Unpin,
{
    if arg != "-" {
        return Ok(arg.to_string());
    }

    let mut message = String::new();
    input.read_to_string(&mut message).await?;
    if message.ends_with('\n') {
        message.pop();
        if message.ends_with('\r') {
            message.pop();
        }
    }
    Ok(message)
}
