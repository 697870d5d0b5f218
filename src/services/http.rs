//! Shared HTTP plumbing for the web-hook style services.

use std::sync::LazyLock;
use std::time::Duration;

use reqwest::{Method, Response};
use serde::Serialize;

use crate::error::{ServiceError, ServiceResult};
use crate::router::ServiceLogger;

/// Global HTTP client instance shared by every HTTP based service
///
/// Initialized lazily on first access and reused across sends for connection
/// pooling.
pub static HTTP_CLIENT: LazyLock<reqwest::Client> = LazyLock::new(|| {
    reqwest::Client::builder()
        // Timeouts
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        // Connection pooling
        .pool_max_idle_per_host(10)
        .pool_idle_timeout(Duration::from_secs(90))
        .user_agent(concat!("herald-rs/", env!("CARGO_PKG_VERSION")))
        .build()
        .expect("Failed to build HTTP client")
});

/// Sends `body` as JSON with `method` and checks the response status
pub(crate) async fn send_json<T: Serialize + ?Sized>(
    method: Method,
    url: &str,
    body: &T,
    headers: &[(String, String)],
    logger: &ServiceLogger,
) -> ServiceResult<Response> {
    logger.debug(format!("{} {}", method, redact(url)));

    let mut request = HTTP_CLIENT.request(method, url).json(body);
    for (key, value) in headers {
        request = request.header(key, value);
    }

    let response = request.send().await?;
    ensure_success(response, logger).await
}

/// POSTs `body` as JSON and checks the response status
pub(crate) async fn post_json<T: Serialize + ?Sized>(
    url: &str,
    body: &T,
    logger: &ServiceLogger,
) -> ServiceResult<Response> {
    send_json(Method::POST, url, body, &[], logger).await
}

/// Turns a non-success response into `ServiceError::Rejected`
pub(crate) async fn ensure_success(
    response: Response,
    logger: &ServiceLogger,
) -> ServiceResult<Response> {
    let status = response.status();
    if status.is_success() {
        logger.debug(format!("Server answered {}", status));
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    logger.warn(format!("Server rejected the message with {}", status));
    Err(ServiceError::Rejected {
        status: status.as_u16(),
        body,
    })
}

/// Hides the path of an endpoint, which usually carries the secret token
pub(crate) fn redact(url: &str) -> String {
    match reqwest::Url::parse(url) {
        Ok(parsed) => format!(
            "{}://{}/...",
            parsed.scheme(),
            parsed.host_str().unwrap_or_default()
        ),
        Err(_) => "<invalid url>".to_string(),
    }
}
