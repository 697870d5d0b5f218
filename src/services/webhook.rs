//! Generic webhook notification service.
//!
//! URL format: `webhook://HOST[:PORT][/PATH]?method=POST&tls=no&header-X-Token=VALUE`
//!
//! Sends the message as JSON `{ "title", "body", "metadata" }` to
//! `https://HOST[:PORT]/PATH` (`http://` when `tls=no`). Query parameters
//! prefixed with `header-` become request headers.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::json;

use super::http::send_json;
use super::service::{SendOptions, Service, ServiceConfig, parse_flag};
use crate::error::{ServiceError, ServiceResult};
use crate::router::{ServiceLogger, ServiceUrl};

const HEADER_PREFIX: &str = "header-";

/// Webhook target configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    pub url: String,
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub title: Option<String>,
}

impl ServiceConfig for WebhookConfig {
    fn from_url(url: &ServiceUrl) -> ServiceResult<Self> {
        let host = url
            .host()
            .ok_or_else(|| ServiceError::invalid_config("host", "webhook host is missing"))?;

        let tls = match url.query_param("tls") {
            Some(value) => parse_flag("tls", &value)?,
            None => true,
        };
        let scheme = if tls { "https" } else { "http" };

        let target = match url.port() {
            Some(port) => format!("{}://{}:{}{}", scheme, host, port, url.path()),
            None => format!("{}://{}{}", scheme, host, url.path()),
        };

        let method_name = url
            .query_param("method")
            .unwrap_or_else(|| "POST".to_string())
            .to_uppercase();
        let method: Method = method_name.parse().map_err(|_| {
            ServiceError::invalid_config("method", format!("Invalid HTTP method: {}", method_name))
        })?;

        let mut headers: Vec<(String, String)> = url
            .query_params()
            .into_iter()
            .filter_map(|(key, value)| {
                key.strip_prefix(HEADER_PREFIX)
                    .filter(|name| !name.is_empty())
                    .map(|name| (name.to_string(), value))
            })
            .collect();
        headers.sort();

        Ok(Self {
            url: target,
            method,
            headers,
            title: url.query_param("title"),
        })
    }
}

/// Sends messages as JSON to an arbitrary HTTP endpoint
#[derive(Debug, Clone, Copy, Default)]
pub struct WebhookService;

#[async_trait]
impl Service for WebhookService {
    fn name(&self) -> &'static str {
        "webhook"
    }

    async fn send(
        &self,
        url: &ServiceUrl,
        message: &str,
        opts: &SendOptions,
        logger: &ServiceLogger,
    ) -> ServiceResult<()> {
        let config = WebhookConfig::from_url(url)?;
        let body = json!({
            "title": opts.title.as_deref().or(config.title.as_deref()),
            "body": message,
            "metadata": opts.params,
        });

        logger.info(format!("Calling webhook with {}", config.method));
        send_json(config.method.clone(), &config.url, &body, &config.headers, logger).await?;
        Ok(())
    }

    fn validate_url(&self, url: &ServiceUrl) -> ServiceResult<()> {
        WebhookConfig::from_url(url).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(raw: &str) -> ServiceResult<WebhookConfig> {
        WebhookConfig::from_url(&ServiceUrl::parse(raw).unwrap())
    }

    #[test]
    fn test_defaults_to_https_post() {
        let config = config("webhook://example.com/hooks/1").unwrap();
        assert_eq!(config.url, "https://example.com/hooks/1");
        assert_eq!(config.method, Method::POST);
        assert!(config.headers.is_empty());
    }

    #[test]
    fn test_plain_http_with_port_and_method() {
        let config = config("webhook://localhost:8080/in?tls=no&method=put").unwrap();
        assert_eq!(config.url, "http://localhost:8080/in");
        assert_eq!(config.method, Method::PUT);
    }

    #[test]
    fn test_headers_from_query() {
        let config = config("webhook://h/p?header-X-Token=abc&header-Accept=json&other=1").unwrap();
        assert_eq!(
            config.headers,
            vec![
                ("accept".to_string(), "json".to_string()),
                ("x-token".to_string(), "abc".to_string()),
            ]
        );
    }

    #[test]
    fn test_invalid_method() {
        assert!(config("webhook://h/p?method=NOT%20A%20METHOD").is_err());
    }

    #[test]
    fn test_invalid_tls_flag() {
        assert!(config("webhook://h/p?tls=perhaps").is_err());
    }
}
