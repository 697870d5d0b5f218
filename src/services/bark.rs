//! Bark notification service.
//!
//! Sends push notifications to iOS devices via a Bark server.
//!
//! URL format: `bark://DEVICE_KEY@HOST[:PORT][/PATH]?scheme=https&sound=bell&icon=URL&group=G&level=active`
//!
//! Bark API Reference: https://github.com/Finb/Bark

use async_trait::async_trait;
use serde_json::{Value, json};

use super::http::post_json;
use super::service::{SendOptions, Service, ServiceConfig, parse_flag};
use crate::error::{ServiceError, ServiceResult};
use crate::router::{ServiceLogger, ServiceUrl};

const DEFAULT_TITLE: &str = "Notification";

/// Body fields that extra parameters may not replace
const RESERVED_FIELDS: &[&str] = &["device_key", "title", "body"];

/// Bark server and push settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarkConfig {
    pub server_url: String,
    pub device_key: String,
    pub title: Option<String>,
    pub icon: Option<String>,
    pub sound: Option<String>,
    pub level: Option<String>,
    pub url: Option<String>,
    pub group: Option<String>,
    pub auto_copy: bool,
    pub is_archive: bool,
}

impl BarkConfig {
    /// Push endpoint of the configured server
    pub fn build_api_url(&self) -> String {
        format!("{}/push", self.server_url.trim_end_matches('/'))
    }

    /// Builds the request body for Bark API
    fn build_request_body(&self, message: &str, opts: &SendOptions) -> Value {
        let title = opts
            .title
            .as_deref()
            .or(self.title.as_deref())
            .unwrap_or(DEFAULT_TITLE);

        let mut body = json!({
            "device_key": self.device_key,
            "title": title,
            "body": message,
        });

        if let Some(icon) = &self.icon {
            body["icon"] = json!(icon);
        }

        if let Some(sound) = &self.sound {
            body["sound"] = json!(sound);
        }

        if let Some(level) = &self.level {
            body["level"] = json!(level);
        }

        if let Some(url) = &self.url {
            body["url"] = json!(url);
        }

        if let Some(group) = &self.group {
            body["group"] = json!(group);
        }

        if self.auto_copy {
            body["autoCopy"] = json!("1");
        }

        if self.is_archive {
            body["isArchive"] = json!("1");
        }

        // Extra parameters become custom fields
        for (key, value) in &opts.params {
            if RESERVED_FIELDS.contains(&key.as_str()) {
                continue;
            }
            body[key] = json!(value);
        }

        body
    }
}

impl ServiceConfig for BarkConfig {
    fn from_url(url: &ServiceUrl) -> ServiceResult<Self> {
        let device_key = url.username();
        if device_key.is_empty() {
            return Err(ServiceError::invalid_config("device_key", "Device key cannot be empty"));
        }

        let host = url
            .host()
            .ok_or_else(|| ServiceError::invalid_config("host", "Bark server host is missing"))?;

        let scheme = url
            .query_param("scheme")
            .unwrap_or_else(|| "https".to_string())
            .to_lowercase();
        if scheme != "https" && scheme != "http" {
            return Err(ServiceError::invalid_config(
                "scheme",
                "URL must use http or https protocol",
            ));
        }

        let server_url = match url.port() {
            Some(port) => format!("{}://{}:{}{}", scheme, host, port, url.path()),
            None => format!("{}://{}{}", scheme, host, url.path()),
        };

        let level = url.query_param("level");
        if let Some(level) = &level {
            match level.as_str() {
                "passive" | "active" | "timeSensitive" | "critical" => {}
                _ => {
                    return Err(ServiceError::invalid_config(
                        "level",
                        "Level must be one of: passive, active, timeSensitive, critical",
                    ));
                }
            }
        }

        let auto_copy = match url.query_param("copy") {
            Some(value) => parse_flag("copy", &value)?,
            None => false,
        };

        let is_archive = match url.query_param("archive") {
            Some(value) => parse_flag("archive", &value)?,
            None => false,
        };

        Ok(Self {
            server_url,
            device_key: device_key.into_owned(),
            title: url.query_param("title"),
            icon: url.query_param("icon"),
            sound: url.query_param("sound"),
            level,
            url: url.query_param("url"),
            group: url.query_param("group"),
            auto_copy,
            is_archive,
        })
    }
}

/// Sends push notifications through a Bark server
#[derive(Debug, Clone, Copy, Default)]
pub struct BarkService;

#[async_trait]
impl Service for BarkService {
    fn name(&self) -> &'static str {
        "bark"
    }

    async fn send(
        &self,
        url: &ServiceUrl,
        message: &str,
        opts: &SendOptions,
        logger: &ServiceLogger,
    ) -> ServiceResult<()> {
        let config = BarkConfig::from_url(url)?;
        let request_body = config.build_request_body(message, opts);

        logger.info("Pushing message to Bark server");
        post_json(&config.build_api_url(), &request_body, logger).await?;
        Ok(())
    }

    fn validate_url(&self, url: &ServiceUrl) -> ServiceResult<()> {
        BarkConfig::from_url(url).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(raw: &str) -> ServiceResult<BarkConfig> {
        BarkConfig::from_url(&ServiceUrl::parse(raw).unwrap())
    }

    #[test]
    fn test_build_api_url() {
        let config = config("bark://test_key_123@bark.example.com").unwrap();
        assert_eq!(config.build_api_url(), "https://bark.example.com/push");
    }

    #[test]
    fn test_build_api_url_trailing_slash() {
        let config = config("bark://key@bark.example.com/").unwrap();
        assert_eq!(config.build_api_url(), "https://bark.example.com/push");
    }

    #[test]
    fn test_build_api_url_with_port_and_path() {
        let config = config("bark://key@localhost:8080/bark?scheme=http").unwrap();
        assert_eq!(config.build_api_url(), "http://localhost:8080/bark/push");
    }

    #[test]
    fn test_validate_rejects_unknown_scheme() {
        assert!(config("bark://key@host?scheme=ftp").is_err());
    }

    #[test]
    fn test_validate_rejects_empty_device_key() {
        let err = config("bark://bark.example.com").unwrap_err();
        assert!(matches!(err, ServiceError::InvalidConfig { ref field, .. } if field == "device_key"));
    }

    #[test]
    fn test_validate_level() {
        assert!(config("bark://key@host?level=active").is_ok());
        assert!(config("bark://key@host?level=loud").is_err());
    }

    #[test]
    fn test_build_request_body() {
        let config = config("bark://key@host?sound=bell&group=ci&copy=yes").unwrap();
        let opts = SendOptions::new().with_title("Deploy").with_param("badge", "3");
        let body = config.build_request_body("finished", &opts);

        assert_eq!(body["device_key"], "key");
        assert_eq!(body["title"], "Deploy");
        assert_eq!(body["body"], "finished");
        assert_eq!(body["sound"], "bell");
        assert_eq!(body["group"], "ci");
        assert_eq!(body["autoCopy"], "1");
        assert_eq!(body["badge"], "3");
        assert!(body.get("isArchive").is_none());
    }

    #[test]
    fn test_params_do_not_replace_reserved_fields() {
        let config = config("bark://key@host").unwrap();
        let opts = SendOptions::new()
            .with_title("Deploy")
            .with_param("device_key", "other")
            .with_param("title", "Spoofed")
            .with_param("body", "replaced")
            .with_param("sound", "alarm");
        let body = config.build_request_body("finished", &opts);

        assert_eq!(body["device_key"], "key");
        assert_eq!(body["title"], "Deploy");
        assert_eq!(body["body"], "finished");
        assert_eq!(body["sound"], "alarm");
    }

    #[test]
    fn test_default_title() {
        let config = config("bark://key@host").unwrap();
        let body = config.build_request_body("hi", &SendOptions::default());
        assert_eq!(body["title"], DEFAULT_TITLE);
    }
}
