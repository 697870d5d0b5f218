//! Slack notification service.
//!
//! URL format: `slack://T000/B000/XXXX?username=NAME&icon=:emoji:&channel=#general`
//!
//! The three tokens are the path of a Slack incoming web-hook,
//! `https://hooks.slack.com/services/T000/B000/XXXX`.

use async_trait::async_trait;
use serde::Serialize;

use super::http::post_json;
use super::service::{SendOptions, Service, ServiceConfig};
use crate::error::{ServiceError, ServiceResult};
use crate::router::{ServiceLogger, ServiceUrl};

const HOOK_BASE: &str = "https://hooks.slack.com/services";

/// Slack incoming web-hook configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlackConfig {
    pub tokens: [String; 3],
    pub username: Option<String>,
    pub icon: Option<String>,
    pub channel: Option<String>,
    pub title: Option<String>,
}

impl SlackConfig {
    pub fn webhook_url(&self) -> String {
        format!("{}/{}", HOOK_BASE, self.tokens.join("/"))
    }
}

impl ServiceConfig for SlackConfig {
    fn from_url(url: &ServiceUrl) -> ServiceResult<Self> {
        let mut parts: Vec<String> = url.host().map(str::to_string).into_iter().collect();
        parts.extend(url.path_segments());

        let tokens: [String; 3] = parts.try_into().map_err(|parts: Vec<String>| {
            ServiceError::invalid_config(
                "tokens",
                format!("expected 3 web-hook tokens, got {}", parts.len()),
            )
        })?;

        Ok(Self {
            tokens,
            username: url.query_param("username"),
            icon: url.query_param("icon"),
            channel: url.query_param("channel"),
            title: url.query_param("title"),
        })
    }
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct Payload {
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_emoji: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    channel: Option<String>,
}

fn build_payload(config: &SlackConfig, message: &str, opts: &SendOptions) -> Payload {
    let text = match opts.title.as_deref().or(config.title.as_deref()) {
        Some(title) if !title.is_empty() => format!("*{}*\n{}", title, message),
        _ => message.to_string(),
    };

    // Icons wrapped in colons are emoji names, anything else is an image URL
    let (icon_emoji, icon_url) = match config.icon.as_deref() {
        Some(icon) if icon.starts_with(':') && icon.ends_with(':') => {
            (Some(icon.to_string()), None)
        }
        Some(icon) => (None, Some(icon.to_string())),
        None => (None, None),
    };

    Payload {
        text,
        username: config.username.clone(),
        icon_emoji,
        icon_url,
        channel: config.channel.clone(),
    }
}

/// Sends messages to Slack through an incoming web-hook
#[derive(Debug, Clone, Copy, Default)]
pub struct SlackService;

#[async_trait]
impl Service for SlackService {
    fn name(&self) -> &'static str {
        "slack"
    }

    async fn send(
        &self,
        url: &ServiceUrl,
        message: &str,
        opts: &SendOptions,
        logger: &ServiceLogger,
    ) -> ServiceResult<()> {
        let config = SlackConfig::from_url(url)?;
        let payload = build_payload(&config, message, opts);

        logger.info("Posting message to Slack web-hook");
        post_json(&config.webhook_url(), &payload, logger).await?;
        Ok(())
    }

    fn validate_url(&self, url: &ServiceUrl) -> ServiceResult<()> {
        SlackConfig::from_url(url).map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(raw: &str) -> ServiceResult<SlackConfig> {
        SlackConfig::from_url(&ServiceUrl::parse(raw).unwrap())
    }

    #[test]
    fn test_config_from_url() {
        let config = config("slack://T000/B000/XXXX?username=bot&channel=%23ops").unwrap();
        assert_eq!(
            config.webhook_url(),
            "https://hooks.slack.com/services/T000/B000/XXXX"
        );
        assert_eq!(config.username.as_deref(), Some("bot"));
        assert_eq!(config.channel.as_deref(), Some("#ops"));
    }

    #[test]
    fn test_config_rejects_wrong_token_count() {
        assert!(config("slack://T000/B000").is_err());
        assert!(config("slack://T000/B000/XXXX/extra").is_err());
    }

    #[test]
    fn test_payload_icons() {
        let emoji = config("slack://a/b/c?icon=:robot:").unwrap();
        let payload = build_payload(&emoji, "hi", &SendOptions::default());
        assert_eq!(payload.icon_emoji.as_deref(), Some(":robot:"));
        assert!(payload.icon_url.is_none());

        let image = config("slack://a/b/c?icon=https://example.com/i.png").unwrap();
        let payload = build_payload(&image, "hi", &SendOptions::default());
        assert_eq!(payload.icon_url.as_deref(), Some("https://example.com/i.png"));
    }

    #[test]
    fn test_payload_title() {
        let config = config("slack://a/b/c").unwrap();
        let payload = build_payload(&config, "body", &SendOptions::new().with_title("Alert"));
        assert_eq!(payload.text, "*Alert*\nbody");
    }
}
