//! Discord notification service.
//!
//! URL format: `discord://TOKEN@WEBHOOK_ID?username=NAME&avatar=URL`
//!
//! Posts to the webhook endpoint `https://discord.com/api/webhooks/ID/TOKEN`.

use async_trait::async_trait;
use serde::Serialize;

use super::http::post_json;
use super::service::{SendOptions, Service, ServiceConfig};
use crate::error::{ServiceError, ServiceResult};
use crate::router::{ServiceLogger, ServiceUrl};

const WEBHOOK_BASE: &str = "https://discord.com/api/webhooks";

/// Discord webhook configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscordConfig {
    pub webhook_id: String,
    pub token: String,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub title: Option<String>,
}

impl DiscordConfig {
    pub fn webhook_url(&self) -> String {
        format!("{}/{}/{}", WEBHOOK_BASE, self.webhook_id, self.token)
    }
}

impl ServiceConfig for DiscordConfig {
    fn from_url(url: &ServiceUrl) -> ServiceResult<Self> {
        let token = url.username();
        if token.is_empty() {
            return Err(ServiceError::invalid_config("token", "webhook token is missing"));
        }

        let webhook_id = url
            .host()
            .ok_or_else(|| ServiceError::invalid_config("webhook_id", "webhook id is missing"))?;

        Ok(Self {
            webhook_id: webhook_id.to_string(),
            token: token.into_owned(),
            username: url.query_param("username"),
            avatar_url: url.query_param("avatar"),
            title: url.query_param("title"),
        })
    }
}

#[derive(Debug, Serialize)]
struct Embed<'a> {
    title: &'a str,
    description: &'a str,
}

#[derive(Debug, Serialize)]
struct WebhookPayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    embeds: Vec<Embed<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    avatar_url: Option<&'a str>,
}

fn build_payload<'a>(
    config: &'a DiscordConfig,
    message: &'a str,
    opts: &'a SendOptions,
) -> WebhookPayload<'a> {
    let title = opts.title.as_deref().or(config.title.as_deref());
    let (content, embeds) = match title {
        Some(title) => (
            None,
            vec![Embed {
                title,
                description: message,
            }],
        ),
        None => (Some(message), Vec::new()),
    };

    WebhookPayload {
        content,
        embeds,
        username: config.username.as_deref(),
        avatar_url: config.avatar_url.as_deref(),
    }
}

/// Sends messages to a Discord channel through an incoming webhook
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscordService;

#[async_trait]
impl Service for DiscordService {
    fn name(&self) -> &'static str {
        "discord"
    }

    async fn send(
        &self,
        url: &ServiceUrl,
        message: &str,
        opts: &SendOptions,
        logger: &ServiceLogger,
    ) -> ServiceResult<()> {
        let config = DiscordConfig::from_url(url)?;
        let payload = build_payload(&config, message, opts);

        logger.info(format!("Posting message to Discord webhook {}", config.webhook_id));
        post_json(&config.webhook_url(), &payload, logger).await?;
        Ok(())
    }

    fn validate_url(&self, url: &ServiceUrl) -> ServiceResult<()> {
        DiscordConfig::from_url(url).map(|_| ())
    }
}
