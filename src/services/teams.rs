//! Microsoft Teams notification service.
//!
//! URL format: `teams://GROUP@TENANT/ALT_ID/GROUP_OWNER?host=example.webhook.office.com&color=0078D7`
//!
//! Maps to the Office 365 connector web-hook
//! `https://HOST/webhookb2/GROUP@TENANT/IncomingWebhook/ALT_ID/GROUP_OWNER`.

use async_trait::async_trait;
use serde::Serialize;

use super::http::post_json;
use super::service::{SendOptions, Service, ServiceConfig};
use crate::error::{ServiceError, ServiceResult};
use crate::router::{ServiceLogger, ServiceUrl};

const DEFAULT_HOST: &str = "outlook.office.com";

/// Teams connector web-hook configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamsConfig {
    pub group: String,
    pub tenant: String,
    pub alt_id: String,
    pub group_owner: String,
    pub host: String,
    pub color: Option<String>,
    pub title: Option<String>,
}

impl TeamsConfig {
    pub fn webhook_url(&self) -> String {
        format!(
            "https://{}/webhookb2/{}@{}/IncomingWebhook/{}/{}",
            self.host, self.group, self.tenant, self.alt_id, self.group_owner
        )
    }
}

impl ServiceConfig for TeamsConfig {
    fn from_url(url: &ServiceUrl) -> ServiceResult<Self> {
        let group = url.username();
        if group.is_empty() {
            return Err(ServiceError::invalid_config("group", "group id is missing"));
        }

        let tenant = url
            .host()
            .ok_or_else(|| ServiceError::invalid_config("tenant", "tenant id is missing"))?;

        let segments = url.path_segments();
        let [alt_id, group_owner]: [String; 2] = segments.try_into().map_err(|_| {
            ServiceError::invalid_config("path", "expected /ALT_ID/GROUP_OWNER")
        })?;

        Ok(Self {
            group: group.into_owned(),
            tenant: tenant.to_string(),
            alt_id,
            group_owner,
            host: url
                .query_param("host")
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            color: url.query_param("color"),
            title: url.query_param("title"),
        })
    }
}

#[derive(Debug, Serialize)]
struct MessageCard<'a> {
    #[serde(rename = "@type")]
    card_type: &'static str,
    #[serde(rename = "@context")]
    context: &'static str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<&'a str>,
    #[serde(rename = "themeColor", skip_serializing_if = "Option::is_none")]
    theme_color: Option<&'a str>,
}

fn build_card<'a>(config: &'a TeamsConfig, message: &'a str, opts: &'a SendOptions) -> MessageCard<'a> {
    MessageCard {
        card_type: "MessageCard",
        context: "http://schema.org/extensions",
        text: message,
        title: opts.title.as_deref().or(config.title.as_deref()),
        theme_color: config.color.as_deref(),
    }
}

/// Sends messages to a Teams channel connector
#[derive(Debug, Clone, Copy, Default)]
pub struct TeamsService;

#[async_trait]
impl Service for TeamsService {
    fn name(&self) -> &'static str {
        "teams"
    }

    async fn send(
        &self,
        url: &ServiceUrl,
        message: &str,
        opts: &SendOptions,
        logger: &ServiceLogger,
    ) -> ServiceResult<()> {
        let config = TeamsConfig::from_url(url)?;
        let card = build_card(&config, message, opts);

        logger.info(format!("Posting message card to Teams via {}", config.host));
        post_json(&config.webhook_url(), &card, logger).await?;
        Ok(())
    }

    fn validate_url(&self, url: &ServiceUrl) -> ServiceResult<()> {
        TeamsConfig::from_url(url).map(|_| ())
    }
}
