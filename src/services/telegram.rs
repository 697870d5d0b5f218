//! Telegram notification service.
//!
//! URL format: `telegram://BOT_TOKEN@telegram?chats=@channel,12345&parsemode=Markdown&notification=no&preview=no`
//!
//! The bot token contains a colon, so it spans both halves of the URL
//! user-info. One `sendMessage` call is made per chat.

use async_trait::async_trait;
use serde::Serialize;

use super::http::post_json;
use super::service::{SendOptions, Service, ServiceConfig, parse_flag, split_list, titled_message};
use crate::error::{ServiceError, ServiceResult};
use crate::router::{ServiceLogger, ServiceUrl};

const API_BASE: &str = "https://api.telegram.org";

/// Parse modes accepted by the Bot API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ParseMode {
    Markdown,
    MarkdownV2,
    #[serde(rename = "HTML")]
    Html,
}

impl std::str::FromStr for ParseMode {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "markdown" => Ok(ParseMode::Markdown),
            "markdownv2" => Ok(ParseMode::MarkdownV2),
            "html" => Ok(ParseMode::Html),
            _ => Err(ServiceError::invalid_config(
                "parsemode",
                format!("unknown parse mode '{}'", s),
            )),
        }
    }
}

/// Telegram bot configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramConfig {
    pub token: String,
    pub chats: Vec<String>,
    pub parse_mode: Option<ParseMode>,
    pub notification: bool,
    pub preview: bool,
    pub title: Option<String>,
}

impl TelegramConfig {
    pub fn send_message_url(&self) -> String {
        format!("{}/bot{}/sendMessage", API_BASE, self.token)
    }
}

impl ServiceConfig for TelegramConfig {
    fn from_url(url: &ServiceUrl) -> ServiceResult<Self> {
        let token = url.user_info();
        let valid_token = token
            .split_once(':')
            .is_some_and(|(id, secret)| {
                !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()) && !secret.is_empty()
            });
        if !valid_token {
            return Err(ServiceError::invalid_config(
                "token",
                "expected a bot token of the form ID:SECRET",
            ));
        }

        let chats = url
            .query_param("chats")
            .map(|c| split_list(&c))
            .unwrap_or_default();
        if chats.is_empty() {
            return Err(ServiceError::invalid_config("chats", "at least one chat is required"));
        }

        let parse_mode = match url.query_param("parsemode") {
            Some(mode) if mode.eq_ignore_ascii_case("none") || mode.is_empty() => None,
            Some(mode) => Some(mode.parse()?),
            None => None,
        };

        let notification = match url.query_param("notification") {
            Some(value) => parse_flag("notification", &value)?,
            None => true,
        };

        let preview = match url.query_param("preview") {
            Some(value) => parse_flag("preview", &value)?,
            None => true,
        };

        Ok(Self {
            token,
            chats,
            parse_mode,
            notification,
            preview,
            title: url.query_param("title"),
        })
    }
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parse_mode: Option<ParseMode>,
    disable_notification: bool,
    disable_web_page_preview: bool,
}

/// Sends messages through a Telegram bot
#[derive(Debug, Clone, Copy, Default)]
pub struct TelegramService;

#[async_trait]
impl Service for TelegramService {
    fn name(&self) -> &'static str {
        "telegram"
    }

    async fn send(
        &self,
        url: &ServiceUrl,
        message: &str,
        opts: &SendOptions,
        logger: &ServiceLogger,
    ) -> ServiceResult<()> {
        let config = TelegramConfig::from_url(url)?;
        let text = titled_message(opts.title.as_deref().or(config.title.as_deref()), message);
        let endpoint = config.send_message_url();

        for chat in &config.chats {
            let body = SendMessage {
                chat_id: chat,
                text: &text,
                parse_mode: config.parse_mode,
                disable_notification: !config.notification,
                disable_web_page_preview: !config.preview,
            };

            logger.info(format!("Sending message to Telegram chat {}", chat));
            post_json(&endpoint, &body, logger).await?;
        }

        Ok(())
    }

    fn validate_url(&self, url: &ServiceUrl) -> ServiceResult<()> {
        TelegramConfig::from_url(url).map(|_| ())
    }
}
