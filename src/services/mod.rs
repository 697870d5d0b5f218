//! Notification services with a pluggable trait.
//!
//! Every service implements [`Service`] and builds its configuration from
//! the service URL through [`ServiceConfig`]. New channels are added by
//! implementing the trait and registering an instance with the router.

mod bark;
mod discord;
pub mod http;
mod pushover;
mod service;
mod slack;
mod smtp;
mod teams;
mod telegram;
mod webhook;

use std::sync::Arc;

pub use bark::{BarkConfig, BarkService};
pub use discord::{DiscordConfig, DiscordService};
pub use pushover::{PushoverConfig, PushoverService};
pub use service::{SendOptions, Service, ServiceConfig};
pub use slack::{SlackConfig, SlackService};
pub use smtp::{SmtpConfig, SmtpService};
pub use teams::{TeamsConfig, TeamsService};
pub use telegram::{ParseMode, TelegramConfig, TelegramService};
pub use webhook::{WebhookConfig, WebhookService};

/// Instances of every service shipped with this crate
pub fn builtin_services() -> Vec<Arc<dyn Service>> {
    vec![
        Arc::new(BarkService),
        Arc::new(DiscordService),
        Arc::new(PushoverService),
        Arc::new(SlackService),
        Arc::new(SmtpService),
        Arc::new(TeamsService),
        Arc::new(TelegramService),
        Arc::new(WebhookService),
    ]
}
