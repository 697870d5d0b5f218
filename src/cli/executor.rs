//! Command executor for dispatching CLI commands

use anyhow::Context;

use super::handlers::{
    SendCommandHandler, SendRequest, ServicesCommandHandler, VerifyCommandHandler, read_message,
};
use super::parser::{Cli, Commands};
use crate::config::Settings;
use crate::router::ServiceRouter;
use crate::services::SendOptions;

/// Runs the parsed command against `router`, printing results to stdout
///
/// # Errors
/// Fails when the message cannot be read or when any URL failed; per-URL
/// details are printed before returning.
pub async fn execute_command(
    cli: &Cli,
    settings: &Settings,
    router: &ServiceRouter,
) -> anyhow::Result<()> {
    match &cli.command {
        Commands::Send {
            urls,
            message,
            title,
            params,
        } => {
            let request = SendRequest {
                urls: urls.clone(),
                message: read_message(message, tokio::io::stdin())
                    .await
                    .context("Failed to read message from stdin")?,
                options: build_options(title.as_deref(), params, settings),
            };

            let report = SendCommandHandler::new(router, &settings.delivery)
                .execute(&request)
                .await;
            print!("{}", report);
            report.into_result()
        }
        Commands::Verify { urls } => {
            let report = VerifyCommandHandler::new(router).execute(urls);
            print!("{}", report);
            report.into_result()
        }
        Commands::Services => {
            print!("{}", ServicesCommandHandler::new(router).execute());
            Ok(())
        }
    }
}

/// Command line title wins over `delivery.default_title`
fn build_options(title: Option<&str>, params: &[(String, String)], settings: &Settings) -> SendOptions {
    let mut options = SendOptions::new();
    options.title = title
        .map(str::to_string)
        .or_else(|| settings.delivery.default_title.clone());
    options.params.extend(params.iter().cloned());
    options
}
