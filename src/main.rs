use std::sync::Arc;

use clap::Parser;
use herald_rs::cli::{self, Cli};
use herald_rs::{ServiceRegistry, ServiceRouter, TracingSink};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let settings = cli::load_and_merge_config(&cli)?;
    let _log_handle = cli::init_logger_from_settings(&settings)?;

    tracing::debug!(
        name = %settings.application.name,
        version = %settings.application.version,
        "Starting"
    );

    let router = ServiceRouter::with_sink(ServiceRegistry::builtin(), Arc::new(TracingSink));
    cli::execute_command(&cli, &settings, &router).await
}
