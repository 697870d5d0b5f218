//! Merges command line overrides into file based configuration

use super::parser::Cli;
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

/// Applies CLI argument overrides on top of loaded settings
///
/// Precedence: CLI flags, then `HERALD_*` variables, then configuration files.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base settings honouring `--config` and `--env`
    ///
    /// # Errors
    /// Returns `ConfigError` if loading or validation fails.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        Self::loader_for(cli)?.load().map(Self::new)
    }

    fn loader_for(cli: &Cli) -> Result<ConfigLoader, ConfigError> {
        let loader = match cli.config {
            Some(ref path) => ConfigLoader::default().with_config_file(path),
            None => ConfigLoader::new()?,
        };

        Ok(match cli.env {
            Some(env) => loader.with_environment(env.into()),
            None => loader,
        })
    }

    /// Returns the base settings with CLI overrides applied and validated
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        config.validate()?;
        Ok(config)
    }

    pub fn base_config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::ENV_LOCK;
    use clap::Parser;
    use std::sync::PoisonError;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_verbose_sets_debug() {
        let merger = ConfigurationMerger::new(Settings::default());
        let settings = merger
            .merge_cli_args(&parse(&["herald-rs", "-v", "services"]))
            .unwrap();
        assert_eq!(settings.logger.level, "debug");
    }

    #[test]
    fn test_quiet_sets_error() {
        let merger = ConfigurationMerger::new(Settings::default());
        let settings = merger
            .merge_cli_args(&parse(&["herald-rs", "services", "--quiet"]))
            .unwrap();
        assert_eq!(settings.logger.level, "error");
    }

    #[test]
    fn test_no_flags_keep_base() {
        let mut base = Settings::default();
        base.logger.level = "warn".to_string();
        let merger = ConfigurationMerger::new(base.clone());
        let settings = merger.merge_cli_args(&parse(&["herald-rs", "services"])).unwrap();
        assert_eq!(settings, base);
        assert_eq!(merger.base_config(), &base);
    }

    #[test]
    fn test_merge_revalidates() {
        let mut base = Settings::default();
        base.delivery.concurrency = 0;
        let merger = ConfigurationMerger::new(base);
        assert!(merger.merge_cli_args(&parse(&["herald-rs", "services"])).is_err());
    }

    #[test]
    fn test_from_cli_reads_config_file() {
        let _lock = ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("herald.toml");
        std::fs::write(&path, "[delivery]\ntimeout_seconds = 12\n").unwrap();

        let cli = parse(&["herald-rs", "--config", path.to_str().unwrap(), "services"]);
        let merger = ConfigurationMerger::from_cli(&cli).unwrap();
        assert_eq!(merger.base_config().delivery.timeout_seconds, 12);
    }
}
