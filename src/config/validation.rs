//! Configuration validation logic
//!
//! Range checks that serde cannot express, run once after loading and again
//! after command line overrides are merged.

use crate::config::error::ConfigError;
use crate::config::settings::{DeliveryConfig, LoggerSettings, Settings};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

/// Longest accepted delivery timeout (one hour)
const MAX_TIMEOUT_SECONDS: u64 = 3600;

const MAX_CONCURRENCY: usize = 64;

impl DeliveryConfig {
    /// # Validation Rules
    /// - Timeout must be between 1 and 3600 seconds
    /// - Concurrency must be between 1 and 64
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeout_seconds == 0 || self.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(ConfigError::validation(
                "delivery.timeout_seconds",
                format!(
                    "Timeout must be between 1 and {} seconds, got {}.",
                    MAX_TIMEOUT_SECONDS, self.timeout_seconds
                ),
            ));
        }

        if self.concurrency == 0 || self.concurrency > MAX_CONCURRENCY {
            return Err(ConfigError::validation(
                "delivery.concurrency",
                format!(
                    "Concurrency must be between 1 and {}, got {}.",
                    MAX_CONCURRENCY, self.concurrency
                ),
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// # Validation Rules
    /// - Level must be one of trace, debug, info, warn, error
    /// - File format must be one of full, compact, json
    /// - File path must not be empty when file output is enabled
    /// - At least one output must be enabled
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.file.format.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.file.format",
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.file.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        if self.file.enabled && self.file.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path cannot be empty when file output is enabled",
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled",
            ));
        }

        Ok(())
    }
}

impl Settings {
    /// Validates every section, reporting the first failure
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.application.name.trim().is_empty() {
            return Err(ConfigError::validation(
                "application.name",
                "Application name cannot be empty",
            ));
        }

        self.logger.validate()?;
        self.delivery.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn field_of(err: ConfigError) -> String {
        match err {
            ConfigError::ValidationError { field, .. } => field,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_default_settings_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut settings = Settings::default();
        settings.delivery.timeout_seconds = 0;
        assert_eq!(
            field_of(settings.validate().unwrap_err()),
            "delivery.timeout_seconds"
        );
    }

    #[test]
    fn test_zero_concurrency_rejected() {
        let mut settings = Settings::default();
        settings.delivery.concurrency = 0;
        assert_eq!(
            field_of(settings.validate().unwrap_err()),
            "delivery.concurrency"
        );
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut settings = Settings::default();
        settings.logger.level = "loud".to_string();
        assert_eq!(field_of(settings.validate().unwrap_err()), "logger.level");
    }

    #[test]
    fn test_empty_log_path_rejected_when_enabled() {
        let mut settings = Settings::default();
        settings.logger.file.enabled = true;
        settings.logger.file.path = "  ".to_string();
        assert_eq!(
            field_of(settings.validate().unwrap_err()),
            "logger.file.path"
        );
    }

    #[test]
    fn test_all_outputs_disabled_rejected() {
        let mut settings = Settings::default();
        settings.logger.console.enabled = false;
        assert_eq!(field_of(settings.validate().unwrap_err()), "logger");
    }

    #[test]
    fn test_empty_application_name_rejected() {
        let mut settings = Settings::default();
        settings.application.name = String::new();
        assert_eq!(
            field_of(settings.validate().unwrap_err()),
            "application.name"
        );
    }

    proptest! {
        #[test]
        fn property_timeout_range(timeout in 0u64..10_000) {
            let delivery = DeliveryConfig {
                timeout_seconds: timeout,
                ..Default::default()
            };
            let expected = (1..=MAX_TIMEOUT_SECONDS).contains(&timeout);
            prop_assert_eq!(delivery.validate().is_ok(), expected);
        }

        #[test]
        fn property_level_case_is_ignored(idx in 0usize..5, upper in any::<bool>()) {
            let level = if upper {
                VALID_LOG_LEVELS[idx].to_uppercase()
            } else {
                VALID_LOG_LEVELS[idx].to_string()
            };
            let logger = LoggerSettings { level, ..Default::default() };
            prop_assert!(logger.validate().is_ok());
        }
    }
}
