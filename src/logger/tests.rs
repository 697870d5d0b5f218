//! Tests for the process logger module

use crate::logger::config::*;
use crate::logger::writer::{LogFileWriter, RecoveryStrategy};
use std::path::PathBuf;

#[cfg(test)]
mod config_tests {
    use super::*;
    use std::str::FromStr;

    fn create_test_config() -> LoggerConfig {
        LoggerConfig {
            console: ConsoleConfig {
                enabled: true,
                colored: false,
            },
            file: FileConfig {
                enabled: false,
                path: PathBuf::from("test.log"),
                append: true,
                format: LogFormat::Full,
            },
            level: "info".to_string(),
        }
    }

    #[test]
    fn test_default_config_creation() {
        let config = LoggerConfig::default();
        assert!(config.console.enabled);
        assert!(config.console.colored);
        assert!(!config.file.enabled);
        assert_eq!(config.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = create_test_config();
        assert!(config.validate().is_ok());

        config.console.enabled = false;
        config.file.enabled = false;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_file_path_fails_when_enabled() {
        let mut config = create_test_config();
        config.file.enabled = true;
        config.file.path = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str("full").unwrap(), LogFormat::Full);
        assert_eq!(LogFormat::from_str("COMPACT").unwrap(), LogFormat::Compact);
        assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
        assert!(LogFormat::from_str("xml").is_err());
        assert_eq!(LogFormat::default(), LogFormat::Full);
        assert_eq!(LogFormat::Json.as_str(), "json");
    }

    #[test]
    fn test_builder_pattern() {
        let config = LoggerConfigBuilder::new()
            .level("debug")
            .console(ConsoleConfig::new(true, false))
            .build()
            .unwrap();

        assert_eq!(config.level, "debug");
        assert!(config.console.enabled);
        assert!(!config.console.colored);
    }

    #[test]
    fn test_builder_rejects_invalid_level() {
        assert!(LoggerConfigBuilder::new().level("loud").build().is_err());
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn property_valid_configs_validate(
            console_enabled in any::<bool>(),
            file_enabled in any::<bool>(),
            colored in any::<bool>(),
            append in any::<bool>(),
            level_idx in 0usize..5usize
        ) {
            prop_assume!(console_enabled || file_enabled);
            let levels = ["trace", "debug", "info", "warn", "error"];

            let config = LoggerConfig {
                console: ConsoleConfig { enabled: console_enabled, colored },
                file: FileConfig {
                    enabled: file_enabled,
                    path: PathBuf::from("test.log"),
                    append,
                    format: LogFormat::Compact,
                },
                level: levels[level_idx].to_uppercase(),
            };

            prop_assert!(config.validate().is_ok());
            prop_assert!(config.parse_level().is_ok());
        }

        #[test]
        fn property_invalid_levels_fail(level in "[a-z]{6,12}") {
            let config = LoggerConfig {
                level: level.clone(),
                ..Default::default()
            };
            prop_assert!(config.validate().is_err(), "Level {} should be rejected", level);
        }
    }
}

#[cfg(test)]
mod writer_tests {
    use super::*;
    use proptest::prelude::*;
    use std::fs;
    use std::io::Write;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tempfile::tempdir;

    fn file_config(path: PathBuf, append: bool) -> FileConfig {
        FileConfig {
            enabled: true,
            path,
            append,
            format: LogFormat::Full,
        }
    }

    proptest! {
        #[test]
        fn property_file_path_handling(
            subdir in "[a-z]{1,5}",
            filename in "[a-z]{1,5}\\.log"
        ) {
            let dir = tempdir().unwrap();
            let nested_path = dir.path().join(&subdir).join(&filename);

            let result = LogFileWriter::new(&file_config(nested_path.clone(), true));
            prop_assert!(result.is_ok(), "Writer should create nested directories");
            prop_assert!(nested_path.parent().unwrap().exists());
        }

        #[test]
        fn property_file_write_mode(
            append in any::<bool>(),
            initial_content in "[a-zA-Z0-9]{10,50}",
            new_content in "[a-zA-Z0-9]{10,50}"
        ) {
            prop_assume!(!initial_content.contains(&new_content) && !new_content.contains(&initial_content));

            let dir = tempdir().unwrap();
            let file_path = dir.path().join("test.log");
            fs::write(&file_path, &initial_content).unwrap();

            let writer = LogFileWriter::new(&file_config(file_path.clone(), append)).unwrap();
            let mut guard = tracing_subscriber::fmt::MakeWriter::make_writer(&writer);
            guard.write_all(new_content.as_bytes()).unwrap();
            guard.flush().unwrap();
            drop(guard);

            let final_content = fs::read_to_string(&file_path).unwrap();
            prop_assert!(final_content.contains(&new_content));
            prop_assert_eq!(final_content.contains(&initial_content), append);
        }
    }

    #[test]
    fn test_error_callback_not_called_on_success() {
        let dir = tempdir().unwrap();
        let config = file_config(dir.path().join("test.log"), true);

        let callback_count = Arc::new(AtomicU32::new(0));
        let counter = callback_count.clone();
        let callback: crate::logger::writer::ErrorCallback = Arc::new(move |_err| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let writer =
            LogFileWriter::with_recovery(&config, RecoveryStrategy::SilentDrop, Some(callback))
                .unwrap();
        let mut guard = tracing_subscriber::fmt::MakeWriter::make_writer(&writer);
        guard.write_all(b"routing message").unwrap();
        drop(guard);

        assert_eq!(callback_count.load(Ordering::SeqCst), 0);
        assert!(!writer.is_in_fallback_mode());
    }
}

#[cfg(test)]
mod level_handle_tests {
    use crate::logger::LogLevelHandle;
    use std::sync::Arc;
    use tracing_subscriber::{layer::SubscriberExt, reload, EnvFilter};

    /// Runs `f` with a handle bound to a scoped subscriber
    fn with_test_handle<F, R>(initial_level: &str, f: F) -> R
    where
        F: FnOnce(&LogLevelHandle) -> R,
    {
        let filter = EnvFilter::try_new(initial_level).unwrap_or_else(|_| EnvFilter::new("info"));
        let (filter_layer, reload_handle) = reload::Layer::new(filter);

        let subscriber = tracing_subscriber::registry()
            .with(filter_layer)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::sink));

        let handle = LogLevelHandle {
            inner: Arc::new(reload_handle),
        };

        tracing::subscriber::with_default(subscriber, || f(&handle))
    }

    #[test]
    fn test_set_level_updates_filter() {
        with_test_handle("info", |handle| {
            handle.set_level("debug").unwrap();
            let current = handle.current_level().unwrap();
            assert!(current.contains("debug"), "unexpected filter {}", current);
        });
    }

    #[test]
    fn test_set_level_accepts_directives() {
        with_test_handle("info", |handle| {
            handle.set_level("herald_rs=trace,warn").unwrap();
            let current = handle.current_level().unwrap();
            assert!(current.contains("herald_rs=trace"));
        });
    }

    #[test]
    fn test_set_level_rejects_garbage() {
        with_test_handle("info", |handle| {
            assert!(handle.set_level("herald_rs=[").is_err());
        });
    }
}
