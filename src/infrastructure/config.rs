//! Configuration loading with hierarchical merging.

use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),

    #[error("Completion base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("Completion model cannot be empty")]
    EmptyModel,

    #[error("Invalid timeout: {0}. Must be positive")]
    InvalidTimeout(u64),

    #[error(
        "Invalid backoff configuration: initial_backoff_ms ({0}) must be less than max_backoff_ms ({1})"
    )]
    InvalidBackoff(u64, u64),
}

/// Configuration loader with hierarchical merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults (Serialized)
    /// 2. .prospector/config.yaml (project config)
    /// 3. .prospector/local.yaml (project local overrides, optional)
    /// 4. Environment variables (`PROSPECTOR_*` prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".prospector/config.yaml"))
            .merge(Yaml::file(".prospector/local.yaml"))
            .merge(Env::prefixed("PROSPECTOR_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }

        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        if config.completion.base_url.is_empty() {
            return Err(ConfigError::EmptyBaseUrl);
        }

        if config.completion.model.is_empty() {
            return Err(ConfigError::EmptyModel);
        }

        if config.completion.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.completion.timeout_secs));
        }

        if config.completion.initial_backoff_ms >= config.completion.max_backoff_ms {
            return Err(ConfigError::InvalidBackoff(
                config.completion.initial_backoff_ms,
                config.completion.max_backoff_ms,
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        let config = Config::default();
        assert!(ConfigLoader::validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_log_level_rejected() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn test_empty_model_rejected() {
        let mut config = Config::default();
        config.completion.model = String::new();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyModel)
        ));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut config = Config::default();
        config.completion.timeout_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTimeout(0))
        ));
    }

    #[test]
    fn test_inverted_backoff_rejected() {
        let mut config = Config::default();
        config.completion.initial_backoff_ms = 60_000;
        config.completion.max_backoff_ms = 1_000;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidBackoff(60_000, 1_000))
        ));
    }

    #[test]
    fn test_load_from_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "completion:\n  model: gpt-4o-mini\n  timeout_secs: 60\nlogging:\n  level: debug\n",
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(&path).unwrap();
        assert_eq!(config.completion.model, "gpt-4o-mini");
        assert_eq!(config.completion.timeout_secs, 60);
        assert_eq!(config.logging.level, "debug");
        // Unset fields keep their defaults
        assert_eq!(config.completion.max_retries, 3);
    }

    #[test]
    fn test_env_vars_override_file_values() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir(".prospector")?;
            jail.create_file(
                ".prospector/config.yaml",
                "completion:\n  model: gpt-4o-mini\n  timeout_secs: 60\n",
            )?;
            jail.set_env("PROSPECTOR_COMPLETION__MODEL", "gpt-4-turbo");
            jail.set_env("PROSPECTOR_LOGGING__LEVEL", "warn");

            let config = ConfigLoader::load().map_err(|e| e.to_string())?;

            // Env wins over the file for the same key
            assert_eq!(config.completion.model, "gpt-4-turbo");
            assert_eq!(config.logging.level, "warn");
            // File values without an env override still apply
            assert_eq!(config.completion.timeout_secs, 60);
            Ok(())
        });
    }

    #[test]
    fn test_local_yaml_overrides_project_yaml() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir(".prospector")?;
            jail.create_file(".prospector/config.yaml", "completion:\n  model: gpt-4o-mini\n")?;
            jail.create_file(".prospector/local.yaml", "completion:\n  model: gpt-4o\n")?;

            let config = ConfigLoader::load().map_err(|e| e.to_string())?;

            assert_eq!(config.completion.model, "gpt-4o");
            Ok(())
        });
    }
}
