//! Configuration merger for CLI arguments and config files
//!
//! CLI flags have the highest precedence, above RAQUETAS_* environment
//! variables and every configuration file layer.

use super::parser::{Cli, Commands, ServeArgs};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, Settings};

/// Applies CLI overrides on top of file/env configuration
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base configuration selected by `--config` and `--env`
    ///
    /// The result is not validated yet; validation runs after the CLI
    /// overrides are merged so a flag can fix an invalid file value.
    ///
    /// # Errors
    /// Returns ConfigError if the sources cannot be read or parsed
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let mut loader = ConfigLoader::new()?;
        if let Some(ref path) = cli.config {
            loader = loader.with_config_file(path);
        }
        if let Some(env) = cli.env {
            loader = loader.with_environment(env);
        }

        Ok(Self::new(loader.load_unvalidated()?))
    }

    /// Merge CLI arguments with the base configuration and validate it
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(ref command) = cli.command {
            Self::apply_command_overrides(&mut config, command);
        }

        config.validate()?;
        Ok(config)
    }

    fn apply_command_overrides(config: &mut Settings, command: &Commands) {
        let Commands::Serve(args) = command else {
            return;
        };
        let ServeArgs {
            host,
            port,
            log_level,
            storage,
            dry_run: _,
        } = args;

        if let Some(host) = host {
            config.server.host = host.clone();
        }
        if let Some(port) = port {
            config.server.port = *port;
        }
        if let Some(level) = log_level {
            config.logger.level = level.as_str().to_string();
        }
        if let Some(backend) = storage {
            config.storage.backend = *backend;
        }
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StorageBackend;
    use clap::Parser;

    fn merge(args: &[&str]) -> Result<Settings, ConfigError> {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(Settings::default()).merge_cli_args(&cli)
    }

    #[test]
    fn test_merger_keeps_base_config() {
        let merger = ConfigurationMerger::new(Settings::default());
        assert_eq!(merger.config(), &Settings::default());
    }

    #[test]
    fn test_verbose_and_quiet_flags() {
        assert_eq!(merge(&["raquetas-rs", "--verbose"]).unwrap().logger.level, "debug");
        assert_eq!(merge(&["raquetas-rs", "--quiet"]).unwrap().logger.level, "error");
    }

    #[test]
    fn test_serve_overrides_host_and_port() {
        let merged = merge(&["raquetas-rs", "serve", "--host", "0.0.0.0", "--port", "9090"]).unwrap();
        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 9090);
    }

    #[test]
    fn test_command_log_level_overrides_global() {
        let merged = merge(&["raquetas-rs", "--verbose", "serve", "--log-level", "warn"]).unwrap();
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_storage_override_triggers_database_validation() {
        let result = merge(&["raquetas-rs", "serve", "--storage", "postgres"]);
        assert!(
            matches!(result, Err(ConfigError::ValidationError { field, .. }) if field == "database.url")
        );

        let mut base = Settings::default();
        base.database.url = "postgres://localhost/raquetas".to_string();
        let cli = Cli::try_parse_from(["raquetas-rs", "serve", "--storage", "postgres"]).unwrap();
        let merged = ConfigurationMerger::new(base).merge_cli_args(&cli).unwrap();
        assert_eq!(merged.storage.backend, StorageBackend::Postgres);
    }

    #[test]
    fn test_cli_flag_can_fix_invalid_base_value() {
        let mut base = Settings::default();
        base.server.port = 0;
        let cli = Cli::try_parse_from(["raquetas-rs", "serve", "--port", "8081"]).unwrap();

        let merged = ConfigurationMerger::new(base).merge_cli_args(&cli).unwrap();
        assert_eq!(merged.server.port, 8081);
    }
}
