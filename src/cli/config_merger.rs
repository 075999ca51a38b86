//! Applies command-line overrides on top of the loaded configuration.
//!
//! Precedence, highest first: command flags, global flags, environment
//! variables, configuration files.

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};

pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads the base configuration selected by `--config` and `--env`.
    ///
    /// Validation is deferred to [`ConfigurationMerger::merge_cli_args`] so a
    /// missing value can still be supplied on the command line.
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        Self::from_loader(ConfigLoader::new()?, cli)
    }

    fn from_loader(mut loader: ConfigLoader, cli: &Cli) -> Result<Self, ConfigError> {
        if let Some(path) = &cli.config {
            loader = loader.with_config_file(path);
        }
        if let Some(env) = cli.env {
            loader = loader.with_environment(env.into());
        }

        Ok(Self::new(loader.load_unvalidated()?))
    }

    /// Returns the overridden settings, validated.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(Commands::Serve {
            host,
            port,
            log_level,
            ..
        }) = &cli.command
        {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(level) = log_level {
                config.logger.level = level.as_str().to_string();
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Environment;
    use clap::Parser;

    fn valid_base_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/marketplace".to_string();
        config.jwt.secret = "k".repeat(32);
        config
    }

    fn merge(args: &[&str]) -> Result<Settings, ConfigError> {
        let cli = Cli::try_parse_from(args).unwrap();
        ConfigurationMerger::new(valid_base_config()).merge_cli_args(&cli)
    }

    #[test]
    fn test_global_flags_set_log_level() {
        assert_eq!(merge(&["marketplace-rs", "--verbose"]).unwrap().logger.level, "debug");
        assert_eq!(merge(&["marketplace-rs", "--quiet"]).unwrap().logger.level, "error");
        assert_eq!(merge(&["marketplace-rs"]).unwrap().logger.level, "info");
    }

    #[test]
    fn test_serve_flags_override_server() {
        let merged = merge(&["marketplace-rs", "serve", "--host", "0.0.0.0", "--port", "8080"])
            .unwrap();
        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 8080);
    }

    #[test]
    fn test_command_log_level_wins_over_global_flag() {
        let merged =
            merge(&["marketplace-rs", "--verbose", "serve", "--log-level", "warn"]).unwrap();
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_merged_result_is_validated() {
        let cli = Cli::try_parse_from(["marketplace-rs"]).unwrap();
        let result = ConfigurationMerger::new(Settings::default()).merge_cli_args(&cli);
        assert!(matches!(
            result,
            Err(ConfigError::ValidationError { ref field, .. }) if field == "database.url"
        ));
    }

    #[test]
    fn test_config_file_and_env_flags_reach_the_loader() {
        let dir = tempfile::TempDir::new().unwrap();
        let file = dir.path().join("marketplace.toml");
        std::fs::write(
            &file,
            "[database]\nurl = \"postgres://db/marketplace\"\n\n[jwt]\nsecret = \"0123456789abcdef0123456789abcdef\"\n",
        )
        .unwrap();
        let path = file.to_str().unwrap();

        let cli = Cli::try_parse_from([
            "marketplace-rs",
            "--config",
            path,
            "--env",
            "staging",
            "serve",
            "--host",
            "0.0.0.0",
        ])
        .unwrap();
        let merger = ConfigurationMerger::from_loader(ConfigLoader::default(), &cli).unwrap();
        let merged = merger.merge_cli_args(&cli).unwrap();

        assert_eq!(merger.config().application.environment, Environment::Staging);
        assert_eq!(merged.server.host, "0.0.0.0");
    }
}
