//! Merges file-based configuration with command line overrides.
//!
//! Precedence, lowest to highest: configuration files (see
//! [`ConfigLoader`]), global flags (`--verbose` / `--quiet`), then
//! command-specific flags such as `serve --port`.

use std::path::PathBuf;

use super::parser::{Cli, Commands};
use crate::config::error::ConfigError;
use crate::config::{ConfigLoader, settings::Settings};

/// Applies CLI overrides on top of a loaded [`Settings`] value.
pub struct ConfigurationMerger {
    base_config: Settings,
}

impl ConfigurationMerger {
    pub fn new(base_config: Settings) -> Self {
        Self { base_config }
    }

    /// Loads configuration, honoring an explicit `--config` file.
    ///
    /// An explicit file must exist up front so a typo fails with a clear
    /// message instead of silently falling back to layered loading.
    pub fn from_config_path(config_path: Option<&PathBuf>) -> Result<Self, ConfigError> {
        let loader = match config_path {
            Some(path) => {
                if !path.is_file() {
                    return Err(ConfigError::ValidationError {
                        field: "config_file".to_string(),
                        message: format!(
                            "'{}' does not exist or is not a file",
                            path.display()
                        ),
                    });
                }
                ConfigLoader::with_file(path.clone())
            }
            None => ConfigLoader::new()?,
        };

        Ok(Self::new(loader.load()?))
    }

    /// Applies the override chain and revalidates the merged result.
    pub fn merge_cli_args(&self, cli: &Cli) -> Result<Settings, ConfigError> {
        let mut config = self.base_config.clone();

        if cli.verbose {
            config.logger.level = "debug".to_string();
        } else if cli.quiet {
            config.logger.level = "error".to_string();
        }

        if let Some(command) = &cli.command {
            apply_command_overrides(&mut config, command);
        }

        config.validate()?;

        Ok(config)
    }

    pub fn config(&self) -> &Settings {
        &self.base_config
    }
}

/// Command flags win over both config files and the global verbosity
/// flags.
fn apply_command_overrides(config: &mut Settings, command: &Commands) {
    match command {
        Commands::Serve {
            host,
            port,
            log_level,
            dry_run: _,
        } => {
            if let Some(host) = host {
                config.server.host = host.clone();
            }
            if let Some(port) = port {
                config.server.port = *port;
            }
            if let Some(level) = log_level {
                config.logger.level = level.clone().into();
            }
        }
        // Migrations run before a server exists; nothing to override.
        Commands::Migrate { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::parser::Cli;
    use clap::Parser;

    fn base_config() -> Settings {
        let mut config = Settings::default();
        config.database.url = "postgres://localhost/test".to_string();
        config.auth.jwt_secret = "test_secret_key_for_jwt_testing0".to_string();
        config
    }

    fn merge(merger: &ConfigurationMerger, args: &[&str]) -> Settings {
        let cli = Cli::try_parse_from(args).unwrap();
        merger.merge_cli_args(&cli).unwrap()
    }

    #[test]
    fn test_no_flags_keeps_base_config() {
        let merger = ConfigurationMerger::new(base_config());
        let merged = merge(&merger, &["disparo-rs"]);
        assert_eq!(merged.logger.level, base_config().logger.level);
        assert_eq!(merged.server.port, base_config().server.port);
    }

    #[test]
    fn test_verbose_and_quiet_set_logger_level() {
        let merger = ConfigurationMerger::new(base_config());
        assert_eq!(merge(&merger, &["disparo-rs", "--verbose"]).logger.level, "debug");
        assert_eq!(merge(&merger, &["disparo-rs", "--quiet"]).logger.level, "error");
    }

    #[test]
    fn test_serve_flags_override_server_section() {
        let merger = ConfigurationMerger::new(base_config());
        let merged = merge(
            &merger,
            &["disparo-rs", "serve", "--host", "0.0.0.0", "--port", "8080"],
        );
        assert_eq!(merged.server.host, "0.0.0.0");
        assert_eq!(merged.server.port, 8080);
    }

    #[test]
    fn test_serve_log_level_beats_global_verbose() {
        let merger = ConfigurationMerger::new(base_config());
        let merged = merge(
            &merger,
            &["disparo-rs", "--verbose", "serve", "--log-level", "warn"],
        );
        assert_eq!(merged.logger.level, "warn");
    }

    #[test]
    fn test_migrate_leaves_server_config_alone() {
        let merger = ConfigurationMerger::new(base_config());
        let merged = merge(&merger, &["disparo-rs", "migrate"]);
        assert_eq!(merged.server.host, base_config().server.host);
    }

    #[test]
    fn test_merge_rejects_invalid_base_config() {
        let mut config = base_config();
        config.auth.jwt_secret = "short".to_string();
        let merger = ConfigurationMerger::new(config);

        let cli = Cli::try_parse_from(&["disparo-rs", "serve"]).unwrap();
        assert!(merger.merge_cli_args(&cli).is_err());
    }

    #[test]
    fn test_from_config_path_rejects_missing_file() {
        let missing = PathBuf::from("/nonexistent/disparo.toml");
        let result = ConfigurationMerger::from_config_path(Some(&missing));
        assert!(
            matches!(result, Err(ConfigError::ValidationError { field, .. }) if field == "config_file")
        );
    }
}
