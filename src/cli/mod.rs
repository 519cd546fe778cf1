//! Command line entry points.
//!
//! Argument parsing lives in [`parser`], file/flag precedence in
//! [`config_merger`] and the subcommand implementations under
//! [`handlers`]. `main` calls the two helpers here before dispatching
//! to [`executor::execute_command`].

pub mod config_merger;
pub mod executor;
pub mod handlers;
pub mod parser;
pub mod validation;

pub use config_merger::ConfigurationMerger;
pub use executor::execute_command;
pub use parser::{Cli, Commands, Environment, LogLevel};

use anyhow::Context;

use crate::config::settings::Settings;
use crate::logger::{LogLevelHandle, init_logger};

/// Loads configuration files, applies CLI flag overrides and validates
/// the merged result.
pub fn load_and_merge_config(cli: &Cli) -> anyhow::Result<Settings> {
    let merger = ConfigurationMerger::from_config_path(cli.config.as_ref())
        .context("failed to load configuration")?;
    merger
        .merge_cli_args(cli)
        .context("failed to apply command line overrides")
}

/// Builds the tracing subscriber from the merged logger settings.
///
/// The returned handle can change the log level while the process runs.
pub fn init_logger_from_settings(settings: &Settings) -> anyhow::Result<LogLevelHandle> {
    let logger_config = settings
        .logger
        .clone()
        .into_logger_config()
        .context("invalid logger configuration")?;
    init_logger(logger_config).context("failed to initialize logger")
}
