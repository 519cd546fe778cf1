//! Dispatches parsed CLI commands to their handlers.

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};

/// Runs the command selected on the command line.
///
/// A plain `serve` (or no subcommand at all) returns `Ok(())` without
/// doing anything; `main` starts the server afterwards so settings and
/// the logger handle stay owned there. `serve --dry-run` and `migrate`
/// run to completion here.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    if let Err(reason) = cli.validate() {
        return Err(AppError::Validation {
            field: "cli_arguments".to_string(),
            reason,
        });
    }

    match &cli.command {
        Some(Commands::Serve { dry_run: true, .. }) => {
            ServeCommandHandler::new(settings).execute(true).await
        }
        Some(Commands::Serve { .. }) | None => Ok(()),
        Some(Commands::Migrate { dry_run, rollback }) => {
            warn_on_large_rollback(*rollback);
            MigrateCommandHandler::new(settings)
                .execute(*dry_run, *rollback)
                .await
        }
    }
}

/// Large rollbacks are legitimate but rarely intended.
fn warn_on_large_rollback(rollback: Option<u32>) {
    if let Some(steps) = rollback
        && steps > 50
    {
        eprintln!(
            "Warning: rolling back {} migrations is a large operation. Consider smaller steps.",
            steps
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn valid_settings() -> Settings {
        let mut settings = Settings::default();
        settings.database.url = "postgres://localhost/test".to_string();
        settings.auth.jwt_secret = "test_secret_key_for_jwt_testing0".to_string();
        settings
    }

    #[tokio::test]
    async fn serve_without_dry_run_defers_to_main() {
        let cli = Cli::try_parse_from(["disparo-rs", "serve"]).unwrap();
        assert!(execute_command(&cli, valid_settings()).await.is_ok());
    }

    #[tokio::test]
    async fn no_subcommand_defers_to_main() {
        let cli = Cli::try_parse_from(["disparo-rs"]).unwrap();
        assert!(execute_command(&cli, valid_settings()).await.is_ok());
    }

    #[tokio::test]
    async fn serve_dry_run_completes_without_a_server() {
        let cli = Cli::try_parse_from(["disparo-rs", "serve", "--dry-run"]).unwrap();
        assert!(execute_command(&cli, valid_settings()).await.is_ok());
    }

    #[tokio::test]
    async fn privileged_port_on_all_interfaces_is_rejected() {
        let cli =
            Cli::try_parse_from(["disparo-rs", "serve", "--host", "0.0.0.0", "--port", "80"])
                .unwrap();
        let error = execute_command(&cli, valid_settings()).await.unwrap_err();
        assert!(matches!(error, AppError::Validation { field, .. } if field == "cli_arguments"));
    }

    #[tokio::test]
    async fn conflicting_migrate_flags_are_rejected() {
        // Bypasses clap's conflict check to exercise Cli::validate
        let cli = Cli {
            command: Some(Commands::Migrate {
                dry_run: true,
                rollback: Some(5),
            }),
            config: None,
            env: None,
            verbose: false,
            quiet: false,
        };
        let error = execute_command(&cli, valid_settings()).await.unwrap_err();
        assert!(matches!(error, AppError::Validation { .. }));
    }
}
