use clap::Parser;

use disparo_rs::cli::{self, Cli, Commands};
use disparo_rs::config::Environment;
use disparo_rs::server::Server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Apply the environment override before any configuration is loaded
    if let Some(env) = &cli.env {
        let env: Environment = env.clone().into();
        unsafe {
            std::env::set_var(Environment::ENV_VAR, env.as_str());
        }
    }

    let settings = cli::load_and_merge_config(&cli)?;
    let _logger_handle = cli::init_logger_from_settings(&settings)?;

    cli::execute_command(&cli, settings.clone()).await?;

    // Commands other than serve finish inside execute_command; a serve
    // command (or no command at all) falls through to server startup.
    let should_serve = match &cli.command {
        None => true,
        Some(Commands::Serve { dry_run, .. }) => !dry_run,
        Some(Commands::Migrate { .. }) => false,
    };

    if should_serve {
        Server::new(settings).run().await?;
    }

    Ok(())
}
