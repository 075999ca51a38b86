//! Dispatches the parsed command.

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands};
use crate::config::settings::Settings;
use crate::error::{AppError, AppResult};

/// What the caller should do once a command has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Start the HTTP server with the merged settings
    StartServer,
    /// The command did its work; exit
    Completed,
}

/// Runs every command except the server itself, which the caller owns.
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<CommandOutcome> {
    cli.validate().map_err(|reason| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason,
    })?;

    match &cli.command {
        Some(Commands::Serve { dry_run: true, .. }) => {
            ServeCommandHandler::new(settings).dry_run()?;
            Ok(CommandOutcome::Completed)
        }
        Some(Commands::Serve { .. }) | None => Ok(CommandOutcome::StartServer),
        Some(Commands::Migrate { dry_run, rollback }) => {
            if let Some(steps) = rollback
                && *steps > 50
            {
                tracing::warn!(steps, "Rolling back a large number of migrations");
            }
            MigrateCommandHandler::new(settings)
                .execute(*dry_run, *rollback)
                .await?;
            Ok(CommandOutcome::Completed)
        }
    }
}
