//! Command executor for dispatching CLI commands

use super::handlers::{MigrateCommandHandler, ServeCommandHandler};
use super::parser::{Cli, Commands, MigrateArgs};
use crate::config::Settings;
use crate::error::{AppError, AppResult};

/// Execute a CLI command with the given settings
///
/// A plain `serve` returns immediately; starting the server is left to
/// the caller (see [`Cli::should_serve`]).
///
/// # Errors
/// Returns errors from command handlers or argument validation
pub async fn execute_command(cli: &Cli, settings: Settings) -> AppResult<()> {
    cli.validate().map_err(|reason| AppError::Validation {
        field: "cli_arguments".to_string(),
        reason,
    })?;

    match &cli.command {
        Some(Commands::Serve(args)) if args.dry_run => {
            ServeCommandHandler::new(settings).execute(true).await
        }
        Some(Commands::Serve(_)) | None => Ok(()),
        Some(Commands::Migrate(MigrateArgs { dry_run, rollback })) => {
            if let Some(steps) = rollback
                && *steps > 50
            {
                tracing::warn!(steps, "Rolling back a large number of migrations");
            }
            MigrateCommandHandler::new(settings)
                .execute(*dry_run, *rollback)
                .await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[tokio::test]
    async fn test_execute_serve_dry_run() {
        let cli = Cli::try_parse_from(["raquetas-rs", "serve", "--dry-run"]).unwrap();
        assert!(execute_command(&cli, Settings::default()).await.is_ok());
    }

    #[tokio::test]
    async fn test_execute_serve_defers_to_caller() {
        let cli = Cli::try_parse_from(["raquetas-rs"]).unwrap();
        assert!(execute_command(&cli, Settings::default()).await.is_ok());
        assert!(cli.should_serve());
    }

    #[tokio::test]
    async fn test_execute_rejects_conflicting_args() {
        let cli = Cli {
            command: Some(Commands::Migrate(MigrateArgs {
                dry_run: true,
                rollback: Some(5),
            })),
            config: None,
            env: None,
            verbose: false,
            quiet: false,
        };

        match execute_command(&cli, Settings::default()).await {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "cli_arguments"),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }
}
