//! Migrate command handler
//!
//! Applies, previews or reverts the embedded diesel migrations.

use crate::config::Settings;
use crate::db;
use crate::error::AppResult;

/// Handler for the migrate command
pub struct MigrateCommandHandler {
    config: Settings,
}

impl MigrateCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Execute the migrate command with dry-run and rollback support
    ///
    /// Migrations always target `database.url`, whatever storage backend
    /// is selected for serving.
    ///
    /// # Errors
    /// - Database configuration validation errors
    /// - Database connection errors
    /// - Migration execution errors
    pub async fn execute(&self, dry_run: bool, rollback: Option<u32>) -> AppResult<()> {
        self.config.database.validate()?;
        let url = self.config.database.url.as_str();

        if dry_run {
            let pending = db::pending_migrations(url).await?;
            if pending.is_empty() {
                println!("✓ No pending migrations found - database is up to date");
            } else {
                println!("Found {} pending migration(s):", pending.len());
                for name in &pending {
                    println!("  - {}", name);
                }
                println!("\nRun without --dry-run to apply these migrations");
            }
            return Ok(());
        }

        if let Some(steps) = rollback {
            let reverted = db::revert_migrations(url, steps).await?;
            println!("✓ Rolled back {} migration(s):", reverted.len());
            for version in &reverted {
                println!("  - {}", version);
            }
            return Ok(());
        }

        let applied = db::run_pending_migrations(url).await?;
        if applied.is_empty() {
            println!("✓ No migrations to apply - database is already up to date");
        } else {
            println!("✓ Applied {} migration(s):", applied.len());
            for version in &applied {
                println!("  - {}", version);
            }
        }
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_migrate_requires_database_url() {
        let handler = MigrateCommandHandler::new(Settings::default());

        match handler.execute(false, None).await {
            Err(AppError::Configuration { key, .. }) => assert_eq!(key, "database.url"),
            other => panic!("Expected configuration error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_migrate_zero_rollback_steps() {
        let mut config = Settings::default();
        config.database.url = "postgres://unreachable.invalid/raquetas".to_string();
        let handler = MigrateCommandHandler::new(config.clone());
        assert_eq!(handler.config(), &config);

        match handler.execute(false, Some(0)).await {
            Err(AppError::Validation { field, .. }) => assert_eq!(field, "rollback_steps"),
            other => panic!("Expected validation error, got {:?}", other),
        }
    }
}
