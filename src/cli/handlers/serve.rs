//! Serve command handler
//!
//! Implements `serve --dry-run`; the server itself is started by `main`.

use crate::config::{Settings, StorageBackend};
use crate::error::AppResult;

/// Handler for the serve command
pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    /// Validates configuration and prints what the server would do
    ///
    /// # Errors
    /// Configuration validation errors
    pub async fn execute(&self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            self.validate_only()
        } else {
            Ok(())
        }
    }

    fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;

        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());
        match self.config.storage.backend {
            StorageBackend::Memory => println!("✓ Storage backend: memory"),
            StorageBackend::Postgres => println!(
                "✓ Storage backend: postgres (pool {}..{} connections, auto-migrate: {})",
                self.config.database.min_connections,
                self.config.database.max_connections,
                self.config.database.auto_migrate
            ),
        }
        if self.config.storage.seed_demo_data {
            println!("✓ Demo catalogue will be seeded into an empty store");
        }
        println!("✓ Logger level: {}", self.config.logger.level);
        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_serve_handler_dry_run() {
        let handler = ServeCommandHandler::new(Settings::default());
        assert!(handler.execute(true).await.is_ok());
        assert_eq!(handler.config(), &Settings::default());
    }

    #[tokio::test]
    async fn test_serve_handler_dry_run_invalid_config() {
        let mut config = Settings::default();
        config.server.port = 0;
        let handler = ServeCommandHandler::new(config);

        assert!(handler.execute(true).await.is_err());
    }

    #[tokio::test]
    async fn test_serve_handler_dry_run_postgres_requires_url() {
        let mut config = Settings::default();
        config.storage.backend = StorageBackend::Postgres;
        let handler = ServeCommandHandler::new(config);

        assert!(handler.execute(true).await.is_err());
    }
}
