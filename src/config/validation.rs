//! Configuration validation logic
//!
//! Each section validates itself and reports the first offending key as a
//! `ConfigError::ValidationError` whose `field` is the dotted TOML path.

use crate::config::error::ConfigError;
use crate::config::settings::{
    DatabaseConfig, FileSettings, LoggerSettings, ServerConfig, Settings, StorageBackend,
};

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: &[&str] = &["full", "compact", "json"];
const POSTGRES_SCHEMES: &[&str] = &["postgres://", "postgresql://"];

fn ensure(ok: bool, field: &str, message: impl Into<String>) -> Result<(), ConfigError> {
    if ok {
        Ok(())
    } else {
        Err(ConfigError::validation(field.to_string(), message.into()))
    }
}

/// Case-insensitive membership check with a message listing the choices.
fn ensure_one_of(
    value: &str,
    allowed: &[&str],
    field: &str,
    what: &str,
) -> Result<(), ConfigError> {
    ensure(
        allowed.contains(&value.to_lowercase().as_str()),
        field,
        format!("Unknown {} '{}'; expected one of: {}", what, value, allowed.join(", ")),
    )
}

impl ServerConfig {
    /// Port must be non-zero and host non-blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(self.port != 0, "server.port", "Port 0 is not allowed; pick 1-65535")?;
        ensure(
            !self.host.trim().is_empty(),
            "server.host",
            "Host must not be blank; use 0.0.0.0 to listen on every interface",
        )
    }
}

impl DatabaseConfig {
    /// Checked only when the PostgreSQL backend is selected.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure(!self.url.trim().is_empty(), "database.url", "A PostgreSQL URL is required")?;
        ensure(
            POSTGRES_SCHEMES.iter().any(|scheme| self.url.starts_with(scheme)),
            "database.url",
            "Expected postgres://[user:password@]host[:port]/database",
        )?;
        ensure(
            self.max_connections > 0,
            "database.max_connections",
            "Pool needs at least one connection",
        )?;
        ensure(
            self.min_connections > 0,
            "database.min_connections",
            "Pool needs at least one idle connection",
        )?;
        ensure(
            self.min_connections <= self.max_connections,
            "database.min_connections",
            format!(
                "min_connections ({}) is larger than max_connections ({})",
                self.min_connections, self.max_connections
            ),
        )?;
        ensure(
            self.connection_timeout > 0,
            "database.connection_timeout",
            "Connection timeout must be at least one second",
        )
    }
}

impl FileSettings {
    fn validate(&self) -> Result<(), ConfigError> {
        ensure(
            !(self.enabled && self.path.trim().is_empty()),
            "logger.file.path",
            "File logging is enabled but no path is set",
        )?;
        ensure_one_of(&self.format, LOG_FORMATS, "logger.file.format", "log format")
    }
}

impl LoggerSettings {
    /// Level and format must be known names; at least one sink must be on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        ensure_one_of(&self.level, LOG_LEVELS, "logger.level", "log level")?;
        ensure(
            self.console.enabled || self.file.enabled,
            "logger",
            "Enable console or file output, otherwise nothing is logged",
        )?;
        self.file.validate()
    }
}

impl Settings {
    /// Validates every section, stopping at the first error.
    ///
    /// The database section is ignored with the in-memory backend.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        if self.storage.backend == StorageBackend::Postgres {
            self.database.validate()?;
        }
        self.logger.validate()
    }
}
