//! Configuration error types

use thiserror::Error;

/// Errors raised while loading or validating settings
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required configuration file is missing
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Sources were read but could not be deserialized into `Settings`
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// A value is out of range or malformed
    #[error("Validation error: {field} - {message}")]
    ValidationError { field: String, message: String },

    /// `RAQUETAS_APP_ENV` (or `--env`) names an unknown environment
    #[error("Invalid environment '{0}'. Valid values are: development, test, staging, production")]
    InvalidEnvironment(String),

    /// Two options that cannot be combined were both given
    #[error("Mutual exclusivity error: {0}")]
    MutualExclusivityError(String),

    /// Error surfaced by the `config` crate
    #[error("Configuration error: {0}")]
    Other(#[from] config::ConfigError),
}

impl ConfigError {
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn file_not_found<S: Into<String>>(path: S) -> Self {
        ConfigError::FileNotFound(path.into())
    }

    pub fn mutual_exclusivity<S: Into<String>>(message: S) -> Self {
        ConfigError::MutualExclusivityError(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let error = ConfigError::validation("server.port", "Port must be between 1 and 65535");
        assert_eq!(
            error.to_string(),
            "Validation error: server.port - Port must be between 1 and 65535"
        );
    }

    #[test]
    fn test_invalid_environment_lists_choices() {
        let error = ConfigError::InvalidEnvironment("qa".to_string());
        assert!(error.to_string().contains("'qa'"));
        assert!(error.to_string().contains("production"));
    }
}
