//! Error types for the Docker Parse Server launcher

use thiserror::Error;

/// Configuration specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The stat call on a credential path failed for a reason other than
    /// the path not existing. Startup cannot continue past this.
    #[error("Cannot inspect credential file {path}: {source}")]
    CredentialAccess {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Validation error
    #[error("Configuration validation error: {field}: {message}")]
    ValidationError { field: String, message: String },

    /// Invalid value
    #[error("Invalid configuration value for {field}: {value}")]
    InvalidValue { field: String, value: String },
}

impl ConfigError {
    /// Whether this error must abort startup.
    pub fn is_fatal(&self) -> bool {
        match self {
            ConfigError::CredentialAccess { .. } | ConfigError::InvalidValue { .. } => true,
            ConfigError::ValidationError { .. } => false,
        }
    }
}
