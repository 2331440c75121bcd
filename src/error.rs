//! Domain-specific error types for idea-forge

use serde_json::json;
use thiserror::Error;

/// Main error type for the I/O layers around the idea generation engine
#[derive(Error, Debug)]
pub enum IdeaForgeError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("Provider error: {message}")]
    Provider { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl IdeaForgeError {
    /// Short label used in HTTP error bodies
    pub fn label(&self) -> &'static str {
        match self {
            IdeaForgeError::Config { .. } => "config",
            IdeaForgeError::Io { .. } => "io",
            IdeaForgeError::Serialization { .. } => "serialization",
            IdeaForgeError::Provider { .. } => "provider",
            IdeaForgeError::Validation { .. } => "validation",
            IdeaForgeError::NotFound { .. } => "not_found",
            IdeaForgeError::Internal { .. } => "internal",
        }
    }

    /// JSON body for API responses
    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "error": self.label(),
            "message": self.to_string(),
        })
    }
}

impl From<anyhow::Error> for IdeaForgeError {
    fn from(err: anyhow::Error) -> Self {
        IdeaForgeError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for IdeaForgeError {
    fn from(err: serde_json::Error) -> Self {
        IdeaForgeError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for IdeaForgeError {
    fn from(err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::NotFound {
            IdeaForgeError::NotFound {
                message: err.to_string(),
            }
        } else {
            IdeaForgeError::Io {
                message: err.to_string(),
            }
        }
    }
}

impl From<toml::de::Error> for IdeaForgeError {
    fn from(err: toml::de::Error) -> Self {
        IdeaForgeError::Config {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for IdeaForgeError {
    fn from(err: reqwest::Error) -> Self {
        IdeaForgeError::Provider {
            message: format!("HTTP request failed: {}", err),
        }
    }
}

/// Result type alias for idea-forge operations
pub type Result<T> = std::result::Result<T, IdeaForgeError>;
