//! Error types for settings loading, validation and configuration assembly.

use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error)]
pub enum ConfigError {
    // Settings discovery errors
    #[error("settings not found in {} (expected kiln.toml or a \"kiln\" field in package.json)", .0.display())]
    NotFound(PathBuf),

    #[error("invalid value for '{field}'{}", hint_suffix(.hint))]
    InvalidValue { field: String, hint: Option<String> },

    #[error("missing required setting '{0}'")]
    MissingField(&'static str),

    #[error("HTML template not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    // Chunk splitting errors
    #[error("cache group '{0}' is defined more than once")]
    DuplicateCacheGroup(String),

    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    // Assembly errors
    #[error("failed to merge production overrides: {message}")]
    Merge { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub(crate) fn invalid(field: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            hint: Some(hint.into()),
        }
    }
}

fn hint_suffix(hint: &Option<String>) -> String {
    match hint {
        Some(hint) => format!(": {hint}"),
        None => String::new(),
    }
}
