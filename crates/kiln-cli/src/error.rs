//! Error handling for the Kiln CLI.
//!
//! Library errors from `kiln-config` convert into [`CliError`] via `#[from]`;
//! `main` renders the final error through [`cli_error_to_miette`].
//!
//! # Example
//!
//! ```rust,no_run
//! use kiln_cli::error::{Result, ResultExt};
//! use std::path::Path;
//!
//! fn read_base(path: &Path) -> Result<String> {
//!     std::fs::read_to_string(path).with_path(path)
//! }
//! ```

mod diagnostic;

use std::path::PathBuf;
use thiserror::Error;

pub use diagnostic::cli_error_to_miette;
pub use kiln_config::ConfigError;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Settings loading, validation or assembly failed
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A blocking task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Task(String),

    /// Generic errors with custom messages
    #[error("{0}")]
    Custom(String),
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Extension trait for adding context to `Result` types.
pub trait ResultExt<T> {
    /// Turn a not-found I/O error into [`CliError::FileNotFound`] for `path`.
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T>;

    /// Append a hint to the error message.
    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T>;

    /// Prefix the error message.
    fn context(self, msg: impl std::fmt::Display) -> Result<T>;
}

impl<T, E: Into<CliError>> ResultExt<T> for std::result::Result<T, E> {
    fn with_path(self, path: impl AsRef<std::path::Path>) -> Result<T> {
        self.map_err(|e| match e.into() {
            CliError::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound => {
                CliError::FileNotFound(path.as_ref().to_path_buf())
            }
            other => other,
        })
    }

    fn with_hint(self, hint: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}\n\nHint: {}", err, hint))
        })
    }

    fn context(self, msg: impl std::fmt::Display) -> Result<T> {
        self.map_err(|e| {
            let err: CliError = e.into();
            CliError::Custom(format!("{}: {}", msg, err))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_error_from_config_error() {
        let config_err = ConfigError::NotFound(PathBuf::from("/proj"));
        let cli_err: CliError = config_err.into();
        assert!(matches!(cli_err, CliError::Config(_)));
        assert!(cli_err.to_string().contains("kiln.toml"));
    }

    #[test]
    fn test_result_ext_with_path() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "file not found",
        ));

        let err = result.with_path("/proj/base.json").unwrap_err();
        assert!(matches!(err, CliError::FileNotFound(_)));
    }

    #[test]
    fn test_result_ext_with_path_keeps_other_errors() {
        let result: std::io::Result<()> = Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "denied",
        ));

        let err = result.with_path("/proj/base.json").unwrap_err();
        assert!(matches!(err, CliError::Io(_)));
    }

    #[test]
    fn test_result_ext_with_hint() {
        let result: std::result::Result<(), ConfigError> =
            Err(ConfigError::MissingField("index"));

        let err = result.with_hint("Set build.index in kiln.toml").unwrap_err();
        assert!(err.to_string().contains("Hint: Set build.index in kiln.toml"));
    }

    #[test]
    fn test_result_ext_context() {
        let result: std::result::Result<(), ConfigError> =
            Err(ConfigError::MissingField("assetsRoot"));

        let err = result.context("Failed to load settings").unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Failed to load settings: "));
        assert!(msg.contains("assetsRoot"));
    }
}
