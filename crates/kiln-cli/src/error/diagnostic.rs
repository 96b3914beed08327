//! Miette diagnostic conversion for CLI errors.

use crate::error::{CliError, ConfigError};
use miette::Report;

/// Convert a [`CliError`] into a miette report, attaching help where the
/// fix is known.
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Config(e) => config_error_to_miette(e),
        CliError::FileNotFound(path) => miette::miette!(
            help = "Check the path passed on the command line",
            "File not found: {}",
            path.display()
        ),
        _ => miette::miette!("{}", err),
    }
}

fn config_error_to_miette(err: ConfigError) -> Report {
    match err {
        ConfigError::NotFound(root) => miette::miette!(
            help = "Create kiln.toml with a [build] table, or add a \"kiln\" field to package.json",
            "No build settings found in {}",
            root.display()
        ),
        ConfigError::MissingField(field) => miette::miette!(
            help = format!("Set build.{field} in your settings file or KILN_BUILD_* environment"),
            "Missing required setting '{}'",
            field
        ),
        ConfigError::TemplateNotFound(path) => miette::miette!(
            help = "The HTML page is generated from index.html in the project context",
            "HTML template not found: {}",
            path.display()
        ),
        other => miette::miette!("Configuration error: {}", other),
    }
}
