//! Pluggable settings validation strategies
//!
//! Schema validation needs nothing but the settings value; filesystem
//! validation also checks that the project files the configuration points
//! at are present.

use std::path::PathBuf;

use crate::error::{ConfigError, Result};
use crate::settings::BuildSettings;

/// HTML template the entry document is generated from, relative to `context`
pub const HTML_TEMPLATE: &str = "index.html";

pub trait ConfigValidator {
    fn validate(&self, settings: &BuildSettings) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use kiln_config::{BuildSettings, ConfigValidator, SchemaValidator};
///
/// let settings = BuildSettings::new("dist", "dist/index.html");
/// SchemaValidator.validate(&settings).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, settings: &BuildSettings) -> Result<()> {
        settings.validate()
    }
}

/// Filesystem validator (for CLI use)
///
/// Runs schema validation, then requires the HTML template to exist under
/// `context`. A missing `static/` directory is not an error; there is simply
/// nothing to copy.
pub struct FsValidator;

impl ConfigValidator for FsValidator {
    fn validate(&self, settings: &BuildSettings) -> Result<()> {
        SchemaValidator.validate(settings)?;

        let template = settings.context.join(HTML_TEMPLATE);
        if !template.is_file() {
            return Err(ConfigError::TemplateNotFound(template));
        }

        Ok(())
    }
}

/// Static asset directory copied verbatim into the output, if present
pub fn static_dir(settings: &BuildSettings) -> Option<PathBuf> {
    let dir = settings.context.join("static");
    dir.is_dir().then_some(dir)
}

pub fn validate_schema(settings: &BuildSettings) -> Result<()> {
    SchemaValidator.validate(settings)
}

pub fn validate_fs(settings: &BuildSettings) -> Result<()> {
    FsValidator.validate(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn settings_in(dir: &TempDir) -> BuildSettings {
        let mut settings = BuildSettings::new("dist", "dist/index.html");
        settings.context = dir.path().to_path_buf();
        settings
    }

    #[test]
    fn fs_validator_requires_template() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        assert!(matches!(
            validate_fs(&settings),
            Err(ConfigError::TemplateNotFound(_))
        ));

        fs::write(dir.path().join("index.html"), "<div id=app></div>").unwrap();
        assert!(validate_fs(&settings).is_ok());
    }

    #[test]
    fn fs_validator_runs_schema_first() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("index.html"), "").unwrap();
        let mut settings = settings_in(&dir);
        settings.index = PathBuf::new();
        assert!(matches!(
            validate_fs(&settings),
            Err(ConfigError::MissingField("index"))
        ));
    }

    #[test]
    fn static_dir_is_optional() {
        let dir = TempDir::new().unwrap();
        let settings = settings_in(&dir);
        assert!(static_dir(&settings).is_none());

        fs::create_dir(dir.path().join("static")).unwrap();
        assert_eq!(static_dir(&settings), Some(dir.path().join("static")));
    }
}
