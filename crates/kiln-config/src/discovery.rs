//! File-based settings discovery for CLI use
//!
//! Settings come from, lowest precedence first:
//! 1. the `[build]` table of `kiln.toml`, or the `kiln.build` field of `package.json`
//! 2. `KILN_BUILD_*` environment variables (`KILN_BUILD_PRODUCTION_GZIP=true`)

use std::fs;
use std::path::{Path, PathBuf};

use figment::providers::{Env, Serialized};
use figment::Figment;
use serde_json::Value;
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::settings::BuildSettings;

const ENV_PREFIX: &str = "KILN_BUILD_";

/// File-based settings discovery
///
/// # Example
///
/// ```no_run
/// use kiln_config::SettingsDiscovery;
///
/// let settings = SettingsDiscovery::new(".").load().unwrap();
/// ```
pub struct SettingsDiscovery {
    root: PathBuf,
}

impl SettingsDiscovery {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Find a settings file in the root directory
    ///
    /// Searches in this order:
    /// 1. kiln.toml
    /// 2. package.json (kiln field)
    pub fn find(&self) -> Option<PathBuf> {
        let toml_path = self.root.join("kiln.toml");
        if toml_path.exists() {
            return Some(toml_path);
        }

        let pkg_path = self.root.join("package.json");
        let content = fs::read_to_string(&pkg_path).ok()?;
        let parsed: Value = serde_json::from_str(&content).ok()?;
        parsed
            .get("kiln")
            .filter(|kiln| !kiln.is_null())
            .map(|_| pkg_path)
    }

    /// Load settings from the discovered file, then apply environment overrides.
    ///
    /// Relative `context` values are resolved against the discovery root.
    pub fn load(&self) -> Result<BuildSettings> {
        let path = self
            .find()
            .ok_or_else(|| ConfigError::NotFound(self.root.clone()))?;
        debug!(path = %path.display(), "loading build settings");

        let file_value = self.read_build_table(&path)?;

        let mut settings: BuildSettings = Figment::new()
            .merge(Serialized::defaults(file_value))
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .map(|key| snake_to_camel(key.as_str()).into())
                    .lowercase(false),
            )
            .extract()
            .map_err(|err| ConfigError::InvalidValue {
                field: "build".to_string(),
                hint: Some(err.to_string()),
            })?;

        if settings.context.is_relative() {
            settings.context = self.root.join(&settings.context);
        }
        Ok(settings)
    }

    fn read_build_table(&self, path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path)?;

        let document: Value = if path.file_name() == Some(std::ffi::OsStr::new("package.json")) {
            let parsed: Value = serde_json::from_str(&content).map_err(|e| {
                ConfigError::invalid("package.json", format!("Invalid JSON: {e}"))
            })?;
            parsed.get("kiln").cloned().unwrap_or(Value::Null)
        } else {
            let toml_val: toml::Value = toml::from_str(&content)
                .map_err(|e| ConfigError::invalid("toml", format!("Invalid TOML syntax: {e}")))?;
            serde_json::to_value(toml_val).map_err(|e| {
                ConfigError::invalid("toml", format!("TOML to JSON conversion failed: {e}"))
            })?
        };

        match document.get("build") {
            Some(build @ Value::Object(_)) => Ok(build.clone()),
            _ => Err(ConfigError::invalid(
                "build",
                format!("{} needs a `build` table", path.display()),
            )),
        }
    }
}

/// Discover settings from the current directory
pub fn discover() -> Result<BuildSettings> {
    let root = std::env::current_dir()?;
    SettingsDiscovery::new(&root).load()
}

/// `production_gzip` → `productionGzip`
fn snake_to_camel(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut upper = false;
    for c in key.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.push(c.to_ascii_uppercase());
            upper = false;
        } else {
            out.push(c.to_ascii_lowercase());
        }
    }
    out
}
