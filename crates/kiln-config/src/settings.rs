//! Build settings read by the production assembler.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Paths and feature switches for a production build.
///
/// `assets_root` and `index` have no defaults; every other field does.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildSettings {
    /// Output directory for the whole build
    pub assets_root: PathBuf,

    /// Directory (under `assets_root`) that hashed assets are written to
    #[serde(default = "default_assets_sub_directory")]
    pub assets_sub_directory: String,

    /// Public URL prefix the output is served from
    #[serde(default = "default_assets_public_path")]
    pub assets_public_path: String,

    #[serde(default = "default_true")]
    pub production_source_map: bool,

    /// Source-map mode identifier, used only when `production_source_map` is on
    #[serde(default = "default_devtool")]
    pub devtool: String,

    #[serde(default)]
    pub production_gzip: bool,

    #[serde(default = "default_gzip_extensions")]
    pub production_gzip_extensions: Vec<String>,

    #[serde(default)]
    pub bundle_analyzer_report: bool,

    /// Output path of the generated HTML entry document
    pub index: PathBuf,

    /// Project root; `static/` is copied from here
    #[serde(default = "default_context")]
    pub context: PathBuf,
}

impl BuildSettings {
    /// Settings with defaults for everything but the two required paths.
    pub fn new(assets_root: impl Into<PathBuf>, index: impl Into<PathBuf>) -> Self {
        Self {
            assets_root: assets_root.into(),
            assets_sub_directory: default_assets_sub_directory(),
            assets_public_path: default_assets_public_path(),
            production_source_map: true,
            devtool: default_devtool(),
            production_gzip: false,
            production_gzip_extensions: default_gzip_extensions(),
            bundle_analyzer_report: false,
            index: index.into(),
            context: default_context(),
        }
    }

    /// Reject settings the assembler cannot turn into a complete configuration.
    pub fn validate(&self) -> Result<()> {
        if self.assets_root.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("assetsRoot"));
        }

        if self.index.as_os_str().is_empty() {
            return Err(ConfigError::MissingField("index"));
        }

        if self.production_source_map && self.devtool.trim().is_empty() {
            return Err(ConfigError::invalid(
                "devtool",
                "a source-map mode is required while productionSourceMap is enabled",
            ));
        }

        if self.production_gzip {
            if self.production_gzip_extensions.is_empty() {
                return Err(ConfigError::invalid(
                    "productionGzipExtensions",
                    "list at least one extension or disable productionGzip",
                ));
            }

            for ext in &self.production_gzip_extensions {
                if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
                    return Err(ConfigError::invalid(
                        "productionGzipExtensions",
                        format!("'{ext}' is not a bare file extension (use \"js\", not \".js\")"),
                    ));
                }
            }
        }

        Ok(())
    }
}

pub(crate) fn default_true() -> bool {
    true
}

fn default_assets_sub_directory() -> String {
    "static".to_string()
}

fn default_assets_public_path() -> String {
    "/".to_string()
}

fn default_devtool() -> String {
    "#source-map".to_string()
}

fn default_gzip_extensions() -> Vec<String> {
    vec!["js".to_string(), "css".to_string()]
}

fn default_context() -> PathBuf {
    PathBuf::from(".")
}
