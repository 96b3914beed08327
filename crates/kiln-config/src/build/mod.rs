//! Typed build configuration tree handed to the external build engine.

mod optimization;
mod pattern;
mod plugin;
mod rule;
mod split;

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub use optimization::{
    CssMinimizerOptions, JsCompressOptions, JsMinimizerOptions, Minimizer, Optimization,
};
pub use pattern::Pattern;
pub use plugin::{
    AnalyzerMode, AnalyzerOptions, ChunksSortMode, CopyAssetsOptions, CopyPattern, DefineOptions,
    ExtractCssOptions, HashedModuleIdsOptions, HtmlMinifyOptions, HtmlOptions, Plugin,
};
pub use rule::{css_loaders, style_loaders, Rule, StyleLoaderOptions, UseEntry, CSS_EXTRACT_LOADER};
pub use split::{CacheGroup, ChunkSelection, MinChunks, ModuleTest, SplitChunks};

use crate::error::{ConfigError, Result};
use crate::paths::assets_path;
use crate::settings::BuildSettings;

/// Inline assets below this size (bytes) as data URLs
const URL_LOADER_LIMIT: u64 = 10_000;

/// Root of the configuration tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,

    #[serde(default = "default_context")]
    pub context: PathBuf,

    /// Named entry chunks and the modules that seed them
    #[serde(default)]
    pub entry: IndexMap<String, Vec<String>>,

    #[serde(default)]
    pub output: OutputOptions,

    #[serde(default)]
    pub resolve: ResolveOptions,

    #[serde(default)]
    pub module: ModuleOptions,

    #[serde(default)]
    pub devtool: Devtool,

    #[serde(default)]
    pub plugins: Vec<Plugin>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimization: Option<Optimization>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Template for entry chunk file names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,

    /// Template for non-entry chunk file names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunk_filename: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveOptions {
    #[serde(default)]
    pub extensions: Vec<String>,

    #[serde(default)]
    pub alias: IndexMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleOptions {
    #[serde(default)]
    pub rules: Vec<Rule>,
}

/// Source-map mode, or `false` on the wire when disabled
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "DevtoolRepr", into = "DevtoolRepr")]
pub enum Devtool {
    #[default]
    Disabled,
    Mode(String),
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum DevtoolRepr {
    Flag(bool),
    Mode(String),
}

impl TryFrom<DevtoolRepr> for Devtool {
    type Error = &'static str;

    fn try_from(repr: DevtoolRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            DevtoolRepr::Flag(false) => Ok(Self::Disabled),
            DevtoolRepr::Flag(true) => Err("devtool must be `false` or a source-map mode"),
            DevtoolRepr::Mode(mode) => Ok(Self::Mode(mode)),
        }
    }
}

impl From<Devtool> for DevtoolRepr {
    fn from(value: Devtool) -> Self {
        match value {
            Devtool::Disabled => Self::Flag(false),
            Devtool::Mode(mode) => Self::Mode(mode),
        }
    }
}

impl BuildConfig {
    /// Create from serde_json::Value
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::InvalidValue {
            field: "config".to_string(),
            hint: Some(e.to_string()),
        })
    }

    /// Base configuration for a single-page app rooted at `settings.context`.
    ///
    /// Production overrides are merged on top of this by [`crate::assemble`].
    pub fn base(settings: &BuildSettings) -> Result<Self> {
        let context = settings.context.clone();
        let sub_dir = settings.assets_sub_directory.as_str();

        let url_loader = |test: &str, kind: &str| -> Result<Rule> {
            Ok(Rule::new(
                Pattern::new(test)?,
                vec![UseEntry::with_options(
                    "url-loader",
                    json!({
                        "limit": URL_LOADER_LIMIT,
                        "name": assets_path(sub_dir, &format!("{kind}/[name].[hash:7].[ext]")),
                    }),
                )],
            ))
        };

        let mut babel = Rule::new(Pattern::new(r"\.js$")?, vec![UseEntry::new("babel-loader")]);
        babel.include = vec![context.join("src"), context.join("test")];

        let rules = vec![
            Rule::new(Pattern::new(r"\.vue$")?, vec![UseEntry::new("vue-loader")]),
            babel,
            url_loader(r"\.(png|jpe?g|gif|svg)(\?.*)?$", "img")?,
            url_loader(r"\.(mp4|webm|ogg|mp3|wav|flac|aac)(\?.*)?$", "media")?,
            url_loader(r"\.(woff2?|eot|ttf|otf)(\?.*)?$", "fonts")?,
        ];

        let mut alias = IndexMap::new();
        alias.insert("vue$".to_string(), "vue/dist/vue.esm.js".to_string());
        alias.insert("@".to_string(), context.join("src").display().to_string());

        let mut entry = IndexMap::new();
        entry.insert("app".to_string(), vec!["./src/main.js".to_string()]);

        Ok(Self {
            mode: None,
            context,
            entry,
            output: OutputOptions {
                path: Some(settings.assets_root.clone()),
                filename: Some("[name].js".to_string()),
                chunk_filename: None,
                public_path: Some(settings.assets_public_path.clone()),
            },
            resolve: ResolveOptions {
                extensions: vec![".js".to_string(), ".vue".to_string(), ".json".to_string()],
                alias,
            },
            module: ModuleOptions { rules },
            devtool: Devtool::Disabled,
            plugins: vec![Plugin::VueLoader],
            optimization: None,
        })
    }

    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(Plugin::name).collect()
    }

    pub fn html(&self) -> Option<&HtmlOptions> {
        self.plugins.iter().find_map(Plugin::as_html)
    }

    pub fn split_chunks(&self) -> Option<&SplitChunks> {
        self.optimization.as_ref().map(|opt| &opt.split_chunks)
    }
}

fn default_context() -> PathBuf {
    PathBuf::from(".")
}
