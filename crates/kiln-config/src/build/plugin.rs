use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::compress::CompressionOptions;
use crate::environment::EnvVars;

/// A build step handed to the external engine, tagged by `plugin` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "plugin", rename_all = "kebab-case")]
pub enum Plugin {
    /// Compiles single-file components (contributed by the base configuration)
    VueLoader,
    Define(DefineOptions),
    ExtractCss(ExtractCssOptions),
    Html(HtmlOptions),
    /// Keeps module ids stable when unrelated modules do not change
    HashedModuleIds(HashedModuleIdsOptions),
    /// Scope hoisting
    ModuleConcatenation,
    CopyAssets(CopyAssetsOptions),
    Compression(CompressionOptions),
    BundleAnalyzer(AnalyzerOptions),
}

impl Plugin {
    pub fn name(&self) -> &'static str {
        match self {
            Self::VueLoader => "vue-loader",
            Self::Define(_) => "define",
            Self::ExtractCss(_) => "extract-css",
            Self::Html(_) => "html",
            Self::HashedModuleIds(_) => "hashed-module-ids",
            Self::ModuleConcatenation => "module-concatenation",
            Self::CopyAssets(_) => "copy-assets",
            Self::Compression(_) => "compression",
            Self::BundleAnalyzer(_) => "bundle-analyzer",
        }
    }

    pub fn as_compression(&self) -> Option<&CompressionOptions> {
        match self {
            Self::Compression(options) => Some(options),
            _ => None,
        }
    }

    pub fn as_html(&self) -> Option<&HtmlOptions> {
        match self {
            Self::Html(options) => Some(options),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefineOptions {
    #[serde(rename = "process.env")]
    pub process_env: EnvVars,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractCssOptions {
    pub filename: String,
    /// Also extract CSS from code-split chunks
    #[serde(default)]
    pub all_chunks: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlOptions {
    pub filename: PathBuf,
    pub template: String,
    #[serde(default = "crate::settings::default_true")]
    pub inject: bool,
    #[serde(default)]
    pub minify: HtmlMinifyOptions,
    #[serde(default)]
    pub chunks_sort_mode: ChunksSortMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlMinifyOptions {
    pub remove_comments: bool,
    pub collapse_whitespace: bool,
    pub remove_attribute_quotes: bool,
}

impl HtmlMinifyOptions {
    pub fn production() -> Self {
        Self {
            remove_comments: true,
            collapse_whitespace: true,
            remove_attribute_quotes: true,
        }
    }
}

/// Order chunks are injected into the HTML document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunksSortMode {
    #[default]
    Auto,
    /// Dependencies before dependents
    Dependency,
    None,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HashedModuleIdsOptions {
    pub hash_function: String,
    pub hash_digest: String,
    pub hash_digest_length: u8,
}

impl Default for HashedModuleIdsOptions {
    fn default() -> Self {
        Self {
            hash_function: "md4".to_string(),
            hash_digest: "base64".to_string(),
            hash_digest_length: 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyAssetsOptions {
    pub patterns: Vec<CopyPattern>,
}

/// Copy `from` verbatim into `to`; the engine skips names matched by `ignore` globs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyPattern {
    pub from: PathBuf,
    pub to: String,
    #[serde(default)]
    pub ignore: Vec<String>,
}

/// Visual report of output composition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerOptions {
    pub analyzer_mode: AnalyzerMode,
    pub analyzer_host: String,
    pub analyzer_port: u16,
    pub report_filename: String,
    pub open_analyzer: bool,
    pub generate_stats_file: bool,
    pub stats_filename: String,
}

impl Default for AnalyzerOptions {
    fn default() -> Self {
        Self {
            analyzer_mode: AnalyzerMode::Server,
            analyzer_host: "127.0.0.1".to_string(),
            analyzer_port: 8888,
            report_filename: "report.html".to_string(),
            open_analyzer: true,
            generate_stats_file: false,
            stats_filename: "stats.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerMode {
    #[default]
    Server,
    Static,
    Disabled,
}
