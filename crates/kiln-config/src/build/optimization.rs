use serde::{Deserialize, Serialize};

use crate::build::split::SplitChunks;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Optimization {
    #[serde(default)]
    pub minimize: bool,

    /// Cross-module scope hoisting
    #[serde(default)]
    pub concatenate_modules: bool,

    #[serde(default)]
    pub minimizer: Vec<Minimizer>,

    #[serde(default)]
    pub split_chunks: SplitChunks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "minimizer", rename_all = "lowercase")]
pub enum Minimizer {
    Js(JsMinimizerOptions),
    Css(CssMinimizerOptions),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsMinimizerOptions {
    pub compress: JsCompressOptions,
    pub source_map: bool,
    /// Hint to run across available cores
    pub parallel: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct JsCompressOptions {
    pub warnings: bool,
}

/// Minifies extracted CSS, deduplicating rules split across components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssMinimizerOptions {
    pub source_map: bool,
    /// Restrict to transforms that cannot change rendering
    pub safe: bool,
}
