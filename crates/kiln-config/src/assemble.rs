//! Production build configuration assembly.
//!
//! [`assemble`] merges a base configuration with production overrides:
//! extracted and minified styles, content-hashed output names, a fixed
//! plugin set, cache-group chunk splitting and the optional gzip and
//! bundle-analysis steps.

use std::path::PathBuf;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info_span};

use crate::build::{
    AnalyzerOptions, BuildConfig, CacheGroup, ChunkSelection, ChunksSortMode, CopyAssetsOptions,
    CopyPattern, CssMinimizerOptions, DefineOptions, Devtool, ExtractCssOptions,
    HashedModuleIdsOptions, HtmlMinifyOptions, HtmlOptions, JsCompressOptions, JsMinimizerOptions,
    MinChunks, Minimizer, Mode, ModuleOptions, ModuleTest, Optimization, OutputOptions, Pattern,
    Plugin, SplitChunks, StyleLoaderOptions, style_loaders,
};
use crate::compress::CompressionOptions;
use crate::environment::BuildEnv;
use crate::error::{ConfigError, Result};
use crate::merge::merge;
use crate::paths::assets_path;
use crate::settings::BuildSettings;

/// HTML entry document name used for test runs
pub const TESTING_INDEX: &str = "index.html";

/// The subset of the tree production replaces or extends.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductionOverrides {
    mode: Mode,
    module: ModuleOptions,
    devtool: Devtool,
    output: OutputOptions,
    plugins: Vec<Plugin>,
    optimization: Optimization,
}

/// Build the production configuration.
///
/// Pure: identical inputs give deep-equal outputs. Settings are validated
/// first and nothing is returned unless the whole tree is valid.
pub fn assemble(base: &BuildConfig, env: BuildEnv, settings: &BuildSettings) -> Result<BuildConfig> {
    assemble_value(&base.to_value()?, env, settings)
}

/// [`assemble`] over an untyped base tree, such as one read from a JSON file.
///
/// Keys production does not override are taken as they are; if they do not
/// fit the configuration model the result is [`ConfigError::Merge`].
pub fn assemble_value(base: &Value, env: BuildEnv, settings: &BuildSettings) -> Result<BuildConfig> {
    let span = info_span!("assemble", env = env.as_str());
    let _enter = span.enter();

    settings.validate()?;

    let overrides = production_overrides(env, settings)?;
    debug!(
        plugins = overrides.plugins.len(),
        rules = overrides.module.rules.len(),
        "production overrides ready"
    );

    let overrides = serde_json::to_value(&overrides).map_err(|err| ConfigError::Merge {
        message: err.to_string(),
    })?;

    let mut base = base.clone();
    drop_replaced_tests(&mut base, &overrides);
    let merged = merge(&base, &overrides);

    let config: BuildConfig =
        serde_json::from_value(merged).map_err(|err| ConfigError::Merge {
            message: err.to_string(),
        })?;

    if let Some(split) = config.split_chunks() {
        split.validate()?;
    }

    debug!(plugins = ?config.plugin_names(), "configuration assembled");
    Ok(config)
}

/// A cache group `test` is a single value: the production one replaces the
/// base one instead of merging key-wise with it.
fn drop_replaced_tests(base: &mut Value, overrides: &Value) {
    let Some(groups) = cache_groups(overrides) else {
        return;
    };
    let Some(base_groups) = base
        .get_mut("optimization")
        .and_then(|opt| opt.get_mut("splitChunks"))
        .and_then(|split| split.get_mut("cacheGroups"))
        .and_then(Value::as_object_mut)
    else {
        return;
    };

    for (name, group) in groups {
        if group.get("test").is_none() {
            continue;
        }
        if let Some(Value::Object(base_group)) = base_groups.get_mut(name) {
            base_group.remove("test");
        }
    }
}

fn cache_groups(tree: &Value) -> Option<&serde_json::Map<String, Value>> {
    tree.get("optimization")?
        .get("splitChunks")?
        .get("cacheGroups")?
        .as_object()
}

fn production_overrides(env: BuildEnv, settings: &BuildSettings) -> Result<ProductionOverrides> {
    let source_map = settings.production_source_map;
    let sub_dir = settings.assets_sub_directory.as_str();

    let rules = style_loaders(StyleLoaderOptions {
        source_map,
        extract: true,
        use_post_css: true,
    })?;

    let devtool = if source_map {
        Devtool::Mode(settings.devtool.clone())
    } else {
        Devtool::Disabled
    };

    let output = OutputOptions {
        path: Some(settings.assets_root.clone()),
        filename: Some(assets_path(sub_dir, "js/[name].[chunkhash].js")),
        chunk_filename: Some(assets_path(sub_dir, "js/[id].[chunkhash].js")),
        public_path: None,
    };

    Ok(ProductionOverrides {
        mode: Mode::Production,
        module: ModuleOptions { rules },
        devtool,
        output,
        plugins: production_plugins(env, settings)?,
        optimization: optimization(source_map)?,
    })
}

fn production_plugins(env: BuildEnv, settings: &BuildSettings) -> Result<Vec<Plugin>> {
    let sub_dir = settings.assets_sub_directory.as_str();

    let html_filename = match env {
        BuildEnv::Testing => PathBuf::from(TESTING_INDEX),
        BuildEnv::Production => settings.index.clone(),
    };

    let always = [
        Plugin::Define(DefineOptions {
            process_env: env.env_vars(),
        }),
        Plugin::ExtractCss(ExtractCssOptions {
            filename: assets_path(sub_dir, "css/[name].[contenthash].css"),
            all_chunks: true,
        }),
        Plugin::Html(HtmlOptions {
            filename: html_filename,
            template: "index.html".to_string(),
            inject: true,
            minify: HtmlMinifyOptions::production(),
            chunks_sort_mode: ChunksSortMode::Dependency,
        }),
        Plugin::HashedModuleIds(HashedModuleIdsOptions::default()),
        Plugin::ModuleConcatenation,
        Plugin::CopyAssets(CopyAssetsOptions {
            patterns: vec![CopyPattern {
                from: settings.context.join("static"),
                to: settings.assets_sub_directory.clone(),
                ignore: vec![".*".to_string()],
            }],
        }),
    ];

    let compression = if settings.production_gzip {
        Some(Plugin::Compression(CompressionOptions::for_extensions(
            &settings.production_gzip_extensions,
        )?))
    } else {
        None
    };

    let analyzer = settings
        .bundle_analyzer_report
        .then(|| Plugin::BundleAnalyzer(AnalyzerOptions::default()));

    Ok(always
        .into_iter()
        .chain([compression, analyzer].into_iter().flatten())
        .collect())
}

fn optimization(source_map: bool) -> Result<Optimization> {
    Ok(Optimization {
        minimize: true,
        concatenate_modules: true,
        minimizer: vec![
            Minimizer::Js(JsMinimizerOptions {
                compress: JsCompressOptions { warnings: false },
                source_map,
                parallel: true,
            }),
            Minimizer::Css(CssMinimizerOptions {
                source_map,
                safe: true,
            }),
        ],
        split_chunks: split_chunks()?,
    })
}

/// `vendor`, `manifest`, `app` and `styles`, with the engine defaults off.
pub fn split_chunks() -> Result<SplitChunks> {
    let mut split = SplitChunks {
        default_groups: false,
        ..SplitChunks::default()
    };

    split.insert(
        CacheGroup::new("vendor")
            .test(ModuleTest::Pattern(Pattern::new(r"[\\/]node_modules[\\/]")?))
            .chunks(ChunkSelection::All),
    )?;

    // Reserved for the runtime chunk, which a separate mechanism produces.
    split.insert(
        CacheGroup::new("manifest")
            .test(ModuleTest::Name("manifest".to_string()))
            .min_chunks(MinChunks::Unbounded),
    )?;

    split.insert(
        CacheGroup::new("app")
            .test(ModuleTest::Name("app".to_string()))
            .reuse_existing_chunk()
            .chunks(ChunkSelection::All)
            .min_chunks(MinChunks::at_least(2)?),
    )?;

    split.insert(
        CacheGroup::new("styles")
            .test(ModuleTest::Pattern(Pattern::new(r"\.css$")?))
            .chunks(ChunkSelection::All)
            .enforce(),
    )?;

    Ok(split)
}
