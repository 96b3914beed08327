//! Behavior of the production assembler over its input settings.

use std::path::PathBuf;

use kiln_config::{
    assemble, assemble_value, BuildConfig, BuildEnv, BuildSettings, ChunkSelection, ConfigError, Devtool,
    MinChunks, ModuleTest, Plugin, CSS_EXTRACT_LOADER,
};
use proptest::prelude::*;
use serde_json::json;

fn settings() -> BuildSettings {
    BuildSettings::new("dist", "dist/index.html")
}

fn build(env: BuildEnv, settings: &BuildSettings) -> BuildConfig {
    let base = BuildConfig::base(settings).expect("base config");
    assemble(&base, env, settings).expect("assemble")
}

fn compression_count(config: &BuildConfig) -> usize {
    config
        .plugins
        .iter()
        .filter(|p| p.as_compression().is_some())
        .count()
}

#[test]
fn gzip_disabled_has_no_compression_step() {
    let config = build(BuildEnv::Production, &settings());
    assert_eq!(compression_count(&config), 0);
}

#[test]
fn gzip_enabled_has_one_compression_step() {
    let mut s = settings();
    s.production_gzip = true;
    s.production_gzip_extensions = vec!["js".to_string(), "css".to_string()];

    let config = build(BuildEnv::Production, &s);
    assert_eq!(compression_count(&config), 1);

    let compression = config
        .plugins
        .iter()
        .find_map(Plugin::as_compression)
        .expect("compression step");
    assert_eq!(compression.threshold, 10240);
    assert_eq!(compression.min_ratio, 0.8);
    assert_eq!(compression.asset, "[path].gz[query]");
    assert_eq!(compression.test.as_str(), r"\.(js|css)$");
}

#[test]
fn analyzer_adds_exactly_one_step() {
    let mut s = settings();
    let without = build(BuildEnv::Production, &s).plugins.len();

    s.bundle_analyzer_report = true;
    let config = build(BuildEnv::Production, &s);
    assert_eq!(config.plugins.len(), without + 1);
    assert_eq!(config.plugin_names().last(), Some(&"bundle-analyzer"));
}

#[test]
fn cache_groups_are_fixed() {
    for (gzip, analyzer, source_map) in [
        (false, false, false),
        (true, false, true),
        (false, true, true),
        (true, true, false),
    ] {
        let mut s = settings();
        s.production_gzip = gzip;
        s.bundle_analyzer_report = analyzer;
        s.production_source_map = source_map;

        let config = build(BuildEnv::Production, &s);
        let split = config.split_chunks().expect("split chunks");
        assert!(!split.default_groups);
        assert_eq!(
            split.names().collect::<Vec<_>>(),
            vec!["vendor", "manifest", "app", "styles"]
        );
    }
}

#[test]
fn cache_group_rules() {
    let config = build(BuildEnv::Production, &settings());
    let split = config.split_chunks().expect("split chunks");

    let vendor = split.get("vendor").unwrap();
    assert_eq!(vendor.chunks, Some(ChunkSelection::All));
    assert!(vendor.accepts("/proj/node_modules/vue/dist/vue.esm.js", &[], 1));

    let manifest = split.get("manifest").unwrap();
    assert_eq!(manifest.min_chunks, Some(MinChunks::Unbounded));
    assert_eq!(manifest.test, Some(ModuleTest::Name("manifest".to_string())));

    let app = split.get("app").unwrap();
    assert!(app.reuse_existing_chunk);
    assert_eq!(app.min_chunks, Some(MinChunks::at_least(2).unwrap()));

    let styles = split.get("styles").unwrap();
    assert!(styles.enforce);
    assert!(styles.accepts("/proj/src/app.css", &[], 1));
}

#[test]
fn testing_env_uses_fixed_index() {
    let mut s = settings();
    s.index = PathBuf::from("/srv/www/custom.html");

    let html = build(BuildEnv::Testing, &s).html().cloned().expect("html step");
    assert_eq!(html.filename, PathBuf::from("index.html"));

    let html = build(BuildEnv::Production, &s).html().cloned().expect("html step");
    assert_eq!(html.filename, PathBuf::from("/srv/www/custom.html"));
}

#[test]
fn env_selects_define_variables() {
    let config = build(BuildEnv::Testing, &settings());
    let Some(Plugin::Define(define)) = config.plugins.iter().find(|p| p.name() == "define") else {
        panic!("define step missing");
    };
    assert_eq!(define.process_env.get("NODE_ENV"), Some("\"testing\""));
}

#[test]
fn base_plugins_come_first() {
    let names = build(BuildEnv::Production, &settings()).plugin_names();
    assert_eq!(
        names,
        vec![
            "vue-loader",
            "define",
            "extract-css",
            "html",
            "hashed-module-ids",
            "module-concatenation",
            "copy-assets"
        ]
    );
}

#[test]
fn output_uses_hashed_templates() {
    let config = build(BuildEnv::Production, &settings());
    assert_eq!(config.output.path, Some(PathBuf::from("dist")));
    assert_eq!(
        config.output.filename.as_deref(),
        Some("static/js/[name].[chunkhash].js")
    );
    assert_eq!(
        config.output.chunk_filename.as_deref(),
        Some("static/js/[id].[chunkhash].js")
    );
    // kept from the base
    assert_eq!(config.output.public_path.as_deref(), Some("/"));
}

#[test]
fn style_rules_are_appended_to_base_rules() {
    let s = settings();
    let base = BuildConfig::base(&s).unwrap();
    let config = assemble(&base, BuildEnv::Production, &s).unwrap();

    assert_eq!(config.module.rules.len(), base.module.rules.len() + 7);
    assert_eq!(config.module.rules[..base.module.rules.len()], base.module.rules[..]);

    let css = &config.module.rules[base.module.rules.len()];
    assert_eq!(css.test.as_str(), r"\.css$");
    assert_eq!(css.use_entries[0].loader, CSS_EXTRACT_LOADER);
}

#[test]
fn devtool_disabled_without_source_maps() {
    let mut s = settings();
    s.production_source_map = false;
    let config = build(BuildEnv::Production, &s);
    assert_eq!(config.devtool, Devtool::Disabled);
    assert_eq!(config.to_value().unwrap()["devtool"], json!(false));
}

#[test]
fn copy_step_ignores_dotfiles() {
    let mut s = settings();
    s.context = PathBuf::from("/proj");
    let config = build(BuildEnv::Production, &s);
    let Some(Plugin::CopyAssets(copy)) = config.plugins.iter().find(|p| p.name() == "copy-assets")
    else {
        panic!("copy step missing");
    };
    assert_eq!(copy.patterns[0].from, PathBuf::from("/proj/static"));
    assert_eq!(copy.patterns[0].to, "static");
    assert_eq!(copy.patterns[0].ignore, vec![".*".to_string()]);
}

#[test]
fn serialized_tree_uses_engine_names() {
    let value = build(BuildEnv::Production, &settings()).to_value().unwrap();
    assert_eq!(
        value["optimization"]["splitChunks"]["cacheGroups"]["default"],
        json!(false)
    );
    assert!(value["optimization"]["splitChunks"].get("defaultGroups").is_none());
    assert_eq!(value["mode"], json!("production"));
    assert_eq!(value["optimization"]["minimize"], json!(true));
    assert_eq!(
        value["optimization"]["splitChunks"]["cacheGroups"]["manifest"]["minChunks"],
        json!("Infinity")
    );
    assert_eq!(
        value["plugins"][3]["chunksSortMode"],
        json!("dependency")
    );
}

#[test]
fn invalid_settings_fail_fast() {
    let mut s = settings();
    s.production_gzip = true;
    s.production_gzip_extensions = vec![];
    let base = BuildConfig::base(&settings()).unwrap();
    let err = assemble(&base, BuildEnv::Production, &s).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn minimal_base_assembles() {
    let base = BuildConfig::from_value(json!({ "plugins": [] })).unwrap();
    let config = assemble(&base, BuildEnv::Production, &settings()).unwrap();
    assert_eq!(config.plugins.len(), 6);
}

#[test]
fn base_cache_group_test_is_replaced() {
    let base = BuildConfig::from_value(json!({
        "plugins": [],
        "optimization": { "splitChunks": { "cacheGroups": {
            "vendor": { "name": "vendor", "test": { "name": "vendor" } }
        } } }
    }))
    .unwrap();

    let config = assemble(&base, BuildEnv::Production, &settings()).unwrap();
    let split = config.split_chunks().expect("split chunks");
    assert_eq!(
        split.names().collect::<Vec<_>>(),
        vec!["vendor", "manifest", "app", "styles"]
    );
    let Some(ModuleTest::Pattern(pattern)) = &split.get("vendor").unwrap().test else {
        panic!("vendor test should be the node_modules pattern");
    };
    assert_eq!(pattern.as_str(), r"[\/]node_modules[\/]");
}

#[test]
fn mistyped_base_key_fails_merge() {
    let base = json!({ "resolve": { "extensions": ".js" } });
    let err = assemble_value(&base, BuildEnv::Production, &settings()).unwrap_err();
    assert!(matches!(err, ConfigError::Merge { .. }), "{err}");
}

proptest! {
    #[test]
    fn assembling_twice_is_deep_equal(
        gzip in any::<bool>(),
        analyzer in any::<bool>(),
        source_map in any::<bool>(),
        testing in any::<bool>(),
        sub_dir in "[a-z]{1,8}",
    ) {
        let mut s = settings();
        s.production_gzip = gzip;
        s.bundle_analyzer_report = analyzer;
        s.production_source_map = source_map;
        s.assets_sub_directory = sub_dir;
        let env = if testing { BuildEnv::Testing } else { BuildEnv::Production };

        let first = build(env, &s);
        let second = build(env, &s);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.to_value().unwrap(), second.to_value().unwrap());
        prop_assert_eq!(compression_count(&first), usize::from(gzip));
    }
}
