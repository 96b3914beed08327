use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::build::pattern::Pattern;
use crate::error::Result;

/// Loader used in place of a style injector when CSS is extracted to files
pub const CSS_EXTRACT_LOADER: &str = "mini-css-extract-plugin/loader";

const STYLE_INJECT_LOADER: &str = "vue-style-loader";

/// One module rule: files matching `test` run through `use` (last loader first).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub test: Pattern,

    #[serde(rename = "use")]
    pub use_entries: Vec<UseEntry>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include: Vec<PathBuf>,
}

impl Rule {
    pub fn new(test: Pattern, use_entries: Vec<UseEntry>) -> Self {
        Self {
            test,
            use_entries,
            include: Vec::new(),
        }
    }

    pub fn loader_names(&self) -> impl Iterator<Item = &str> {
        self.use_entries.iter().map(|entry| entry.loader.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseEntry {
    pub loader: String,

    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub options: Value,
}

impl UseEntry {
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: Value::Null,
        }
    }

    pub fn with_options(loader: impl Into<String>, options: Value) -> Self {
        Self {
            loader: loader.into(),
            options,
        }
    }
}

/// How stylesheets are processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleLoaderOptions {
    pub source_map: bool,
    /// Extract CSS to files instead of injecting it at runtime
    pub extract: bool,
    pub use_post_css: bool,
}

/// Loader chain per stylesheet language, keyed by file extension.
pub fn css_loaders(options: StyleLoaderOptions) -> Vec<(&'static str, Vec<UseEntry>)> {
    let generate = |preprocessor: Option<(&str, Map<String, Value>)>| {
        let mut loaders = vec![if options.extract {
            UseEntry::new(CSS_EXTRACT_LOADER)
        } else {
            UseEntry::new(STYLE_INJECT_LOADER)
        }];

        loaders.push(UseEntry::with_options(
            "css-loader",
            json!({ "sourceMap": options.source_map }),
        ));
        if options.use_post_css {
            loaders.push(UseEntry::with_options(
                "postcss-loader",
                json!({ "sourceMap": options.source_map }),
            ));
        }

        if let Some((name, mut loader_options)) = preprocessor {
            loader_options.insert("sourceMap".to_string(), Value::Bool(options.source_map));
            loaders.push(UseEntry::with_options(
                format!("{name}-loader"),
                Value::Object(loader_options),
            ));
        }
        loaders
    };

    let mut indented = Map::new();
    indented.insert("indentedSyntax".to_string(), Value::Bool(true));

    vec![
        ("css", generate(None)),
        ("postcss", generate(None)),
        ("less", generate(Some(("less", Map::new())))),
        ("sass", generate(Some(("sass", indented)))),
        ("scss", generate(Some(("sass", Map::new())))),
        ("stylus", generate(Some(("stylus", Map::new())))),
        ("styl", generate(Some(("stylus", Map::new())))),
    ]
}

/// Module rules for standalone stylesheet files.
pub fn style_loaders(options: StyleLoaderOptions) -> Result<Vec<Rule>> {
    css_loaders(options)
        .into_iter()
        .map(|(extension, loaders)| {
            Ok(Rule::new(
                Pattern::new(&format!(r"\.{extension}$"))?,
                loaders,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn production() -> StyleLoaderOptions {
        StyleLoaderOptions {
            source_map: true,
            extract: true,
            use_post_css: true,
        }
    }

    #[test]
    fn one_rule_per_stylesheet_language() {
        let rules = style_loaders(production()).unwrap();
        let tests: Vec<_> = rules.iter().map(|r| r.test.as_str().to_string()).collect();
        assert_eq!(
            tests,
            vec![
                r"\.css$", r"\.postcss$", r"\.less$", r"\.sass$", r"\.scss$", r"\.stylus$",
                r"\.styl$"
            ]
        );
    }

    #[test]
    fn extracted_chain_starts_with_extract_loader() {
        let rules = style_loaders(production()).unwrap();
        let scss = &rules[4];
        let names: Vec<_> = scss.loader_names().collect();
        assert_eq!(
            names,
            vec![CSS_EXTRACT_LOADER, "css-loader", "postcss-loader", "sass-loader"]
        );
    }

    #[test]
    fn injected_chain_without_postcss() {
        let rules = style_loaders(StyleLoaderOptions::default()).unwrap();
        let names: Vec<_> = rules[0].loader_names().collect();
        assert_eq!(names, vec!["vue-style-loader", "css-loader"]);
        assert_eq!(rules[0].use_entries[1].options, json!({ "sourceMap": false }));
    }

    #[test]
    fn sass_uses_indented_syntax() {
        let rules = style_loaders(production()).unwrap();
        let sass = rules[3].use_entries.last().unwrap();
        assert_eq!(sass.loader, "sass-loader");
        assert_eq!(sass.options, json!({ "indentedSyntax": true, "sourceMap": true }));

        let scss = rules[4].use_entries.last().unwrap();
        assert_eq!(scss.options, json!({ "sourceMap": true }));
    }
}
