use std::num::NonZeroU32;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::build::pattern::Pattern;
use crate::error::{ConfigError, Result};

/// Which chunk types a cache group may pull modules from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChunkSelection {
    #[default]
    Async,
    Initial,
    All,
}

/// Reference-count threshold of a cache group.
///
/// `Unbounded` is the "never satisfied" sentinel and serializes as the JSON
/// string `"Infinity"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "MinChunksRepr", into = "MinChunksRepr")]
pub enum MinChunks {
    AtLeast(NonZeroU32),
    Unbounded,
}

impl MinChunks {
    pub fn at_least(count: u32) -> Result<Self> {
        NonZeroU32::new(count)
            .map(Self::AtLeast)
            .ok_or_else(|| ConfigError::invalid("minChunks", "must be a positive integer"))
    }

    pub fn is_satisfied_by(self, references: u32) -> bool {
        match self {
            Self::AtLeast(min) => references >= min.get(),
            Self::Unbounded => false,
        }
    }
}

impl Default for MinChunks {
    fn default() -> Self {
        Self::AtLeast(NonZeroU32::MIN)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum MinChunksRepr {
    Count(u32),
    Sentinel(String),
}

impl TryFrom<MinChunksRepr> for MinChunks {
    type Error = String;

    fn try_from(repr: MinChunksRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            MinChunksRepr::Count(count) => NonZeroU32::new(count)
                .map(Self::AtLeast)
                .ok_or_else(|| "minChunks must be a positive integer".to_string()),
            MinChunksRepr::Sentinel(s) if s == "Infinity" => Ok(Self::Unbounded),
            MinChunksRepr::Sentinel(s) => Err(format!("unknown minChunks value '{s}'")),
        }
    }
}

impl From<MinChunks> for MinChunksRepr {
    fn from(value: MinChunks) -> Self {
        match value {
            MinChunks::AtLeast(count) => Self::Count(count.get()),
            MinChunks::Unbounded => Self::Sentinel("Infinity".to_string()),
        }
    }
}

/// Selects the modules a cache group applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleTest {
    /// Regular expression over the module path
    Pattern(Pattern),
    /// Module path prefix or exact chunk name
    Name(String),
}

impl ModuleTest {
    pub fn matches(&self, module_path: &str, chunk_names: &[&str]) -> bool {
        match self {
            Self::Pattern(pattern) => pattern.is_match(module_path),
            Self::Name(name) => {
                module_path.starts_with(name.as_str()) || chunk_names.contains(&name.as_str())
            }
        }
    }
}

/// A named rule routing modules into a chunk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheGroup {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test: Option<ModuleTest>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chunks: Option<ChunkSelection>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_chunks: Option<MinChunks>,

    #[serde(default)]
    pub reuse_existing_chunk: bool,

    /// Ignore size and request limits for this group
    #[serde(default)]
    pub enforce: bool,
}

impl CacheGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            test: None,
            chunks: None,
            min_chunks: None,
            reuse_existing_chunk: false,
            enforce: false,
        }
    }

    pub fn test(mut self, test: ModuleTest) -> Self {
        self.test = Some(test);
        self
    }

    pub fn chunks(mut self, chunks: ChunkSelection) -> Self {
        self.chunks = Some(chunks);
        self
    }

    pub fn min_chunks(mut self, min_chunks: MinChunks) -> Self {
        self.min_chunks = Some(min_chunks);
        self
    }

    pub fn reuse_existing_chunk(mut self) -> Self {
        self.reuse_existing_chunk = true;
        self
    }

    pub fn enforce(mut self) -> Self {
        self.enforce = true;
        self
    }

    /// Whether a module referenced by `references` chunks belongs in this group.
    pub fn accepts(&self, module_path: &str, chunk_names: &[&str], references: u32) -> bool {
        let test_matches = self
            .test
            .as_ref()
            .is_none_or(|test| test.matches(module_path, chunk_names));

        test_matches && self.min_chunks.unwrap_or_default().is_satisfied_by(references)
    }
}

/// Chunk splitting policy.
///
/// On the wire the engine's built-in groups are switched off with
/// `cacheGroups.default: false`; a missing `default` key keeps them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SplitChunksRepr", into = "SplitChunksRepr")]
pub struct SplitChunks {
    /// Keep the engine's built-in `default`/`vendors` groups
    pub default_groups: bool,

    pub cache_groups: IndexMap<String, CacheGroup>,
}

impl Default for SplitChunks {
    fn default() -> Self {
        Self {
            default_groups: true,
            cache_groups: IndexMap::new(),
        }
    }
}

const DEFAULT_GROUPS_KEY: &str = "default";

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SplitChunksRepr {
    #[serde(default)]
    cache_groups: IndexMap<String, GroupEntry>,
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum GroupEntry {
    Toggle(bool),
    Group(CacheGroup),
}

impl TryFrom<SplitChunksRepr> for SplitChunks {
    type Error = String;

    fn try_from(repr: SplitChunksRepr) -> std::result::Result<Self, Self::Error> {
        let mut split = SplitChunks::default();
        for (key, entry) in repr.cache_groups {
            match entry {
                GroupEntry::Toggle(enabled) if key == DEFAULT_GROUPS_KEY => {
                    split.default_groups = enabled;
                }
                GroupEntry::Toggle(_) => {
                    return Err(format!(
                        "cacheGroups.{key} must be a cache group; only `{DEFAULT_GROUPS_KEY}` may be a boolean"
                    ));
                }
                GroupEntry::Group(group) => {
                    split.cache_groups.insert(key, group);
                }
            }
        }
        Ok(split)
    }
}

impl From<SplitChunks> for SplitChunksRepr {
    fn from(split: SplitChunks) -> Self {
        let mut cache_groups = IndexMap::with_capacity(split.cache_groups.len() + 1);
        if !split.default_groups && !split.cache_groups.contains_key(DEFAULT_GROUPS_KEY) {
            cache_groups.insert(DEFAULT_GROUPS_KEY.to_string(), GroupEntry::Toggle(false));
        }
        cache_groups.extend(
            split
                .cache_groups
                .into_iter()
                .map(|(key, group)| (key, GroupEntry::Group(group))),
        );
        Self { cache_groups }
    }
}

impl SplitChunks {
    /// Add a group, keyed by its name. Names are unique.
    pub fn insert(&mut self, group: CacheGroup) -> Result<()> {
        if self.cache_groups.contains_key(&group.name) {
            return Err(ConfigError::DuplicateCacheGroup(group.name));
        }
        self.cache_groups.insert(group.name.clone(), group);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CacheGroup> {
        self.cache_groups.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cache_groups.keys().map(String::as_str)
    }

    /// Map keys must agree with the group names they hold.
    pub fn validate(&self) -> Result<()> {
        for (key, group) in &self.cache_groups {
            if key != &group.name {
                return Err(ConfigError::invalid(
                    format!("cacheGroups.{key}"),
                    format!("key does not match group name '{}'", group.name),
                ));
            }
        }
        Ok(())
    }

    /// The first group (in declaration order) that takes the module.
    ///
    /// Enforced groups win over any non-enforced match.
    pub fn route(&self, module_path: &str, chunk_names: &[&str], references: u32) -> Option<&CacheGroup> {
        let mut matching = self
            .cache_groups
            .values()
            .filter(|group| group.accepts(module_path, chunk_names, references));

        let first = matching.next()?;
        if first.enforce {
            return Some(first);
        }
        matching.find(|group| group.enforce).or(Some(first))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn vendor() -> CacheGroup {
        CacheGroup::new("vendor")
            .test(ModuleTest::Pattern(Pattern::new(r"[\\/]node_modules[\\/]").unwrap()))
            .chunks(ChunkSelection::All)
    }

    #[test]
    fn unbounded_is_never_satisfied() {
        assert!(!MinChunks::Unbounded.is_satisfied_by(0));
        assert!(!MinChunks::Unbounded.is_satisfied_by(u32::MAX));
    }

    #[test]
    fn at_least_rejects_zero() {
        assert!(MinChunks::at_least(0).is_err());
        let two = MinChunks::at_least(2).unwrap();
        assert!(!two.is_satisfied_by(1));
        assert!(two.is_satisfied_by(2));
    }

    #[test]
    fn min_chunks_wire_format() {
        assert_eq!(serde_json::to_value(MinChunks::Unbounded).unwrap(), json!("Infinity"));
        assert_eq!(serde_json::to_value(MinChunks::at_least(2).unwrap()).unwrap(), json!(2));

        let parsed: MinChunks = serde_json::from_value(json!("Infinity")).unwrap();
        assert_eq!(parsed, MinChunks::Unbounded);
        assert!(serde_json::from_value::<MinChunks>(json!(0)).is_err());
        assert!(serde_json::from_value::<MinChunks>(json!("NaN")).is_err());
    }

    #[test]
    fn pattern_test_matches_either_separator() {
        let group = vendor();
        assert!(group.accepts("/app/node_modules/vue/dist/vue.js", &[], 1));
        assert!(group.accepts(r"C:\app\node_modules\vue\index.js", &[], 1));
        assert!(!group.accepts("/app/src/main.js", &[], 1));
    }

    #[test]
    fn name_test_matches_chunk_name() {
        let group = CacheGroup::new("app")
            .test(ModuleTest::Name("app".to_string()))
            .min_chunks(MinChunks::at_least(2).unwrap());
        assert!(group.accepts("/src/util.js", &["app"], 2));
        assert!(!group.accepts("/src/util.js", &["app"], 1));
        assert!(!group.accepts("/src/util.js", &["other"], 3));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut split = SplitChunks::default();
        split.insert(vendor()).unwrap();
        let err = split.insert(vendor()).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateCacheGroup(name) if name == "vendor"));
    }

    #[test]
    fn mismatched_key_fails_validation() {
        let mut split = SplitChunks::default();
        split.cache_groups.insert("other".to_string(), vendor());
        assert!(split.validate().is_err());
    }

    #[test]
    fn default_groups_toggle_lives_in_cache_groups() {
        let mut split = SplitChunks {
            default_groups: false,
            ..SplitChunks::default()
        };
        split.insert(vendor()).unwrap();

        let value = serde_json::to_value(&split).unwrap();
        assert_eq!(value["cacheGroups"]["default"], json!(false));
        assert_eq!(value["cacheGroups"]["vendor"]["name"], json!("vendor"));
        assert!(value.get("defaultGroups").is_none());

        let parsed: SplitChunks = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, split);
        assert_eq!(parsed.names().collect::<Vec<_>>(), vec!["vendor"]);
    }

    #[test]
    fn missing_default_key_keeps_engine_groups() {
        let parsed: SplitChunks = serde_json::from_value(json!({ "cacheGroups": {} })).unwrap();
        assert!(parsed.default_groups);
        assert!(serde_json::to_value(&parsed).unwrap()["cacheGroups"].get("default").is_none());
    }

    #[test]
    fn boolean_for_a_named_group_is_rejected() {
        let err = serde_json::from_value::<SplitChunks>(json!({ "cacheGroups": { "vendors": false } }))
            .unwrap_err();
        assert!(err.to_string().contains("cacheGroups.vendors"), "{err}");
    }

    #[test]
    fn enforced_group_wins_routing() {
        let mut split = SplitChunks::default();
        split.insert(vendor()).unwrap();
        split
            .insert(
                CacheGroup::new("styles")
                    .test(ModuleTest::Pattern(Pattern::new(r"\.css$").unwrap()))
                    .chunks(ChunkSelection::All)
                    .enforce(),
            )
            .unwrap();

        let routed = split.route("/app/node_modules/normalize.css/normalize.css", &[], 1);
        assert_eq!(routed.map(|g| g.name.as_str()), Some("styles"));

        let routed = split.route("/app/node_modules/vue/index.js", &[], 1);
        assert_eq!(routed.map(|g| g.name.as_str()), Some("vendor"));

        assert!(split.route("/app/src/main.js", &[], 1).is_none());
    }
}
