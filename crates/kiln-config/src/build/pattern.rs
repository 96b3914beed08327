use std::fmt;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{ConfigError, Result};

/// A compiled regular expression that serializes as its source text.
#[derive(Clone)]
pub struct Pattern(Regex);

impl Pattern {
    pub fn new(source: &str) -> Result<Self> {
        Regex::new(source)
            .map(Self)
            .map_err(|err| ConfigError::InvalidPattern {
                pattern: source.to_string(),
                message: err.to_string(),
            })
    }

    /// `\.(js|css)$` style pattern for a list of bare extensions.
    pub fn for_extensions<S: AsRef<str>>(extensions: &[S]) -> Result<Self> {
        let alternatives: Vec<String> = extensions
            .iter()
            .map(|ext| regex::escape(ext.as_ref()))
            .collect();
        Self::new(&format!(r"\.({})$", alternatives.join("|")))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.0.is_match(haystack)
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Pattern {}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/", self.as_str())
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        Self::new(&source).map_err(serde::de::Error::custom)
    }
}
