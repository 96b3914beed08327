//! Build environment selection and the define variables it injects.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Which static set of define variables a build receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildEnv {
    /// Test runs (`NODE_ENV=testing`)
    Testing,
    #[default]
    Production,
}

impl BuildEnv {
    /// Resolve from a `NODE_ENV` value. Only the exact string `testing`
    /// selects [`BuildEnv::Testing`].
    pub fn from_node_env(value: Option<&str>) -> Self {
        match value {
            Some("testing") => Self::Testing,
            _ => Self::Production,
        }
    }

    /// Read `NODE_ENV` from the process environment.
    pub fn from_env() -> Self {
        Self::from_node_env(std::env::var("NODE_ENV").ok().as_deref())
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Testing => "testing",
            Self::Production => "production",
        }
    }

    /// Define variables injected as `process.env` for this environment.
    pub fn env_vars(self) -> EnvVars {
        let mut vars = EnvVars::default();
        vars.insert("NODE_ENV", self.as_str());
        vars
    }
}

/// Ordered identifier to JSON literal map.
///
/// Values are stored already encoded, so `NODE_ENV` maps to `"\"production\""`
/// and is substituted verbatim into the bundled source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnvVars(IndexMap<String, String>);

impl EnvVars {
    /// Insert a string value, JSON-encoding it.
    pub fn insert(&mut self, key: impl Into<String>, value: &str) {
        let encoded = serde_json::Value::String(value.to_string()).to_string();
        self.0.insert(key.into(), encoded);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_exact_testing_selects_testing() {
        assert_eq!(BuildEnv::from_node_env(Some("testing")), BuildEnv::Testing);
        assert_eq!(BuildEnv::from_node_env(Some("test")), BuildEnv::Production);
        assert_eq!(BuildEnv::from_node_env(Some("production")), BuildEnv::Production);
        assert_eq!(BuildEnv::from_node_env(None), BuildEnv::Production);
    }

    #[test]
    fn env_vars_are_json_encoded() {
        let vars = BuildEnv::Production.env_vars();
        assert_eq!(vars.get("NODE_ENV"), Some("\"production\""));
        assert_eq!(vars.len(), 1);

        let vars = BuildEnv::Testing.env_vars();
        assert_eq!(vars.get("NODE_ENV"), Some("\"testing\""));
    }

    #[test]
    fn env_vars_serialize_as_plain_map() {
        let value = serde_json::to_value(BuildEnv::Production.env_vars()).unwrap();
        assert_eq!(value, serde_json::json!({ "NODE_ENV": "\"production\"" }));
    }
}
