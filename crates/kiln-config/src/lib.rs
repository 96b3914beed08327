//! Production build configuration for a front-end bundler.
//!
//! [`assemble`] merges a base [`BuildConfig`] with production overrides
//! selected by [`BuildSettings`] and [`BuildEnv`]. The result is a plain,
//! serializable tree for an external build engine.
//!
//! ```
//! use kiln_config::{assemble, BuildConfig, BuildEnv, BuildSettings};
//!
//! let settings = BuildSettings::new("dist", "dist/index.html");
//! let base = BuildConfig::base(&settings).unwrap();
//! let config = assemble(&base, BuildEnv::Production, &settings).unwrap();
//!
//! assert_eq!(
//!     config.output.filename.as_deref(),
//!     Some("static/js/[name].[chunkhash].js")
//! );
//! ```

pub mod assemble;
pub mod build;
pub mod compress;
pub mod discovery;
pub mod environment;
pub mod error;
pub mod merge;
pub mod paths;
pub mod settings;
pub mod validation;

pub use assemble::{assemble, assemble_value, split_chunks, TESTING_INDEX};
pub use build::*;
pub use compress::{CompressionOptions, CompressionReport, SkipReason};
pub use discovery::{discover, SettingsDiscovery};
pub use environment::{BuildEnv, EnvVars};
pub use error::*;
pub use merge::{merge, merge_values};
pub use paths::assets_path;
pub use settings::BuildSettings;
pub use validation::{validate_fs, validate_schema, ConfigValidator, FsValidator, SchemaValidator};
