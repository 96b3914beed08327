//! Command implementations for the Kiln CLI.
//!
//! - [`config`] - Assemble and emit the production configuration
//! - [`check`] - Validate settings and project files
//! - [`compress`] - Gzip built assets
//!
//! Each command module provides an `execute` function taking the parsed
//! arguments.

pub mod check;
pub mod compress;
pub mod config;
pub(crate) mod utils;

pub use check::execute as check_execute;
pub use compress::execute as compress_execute;
pub use config::execute as config_execute;
