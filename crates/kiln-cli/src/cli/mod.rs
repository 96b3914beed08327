//! Command-line interface definition for Kiln.
//!
//! # Command Structure
//!
//! - `kiln config` - Assemble the production configuration and print it as JSON
//! - `kiln check` - Validate settings and project files
//! - `kiln compress` - Gzip an already built output directory

mod commands;
pub mod enums;

use clap::Parser;

pub use commands::{CheckArgs, Command, CompressArgs, ConfigArgs};
pub use enums::*;

/// Kiln - production build configuration for front-end projects
#[derive(Parser, Debug)]
#[command(
    name = "kiln",
    version,
    about = "Assemble production front-end build configurations",
    long_about = "Kiln reads build settings from kiln.toml or package.json, merges the\n\
                  production overrides onto a base configuration and emits the result as\n\
                  JSON for the build engine."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
