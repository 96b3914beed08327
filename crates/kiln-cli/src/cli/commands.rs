//! Subcommands and their arguments.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use super::enums::EnvArg;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Assemble the production configuration and print it as JSON
    Config(ConfigArgs),

    /// Validate settings and the project's HTML template
    Check(CheckArgs),

    /// Gzip matching assets in a built output directory
    Compress(CompressArgs),
}

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// Project root holding kiln.toml or package.json
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Base configuration as JSON, relative to the current directory
    /// (defaults to the built-in base)
    #[arg(long, value_name = "FILE")]
    pub base: Option<PathBuf>,

    /// Build environment (defaults to NODE_ENV)
    #[arg(long, value_enum)]
    pub env: Option<EnvArg>,

    /// Write the configuration to a file instead of stdout, relative to the
    /// current directory
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    /// Project root holding kiln.toml or package.json
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct CompressArgs {
    /// Built output directory to compress
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Project root holding kiln.toml or package.json
    #[arg(long, value_name = "DIR")]
    pub root: Option<PathBuf>,
}
