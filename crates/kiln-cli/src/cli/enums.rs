//! Value enums for command-line arguments.

use clap::ValueEnum;
use kiln_config::BuildEnv;

/// Build environment selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EnvArg {
    /// Unit-test build: fixed `index.html` output, testing env vars
    #[value(name = "testing")]
    Testing,

    /// Production build
    #[value(name = "production")]
    Production,
}

impl From<EnvArg> for BuildEnv {
    fn from(env: EnvArg) -> Self {
        match env {
            EnvArg::Testing => BuildEnv::Testing,
            EnvArg::Production => BuildEnv::Production,
        }
    }
}
