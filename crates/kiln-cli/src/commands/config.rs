//! Config command implementation.
//!
//! Assembles the production configuration and prints it as JSON.

use std::fs;
use std::path::Path;

use kiln_config::{assemble, assemble_value, BuildConfig, BuildEnv, BuildSettings};
use serde_json::Value;
use tracing::info;

use crate::cli::ConfigArgs;
use crate::commands::utils;
use crate::error::{CliError, Result, ResultExt};
use crate::ui;

/// Execute the config command.
///
/// # Steps
///
/// 1. Load settings from the project root
/// 2. Resolve the environment from `--env`, falling back to `NODE_ENV`
/// 3. Read the base configuration from `--base` or build the default one
/// 4. Assemble and write pretty JSON to stdout or `--out`
pub fn execute(args: ConfigArgs) -> Result<()> {
    let json = render(&args)?;

    match &args.out {
        Some(out) => {
            let out = utils::resolve_path(out, &utils::get_cwd()?);
            if let Some(parent) = out.parent() {
                fs::create_dir_all(parent).with_path(parent)?;
            }
            fs::write(&out, format!("{json}\n")).with_path(&out)?;
            ui::success(&format!("Configuration written to {}", out.display()));
        }
        None => println!("{json}"),
    }

    Ok(())
}

/// Assemble the configuration described by `args` and serialize it.
///
/// `--base` and `--out` are resolved against the current directory.
pub fn render(args: &ConfigArgs) -> Result<String> {
    let root = utils::project_root(args.root.as_deref())?;
    let settings = utils::load_settings(&root)?;

    let env = args.env.map(BuildEnv::from).unwrap_or_else(BuildEnv::from_env);
    info!(env = env.as_str(), "assembling build configuration");

    let config = match &args.base {
        Some(path) => {
            let base = read_base(&utils::resolve_path(path, &utils::get_cwd()?))?;
            assemble_value(&base, env, &settings)?
        }
        None => assemble(&BuildConfig::base(&settings)?, env, &settings)?,
    };

    Ok(serde_json::to_string_pretty(&config.to_value()?)?)
}

fn read_base(path: &Path) -> Result<Value> {
    let content = fs::read_to_string(path).with_path(path)?;
    let value: Value = serde_json::from_str(&content)
        .with_hint(format!("{} must contain a JSON object", path.display()))?;
    if !value.is_object() {
        return Err(CliError::Custom(format!(
            "{} must contain a JSON object",
            path.display()
        )));
    }
    Ok(value)
}

/// Settings-only helper used by `check` to show what would be assembled.
pub(crate) fn assemble_for(settings: &BuildSettings) -> Result<BuildConfig> {
    let base = BuildConfig::base(settings)?;
    Ok(assemble(&base, BuildEnv::from_env(), settings)?)
}
