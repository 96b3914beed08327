//! Check command implementation.
//!
//! Validates settings and project files without emitting anything.

use kiln_config::{validation, ConfigValidator, FsValidator};

use crate::cli::CheckArgs;
use crate::commands::{config, utils};
use crate::error::Result;
use crate::ui;

/// Execute the check command.
///
/// # Validation Steps
///
/// 1. Load settings from kiln.toml or package.json
/// 2. Validate them along with the HTML template
/// 3. Assemble once and report the plugin pipeline
///
/// # Errors
///
/// Returns errors for missing or invalid settings and a missing template.
pub fn execute(args: CheckArgs) -> Result<()> {
    ui::info("Checking build settings...");

    let root = utils::project_root(args.root.as_deref())?;
    let settings = utils::load_settings(&root)?;
    FsValidator.validate(&settings)?;
    ui::success("Settings are valid");

    if validation::static_dir(&settings).is_none() {
        ui::warning("No static/ directory found; nothing will be copied");
    }

    let config = config::assemble_for(&settings)?;
    ui::info(&format!("Plugins: {}", config.plugin_names().join(", ")));

    if let Some(split) = config.split_chunks() {
        let groups: Vec<&str> = split.names().collect();
        ui::info(&format!("Cache groups: {}", groups.join(", ")));
    }

    ui::success("All checks passed!");
    Ok(())
}
