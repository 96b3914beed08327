//! Compress command implementation.
//!
//! Applies the gzip rule from the build settings to an already built
//! output directory.

use kiln_config::CompressionOptions;
use tracing::debug;

use crate::cli::CompressArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};
use crate::ui;

/// Execute the compress command.
///
/// Does nothing when `productionGzip` is off. The directory walk runs on a
/// blocking thread.
pub async fn execute(args: CompressArgs) -> Result<()> {
    let cwd = utils::get_cwd()?;
    let root = utils::project_root(args.root.as_deref())?;
    let settings = utils::load_settings(&root)?;

    if !settings.production_gzip {
        ui::warning("productionGzip is disabled; nothing to compress");
        return Ok(());
    }

    let dir = utils::resolve_path(&args.dir, &cwd);
    if !dir.is_dir() {
        return Err(CliError::FileNotFound(dir));
    }

    let options = CompressionOptions::for_extensions(&settings.production_gzip_extensions)?;
    debug!(dir = %dir.display(), test = options.test.as_str(), "compressing assets");
    ui::info(&format!("Compressing assets in {}", dir.display()));

    let report = tokio::task::spawn_blocking(move || options.apply(&dir))
        .await
        .map_err(|e| CliError::Task(e.to_string()))??;

    ui::print_compression_summary(&report);
    ui::success(&format!("Wrote {} gzip file(s)", report.written.len()));
    Ok(())
}
