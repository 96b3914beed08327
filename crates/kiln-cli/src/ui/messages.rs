//! Status message functions for terminal output.

use owo_colors::Style;

use super::paint;

/// Print a success message to stderr.
///
/// # Examples
///
/// ```no_run
/// use kiln_cli::ui::success;
///
/// success("Configuration written to webpack.prod.json");
/// ```
pub fn success(message: &str) {
    eprintln!("{} {}", paint("✓", Style::new().green().bold()), message);
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    eprintln!("{} {}", paint("ℹ", Style::new().blue().bold()), message);
}

/// Print a warning message to stderr.
pub fn warning(message: &str) {
    eprintln!(
        "{} {}",
        paint("⚠", Style::new().yellow().bold()),
        paint(message, Style::new().yellow())
    );
}
