//! Terminal output helpers.
//!
//! Status messages go to stderr so that `kiln config` output on stdout can
//! be piped.

mod format;
mod messages;

use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};

use owo_colors::{OwoColorize, Style};

pub use format::{format_ratio, format_size, print_compression_summary};
pub use messages::{info, success, warning};

/// Check whether colored output should be used.
///
/// `NO_COLOR` wins over `FORCE_COLOR`; otherwise the stderr terminal decides.
pub fn should_use_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }
    console::Term::stderr().features().colors_supported()
}

static COLORS: AtomicBool = AtomicBool::new(true);

/// Initialize color support for status messages.
///
/// `--no-color` disables colors for the rest of the process.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    console::set_colors_enabled_stderr(enabled);
    COLORS.store(enabled, Ordering::Relaxed);
}

pub(crate) fn paint(value: impl Display, style: Style) -> String {
    if COLORS.load(Ordering::Relaxed) {
        value.style(style).to_string()
    } else {
        value.to_string()
    }
}
