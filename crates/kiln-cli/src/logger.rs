//! Logging setup for the Kiln CLI.
//!
//! `--verbose` enables debug output for the kiln crates, `--quiet` limits
//! output to errors, and otherwise `RUST_LOG` is honored with an info-level
//! fallback.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEBUG_FILTER: &str = "kiln=debug,kiln_config=debug,kiln_cli=debug";
const QUIET_FILTER: &str = "kiln=error,kiln_config=error,kiln_cli=error";
const DEFAULT_FILTER: &str = "kiln=info,kiln_config=info,kiln_cli=info";

/// Initialize the tracing subscriber.
///
/// Must be called once, before any logging occurs.
///
/// # Arguments
///
/// * `verbose` - Enable debug-level logging
/// * `quiet` - Only show error-level logs
/// * `no_color` - Disable colored output
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(filter_for(verbose, quiet), no_color);
}

/// Initialize the logger with a custom filter.
///
/// # Example
///
/// ```rust,no_run
/// use kiln_cli::logger::init_logger_with_filter;
/// use tracing_subscriber::EnvFilter;
///
/// init_logger_with_filter(EnvFilter::new("kiln_config=trace"), false);
/// ```
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn filter_for(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(DEBUG_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_wins_over_environment() {
        let filter = filter_for(true, false);
        assert!(filter.to_string().contains("kiln_config=debug"));
    }

    #[test]
    fn quiet_only_shows_errors() {
        let filter = filter_for(false, true);
        assert!(filter.to_string().contains("kiln_cli=error"));
    }
}
