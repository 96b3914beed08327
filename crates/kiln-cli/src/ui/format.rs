//! Formatting utilities for sizes and compression summaries.

use console::Term;
use kiln_config::CompressionReport;
use owo_colors::Style;

use super::paint;

/// Format file size in human-readable format.
///
/// # Examples
///
/// ```
/// use kiln_cli::ui::format_size;
///
/// assert_eq!(format_size(0), "0 B");
/// assert_eq!(format_size(500), "500 B");
/// assert_eq!(format_size(1024), "1.00 KB");
/// assert_eq!(format_size(1_048_576), "1.00 MB");
/// ```
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut size = bytes as f64;
    let mut unit_idx = 0;

    while size >= 1024.0 && unit_idx < UNITS.len() - 1 {
        size /= 1024.0;
        unit_idx += 1;
    }

    if unit_idx == 0 {
        format!("{} {}", size as u64, UNITS[unit_idx])
    } else {
        format!("{:.2} {}", size, UNITS[unit_idx])
    }
}

/// Compressed size as a percentage of the original, e.g. `"31%"`.
pub fn format_ratio(original: u64, compressed: u64) -> String {
    if original == 0 {
        return "-".to_string();
    }
    format!("{:.0}%", compressed as f64 / original as f64 * 100.0)
}

/// Print the outcome of a compression pass to stderr.
pub fn print_compression_summary(report: &CompressionReport) {
    let width = (Term::stderr().size().1 as usize).min(80);

    eprintln!(
        "\n{}",
        paint("Compression Summary", Style::new().bold().underline())
    );
    eprintln!("{}", "─".repeat(width));

    for asset in &report.written {
        eprintln!(
            "  {} {} {}",
            paint("▸", Style::new().blue()),
            paint(asset.output.display(), Style::new().bright_white().bold()),
            paint(
                format!(
                    "{} → {} ({})",
                    format_size(asset.original_size),
                    format_size(asset.compressed_size),
                    format_ratio(asset.original_size, asset.compressed_size)
                ),
                Style::new().dimmed()
            )
        );
    }

    eprintln!("{}", "─".repeat(width));

    let before: u64 = report.written.iter().map(|a| a.original_size).sum();
    let after: u64 = report.written.iter().map(|a| a.compressed_size).sum();
    eprintln!(
        "  {} {} written, {} skipped, {} → {}",
        paint("Total:", Style::new().bold()),
        paint(report.written.len(), Style::new().green()),
        report.skipped.len(),
        format_size(before),
        paint(format_size(after), Style::new().green())
    );
}
