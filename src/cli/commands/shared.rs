//! Shared components for CLI commands
//!
//! Logging setup, progress bar styling and the human-readable run summary.

use crate::processor::BatchSummary;
use anyhow::{Result, anyhow};
use colored::*;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::path::Path;
use tracing::debug;

/// Set up structured logging to stderr
///
/// `RUST_LOG` takes precedence over `level`.
pub fn setup_logging(level: &str, compact: bool) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("obsnorm={}", level)));

    let result = if compact {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    result.map_err(|e| anyhow!("Failed to initialise logging: {}", e))?;

    debug!("Logging initialized at level: {}", level);
    Ok(())
}

/// Create a progress bar with the station counter style
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg} ETA: {eta}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

/// Format a byte count in human-readable units
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

/// Total size of the given files, ignoring ones that vanished
pub fn total_size<'a>(paths: impl IntoIterator<Item = &'a Path>) -> u64 {
    paths
        .into_iter()
        .filter_map(|path| std::fs::metadata(path).ok())
        .map(|meta| meta.len())
        .sum()
}

/// Print the end-of-run summary
pub fn print_summary(summary: &BatchSummary, manifest: Option<&Path>) {
    let containers = summary.container_paths();
    let size = total_size(containers.iter().map(|p| p.as_path()));

    println!("\n{}", "Conversion Summary".bright_green().bold());
    println!(
        "  {} {}",
        "Stations converted:".bright_cyan(),
        summary.reports.len().to_string().bright_white()
    );
    println!(
        "  {} {} ({} written this run, {})",
        "Containers:".bright_cyan(),
        containers.len().to_string().bright_white(),
        summary.containers_written(),
        format_size(size)
    );
    println!(
        "  {} {} parsed, {} skipped",
        "Rows:".bright_cyan(),
        summary.rows_parsed(),
        summary.rows_skipped()
    );
    println!(
        "  {} {}",
        "Time elapsed:".bright_cyan(),
        HumanDuration(summary.elapsed)
    );
    if let Some(manifest) = manifest {
        println!("  {} {}", "Manifest:".bright_cyan(), manifest.display());
    }

    let warnings = summary.warning_count();
    if warnings > 0 {
        println!(
            "  {} {}",
            "Warnings:".bright_yellow(),
            warnings.to_string().bright_yellow()
        );
        for report in summary.reports.iter().filter(|r| !r.warnings.is_empty()) {
            for warning in &report.warnings {
                println!("    {} {}", report.station.yellow(), warning);
            }
        }
    }

    if !summary.cancelled.is_empty() {
        println!(
            "  {} {} stations not started",
            "Cancelled:".bright_yellow(),
            summary.cancelled.len()
        );
    }

    if !summary.failures.is_empty() {
        println!(
            "  {} {}",
            "Failed stations:".bright_red().bold(),
            summary.failures.len().to_string().bright_red()
        );
        for failure in &summary.failures {
            println!("    {} {}", failure.station.red(), failure.reason);
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.00 MB");
    }

    #[test]
    fn test_total_size_skips_missing_files() {
        let dir = TempDir::new().unwrap();
        let present = dir.path().join("a.parquet");
        std::fs::write(&present, [0u8; 10]).unwrap();
        let missing = dir.path().join("b.parquet");

        assert_eq!(total_size([present.as_path(), missing.as_path()]), 10);
    }

    #[test]
    fn test_progress_bar_length() {
        let pb = create_progress_bar(7, "stations");
        assert_eq!(pb.length(), Some(7));
    }
}
