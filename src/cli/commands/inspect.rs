//! Inspect command implementation
//!
//! Prints the time span, variables and attributes of existing containers.

use super::shared::{format_size, setup_logging};
use crate::app::services::container_writer::{ContainerContents, read_container};
use crate::cli::args::InspectArgs;
use anyhow::{Context, Result, bail};
use colored::*;
use std::path::PathBuf;
use tracing::warn;

/// Expand a glob into sorted container paths
pub fn expand_pattern(pattern: &str) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for entry in glob::glob(pattern).with_context(|| format!("Invalid glob pattern '{}'", pattern))? {
        match entry {
            Ok(path) if path.is_file() => paths.push(path),
            Ok(_) => {}
            Err(e) => warn!("Cannot read {}: {}", e.path().display(), e),
        }
    }
    paths.sort();
    Ok(paths)
}

/// Render one container as text
pub fn describe(contents: &ContainerContents, with_attributes: bool) -> String {
    let mut lines = Vec::new();
    let size = std::fs::metadata(&contents.path)
        .map(|meta| format_size(meta.len()))
        .unwrap_or_else(|_| "?".to_string());
    lines.push(format!("{} ({})", contents.path.display(), size));

    let span = match (contents.time.first(), contents.time.last()) {
        (Some(first), Some(last)) => format!("{} .. {}", first, last),
        _ => "empty".to_string(),
    };
    lines.push(format!("  time: {} steps, {}", contents.len(), span));

    for key in ["description", "epoch_valid_from", "epoch_valid_to"] {
        if let Some(value) = contents.attribute(key) {
            lines.push(format!("  {}: {}", key, value));
        }
    }

    lines.push(format!("  variables: {}", contents.variables.len()));
    for (name, data_type) in &contents.variables {
        lines.push(format!("    {} {}", name, data_type));
    }

    if with_attributes {
        lines.push("  attributes:".to_string());
        for (key, value) in contents.attributes.entries() {
            lines.push(format!("    {} = {}", key, value));
        }
    }

    lines.join("\n")
}

/// Run the inspect command
pub async fn run_inspect(args: InspectArgs) -> Result<()> {
    setup_logging(args.get_log_level(), true)?;

    let paths = expand_pattern(&args.pattern)?;
    if paths.is_empty() {
        bail!("No containers match '{}'", args.pattern);
    }

    let mut failures = 0usize;
    for path in &paths {
        match read_container(path) {
            Ok(contents) => println!("{}\n", describe(&contents, args.attributes)),
            Err(e) => {
                failures += 1;
                eprintln!("{} {}: {}", "error".red().bold(), path.display(), e);
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} containers could not be read", failures, paths.len());
    }
    Ok(())
}
