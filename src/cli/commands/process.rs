//! Process command implementation
//!
//! Validates the arguments, runs the conversion with a progress bar and
//! reports the outcome. Any failed station makes the command fail.

use super::shared::{create_progress_bar, print_summary, setup_logging};
use crate::cli::args::ProcessArgs;
use crate::processor::{BatchSummary, run_conversion};
use anyhow::{Context, Result, bail};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Run the process command
pub async fn run_process(args: ProcessArgs, cancel: CancellationToken) -> Result<BatchSummary> {
    setup_logging(args.get_log_level(), args.quiet)?;

    info!("Starting obsnorm");
    debug!("Command line arguments: {:?}", args);

    args.validate()?;
    let config = args.to_config();
    config.validate()?;

    let progress = args
        .show_progress()
        .then(|| create_progress_bar(0, "Converting stations"));

    let summary = run_conversion(&config, cancel, progress)
        .await
        .with_context(|| format!("Conversion of {} failed", config.input_dir.display()))?;

    if !args.quiet {
        print_summary(&summary, config.manifest_path().as_deref());
    }

    if !summary.failures.is_empty() {
        bail!(
            "{} of {} stations failed",
            summary.failures.len(),
            summary.failures.len() + summary.reports.len()
        );
    }
    if !summary.cancelled.is_empty() {
        bail!(
            "Interrupted with {} stations not processed",
            summary.cancelled.len()
        );
    }

    Ok(summary)
}
