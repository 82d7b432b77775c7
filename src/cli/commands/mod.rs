//! Command implementations for the obsnorm CLI
//!
//! Each subcommand lives in its own module:
//! - `process`: archive conversion with progress reporting
//! - `inspect`: read containers back and print their layout

pub mod inspect;
pub mod process;
pub mod shared;

use crate::cli::args::{Args, Commands};
use anyhow::{Result, bail};
use tokio_util::sync::CancellationToken;

/// Dispatch to the subcommand handler
pub async fn run(args: Args, cancel: CancellationToken) -> Result<()> {
    match args.command {
        Some(Commands::Process(process_args)) => {
            process::run_process(process_args, cancel).await?;
            Ok(())
        }
        Some(Commands::Inspect(inspect_args)) => inspect::run_inspect(inspect_args).await,
        None => bail!("No command given; run with --help"),
    }
}
