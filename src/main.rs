use clap::Parser;
use obsnorm::cli::{args::Args, commands};
use std::process;
use tokio_util::sync::CancellationToken;

fn main() {
    let args = Args::parse();

    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let cancellation_token = CancellationToken::new();

        // First CTRL+C stops new stations from starting; running ones finish
        let signal_token = cancellation_token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\nReceived CTRL+C, finishing running stations...");
                signal_token.cancel();
            }
        });

        commands::run(args, cancellation_token).await
    });

    if let Err(error) = result {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }
}

/// Show help information when no subcommand is provided
fn show_help_and_commands() {
    println!("obsnorm - Station Archive Normalizer");
    println!("====================================");
    println!();
    println!("Convert zipped KNMI and DWD hourly station archives into one");
    println!("Parquet container per station epoch.");
    println!();
    println!("USAGE:");
    println!("    obsnorm <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Convert station archives into containers");
    println!("    inspect     Print the layout and attributes of containers");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("EXAMPLES:");
    println!("    # Convert DWD hourly temperature archives:");
    println!("    obsnorm process --provider dwd --input ./dwd --output ./containers");
    println!();
    println!("    # Convert two KNMI stations with a station catalog:");
    println!("    obsnorm process -p knmi -i ./knmi -o ./containers \\");
    println!("                    --catalog stations.csv --stations 260,370");
    println!();
    println!("    # Look at what was written:");
    println!("    obsnorm inspect './containers/*.parquet' --attributes");
    println!();
    println!("For detailed help on any command, use:");
    println!("    obsnorm <COMMAND> --help");
}
