//! MediaDesk CLI entry point.

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;
mod prompt;

use commands::Cli;
use prompt::ConsoleNotifier;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let notifier = Arc::new(ConsoleNotifier::new(cli.format));

    if let Err(e) = cli.execute(Arc::clone(&notifier)).await {
        if !notifier.reported_error() {
            output::print_error(&e.message);
        }
        std::process::exit(1);
    }
}
