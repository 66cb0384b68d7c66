//! Binary crate for the `tenki` weather widget.
//!
//! This crate focuses on:
//! - Parsing CLI arguments
//! - The interactive search prompt with live city suggestions
//! - Human-friendly output formatting

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod autocomplete;
mod cli;
mod output;
mod session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Diagnostics go to stderr so they don't interleave with the widget on stdout.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cmd = cli::Cli::parse();
    cmd.run().await
}
