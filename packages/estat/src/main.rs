//! CLI entry point for the e-Stat client.

use clap::Parser;
use estat_client::cli::{self, Cli};
use estat_client::config;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // WARN by default, DEBUG with --debug or ESTAT_DEBUG; RUST_LOG wins when set
    let debug = cli.debug || config::debug_from_env();
    let default_level = if debug { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
