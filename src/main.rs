mod cli;
mod engine;
mod logging;
mod model;
mod orchestrator;
mod presenter;
mod quality;
mod sample;
#[cfg(feature = "tui")]
mod tui;
mod view;

use anyhow::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    if let Err(e) = logging::init(&args) {
        // Logging is best-effort; the demo still runs without it.
        eprintln!("logging disabled: {e:#}");
    }

    cli::run(args).await
}
