//! Binary crate for the `weather-collector` tool.
//!
//! One run walks the configured city list, appends a row per city to the
//! current month's CSV table and prints any per-city failures at the end.

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    cmd.run().await
}
