use anyhow::Result;
use clap::Parser;
use collector_core::{Collector, Config, config};
use tracing_subscriber::EnvFilter;

/// Top-level CLI struct.
///
/// The collector takes no operational arguments: the run is driven by the
/// optional config file and the `WEATHER_API_KEY` environment variable.
#[derive(Debug, Parser)]
#[command(
    name = "weather-collector",
    version,
    about = "Append current weather for the configured cities to a monthly CSV"
)]
pub struct Cli {}

impl Cli {
    pub async fn run(self) -> Result<()> {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
            .init();

        // Missing secret aborts here, before any HTTP call is attempted.
        let api_key = config::api_key_from_env()?;
        let config = Config::load(api_key)?;

        let collector = Collector::new(config)?;
        let report = collector.run().await?;

        println!("Wrote {} record(s).", report.records_written);
        if !report.failures.is_empty() {
            println!("Some cities failed:");
            for failure in &report.failures {
                println!("  {}: {}", failure.city, failure.message);
            }
        }

        // Partial failure is still a normal exit; only the missing key above
        // turns into a non-zero status.
        Ok(())
    }
}
