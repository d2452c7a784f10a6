//! The run loop: one fetch per configured city, strictly in order.

use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::{
    config::Config,
    error::CollectError,
    model::Failure,
    provider::{WeatherProvider, weatherapi::WeatherApiProvider},
    store,
};

/// Summary of one run.
#[derive(Debug, Default)]
pub struct RunReport {
    pub records_written: usize,
    pub failures: Vec<Failure>,
}

/// Walks the configured city list once: fetch, archive, normalize, append.
///
/// A failing city is recorded and skipped; it will simply be attempted again
/// on whatever schedule invokes the next run.
#[derive(Debug)]
pub struct Collector {
    config: Config,
    provider: Box<dyn WeatherProvider>,
}

impl Collector {
    /// A collector backed by the WeatherAPI.com client.
    pub fn new(config: Config) -> Result<Self, CollectError> {
        let provider = Box::new(WeatherApiProvider::new(&config)?);
        Ok(Self::with_provider(config, provider))
    }

    pub fn with_provider(config: Config, provider: Box<dyn WeatherProvider>) -> Self {
        Self { config, provider }
    }

    /// Process every configured city exactly once.
    ///
    /// Only output directory setup can fail the whole run; everything that
    /// goes wrong for a single city lands in the report's failure list.
    pub async fn run(&self) -> Result<RunReport, CollectError> {
        fs::create_dir_all(&self.config.data_dir)?;
        if self.config.archive_raw {
            fs::create_dir_all(self.config.raw_dir())?;
        }

        let mut report = RunReport::default();
        let last = self.config.cities.len().saturating_sub(1);

        for (i, city) in self.config.cities.iter().enumerate() {
            match self.collect_city(city).await {
                Ok(path) => {
                    report.records_written += 1;
                    info!(city = %city, table = %path.display(), "recorded observation");
                }
                Err(err) => {
                    warn!(city = %city, error = %err, "city failed");
                    report.failures.push(Failure { city: city.clone(), message: err.to_string() });
                }
            }

            if i < last {
                sleep(self.config.pause).await;
            }
        }

        Ok(report)
    }

    async fn collect_city(&self, city: &str) -> Result<PathBuf, CollectError> {
        let payload = self.provider.fetch(city).await?;

        // Snapshot trouble must not cost us the row: log it and keep going.
        if self.config.archive_raw {
            if let Err(err) = store::write_snapshot(&self.config.raw_dir(), city, &payload, Utc::now()) {
                warn!(city = %city, error = %err, "failed to archive raw payload");
            }
        }

        let record = self.provider.normalize(city, &payload)?;
        store::append_record(&self.config.data_dir, &record)
    }
}
