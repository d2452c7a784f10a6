use crate::{error::CollectError, model::WeatherRecord};
use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

pub mod weatherapi;

/// A weather data source.
///
/// The raw payload and the flat record are separate steps so the run loop
/// can archive the verbatim response before flattening it.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Issue exactly one observation request for `city` and return the full
    /// provider payload.
    async fn fetch(&self, city: &str) -> Result<Value, CollectError>;

    /// Flatten a payload into a [`WeatherRecord`].
    ///
    /// Absent or null substructures yield empty fields; only a payload of
    /// the wrong shape (e.g. a non-object where an object is expected) is a
    /// parse error.
    fn normalize(&self, city: &str, payload: &Value) -> Result<WeatherRecord, CollectError>;
}
