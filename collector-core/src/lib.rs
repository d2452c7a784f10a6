//! Core library for the `weather-collector` binary.
//!
//! This crate defines:
//! - Configuration handling (city list, endpoint mode, output paths, secret)
//! - The WeatherAPI.com client and payload normalization
//! - Month-partitioned CSV output and raw snapshot archiving
//! - The run loop that processes the city list and collects failures
//!
//! It is used by `collector-cli`, but can also be reused by other binaries or services.

pub mod collector;
pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod store;

pub use collector::{Collector, RunReport};
pub use config::{Config, FetchMode};
pub use error::CollectError;
pub use model::{Failure, WeatherRecord};
pub use provider::{WeatherProvider, weatherapi::WeatherApiProvider};
