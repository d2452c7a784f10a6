use reqwest::StatusCode;
use thiserror::Error;

/// What can go wrong while collecting one city.
///
/// Each variant aborts the current city only; the run loop converts it into
/// a [`Failure`](crate::model::Failure) and moves on to the next city.
#[derive(Debug, Error)]
pub enum CollectError {
    /// Network-level failure, including connect errors and the request timeout.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status.
    #[error("provider returned status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The response body was not the JSON shape we can flatten.
    #[error("failed to parse provider response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Encoding or flushing a CSV row failed.
    #[error("failed to write record: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
