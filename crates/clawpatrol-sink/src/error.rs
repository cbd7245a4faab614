use std::time::Duration;
use thiserror::Error;

/// Why a single delivery attempt failed.
#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("invalid webhook URL: {0}")]
    InvalidUri(#[from] http::uri::InvalidUri),

    #[error("failed to encode payload: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("failed to build request: {0}")]
    Request(#[from] http::Error),

    #[error("request failed: {0}")]
    Transport(#[from] hyper_util::client::legacy::Error),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("collector responded with {0}")]
    Status(hyper::StatusCode),
}
