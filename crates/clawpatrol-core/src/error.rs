//! Error types for configuration and classification.

use thiserror::Error;

/// Startup configuration failures. All of them are fatal to the binary.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("RUNREVEAL_WEBHOOK_URL environment variable is required")]
    MissingWebhookUrl,

    #[error("invalid webhook URL {url:?}: {reason}")]
    InvalidWebhookUrl { url: String, reason: String },

    #[error("no log paths configured and HOME is not set")]
    NoLogPaths,

    #[error(transparent)]
    Source(#[from] config::ConfigError),
}

/// Internal classification failures. The classifier logs these and drops the
/// line; they never reach the tailer.
#[derive(Debug, Error)]
pub enum ClassifyError {
    #[error("line is empty after trimming")]
    EmptyLine,

    #[error("timestamp pattern unavailable: {0}")]
    Pattern(#[from] regex::Error),
}
