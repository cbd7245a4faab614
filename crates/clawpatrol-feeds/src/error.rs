use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while tailing a single file.
#[derive(Debug, Error)]
pub enum TailError {
    /// The file did not exist when monitoring was requested.
    #[error("log file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("failed to stat {}: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
