// Error taxonomy for the ingest client. Config and usage problems are
// reported with a friendly message and exit 1 by `main`; everything else
// propagates out of `main` as a failure.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Problems with the environment-derived configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// One or both required variables are unset or empty. `missing` lists
    /// which ones, in declaration order.
    #[error("Set WORKER_URL and INGEST_TOKEN env vars.")]
    Missing { missing: Vec<&'static str> },

    #[error("INGEST_TOKEN contains characters that are not valid in an HTTP header")]
    InvalidToken,

    #[error("INGEST_TIMEOUT_SECS must be a positive number of seconds, got {0:?}")]
    InvalidTimeout(String),
}

#[derive(Error, Debug)]
pub enum IngestError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Carries the clap error so help/version output can still be printed.
    #[error("Usage: edge-ingest <file-path> [tenant] [source]")]
    Usage(#[source] clap::Error),

    #[error("failed to read {}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode ingest payload")]
    Serialize(#[from] serde_json::Error),

    #[error("ingest request failed")]
    Transport(#[from] reqwest::Error),

    #[error("failed to write result")]
    Output(#[source] io::Error),
}

impl IngestError {
    /// Config and usage errors are handled locally with a message and exit 1.
    pub fn is_usage_like(&self) -> bool {
        matches!(self, IngestError::Config(_) | IngestError::Usage(_))
    }
}
