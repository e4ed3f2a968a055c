use std::path::PathBuf;

use thiserror::Error;

/// Anything that prevents the monitor from starting.
/// These are the only errors that end the process.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file {path} is not valid: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("config contains no urls to monitor")]
    NoTargets,

    #[error("`{field}` must be a positive number of seconds")]
    NotPositive { field: &'static str },

    #[error("`accepted_status_codes` must list at least one status code")]
    NoAcceptedStatusCodes,

    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to load env file {path}: {source}")]
    EnvFile {
        path: PathBuf,
        #[source]
        source: dotenvy::Error,
    },

    #[error("environment variable {0} is not set or empty")]
    MissingCredential(&'static str),

    #[error("failed to set up HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Why a single probe counted as unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProbeError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("unexpected status {status} (accepted: {accepted:?})")]
    UnexpectedStatus { status: u16, accepted: Vec<u16> },

    #[error("request failed: {0}")]
    Request(String),
}

/// A transition message that could not be delivered.
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("notification request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("notification rejected with status {status}: {body}")]
    Rejected { status: u16, body: String },
}
