use std::collections::HashSet;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

/// The monitoring configuration as read from the config file.
/// Only `urls` is required, the rest falls back to sensible defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    /// The URLs to monitor, probed in this order on every pass.
    pub urls: Vec<String>,

    /// Seconds to wait after one pass finishes before starting the next.
    #[serde(default = "default_interval")]
    pub interval: u64,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,

    /// The HTTP status codes that count as available.
    /// Defaults to 200 if not specified.
    #[serde(default = "default_status_codes")]
    pub accepted_status_codes: Vec<u16>,
}

fn default_interval() -> u64 {
    300
}

fn default_timeout() -> u64 {
    5
}

fn default_status_codes() -> Vec<u16> {
    vec![200]
}

impl MonitorConfig {
    /// Check the parsed values and collapse duplicate urls.
    pub fn validate(mut self) -> Result<Self, ConfigError> {
        if self.urls.is_empty() {
            return Err(ConfigError::NoTargets);
        }
        if self.interval == 0 {
            return Err(ConfigError::NotPositive { field: "interval" });
        }
        if self.timeout == 0 {
            return Err(ConfigError::NotPositive { field: "timeout" });
        }
        if self.accepted_status_codes.is_empty() {
            return Err(ConfigError::NoAcceptedStatusCodes);
        }

        for url in &self.urls {
            check_url(url)?;
        }

        let mut seen = HashSet::new();
        self.urls.retain(|url| {
            let first = seen.insert(url.clone());
            if !first {
                log::warn!("Ignoring duplicate url in config: {url}");
            }
            first
        });

        Ok(self)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

fn check_url(raw: &str) -> Result<(), ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidUrl {
        url: raw.to_string(),
        reason,
    };
    let parsed = Url::parse(raw).map_err(|e| invalid(e.to_string()))?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => return Err(invalid(format!("unsupported scheme `{other}`"))),
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host".to_string()));
    }
    Ok(())
}
