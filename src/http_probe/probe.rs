use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;

use super::result::ProbeResult;
use super::report;
use crate::error::ProbeError;

const USER_AGENT: &str = concat!("statuswatch/", env!("CARGO_PKG_VERSION"));

/// Checks a single target for availability.
///
/// Implementations never fail: network trouble is an expected outcome and ends up
/// in the returned [`ProbeResult`] with `ok == false`.
#[async_trait]
pub trait Prober: Send + Sync {
    async fn probe(&self, url: &str) -> ProbeResult;
}

/// Probes targets with a GET request.
///
/// Redirects are followed and the final response decides: a target is available
/// only when that status is one of the accepted codes.
pub struct HttpProber {
    client: Client,
    accepted_status_codes: Vec<u16>,
}

impl HttpProber {
    pub fn new(
        timeout: Duration,
        accepted_status_codes: Vec<u16>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(HttpProber {
            client,
            accepted_status_codes,
        })
    }

    fn classify(
        &self,
        url: &str,
        result: Result<reqwest::Response, reqwest::Error>,
        http_time: f64,
    ) -> ProbeResult {
        match result {
            Ok(resp) => {
                let status = resp.status().as_u16();
                if self.accepted_status_codes.contains(&status) {
                    ProbeResult::available(url, status, http_time)
                } else {
                    let error = ProbeError::UnexpectedStatus {
                        status,
                        accepted: self.accepted_status_codes.clone(),
                    };
                    ProbeResult::unavailable(url, error, http_time)
                }
            }
            Err(e) => {
                let error = if e.is_timeout() {
                    ProbeError::Timeout
                } else if e.is_connect() {
                    ProbeError::Connect(report(&e))
                } else {
                    ProbeError::Request(report(&e))
                };
                ProbeResult::unavailable(url, error, http_time)
            }
        }
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, url: &str) -> ProbeResult {
        let start = Instant::now();
        let status_result = self.client.get(url).send().await;
        let http_time = start.elapsed().as_secs_f64();

        log::debug!("Request to url: {url} took {:.2}ms", http_time * 1000.0);

        self.classify(url, status_result, http_time)
    }
}
