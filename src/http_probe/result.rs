use crate::error::ProbeError;

/// Outcome of a single check against one target.
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResult {
    pub url: String,
    pub ok: bool,
    pub http_status: Option<u16>,
    pub error: Option<ProbeError>,
    pub http_time: f64,
}

impl ProbeResult {
    pub fn available(url: &str, http_status: u16, http_time: f64) -> Self {
        ProbeResult {
            url: url.to_string(),
            ok: true,
            http_status: Some(http_status),
            error: None,
            http_time,
        }
    }

    pub fn unavailable(url: &str, error: ProbeError, http_time: f64) -> Self {
        let http_status = match &error {
            ProbeError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        };
        ProbeResult {
            url: url.to_string(),
            ok: false,
            http_status,
            error: Some(error),
            http_time,
        }
    }
}
