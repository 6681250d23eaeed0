use std::time::{Duration, Instant};

use url::Url;

use crate::error::{AuditError, Result};
use crate::snapshot::ResponseSnapshot;

/// Fetch collaborator: one GET per scanned endpoint, body buffered into the
/// snapshot, latency measured around the whole exchange.
pub struct Fetcher {
    client: reqwest::blocking::Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("apilens/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// Perform the single network fetch for `url`. A failure here is fatal
    /// to this endpoint's scan only.
    pub fn fetch(&self, url: &str) -> Result<ResponseSnapshot> {
        let parsed = Url::parse(url).map_err(|e| AuditError::InvalidUrl {
            url: url.to_owned(),
            message: e.to_string(),
        })?;

        tracing::debug!(%parsed, "fetching endpoint");
        let start = Instant::now();
        let response = self
            .client
            .get(parsed.clone())
            .send()
            .map_err(|source| AuditError::Fetch {
                url: url.to_owned(),
                source,
            })?;
        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().map_err(|source| AuditError::Fetch {
            url: url.to_owned(),
            source,
        })?;
        let latency = start.elapsed();

        tracing::debug!(status, bytes = body.len(), ?latency, "endpoint fetched");

        Ok(ResponseSnapshot::builder()
            .status(status)
            .headers(headers)
            .body(body)
            .method("GET")
            .path(parsed.path())
            .query(parsed.query().unwrap_or(""))
            .latency(latency)
            .build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_url_is_rejected_before_any_network_io() {
        let fetcher = Fetcher::new(Duration::from_secs(1)).expect("client");
        let err = fetcher.fetch("not a url").unwrap_err();
        assert!(matches!(err, AuditError::InvalidUrl { .. }));
    }

    #[test]
    fn unreachable_endpoint_surfaces_fetch_error() {
        let fetcher = Fetcher::new(Duration::from_millis(200)).expect("client");
        // Reserved TEST-NET-1 address, nothing listens there.
        let err = fetcher.fetch("http://192.0.2.1:9/").unwrap_err();
        assert!(matches!(err, AuditError::Fetch { .. }));
    }
}
