use std::time::Duration;

use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

/// Buffered, re-readable capture of one HTTP response.
///
/// The body is read into memory exactly once at fetch time; every rule in
/// the pipeline observes the same complete buffer regardless of read order.
/// Header lookups are case-insensitive and combine duplicate values per
/// HTTP semantics. Latency is populated by the fetcher at request time.
#[derive(Debug, Clone)]
pub struct ResponseSnapshot {
    status: u16,
    headers: HeaderMap,
    body: Bytes,
    method: String,
    path: String,
    query: String,
    latency: Duration,
}

impl ResponseSnapshot {
    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Case-insensitive header lookup. Duplicate values are combined with
    /// `", "`; values with invalid UTF-8 are skipped.
    pub fn header(&self, name: &str) -> Option<String> {
        let values: Vec<&str> = self
            .headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect();
        if values.is_empty() {
            None
        } else {
            Some(values.join(", "))
        }
    }

    /// Header value with surrounding whitespace trimmed, empty treated as absent.
    pub fn header_trimmed(&self, name: &str) -> Option<String> {
        self.header(name)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    pub fn body_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }

    /// Parse the body as JSON. `None` on malformed content; rules degrade
    /// to zero findings rather than failing the pipeline.
    pub fn body_json(&self) -> Option<serde_json::Value> {
        serde_json::from_slice(&self.body).ok()
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn latency(&self) -> Duration {
        self.latency
    }

    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }
}

/// Builder for snapshots, used by the fetcher and by tests that exercise
/// rules without a live endpoint.
#[derive(Debug)]
pub struct SnapshotBuilder {
    status: u16,
    headers: HeaderMap,
    body: Bytes,
    method: String,
    path: String,
    query: String,
    latency: Duration,
}

impl Default for SnapshotBuilder {
    fn default() -> Self {
        Self {
            status: 200,
            headers: HeaderMap::new(),
            body: Bytes::new(),
            method: "GET".to_owned(),
            path: "/".to_owned(),
            query: String::new(),
            latency: Duration::ZERO,
        }
    }
}

impl SnapshotBuilder {
    pub fn status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Append one header. Invalid names or values are ignored, matching
    /// what a real response could never have carried anyway.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            self.headers.append(name, value);
        }
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn method(mut self, method: &str) -> Self {
        self.method = method.to_owned();
        self
    }

    pub fn path(mut self, path: &str) -> Self {
        self.path = path.to_owned();
        self
    }

    pub fn query(mut self, query: &str) -> Self {
        self.query = query.to_owned();
        self
    }

    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn build(self) -> ResponseSnapshot {
        ResponseSnapshot {
            status: self.status,
            headers: self.headers,
            body: self.body,
            method: self.method,
            path: self.path,
            query: self.query,
            latency: self.latency,
        }
    }
}
