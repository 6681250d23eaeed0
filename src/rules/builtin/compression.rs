use crate::rules::{Finding, FindingCode, Rule};
use crate::snapshot::ResponseSnapshot;

const ACCEPTED_ENCODINGS: &[&str] = &["gzip", "br", "deflate"];

/// Uncompressed responses above this size are worth flagging even before
/// the missing-header case.
const LARGE_BODY_BYTES: u64 = 1000;

pub struct CompressionRule;

impl Rule for CompressionRule {
    fn name(&self) -> &'static str {
        "compression"
    }

    fn codes(&self) -> &'static [FindingCode] {
        &[
            FindingCode::PerformanceCompressionLargeUncompressedResponse,
            FindingCode::PerformanceCompressionMissingContentEncodingHeader,
        ]
    }

    fn run(&self, snapshot: &ResponseSnapshot) -> Vec<Finding> {
        let encoding = snapshot
            .header_trimmed("Content-Encoding")
            .map(|v| v.to_lowercase())
            .unwrap_or_default();

        if ACCEPTED_ENCODINGS.contains(&encoding.as_str()) {
            return Vec::new();
        }

        // Content-Length when advertised, actual buffer size otherwise.
        let size = snapshot
            .header_trimmed("Content-Length")
            .and_then(|v| v.parse::<u64>().ok())
            .unwrap_or(snapshot.body_len() as u64);

        if size > LARGE_BODY_BYTES {
            return vec![Finding::new(
                FindingCode::PerformanceCompressionLargeUncompressedResponse,
                snapshot.path(),
            )];
        }

        if encoding.is_empty() {
            return vec![Finding::new(
                FindingCode::PerformanceCompressionMissingContentEncodingHeader,
                snapshot.path(),
            )];
        }

        Vec::new()
    }
}
