use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::output::{enrich_all, EnrichedFinding};
use crate::ScanReport;

#[derive(Serialize)]
struct JsonReport<'a> {
    url: &'a str,
    scanned_at: DateTime<Utc>,
    score: i32,
    issues: Vec<EnrichedFinding>,
}

/// Render a scan report as pretty-printed JSON with enrichment inlined.
pub fn render(report: &ScanReport) -> Result<String> {
    let json = JsonReport {
        url: &report.url,
        scanned_at: Utc::now(),
        score: report.score,
        issues: enrich_all(&report.findings),
    };
    Ok(serde_json::to_string_pretty(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::{Finding, FindingCode};

    #[test]
    fn report_round_trips_through_serde_json() {
        let report = ScanReport {
            url: "http://example.com/api".into(),
            findings: vec![
                Finding::new(FindingCode::SecurityHeaderMissing, "/api"),
                Finding::new(FindingCode::PerformancePayloadSizeExceedsLimit, "/api"),
            ],
            score: 90,
        };

        let rendered = render(&report).expect("render");
        let value: serde_json::Value = serde_json::from_str(&rendered).expect("valid json");

        assert_eq!(value["score"], 90);
        assert_eq!(value["issues"].as_array().map(|a| a.len()), Some(2));
        assert_eq!(value["issues"][0]["code"], "SECURITY_HEADER_MISSING");
        assert_eq!(value["issues"][0]["category"], "security");
        assert!(value["issues"][0]["recommendation"]
            .as_str()
            .is_some_and(|s| !s.is_empty()));
    }
}
