use crate::rules::{Finding, FindingCode, Rule};
use crate::snapshot::ResponseSnapshot;

/// Required hardening headers. One finding per missing entry.
const REQUIRED_HEADERS: &[&str] = &[
    "Strict-Transport-Security",
    "X-Content-Type-Options",
    "X-Frame-Options",
    "X-XSS-Protection",
    "Referrer-Policy",
];

pub struct SecurityHeadersRule;

impl Rule for SecurityHeadersRule {
    fn name(&self) -> &'static str {
        "security-headers"
    }

    fn codes(&self) -> &'static [FindingCode] {
        &[FindingCode::SecurityHeaderMissing]
    }

    fn run(&self, snapshot: &ResponseSnapshot) -> Vec<Finding> {
        REQUIRED_HEADERS
            .iter()
            .filter(|header| snapshot.header(header).is_none())
            .map(|_| Finding::new(FindingCode::SecurityHeaderMissing, snapshot.path()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_response_misses_every_required_header() {
        let snap = ResponseSnapshot::builder()
            .status(200)
            .body("{\"ok\":true}")
            .path("/v1/users")
            .build();

        let findings = SecurityHeadersRule.run(&snap);

        assert_eq!(findings.len(), REQUIRED_HEADERS.len());
        assert!(findings
            .iter()
            .all(|f| f.code == FindingCode::SecurityHeaderMissing));
        assert!(findings.iter().all(|f| f.path == "/v1/users"));
    }

    #[test]
    fn fully_hardened_response_is_clean() {
        let snap = ResponseSnapshot::builder()
            .header("Strict-Transport-Security", "max-age=63072000")
            .header("X-Content-Type-Options", "nosniff")
            .header("X-Frame-Options", "DENY")
            .header("X-XSS-Protection", "1; mode=block")
            .header("Referrer-Policy", "no-referrer")
            .build();

        assert!(SecurityHeadersRule.run(&snap).is_empty());
    }

    #[test]
    fn one_finding_per_missing_header() {
        let snap = ResponseSnapshot::builder()
            .header("X-Frame-Options", "DENY")
            .header("X-Content-Type-Options", "nosniff")
            .build();

        assert_eq!(SecurityHeadersRule.run(&snap).len(), 3);
    }
}
