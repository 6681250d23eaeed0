use crate::rules::{Finding, FindingCode, Rule};
use crate::snapshot::ResponseSnapshot;

/// Reads rate-limit advertisement headers without generating any traffic.
/// A 429 on the original fetch is reported as an informational positive.
pub struct PassiveRateLimitRule;

impl Rule for PassiveRateLimitRule {
    fn name(&self) -> &'static str {
        "passive-rate-limit"
    }

    fn codes(&self) -> &'static [FindingCode] {
        &[
            FindingCode::SecurityPassiveRateLimitHeadersNotFound,
            FindingCode::SecurityPassiveRateLimitDisabled,
            FindingCode::SecurityPassiveRateLimitMisconfiguration,
            FindingCode::SecurityPassiveRateLimitEnforced,
        ]
    }

    fn run(&self, snapshot: &ResponseSnapshot) -> Vec<Finding> {
        let mut findings = Vec::new();
        let path = snapshot.path();

        let limit = snapshot.header_trimmed("X-RateLimit-Limit");
        let remaining = snapshot.header_trimmed("X-RateLimit-Remaining");
        let retry = snapshot.header_trimmed("Retry-After");

        if limit.is_none() && remaining.is_none() && retry.is_none() {
            findings.push(Finding::new(
                FindingCode::SecurityPassiveRateLimitHeadersNotFound,
                path,
            ));
        }

        if limit.as_deref() == Some("0") {
            findings.push(Finding::new(
                FindingCode::SecurityPassiveRateLimitDisabled,
                path,
            ));
        }

        if let (Some(limit), Some(remaining)) = (
            limit.as_deref().and_then(|v| v.parse::<i64>().ok()),
            remaining.as_deref().and_then(|v| v.parse::<i64>().ok()),
        ) {
            if remaining > limit {
                findings.push(Finding::new(
                    FindingCode::SecurityPassiveRateLimitMisconfiguration,
                    path,
                ));
            }
        }

        if snapshot.status() == 429 {
            findings.push(Finding::new(
                FindingCode::SecurityPassiveRateLimitEnforced,
                path,
            ));
        }

        findings
    }
}
