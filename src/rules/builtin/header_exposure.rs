use crate::rules::{Finding, FindingCode, Rule};
use crate::snapshot::ResponseSnapshot;

/// Headers that commonly fingerprint server software or infrastructure.
const EXPOSING_HEADERS: &[&str] = &[
    "Server",
    "X-Powered-By",
    "X-AspNet-Version",
    "X-Runtime",
    "X-Version",
    "X-Generator",
    "X-Backend-Server",
    "X-Drupal-Cache",
    "Via",
    "X-Forwarded-Server",
];

/// Flags responses that reveal server technology through headers, unless
/// the value has clearly been masked by an operator.
pub struct HeaderExposureRule;

impl Rule for HeaderExposureRule {
    fn name(&self) -> &'static str {
        "header-exposure"
    }

    fn codes(&self) -> &'static [FindingCode] {
        &[FindingCode::SecurityHeaderExposureDetected]
    }

    fn run(&self, snapshot: &ResponseSnapshot) -> Vec<Finding> {
        EXPOSING_HEADERS
            .iter()
            .filter_map(|header| snapshot.header_trimmed(header))
            .filter(|value| !is_generic_or_masked(value))
            .map(|_| Finding::new(FindingCode::SecurityHeaderExposureDetected, snapshot.path()))
            .collect()
    }
}

fn is_generic_or_masked(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "" | "unknown" | "hidden" | "masked" | "none" | "removed" | "n/a"
    )
}
