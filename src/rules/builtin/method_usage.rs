use once_cell::sync::Lazy;
use regex::Regex;

use crate::rules::{Finding, FindingCode, Rule};
use crate::snapshot::ResponseSnapshot;

/// Numeric ID or UUID near the end of the path.
static RESOURCE_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/.+/(?:[0-9]+|[a-f0-9\-]{36})/?(?:$|\?)").expect("resource id pattern")
});

/// Path ending in an unsafe verb after an ID, e.g. `/123/delete`.
static UNSAFE_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/(?:[0-9]+|[a-f0-9\-]{36})/(delete|update|disable|enable)/?$")
        .expect("unsafe suffix pattern")
});

const ACTION_VERBS: &[&str] = &[
    "delete", "update", "create", "reset", "generate", "disable", "enable",
];

const SEARCH_KEYWORDS: &[&str] = &["search", "find", "query", "lookup"];

/// REST method conventions: safe verbs stay safe, IDs go where IDs belong.
pub struct MethodUsageRule;

impl Rule for MethodUsageRule {
    fn name(&self) -> &'static str {
        "method-usage"
    }

    fn codes(&self) -> &'static [FindingCode] {
        &[
            FindingCode::StructureMethodUsageGetUnsafeVerb,
            FindingCode::StructureMethodUsagePostForSearch,
            FindingCode::StructureMethodUsagePutWithoutId,
            FindingCode::StructureMethodUsageDeleteLargeBody,
            FindingCode::StructureMethodUsagePatchWithoutId,
            FindingCode::StructureMethodUsageGetUnsafeSuffix,
        ]
    }

    fn run(&self, snapshot: &ResponseSnapshot) -> Vec<Finding> {
        let mut findings = Vec::new();
        let method = snapshot.method();
        let path = snapshot.path().to_lowercase();

        if method == "GET" && contains_any(&path, ACTION_VERBS) {
            findings.push(Finding::new(FindingCode::StructureMethodUsageGetUnsafeVerb, path.as_str()));
        }

        if method == "POST" && contains_any(&path, SEARCH_KEYWORDS) {
            findings.push(Finding::new(FindingCode::StructureMethodUsagePostForSearch, path.as_str()));
        }

        if method == "PUT" && !RESOURCE_ID.is_match(&path) {
            findings.push(Finding::new(FindingCode::StructureMethodUsagePutWithoutId, path.as_str()));
        }

        if method == "DELETE" && snapshot.body_len() > 100 {
            findings.push(Finding::new(
                FindingCode::StructureMethodUsageDeleteLargeBody,
                path.as_str(),
            ));
        }

        if method == "PATCH" && !RESOURCE_ID.is_match(&path) {
            findings.push(Finding::new(
                FindingCode::StructureMethodUsagePatchWithoutId,
                path.as_str(),
            ));
        }

        if method == "GET" && UNSAFE_SUFFIX.is_match(&path) {
            findings.push(Finding::new(
                FindingCode::StructureMethodUsageGetUnsafeSuffix,
                path.as_str(),
            ));
        }

        findings
    }
}

fn contains_any(path: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| path.contains(n))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(method: &str, path: &str) -> ResponseSnapshot {
        ResponseSnapshot::builder().method(method).path(path).build()
    }

    #[test]
    fn get_with_unsafe_suffix_emits_suffix_and_verb_findings() {
        let findings = MethodUsageRule.run(&snap("GET", "/v1/users/123/delete"));

        // "delete" trips the verb check, "/123/delete" the suffix check.
        let codes: Vec<FindingCode> = findings.iter().map(|f| f.code).collect();
        assert_eq!(
            codes,
            vec![
                FindingCode::StructureMethodUsageGetUnsafeVerb,
                FindingCode::StructureMethodUsageGetUnsafeSuffix,
            ]
        );
    }

    #[test]
    fn exactly_one_suffix_finding_for_unsafe_get() {
        let findings = MethodUsageRule.run(&snap("GET", "/v1/users/123/delete"));
        let suffix_count = findings
            .iter()
            .filter(|f| f.code == FindingCode::StructureMethodUsageGetUnsafeSuffix)
            .count();
        assert_eq!(suffix_count, 1);
    }

    #[test]
    fn safe_get_path_is_clean() {
        assert!(MethodUsageRule.run(&snap("GET", "/v1/users/123")).is_empty());
        assert!(MethodUsageRule.run(&snap("GET", "/v1/users")).is_empty());
    }

    #[test]
    fn post_for_search_is_flagged() {
        let findings = MethodUsageRule.run(&snap("POST", "/v1/users/search"));
        assert_eq!(
            findings[0].code,
            FindingCode::StructureMethodUsagePostForSearch
        );
    }

    #[test]
    fn put_without_id_is_flagged() {
        let findings = MethodUsageRule.run(&snap("PUT", "/v1/users"));
        assert_eq!(
            findings[0].code,
            FindingCode::StructureMethodUsagePutWithoutId
        );
    }

    #[test]
    fn put_with_numeric_id_passes() {
        assert!(MethodUsageRule.run(&snap("PUT", "/v1/users/42")).is_empty());
    }

    #[test]
    fn put_with_uuid_passes() {
        let path = "/v1/users/0d9428a5-2f0e-4f14-9ff1-5e6a8bfa1111";
        assert!(MethodUsageRule.run(&snap("PUT", path)).is_empty());
    }

    #[test]
    fn patch_without_id_is_flagged() {
        let findings = MethodUsageRule.run(&snap("PATCH", "/v1/profile"));
        assert_eq!(
            findings[0].code,
            FindingCode::StructureMethodUsagePatchWithoutId
        );
    }

    #[test]
    fn delete_with_large_body_is_flagged() {
        let snap = ResponseSnapshot::builder()
            .method("DELETE")
            .path("/v1/users/42")
            .body("x".repeat(200))
            .build();
        let findings = MethodUsageRule.run(&snap);
        assert_eq!(
            findings[0].code,
            FindingCode::StructureMethodUsageDeleteLargeBody
        );
    }

    #[test]
    fn delete_with_small_body_passes() {
        let snap = ResponseSnapshot::builder()
            .method("DELETE")
            .path("/v1/users/42")
            .body("ok")
            .build();
        assert!(MethodUsageRule.run(&snap).is_empty());
    }
}
