use crate::rules::{Finding, FindingCode, Rule};
use crate::snapshot::ResponseSnapshot;

/// Structural checks on status code versus method and body, scoped to 2xx
/// responses. Error statuses are someone else's problem.
pub struct StatusCodeRule;

impl Rule for StatusCodeRule {
    fn name(&self) -> &'static str {
        "status-code"
    }

    fn codes(&self) -> &'static [FindingCode] {
        &[
            FindingCode::StructureStatusCode2xxErrorBody,
            FindingCode::StructureStatusCodePost204WithBody,
            FindingCode::StructureStatusCodeGetUnexpected201,
            FindingCode::StructureStatusCodeGet200EmptyBody,
            FindingCode::StructureStatusCode204WithBody,
            FindingCode::StructureStatusCodeGetUnexpected204,
            FindingCode::StructureStatusCodeHeadUnexpected,
        ]
    }

    fn run(&self, snapshot: &ResponseSnapshot) -> Vec<Finding> {
        let status = snapshot.status();
        if !(200..300).contains(&status) {
            return Vec::new();
        }

        let mut findings = Vec::new();
        let path = snapshot.path();
        let method = snapshot.method();
        let body_len = snapshot.body_len();

        if looks_like_error(snapshot) {
            findings.push(Finding::new(FindingCode::StructureStatusCode2xxErrorBody, path));
        }

        if method == "POST" && status == 204 && body_len > 0 {
            findings.push(Finding::new(
                FindingCode::StructureStatusCodePost204WithBody,
                path,
            ));
        }

        if method == "GET" && status == 201 {
            findings.push(Finding::new(
                FindingCode::StructureStatusCodeGetUnexpected201,
                path,
            ));
        }

        if method == "GET" && status == 200 && body_len == 0 {
            findings.push(Finding::new(
                FindingCode::StructureStatusCodeGet200EmptyBody,
                path,
            ));
        }

        if status == 204 && body_len > 0 {
            findings.push(Finding::new(FindingCode::StructureStatusCode204WithBody, path));
        }

        if method == "GET" && status == 204 {
            findings.push(Finding::new(
                FindingCode::StructureStatusCodeGetUnexpected204,
                path,
            ));
        }

        if method == "HEAD" && !(status == 200 || status == 204) {
            findings.push(Finding::new(
                FindingCode::StructureStatusCodeHeadUnexpected,
                path,
            ));
        }

        findings
    }
}

/// A 2xx body that carries error-shaped JSON keys.
fn looks_like_error(snapshot: &ResponseSnapshot) -> bool {
    let Some(serde_json::Value::Object(map)) = snapshot.body_json() else {
        return false;
    };
    ["error", "errors", "message", "exception", "stack"]
        .iter()
        .any(|key| map.contains_key(*key))
}
