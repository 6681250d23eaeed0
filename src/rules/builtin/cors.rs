use crate::rules::{Finding, FindingCode, Rule};
use crate::snapshot::ResponseSnapshot;

/// Checks the CORS response headers for permissive or invalid combinations.
///
/// Wildcard origin and wildcard-origin-with-credentials are distinct
/// findings: the latter is an outright spec violation, not just a loose
/// configuration.
pub struct CorsRule;

impl Rule for CorsRule {
    fn name(&self) -> &'static str {
        "cors"
    }

    fn codes(&self) -> &'static [FindingCode] {
        &[
            FindingCode::SecurityCorsMisconfiguration,
            FindingCode::SecurityCorsCredentialsWithWildcardOrigin,
            FindingCode::SecurityCorsDangerousMethodsAllowed,
            FindingCode::SecurityCorsAllowAllHeaders,
        ]
    }

    fn run(&self, snapshot: &ResponseSnapshot) -> Vec<Finding> {
        let mut findings = Vec::new();
        let path = snapshot.path();

        let origin = snapshot
            .header_trimmed("Access-Control-Allow-Origin")
            .unwrap_or_default();
        let credentials = snapshot
            .header_trimmed("Access-Control-Allow-Credentials")
            .unwrap_or_default();
        let methods = snapshot
            .header("Access-Control-Allow-Methods")
            .unwrap_or_default();
        let headers = snapshot
            .header("Access-Control-Allow-Headers")
            .unwrap_or_default();

        if origin == "*" {
            findings.push(Finding::new(FindingCode::SecurityCorsMisconfiguration, path));
        }

        if origin == "*" && credentials.eq_ignore_ascii_case("true") {
            findings.push(Finding::new(
                FindingCode::SecurityCorsCredentialsWithWildcardOrigin,
                path,
            ));
        }

        if methods.contains('*') || methods.contains("DELETE") {
            findings.push(Finding::new(
                FindingCode::SecurityCorsDangerousMethodsAllowed,
                path,
            ));
        }

        if headers.contains('*') {
            findings.push(Finding::new(FindingCode::SecurityCorsAllowAllHeaders, path));
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wildcard_with_credentials_emits_two_distinct_findings() {
        let snap = ResponseSnapshot::builder()
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Credentials", "true")
            .path("/api/data")
            .build();

        let findings = CorsRule.run(&snap);
        let codes: Vec<FindingCode> = findings.iter().map(|f| f.code).collect();
        assert_eq!(
            codes,
            vec![
                FindingCode::SecurityCorsMisconfiguration,
                FindingCode::SecurityCorsCredentialsWithWildcardOrigin,
            ]
        );
    }

    #[test]
    fn wildcard_without_credentials_is_one_finding() {
        let snap = ResponseSnapshot::builder()
            .header("Access-Control-Allow-Origin", "*")
            .build();

        let findings = CorsRule.run(&snap);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, FindingCode::SecurityCorsMisconfiguration);
    }

    #[test]
    fn specific_origin_passes() {
        let snap = ResponseSnapshot::builder()
            .header("Access-Control-Allow-Origin", "https://app.example.com")
            .header("Access-Control-Allow-Credentials", "true")
            .build();

        assert!(CorsRule.run(&snap).is_empty());
    }

    #[test]
    fn delete_in_allow_methods_is_flagged() {
        let snap = ResponseSnapshot::builder()
            .header("Access-Control-Allow-Methods", "GET, POST, DELETE")
            .build();

        let findings = CorsRule.run(&snap);
        assert_eq!(
            findings[0].code,
            FindingCode::SecurityCorsDangerousMethodsAllowed
        );
    }

    #[test]
    fn wildcard_allow_headers_is_flagged() {
        let snap = ResponseSnapshot::builder()
            .header("Access-Control-Allow-Headers", "*")
            .build();

        let findings = CorsRule.run(&snap);
        assert_eq!(findings[0].code, FindingCode::SecurityCorsAllowAllHeaders);
    }

    #[test]
    fn no_cors_headers_is_clean() {
        let snap = ResponseSnapshot::builder().build();
        assert!(CorsRule.run(&snap).is_empty());
    }
}
