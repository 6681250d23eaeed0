use once_cell::sync::Lazy;
use regex::Regex;

use crate::rules::{Finding, FindingCode, Rule};
use crate::snapshot::ResponseSnapshot;

static PATH_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/(v|version)[0-9]+").expect("version pattern"));

/// Path-based API versioning should be present; query-param versioning is
/// discouraged.
pub struct VersioningRule;

impl Rule for VersioningRule {
    fn name(&self) -> &'static str {
        "versioning"
    }

    fn codes(&self) -> &'static [FindingCode] {
        &[
            FindingCode::StructureVersioningMissingInPath,
            FindingCode::StructureVersioningQueryParamDiscouraged,
        ]
    }

    fn run(&self, snapshot: &ResponseSnapshot) -> Vec<Finding> {
        let mut findings = Vec::new();
        let path = snapshot.path();

        if !PATH_VERSION.is_match(path) {
            findings.push(Finding::new(FindingCode::StructureVersioningMissingInPath, path));
        }

        if snapshot.query().to_lowercase().contains("version=") {
            findings.push(Finding::new(
                FindingCode::StructureVersioningQueryParamDiscouraged,
                path,
            ));
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versioned_path_passes() {
        let snap = ResponseSnapshot::builder().path("/api/v2/users").build();
        assert!(VersioningRule.run(&snap).is_empty());
    }

    #[test]
    fn unversioned_path_is_flagged() {
        let snap = ResponseSnapshot::builder().path("/users").build();
        let findings = VersioningRule.run(&snap);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].code,
            FindingCode::StructureVersioningMissingInPath
        );
    }

    #[test]
    fn query_param_versioning_is_discouraged() {
        let snap = ResponseSnapshot::builder()
            .path("/v1/users")
            .query("Version=2")
            .build();
        let findings = VersioningRule.run(&snap);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].code,
            FindingCode::StructureVersioningQueryParamDiscouraged
        );
    }

    #[test]
    fn unversioned_path_with_query_versioning_gets_both() {
        let snap = ResponseSnapshot::builder()
            .path("/users")
            .query("version=1")
            .build();
        assert_eq!(VersioningRule.run(&snap).len(), 2);
    }
}
