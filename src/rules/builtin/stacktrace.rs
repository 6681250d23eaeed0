use once_cell::sync::Lazy;
use regex::Regex;

use crate::rules::{Finding, FindingCode, Rule};
use crate::snapshot::ResponseSnapshot;

/// Literal markers tied to a specific runtime.
const LANGUAGE_MARKERS: &[&str] = &[
    "java.lang.",
    "javax.",
    "org.springframework",
    "System.NullReferenceException",
    "Traceback (most recent call last):",
    "at Function.Module._load",
    "node:internal",
    "from /",
    "in `<main>`",
    "#0 ",
];

/// Structural stack-frame patterns. One match is enough.
static STACK_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\s+at\s+[\w\.$]+\.[\w$]+\([^\)]+\)",       // Java/.NET frames
        r"(?i)Traceback \(most recent call last\):",      // Python
        r"(?i)\s+at\s+(/.*\.js:\d+:\d+)",                 // Node.js
        r"(?i)from\s+/.*\.rb:\d+:in\s+",                  // Ruby
        r"(?i)#\d+\s+/.*\.php\(\d+\):",                   // PHP
        r"(?i)(/app/|/var/www|C:\\|D:\\|\.cs|\.py)",      // path leakage
    ]
    .iter()
    .map(|p| Regex::new(p).expect("stacktrace pattern"))
    .collect()
});

/// Looks for server-side stacktraces leaking into the response body.
pub struct StacktraceRule;

impl Rule for StacktraceRule {
    fn name(&self) -> &'static str {
        "stacktrace"
    }

    fn codes(&self) -> &'static [FindingCode] {
        &[
            FindingCode::VulnerabilityStacktraceLanguageSpecific,
            FindingCode::VulnerabilityStacktraceDetected,
        ]
    }

    fn run(&self, snapshot: &ResponseSnapshot) -> Vec<Finding> {
        let mut findings = Vec::new();
        let body = snapshot.body_str();
        let path = snapshot.path();

        if LANGUAGE_MARKERS.iter().any(|m| body.contains(m)) {
            findings.push(Finding::new(
                FindingCode::VulnerabilityStacktraceLanguageSpecific,
                path,
            ));
        }

        if STACK_PATTERNS.iter().any(|p| p.is_match(&body)) {
            findings.push(Finding::new(FindingCode::VulnerabilityStacktraceDetected, path));
        }

        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn python_traceback_triggers_both_findings() {
        let body = "Traceback (most recent call last):\n  File \"app.py\", line 3\n";
        let snap = ResponseSnapshot::builder().body(body).build();

        let codes: Vec<FindingCode> = StacktraceRule.run(&snap).iter().map(|f| f.code).collect();
        assert_eq!(
            codes,
            vec![
                FindingCode::VulnerabilityStacktraceLanguageSpecific,
                FindingCode::VulnerabilityStacktraceDetected,
            ]
        );
    }

    #[test]
    fn java_frames_are_detected() {
        let body = "java.lang.NullPointerException\n\tat com.example.Service.run(Service.java:42)";
        let snap = ResponseSnapshot::builder().body(body).build();
        let findings = StacktraceRule.run(&snap);
        assert_eq!(findings.len(), 2);
    }

    #[test]
    fn pattern_match_without_marker_emits_detected_only() {
        let body = "error at /var/www/html/index";
        let snap = ResponseSnapshot::builder().body(body).build();
        let findings = StacktraceRule.run(&snap);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].code, FindingCode::VulnerabilityStacktraceDetected);
    }

    #[test]
    fn ordinary_json_body_is_clean() {
        let snap = ResponseSnapshot::builder()
            .body(r#"{"users":[{"id":1,"name":"ada"}]}"#)
            .build();
        assert!(StacktraceRule.run(&snap).is_empty());
    }

    #[test]
    fn idempotent_over_the_same_snapshot() {
        let body = "Traceback (most recent call last):";
        let snap = ResponseSnapshot::builder().body(body).build();
        assert_eq!(StacktraceRule.run(&snap), StacktraceRule.run(&snap));
    }
}
