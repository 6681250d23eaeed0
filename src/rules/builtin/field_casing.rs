use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::rules::{Finding, FindingCode, Rule};
use crate::snapshot::ResponseSnapshot;

static CAMEL_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]+(?:[A-Z][a-z0-9]*)*$").expect("camel pattern"));
static SNAKE_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]+(_[a-z0-9]+)*$").expect("snake pattern"));
static PASCAL_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z][a-zA-Z0-9]*$").expect("pascal pattern"));

/// Flags JSON bodies that mix field naming conventions (camelCase,
/// snake_case, PascalCase) anywhere in the object tree.
pub struct FieldCasingRule;

impl Rule for FieldCasingRule {
    fn name(&self) -> &'static str {
        "field-casing"
    }

    fn codes(&self) -> &'static [FindingCode] {
        &[FindingCode::StructureFieldCasingInconsistent]
    }

    fn run(&self, snapshot: &ResponseSnapshot) -> Vec<Finding> {
        let is_json = snapshot
            .header("Content-Type")
            .is_some_and(|ct| ct.contains("application/json"));
        if !is_json {
            return Vec::new();
        }

        let Some(value) = snapshot.body_json() else {
            return Vec::new();
        };

        let mut styles: HashMap<&'static str, usize> = HashMap::new();
        count_field_casings(&value, &mut styles);

        if styles.len() > 1 {
            vec![Finding::new(
                FindingCode::StructureFieldCasingInconsistent,
                snapshot.path(),
            )]
        } else {
            Vec::new()
        }
    }
}

fn count_field_casings(value: &serde_json::Value, styles: &mut HashMap<&'static str, usize>) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, child) in map {
                let style = if CAMEL_CASE.is_match(key) {
                    "camelCase"
                } else if SNAKE_CASE.is_match(key) {
                    "snake_case"
                } else if PASCAL_CASE.is_match(key) {
                    "PascalCase"
                } else {
                    "other"
                };
                *styles.entry(style).or_insert(0) += 1;
                count_field_casings(child, styles);
            }
        }
        serde_json::Value::Array(items) => {
            for item in items {
                count_field_casings(item, styles);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json_snap(body: &'static str) -> ResponseSnapshot {
        ResponseSnapshot::builder()
            .header("Content-Type", "application/json; charset=utf-8")
            .body(body)
            .build()
    }

    #[test]
    fn mixed_casing_is_flagged() {
        let snap = json_snap(r#"{"userId":1,"created_at":"2026-01-01"}"#);
        let findings = FieldCasingRule.run(&snap);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].code,
            FindingCode::StructureFieldCasingInconsistent
        );
    }

    #[test]
    fn consistent_snake_case_passes() {
        let snap = json_snap(r#"{"user_id":1,"created_at":"x","line_items":[{"unit_price":2}]}"#);
        assert!(FieldCasingRule.run(&snap).is_empty());
    }

    #[test]
    fn nested_inconsistency_is_found() {
        let snap = json_snap(r#"{"user":{"profile":{"FirstName":"a","lastName":"b"}}}"#);
        assert_eq!(FieldCasingRule.run(&snap).len(), 1);
    }

    #[test]
    fn non_json_content_type_is_skipped() {
        let snap = ResponseSnapshot::builder()
            .header("Content-Type", "text/html")
            .body(r#"{"userId":1,"created_at":"x"}"#)
            .build();
        assert!(FieldCasingRule.run(&snap).is_empty());
    }

    #[test]
    fn malformed_json_degrades_to_no_findings() {
        let snap = json_snap("{broken");
        assert!(FieldCasingRule.run(&snap).is_empty());
    }
}
