pub mod builtin;
pub mod finding;

use std::panic::{self, AssertUnwindSafe};

use crate::snapshot::ResponseSnapshot;

pub use finding::{Category, Finding, FindingCode};

/// A rule checks one response snapshot and produces findings.
///
/// Rules must be deterministic given the same snapshot and configuration.
/// The sole exception is the active rate-limit rule, which issues live
/// requests of its own and is opt-in for that reason.
pub trait Rule: Send + Sync {
    /// Stable rule name, used for registry listing and config `disabled` entries.
    fn name(&self) -> &'static str;

    /// Every code this rule can emit, for `list-rules` output.
    fn codes(&self) -> &'static [FindingCode];

    /// Run the rule against a snapshot. Body parse problems degrade to an
    /// empty list, never an error.
    fn run(&self, snapshot: &ResponseSnapshot) -> Vec<Finding>;
}

/// The pipeline: an ordered list of enabled rules, each run against the
/// same snapshot, outputs concatenated in registration order.
pub struct RuleEngine {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleEngine {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    /// Engine for one endpoint scan, rules built from config.
    pub fn for_scan(config: &crate::config::Config, target_url: &str) -> Self {
        Self::new(builtin::build_rules(config, target_url))
    }

    /// Run every rule in order. A rule that panics is isolated at this
    /// boundary and contributes zero findings; the pipeline continues.
    pub fn run(&self, snapshot: &ResponseSnapshot) -> Vec<Finding> {
        let mut all = Vec::new();
        for rule in &self.rules {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.run(snapshot)));
            match outcome {
                Ok(findings) => {
                    tracing::debug!(rule = rule.name(), count = findings.len(), "rule finished");
                    all.extend(findings);
                }
                Err(_) => {
                    tracing::warn!(rule = rule.name(), "rule panicked, skipping its findings");
                }
            }
        }
        all
    }

    pub fn rules(&self) -> &[Box<dyn Rule>] {
        &self.rules
    }
}
