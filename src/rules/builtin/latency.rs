use std::time::Duration;

use crate::rules::{Finding, FindingCode, Rule};
use crate::snapshot::ResponseSnapshot;

pub const DEFAULT_THRESHOLD: Duration = Duration::from_millis(500);

/// Compares the snapshot's fetch latency against a configured threshold.
/// Latency is a typed field populated at fetch time, so this rule cannot
/// be silently disabled by a missing value.
pub struct LatencyRule {
    threshold: Duration,
}

impl LatencyRule {
    pub fn new(threshold: Duration) -> Self {
        Self {
            threshold: if threshold.is_zero() {
                DEFAULT_THRESHOLD
            } else {
                threshold
            },
        }
    }
}

impl Rule for LatencyRule {
    fn name(&self) -> &'static str {
        "latency"
    }

    fn codes(&self) -> &'static [FindingCode] {
        &[FindingCode::PerformanceLatencyExceededThreshold]
    }

    fn run(&self, snapshot: &ResponseSnapshot) -> Vec<Finding> {
        if snapshot.latency() > self.threshold {
            vec![Finding::new(
                FindingCode::PerformanceLatencyExceededThreshold,
                snapshot.path(),
            )]
        } else {
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slow_response_is_flagged() {
        let rule = LatencyRule::new(Duration::from_millis(500));
        let snap = ResponseSnapshot::builder()
            .latency(Duration::from_millis(750))
            .build();
        let findings = rule.run(&snap);
        assert_eq!(findings.len(), 1);
        assert_eq!(
            findings[0].code,
            FindingCode::PerformanceLatencyExceededThreshold
        );
    }

    #[test]
    fn latency_at_threshold_passes() {
        let rule = LatencyRule::new(Duration::from_millis(500));
        let snap = ResponseSnapshot::builder()
            .latency(Duration::from_millis(500))
            .build();
        assert!(rule.run(&snap).is_empty());
    }

    #[test]
    fn zero_threshold_falls_back_to_default() {
        let rule = LatencyRule::new(Duration::ZERO);
        let snap = ResponseSnapshot::builder()
            .latency(Duration::from_millis(100))
            .build();
        assert!(rule.run(&snap).is_empty());
    }
}
