use crate::rules::{Finding, FindingCode, Rule};
use crate::snapshot::ResponseSnapshot;

pub const DEFAULT_MAX_BYTES: usize = 500 * 1024;

/// Flags response bodies over a configured byte budget.
pub struct PayloadSizeRule {
    max_bytes: usize,
}

impl PayloadSizeRule {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            max_bytes: if max_bytes == 0 {
                DEFAULT_MAX_BYTES
            } else {
                max_bytes
            },
        }
    }
}

impl Rule for PayloadSizeRule {
    fn name(&self) -> &'static str {
        "payload-size"
    }

    fn codes(&self) -> &'static [FindingCode] {
        &[FindingCode::PerformancePayloadSizeExceedsLimit]
    }

    fn run(&self, snapshot: &ResponseSnapshot) -> Vec<Finding> {
        if snapshot.body_len() > self.max_bytes {
            vec![Finding::new(
                FindingCode::PerformancePayloadSizeExceedsLimit,
                snapshot.path(),
            )]
        } else {
            Vec::new()
        }
    }
}
