//! Scan scoring.
//!
//! `100 − 5 × finding_count`, clamped to a floor of 0. Every renderer uses
//! this one function, so the clamp policy is uniform across output paths.

pub const MAX_SCORE: i32 = 100;
pub const POINTS_PER_FINDING: i32 = 5;

pub fn score(finding_count: usize) -> i32 {
    let deduction = POINTS_PER_FINDING.saturating_mul(finding_count.min(i32::MAX as usize) as i32);
    MAX_SCORE.saturating_sub(deduction).max(0)
}
