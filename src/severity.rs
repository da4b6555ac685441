//! Penetration-depth severity tiering.

use crate::model::{SeverityLevel, SeverityThresholds};

/// Map a penetration depth onto the three-tier severity scale.
///
/// The High comparison runs first and boundary values tie upward
/// (`depth == high_min` is High). Threshold ordering is not validated: with
/// `medium_min > high_min` the literal comparison order still applies, which
/// keeps inverted inputs deterministic rather than silently reordering them.
pub fn classify(penetration_depth: f64, thresholds: &SeverityThresholds) -> SeverityLevel {
    if penetration_depth >= thresholds.high_min {
        SeverityLevel::High
    } else if penetration_depth >= thresholds.medium_min {
        SeverityLevel::Medium
    } else {
        SeverityLevel::Low
    }
}
