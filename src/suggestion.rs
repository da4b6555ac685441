//! Remediation suggestions keyed by unordered category pair.

use std::collections::HashMap;

use crate::model::CategoryName;

/// Supplies a remediation hint for a clash between two categories. Lookups
/// must be order-independent.
pub trait SuggestionProvider {
    fn suggestion(&self, category_a: &CategoryName, category_b: &CategoryName) -> String;
}

const FALLBACK_SUGGESTION: &str =
    "Review geometry and coordinate an offset, reroute, or opening with the affected teams.";

const BUILTIN_SUGGESTIONS: &[(&str, &str, &str)] = &[
    (
        "Ducts",
        "Pipes",
        "Consider rerouting duct or offsetting pipe elevation near the conflict.",
    ),
    (
        "Cable Trays",
        "Ducts",
        "Shift tray path or resize duct offset to restore required clearances.",
    ),
    (
        "Pipes",
        "Structural Framing",
        "Check sleeve/opening options and coordinate with structural team.",
    ),
    (
        "Conduits",
        "Pipes",
        "Review route stacking and apply vertical staggering to reduce overlap.",
    ),
    (
        "Walls",
        "Pipes",
        "Add or resize wall opening and verify firestopping requirements.",
    ),
    (
        "Floors",
        "Pipes",
        "Coordinate penetration locations with sleeves before detailing.",
    ),
];

/// Rule-based provider backed by a built-in table of common MEP/structural
/// pairings, falling back to a generic coordination hint.
pub struct RuleBasedSuggestionProvider {
    table: HashMap<String, &'static str>,
}

impl RuleBasedSuggestionProvider {
    pub fn new() -> Self {
        let table = BUILTIN_SUGGESTIONS
            .iter()
            .map(|(a, b, text)| (pair_key(&CategoryName::new(a), &CategoryName::new(b)), *text))
            .collect();
        Self { table }
    }
}

impl Default for RuleBasedSuggestionProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl SuggestionProvider for RuleBasedSuggestionProvider {
    fn suggestion(&self, category_a: &CategoryName, category_b: &CategoryName) -> String {
        if category_a.is_empty() || category_b.is_empty() {
            return FALLBACK_SUGGESTION.to_string();
        }
        self.table
            .get(&pair_key(category_a, category_b))
            .copied()
            .unwrap_or(FALLBACK_SUGGESTION)
            .to_string()
    }
}

/// Casefolded, ordered pair key so `(A, B)` and `(B, A)` address the same
/// table entry.
fn pair_key(a: &CategoryName, b: &CategoryName) -> String {
    let (first, second) = if a.folded() <= b.folded() {
        (a.folded(), b.folded())
    } else {
        (b.folded(), a.folded())
    };
    format!("{first}|{second}")
}
