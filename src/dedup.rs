//! Order-independent clash identity.

use uuid::Uuid;

/// Build the deduplication key for an element pair under one configuration.
///
/// The two composite tokens `"<modelKey>:<elementId>"` are ordered by plain
/// byte-wise comparison before joining, so swapping the (A, B) inputs yields
/// an identical key. The same physical clash therefore collapses to one entry
/// within a run and can be recognized when it recurs across runs.
pub fn dedup_key(
    config_id: Uuid,
    model_a_key: &str,
    element_a_id: i64,
    model_b_key: &str,
    element_b_id: i64,
) -> String {
    let mut left = format!("{model_a_key}:{element_a_id}");
    let mut right = format!("{model_b_key}:{element_b_id}");
    if left > right {
        std::mem::swap(&mut left, &mut right);
    }
    format!("{}|{left}|{right}", config_id.simple())
}
