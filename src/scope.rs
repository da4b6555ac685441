//! Incremental-run scope filters.
//!
//! Both filters read the changed-element-by-model map carried by an
//! incremental request. An empty map means "full run": everything passes.

use crate::model::{ChangedElements, ClashConfig};

/// Whether a configuration is worth touching at all: true when the map is
/// empty or either of its two models reported changes.
pub fn should_process_config(config: &ClashConfig, changed: &ChangedElements) -> bool {
    if changed.is_empty() {
        return true;
    }
    changed.contains_model(&config.model_a.stable_key())
        || changed.contains_model(&config.model_b.stable_key())
}

/// Whether an element pair must be re-evaluated: true when the map is empty,
/// or at least one endpoint is listed under its own model's key. Pairs with
/// no changed endpoint are never rescanned, bounding incremental work to the
/// changed neighborhood.
pub fn should_evaluate_pair(
    config: &ClashConfig,
    element_a_id: i64,
    element_b_id: i64,
    changed: &ChangedElements,
) -> bool {
    if changed.is_empty() {
        return true;
    }

    let key_a = config.model_a.stable_key();
    let key_b = config.model_b.stable_key();
    if !changed.contains_model(&key_a) && !changed.contains_model(&key_b) {
        return false;
    }

    changed.contains(&key_a, element_a_id) || changed.contains(&key_b, element_b_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelRef;

    fn host_link_config() -> ClashConfig {
        ClashConfig {
            model_a: ModelRef::host("Host"),
            model_b: ModelRef::link(5, "Link"),
            ..ClashConfig::default()
        }
    }

    fn changed_sets() -> ChangedElements {
        let mut changed = ChangedElements::new();
        changed.insert("host", [100]);
        changed.insert("link:5", [200]);
        changed
    }

    #[test]
    fn pair_needs_at_least_one_changed_endpoint() {
        let config = host_link_config();
        let changed = changed_sets();
        assert!(should_evaluate_pair(&config, 100, 333, &changed));
        assert!(should_evaluate_pair(&config, 333, 200, &changed));
        assert!(!should_evaluate_pair(&config, 333, 444, &changed));
    }

    #[test]
    fn empty_map_means_full_run() {
        let config = host_link_config();
        let changed = ChangedElements::new();
        assert!(should_process_config(&config, &changed));
        assert!(should_evaluate_pair(&config, 1, 2, &changed));
    }

    #[test]
    fn untouched_config_is_skipped() {
        let config = host_link_config();
        let mut changed = ChangedElements::new();
        changed.insert("link:9", [7]);
        assert!(!should_process_config(&config, &changed));
        assert!(!should_evaluate_pair(&config, 7, 7, &changed));
    }

    #[test]
    fn changed_id_under_the_wrong_model_does_not_count() {
        // 200 changed in link:5 only; as an A-side (host) endpoint it is not
        // a reported change.
        let config = host_link_config();
        let changed = changed_sets();
        assert!(!should_evaluate_pair(&config, 200, 444, &changed));
    }
}
