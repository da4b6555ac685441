//! Changed-element bookkeeping shared by incremental requests, triggers and
//! the scope filters.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Changed element ids grouped by model stable key.
///
/// Keys are case-folded on insertion and lookup, so `"Host"` and `"host"`
/// address the same set. An empty map means "full run" to the scope filters.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangedElements {
    by_model: HashMap<String, HashSet<i64>>,
}

impl ChangedElements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.by_model.is_empty()
    }

    pub fn model_count(&self) -> usize {
        self.by_model.len()
    }

    /// Merge `ids` into the set for `model_key`. The entry is created even
    /// when `ids` is empty so a registered model shows up in
    /// [`ChangedElements::contains_model`].
    pub fn insert(&mut self, model_key: &str, ids: impl IntoIterator<Item = i64>) {
        let set = self.by_model.entry(fold(model_key)).or_default();
        set.extend(ids);
    }

    pub fn contains_model(&self, model_key: &str) -> bool {
        self.by_model.contains_key(&fold(model_key))
    }

    pub fn contains(&self, model_key: &str, element_id: i64) -> bool {
        self.by_model
            .get(&fold(model_key))
            .is_some_and(|set| set.contains(&element_id))
    }

    pub fn ids_for(&self, model_key: &str) -> Option<&HashSet<i64>> {
        self.by_model.get(&fold(model_key))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HashSet<i64>)> {
        self.by_model.iter().map(|(k, v)| (k.as_str(), v))
    }
}

fn fold(key: &str) -> String {
    key.trim().to_lowercase()
}

/// Snapshot of accumulated changes emitted by the auto-detection coordinator
/// when a debounce window settles.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutoDetectionTrigger {
    pub triggered_at_utc: DateTime<Utc>,
    pub changed_element_ids_by_model: ChangedElements,
}
