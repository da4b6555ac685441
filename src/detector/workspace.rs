//! Per-run workspace: solid memoization and dedup bookkeeping.
//!
//! Both caches are scoped to a single orchestrator invocation. The workspace
//! is created at run start and dropped at run end, so there is no cross-run
//! memory growth and no sharing between configurations of different runs.

use std::collections::{HashMap, HashSet};

use super::contracts::{ResolvedModel, SnapshotProvider};
use crate::error::Result;

/// Cache key for an element's solids, unique across models within a run.
fn solid_cache_key(model_key: &str, element_id: i64) -> String {
    format!("{model_key}:{element_id}")
}

/// Run-scoped caches: memoized host-space solids per element and the set of
/// dedup keys already emitted this run.
pub struct RunWorkspace<S> {
    solids: HashMap<String, Vec<S>>,
    seen: HashSet<String>,
}

impl<S> RunWorkspace<S> {
    pub fn new() -> Self {
        Self {
            solids: HashMap::new(),
            seen: HashSet::new(),
        }
    }

    /// Fetch and memoize the element's solids on first use. Elements that
    /// recur across many candidate pairs hit the cache afterwards.
    pub fn ensure_solids<P>(
        &mut self,
        provider: &P,
        model: &ResolvedModel,
        element_id: i64,
    ) -> Result<()>
    where
        P: SnapshotProvider<Solid = S>,
    {
        let key = solid_cache_key(&model.stable_key, element_id);
        if !self.solids.contains_key(&key) {
            let solids = provider.solids(model, element_id)?;
            self.solids.insert(key, solids);
        }
        Ok(())
    }

    /// Cached solids for an element; empty when the element has none or
    /// [`RunWorkspace::ensure_solids`] was never called for it.
    pub fn solids(&self, model_key: &str, element_id: i64) -> &[S] {
        self.solids
            .get(&solid_cache_key(model_key, element_id))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Record a dedup key; returns `false` when the clash was already emitted
    /// this run.
    pub fn mark_seen(&mut self, dedup_key: &str) -> bool {
        self.seen.insert(dedup_key.to_string())
    }
}

impl<S> Default for RunWorkspace<S> {
    fn default() -> Self {
        Self::new()
    }
}
