//! Debounced auto-detection trigger coordinator.
//!
//! Change notifications and the polling/draining side may run on different
//! threads; a single mutex over the whole pending-map + deadline state keeps
//! every operation atomic. Nothing here blocks beyond the critical section,
//! and the coordinator itself never schedules work: a driver polls
//! [`AutoDetectionCoordinator::try_dequeue_trigger`] and feeds the returned
//! snapshot into an incremental detection run.

use std::collections::{HashMap, HashSet};
use std::time::{Duration, Instant};

use chrono::Utc;
use parking_lot::Mutex;

use crate::model::{AutoDetectionTrigger, ChangedElements, MIN_DEBOUNCE_MS};

/// Default debounce window between the last registered change and the
/// emitted trigger.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(1500);

#[derive(Debug)]
struct CoordinatorState {
    enabled: bool,
    debounce: Duration,
    pending: HashMap<String, HashSet<i64>>,
    deadline: Option<Instant>,
}

/// Accumulates per-model changed-element sets while auto mode is enabled and
/// emits at most one trigger per settled debounce window.
#[derive(Debug)]
pub struct AutoDetectionCoordinator {
    state: Mutex<CoordinatorState>,
}

impl AutoDetectionCoordinator {
    pub fn new() -> Self {
        Self::with_debounce(DEFAULT_DEBOUNCE)
    }

    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            state: Mutex::new(CoordinatorState {
                enabled: false,
                debounce,
                pending: HashMap::new(),
                deadline: None,
            }),
        }
    }

    pub fn is_auto_mode_enabled(&self) -> bool {
        self.state.lock().enabled
    }

    pub fn debounce(&self) -> Duration {
        self.state.lock().debounce
    }

    pub fn set_debounce(&self, debounce: Duration) {
        self.state.lock().debounce = debounce;
    }

    /// Turn auto mode on or off. Turning it off discards all pending state.
    pub fn set_auto_mode(&self, enabled: bool) {
        let mut state = self.state.lock();
        state.enabled = enabled;
        if !enabled {
            state.pending.clear();
            state.deadline = None;
        }
    }

    /// Merge positive element ids into the pending set for `model_key` and
    /// push the deadline forward. A blank key or disabled auto mode is a
    /// silent no-op. Every call while accumulating resets the window, so the
    /// trigger never fires while changes keep arriving faster than the
    /// debounce.
    pub fn register_change(&self, model_key: &str, changed_element_ids: impl IntoIterator<Item = i64>) {
        let folded = model_key.trim().to_lowercase();
        if folded.is_empty() {
            return;
        }

        let mut state = self.state.lock();
        if !state.enabled {
            return;
        }

        let set = state.pending.entry(folded).or_default();
        set.extend(changed_element_ids.into_iter().filter(|id| *id > 0));

        let window = state.debounce.max(Duration::from_millis(MIN_DEBOUNCE_MS));
        state.deadline = Some(Instant::now() + window);
    }

    /// Emit the accumulated trigger once the window has settled.
    ///
    /// Returns `None` while auto mode is disabled, while no deadline is
    /// armed, or while the deadline lies in the future. A passed deadline
    /// with nothing pending only disarms the deadline. Otherwise the pending
    /// sets are snapshotted and cleared atomically; every element registered
    /// before the deadline is part of exactly one emitted trigger.
    pub fn try_dequeue_trigger(&self) -> Option<AutoDetectionTrigger> {
        let mut state = self.state.lock();
        if !state.enabled {
            return None;
        }
        let deadline = state.deadline?;
        if Instant::now() < deadline {
            return None;
        }

        if state.pending.is_empty() {
            state.deadline = None;
            return None;
        }

        let mut snapshot = ChangedElements::new();
        for (model_key, ids) in state.pending.drain() {
            snapshot.insert(&model_key, ids);
        }
        state.deadline = None;

        Some(AutoDetectionTrigger {
            triggered_at_utc: Utc::now(),
            changed_element_ids_by_model: snapshot,
        })
    }

    /// Forcibly discard accumulated state without emitting a trigger.
    pub fn clear_pending(&self) {
        let mut state = self.state.lock();
        state.pending.clear();
        state.deadline = None;
    }
}

impl Default for AutoDetectionCoordinator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn short_window() -> AutoDetectionCoordinator {
        // The floor clamps anything below 250ms up, so this is the shortest
        // window a test can wait out.
        AutoDetectionCoordinator::with_debounce(Duration::from_millis(1))
    }

    #[test]
    fn trigger_fires_once_after_the_window_settles() {
        let coordinator = short_window();
        coordinator.set_auto_mode(true);
        coordinator.register_change("host", [1, 2]);

        assert!(
            coordinator.try_dequeue_trigger().is_none(),
            "trigger must not fire before the debounce elapses"
        );

        sleep(Duration::from_millis(300));
        let trigger = coordinator
            .try_dequeue_trigger()
            .expect("settled window should emit a trigger");
        let changed = &trigger.changed_element_ids_by_model;
        assert!(changed.contains("host", 1));
        assert!(changed.contains("host", 2));
        assert_eq!(changed.model_count(), 1);

        assert!(
            coordinator.try_dequeue_trigger().is_none(),
            "a second dequeue with no pending work must fail"
        );
    }

    #[test]
    fn disabled_coordinator_ignores_changes() {
        let coordinator = short_window();
        coordinator.register_change("host", [1]);
        coordinator.set_auto_mode(true);
        sleep(Duration::from_millis(300));
        assert!(coordinator.try_dequeue_trigger().is_none());
    }

    #[test]
    fn disabling_clears_pending_state() {
        let coordinator = short_window();
        coordinator.set_auto_mode(true);
        coordinator.register_change("host", [1]);
        coordinator.set_auto_mode(false);
        coordinator.set_auto_mode(true);
        sleep(Duration::from_millis(300));
        assert!(coordinator.try_dequeue_trigger().is_none());
    }

    #[test]
    fn non_positive_ids_and_blank_keys_are_dropped() {
        let coordinator = short_window();
        coordinator.set_auto_mode(true);
        coordinator.register_change("  ", [7]);
        coordinator.register_change("host", [0, -3, 9]);
        sleep(Duration::from_millis(300));
        let trigger = coordinator.try_dequeue_trigger().expect("trigger");
        let changed = &trigger.changed_element_ids_by_model;
        assert_eq!(changed.model_count(), 1);
        assert!(changed.contains("host", 9));
        assert!(!changed.contains("host", 0));
    }

    #[test]
    fn clear_pending_discards_without_emitting() {
        let coordinator = short_window();
        coordinator.set_auto_mode(true);
        coordinator.register_change("link:5", [4]);
        coordinator.clear_pending();
        sleep(Duration::from_millis(300));
        assert!(coordinator.try_dequeue_trigger().is_none());
    }

    #[test]
    fn later_changes_push_the_deadline_forward() {
        let coordinator = short_window();
        coordinator.set_auto_mode(true);
        coordinator.register_change("host", [1]);
        sleep(Duration::from_millis(150));
        coordinator.register_change("host", [2]);
        // Only ~150ms since the second change; the reset window is still open.
        sleep(Duration::from_millis(150));
        assert!(coordinator.try_dequeue_trigger().is_none());
        sleep(Duration::from_millis(200));
        let trigger = coordinator.try_dequeue_trigger().expect("trigger");
        assert!(trigger.changed_element_ids_by_model.contains("host", 1));
        assert!(trigger.changed_element_ids_by_model.contains("host", 2));
    }
}
