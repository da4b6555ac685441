#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod coordinator;
pub mod detector;
pub mod error;
pub mod model;

// Supporting modules – public, but considered implementation surface.
pub mod config;
pub mod dedup;
pub mod export;
pub mod scope;
pub mod severity;
pub mod suggestion;
pub mod transform;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + coordinator.
pub use crate::coordinator::AutoDetectionCoordinator;
pub use crate::detector::ClashDetector;

// Run inputs/outputs.
pub use crate::error::{Error, Result};
pub use crate::model::{
    AutoDetectionTrigger, ChangedElements, ClashConfig, ClashResult, DetectionMetrics,
    DetectionRequest, DetectionRunSummary, ModelRef, SeverityLevel,
};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for embedding applications.
///
/// ```no_run
/// use clash_detector::prelude::*;
///
/// let coordinator = AutoDetectionCoordinator::new();
/// coordinator.set_auto_mode(true);
/// coordinator.register_change("host", [100, 101]);
/// if let Some(trigger) = coordinator.try_dequeue_trigger() {
///     let _scope = trigger.changed_element_ids_by_model;
/// }
/// ```
pub mod prelude {
    pub use crate::coordinator::AutoDetectionCoordinator;
    pub use crate::detector::{ClashDetector, GeometryOracle, SnapshotProvider};
    pub use crate::model::{
        ClashConfig, ClashResult, DetectionRequest, DetectionRunSummary, ModelRef, SeverityLevel,
    };
}
