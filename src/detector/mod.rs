//! Clash matching core: candidate generation and intersection confirmation.
//!
//! Overview
//! - Resolves both of a configuration's model references through the
//!   [`SnapshotProvider`] and snapshots elements for exactly the categories
//!   its enabled rules name, with bounds mapped to host space up front.
//! - Cross-joins the two category indexes per rule, pruning self-pairs,
//!   mirror directions of same-model pairs, out-of-scope pairs on
//!   incremental runs, and non-overlapping bounds.
//! - Confirms surviving candidates through the [`GeometryOracle`], keeping
//!   the largest intersection volume and deriving a cube-root penetration
//!   depth and a representative location.
//! - Deduplicates, classifies severity and attaches suggestions before
//!   emitting results with per-configuration metrics.
//!
//! Modules
//! - [`contracts`] – trait seams toward the host (provider, oracle).
//! - `snapshot` – element snapshots and AABB arithmetic.
//! - `workspace` – run-scoped solid cache and dedup set.
//! - `pipeline` – the [`ClashDetector`] orchestrator.

pub mod contracts;
mod pipeline;
mod snapshot;
mod workspace;

pub use contracts::{GeometryOracle, ResolvedModel, SnapshotProvider, SolidIntersection};
pub use pipeline::ClashDetector;
pub use snapshot::{Aabb, ElementRecord, ElementSnapshot};
pub use workspace::RunWorkspace;
