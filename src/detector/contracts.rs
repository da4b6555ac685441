//! Trait seams toward the host application.
//!
//! Solids and element handles belong to the host and are not reproducible in
//! a portable core, so they stay opaque: the engine receives them from the
//! [`SnapshotProvider`] and only ever hands them back into the
//! [`GeometryOracle`]. It never inspects or constructs one itself.

use std::collections::HashSet;

use nalgebra::{Matrix4, Point3};

use super::snapshot::{Aabb, ElementRecord};
use crate::error::Result;
use crate::model::{CategoryName, ModelRef};

/// A model reference mapped to an actual geometry source.
#[derive(Clone, Debug)]
pub struct ResolvedModel {
    pub model_ref: ModelRef,
    pub stable_key: String,
    pub display_name: String,
    /// Model-to-host transform as reported by the host, not yet normalized.
    pub transform_to_host: Matrix4<f64>,
}

/// Confirmed solid-pair intersection reported by the oracle.
#[derive(Clone, Debug)]
pub struct SolidIntersection {
    pub volume: f64,
    /// Axis-aligned bounds of the intersection body, when the oracle can
    /// compute them. Preferred over the centroid for locating the clash.
    pub bounds: Option<Aabb>,
    pub centroid: Point3<f64>,
}

/// Supplies element snapshots and solids from a model source.
pub trait SnapshotProvider {
    /// Opaque host solid handle.
    type Solid;

    /// Model references the host can currently offer as participants.
    fn available_models(&self) -> Vec<ModelRef>;

    /// Map a reference to an actual source, or fail when the model is gone
    /// (an unloaded link, a closed document).
    fn resolve_model(&self, model_ref: &ModelRef) -> Result<ResolvedModel>;

    /// Element records for exactly the given categories, with bounds in the
    /// model's own coordinates.
    fn elements(
        &self,
        model: &ResolvedModel,
        categories: &HashSet<CategoryName>,
    ) -> Result<Vec<ElementRecord>>;

    /// Host-space solids for one element. May legitimately be empty
    /// (annotation-like elements without solid geometry).
    fn solids(&self, model: &ResolvedModel, element_id: i64) -> Result<Vec<Self::Solid>>;
}

/// Performs solid boolean intersection on opaque solids in a common frame.
pub trait GeometryOracle {
    type Solid;

    /// `Ok(None)` means the solids do not intersect. An `Err` from a single
    /// attempt is treated by the engine as "no intersection" for that pair
    /// and never aborts the candidate.
    fn intersect(&self, a: &Self::Solid, b: &Self::Solid) -> Result<Option<SolidIntersection>>;
}
