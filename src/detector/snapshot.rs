//! Element snapshots and axis-aligned bounds arithmetic.

use nalgebra::{Matrix4, Point3};

use super::contracts::ResolvedModel;
use crate::model::{CategoryName, ModelRef};

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug)]
pub struct Aabb {
    pub min: Point3<f64>,
    pub max: Point3<f64>,
}

impl Aabb {
    pub fn new(min: Point3<f64>, max: Point3<f64>) -> Self {
        Self { min, max }
    }

    pub fn center(&self) -> Point3<f64> {
        Point3::from((self.min.coords + self.max.coords) * 0.5)
    }

    /// Inclusive overlap test on all three axes.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    pub fn corners(&self) -> [Point3<f64>; 8] {
        let (min, max) = (self.min, self.max);
        [
            Point3::new(min.x, min.y, min.z),
            Point3::new(max.x, min.y, min.z),
            Point3::new(min.x, max.y, min.z),
            Point3::new(max.x, max.y, min.z),
            Point3::new(min.x, min.y, max.z),
            Point3::new(max.x, min.y, max.z),
            Point3::new(min.x, max.y, max.z),
            Point3::new(max.x, max.y, max.z),
        ]
    }

    /// Map all eight corners through `transform` and re-wrap them in an
    /// axis-aligned box, so rotated boxes stay conservative.
    pub fn transformed(&self, transform: &Matrix4<f64>) -> Aabb {
        let mut corners = self.corners().into_iter();
        let first = transform.transform_point(&corners.next().expect("eight corners"));
        let (mut min, mut max) = (first, first);
        for corner in corners {
            let p = transform.transform_point(&corner);
            min = Point3::new(min.x.min(p.x), min.y.min(p.y), min.z.min(p.z));
            max = Point3::new(max.x.max(p.x), max.y.max(p.y), max.z.max(p.z));
        }
        Aabb { min, max }
    }
}

/// Element as reported by the snapshot provider, bounds still in the owning
/// model's coordinates.
#[derive(Clone, Debug)]
pub struct ElementRecord {
    pub element_id: i64,
    pub category: CategoryName,
    pub bounds: Aabb,
}

/// Engine-internal per-run view of one element with host-space bounds. Built
/// fresh each detection pass, never persisted.
#[derive(Clone, Debug)]
pub struct ElementSnapshot {
    pub element_id: i64,
    pub category: CategoryName,
    pub bounds: Aabb,
    pub model_key: String,
    pub model_ref: ModelRef,
    pub transform_to_host: Matrix4<f64>,
}

impl ElementSnapshot {
    /// Wrap a provider record, mapping its bounds into host space through the
    /// already-normalized model transform.
    pub fn from_record(
        record: ElementRecord,
        model: &ResolvedModel,
        normalized_transform: &Matrix4<f64>,
    ) -> Self {
        Self {
            element_id: record.element_id,
            category: record.category,
            bounds: record.bounds.transformed(normalized_transform),
            model_key: model.stable_key.clone(),
            model_ref: model.model_ref.clone(),
            transform_to_host: *normalized_transform,
        }
    }
}
