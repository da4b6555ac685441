//! In-memory snapshot provider and analytic box oracle for engine tests.

use std::cell::Cell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;

use clash_detector::detector::{
    Aabb, ElementRecord, GeometryOracle, ResolvedModel, SnapshotProvider, SolidIntersection,
};
use clash_detector::error::Error;
use clash_detector::model::{CategoryName, ModelRef};
use clash_detector::transform;
use nalgebra::{Matrix4, Point3};

/// Test solid: an axis-aligned box in host coordinates.
#[derive(Clone, Debug)]
pub struct BoxSolid {
    pub bounds: Aabb,
}

pub struct FixtureElement {
    pub element_id: i64,
    pub category: &'static str,
    pub bounds: Aabb,
}

pub struct FixtureModel {
    pub model_ref: ModelRef,
    pub transform_to_host: Matrix4<f64>,
    pub elements: Vec<FixtureElement>,
}

/// Snapshot provider over a fixed set of models, counting solid fetches so
/// tests can observe the run-scoped memoization.
pub struct MemoryProvider {
    models: HashMap<String, FixtureModel>,
    solid_fetches: Rc<Cell<usize>>,
}

impl MemoryProvider {
    pub fn new() -> Self {
        Self {
            models: HashMap::new(),
            solid_fetches: Rc::new(Cell::new(0)),
        }
    }

    pub fn with_model(mut self, model: FixtureModel) -> Self {
        self.models.insert(model.model_ref.stable_key(), model);
        self
    }

    /// Shared fetch counter; clone before handing the provider to a detector.
    pub fn solid_fetch_counter(&self) -> Rc<Cell<usize>> {
        Rc::clone(&self.solid_fetches)
    }
}

impl SnapshotProvider for MemoryProvider {
    type Solid = BoxSolid;

    fn available_models(&self) -> Vec<ModelRef> {
        self.models.values().map(|m| m.model_ref.clone()).collect()
    }

    fn resolve_model(&self, model_ref: &ModelRef) -> clash_detector::Result<ResolvedModel> {
        let key = model_ref.stable_key();
        let model = self.models.get(&key).ok_or_else(|| Error::UnresolvedModel {
            model: model_ref.display_name.clone(),
        })?;
        Ok(ResolvedModel {
            model_ref: model.model_ref.clone(),
            stable_key: key,
            display_name: model.model_ref.display_name.clone(),
            transform_to_host: model.transform_to_host,
        })
    }

    fn elements(
        &self,
        model: &ResolvedModel,
        categories: &HashSet<CategoryName>,
    ) -> clash_detector::Result<Vec<ElementRecord>> {
        let fixture = self
            .models
            .get(&model.stable_key)
            .ok_or_else(|| Error::Provider(format!("unknown model '{}'", model.stable_key)))?;
        Ok(fixture
            .elements
            .iter()
            .filter(|element| categories.contains(&CategoryName::new(element.category)))
            .map(|element| ElementRecord {
                element_id: element.element_id,
                category: CategoryName::new(element.category),
                bounds: element.bounds,
            })
            .collect())
    }

    fn solids(
        &self,
        model: &ResolvedModel,
        element_id: i64,
    ) -> clash_detector::Result<Vec<BoxSolid>> {
        self.solid_fetches.set(self.solid_fetches.get() + 1);
        let fixture = self
            .models
            .get(&model.stable_key)
            .ok_or_else(|| Error::Provider(format!("unknown model '{}'", model.stable_key)))?;
        let to_host = transform::normalize(&fixture.transform_to_host, transform::DEFAULT_EPSILON);
        Ok(fixture
            .elements
            .iter()
            .filter(|element| element.element_id == element_id)
            .map(|element| BoxSolid {
                bounds: element.bounds.transformed(&to_host),
            })
            .collect())
    }
}

/// Oracle intersecting axis-aligned boxes analytically.
pub struct BoxOracle;

impl GeometryOracle for BoxOracle {
    type Solid = BoxSolid;

    fn intersect(
        &self,
        a: &BoxSolid,
        b: &BoxSolid,
    ) -> clash_detector::Result<Option<SolidIntersection>> {
        let (a, b) = (&a.bounds, &b.bounds);
        if !a.overlaps(b) {
            return Ok(None);
        }
        let min = Point3::new(
            a.min.x.max(b.min.x),
            a.min.y.max(b.min.y),
            a.min.z.max(b.min.z),
        );
        let max = Point3::new(
            a.max.x.min(b.max.x),
            a.max.y.min(b.max.y),
            a.max.z.min(b.max.z),
        );
        let overlap = Aabb::new(min, max);
        let volume = (max.x - min.x) * (max.y - min.y) * (max.z - min.z);
        Ok(Some(SolidIntersection {
            volume,
            bounds: Some(overlap),
            centroid: overlap.center(),
        }))
    }
}

/// Oracle whose every intersection attempt fails.
pub struct FailingOracle;

impl GeometryOracle for FailingOracle {
    type Solid = BoxSolid;

    fn intersect(
        &self,
        _a: &BoxSolid,
        _b: &BoxSolid,
    ) -> clash_detector::Result<Option<SolidIntersection>> {
        Err(Error::Oracle("boolean operation failed".to_string()))
    }
}

pub fn aabb(min: (f64, f64, f64), max: (f64, f64, f64)) -> Aabb {
    Aabb::new(
        Point3::new(min.0, min.1, min.2),
        Point3::new(max.0, max.1, max.2),
    )
}

/// Host model fixture with identity transform.
pub fn host_model(elements: Vec<FixtureElement>) -> FixtureModel {
    FixtureModel {
        model_ref: ModelRef::host("Host: Tower"),
        transform_to_host: Matrix4::identity(),
        elements,
    }
}

pub fn element(element_id: i64, category: &'static str, bounds: Aabb) -> FixtureElement {
    FixtureElement {
        element_id,
        category,
        bounds,
    }
}
