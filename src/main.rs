use std::collections::HashSet;

use clash_detector::detector::{
    Aabb, ElementRecord, GeometryOracle, ResolvedModel, SnapshotProvider, SolidIntersection,
};
use clash_detector::model::{CategoryName, CategoryPairRule, ClashConfig, ModelRef};
use clash_detector::{ClashDetector, DetectionRequest};
use nalgebra::{Matrix4, Point3};

/// Demo solid: an axis-aligned box, intersected analytically.
#[derive(Clone)]
struct BoxSolid(Aabb);

struct DemoModel;

impl SnapshotProvider for DemoModel {
    type Solid = BoxSolid;

    fn available_models(&self) -> Vec<ModelRef> {
        vec![ModelRef::host("Host: Demo")]
    }

    fn resolve_model(&self, model_ref: &ModelRef) -> clash_detector::Result<ResolvedModel> {
        Ok(ResolvedModel {
            model_ref: model_ref.clone(),
            stable_key: model_ref.stable_key(),
            display_name: "Host: Demo".to_string(),
            transform_to_host: Matrix4::identity(),
        })
    }

    fn elements(
        &self,
        _model: &ResolvedModel,
        categories: &HashSet<CategoryName>,
    ) -> clash_detector::Result<Vec<ElementRecord>> {
        // A duct crossing a pipe near the origin.
        let all = [
            (1, "Ducts", Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 1.0, 1.0))),
            (2, "Pipes", Aabb::new(Point3::new(3.5, 0.5, 0.5), Point3::new(6.0, 0.8, 0.8))),
        ];
        Ok(all
            .into_iter()
            .map(|(id, category, bounds)| ElementRecord {
                element_id: id,
                category: CategoryName::new(category),
                bounds,
            })
            .filter(|record| categories.contains(&record.category))
            .collect())
    }

    fn solids(
        &self,
        _model: &ResolvedModel,
        element_id: i64,
    ) -> clash_detector::Result<Vec<BoxSolid>> {
        let bounds = match element_id {
            1 => Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(4.0, 1.0, 1.0)),
            2 => Aabb::new(Point3::new(3.5, 0.5, 0.5), Point3::new(6.0, 0.8, 0.8)),
            _ => return Ok(Vec::new()),
        };
        Ok(vec![BoxSolid(bounds)])
    }
}

struct BoxOracle;

impl GeometryOracle for BoxOracle {
    type Solid = BoxSolid;

    fn intersect(
        &self,
        a: &BoxSolid,
        b: &BoxSolid,
    ) -> clash_detector::Result<Option<SolidIntersection>> {
        if !a.0.overlaps(&b.0) {
            return Ok(None);
        }
        let min = Point3::new(
            a.0.min.x.max(b.0.min.x),
            a.0.min.y.max(b.0.min.y),
            a.0.min.z.max(b.0.min.z),
        );
        let max = Point3::new(
            a.0.max.x.min(b.0.max.x),
            a.0.max.y.min(b.0.max.y),
            a.0.max.z.min(b.0.max.z),
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

fn main() {
    // Demo stub: one host-vs-host config over a synthetic duct/pipe crossing
    let config = ClashConfig {
        name: "Demo".to_string(),
        category_pairs: vec![CategoryPairRule::new("Ducts", "Pipes")],
        ..ClashConfig::default()
    };

    let detector = ClashDetector::new(DemoModel, BoxOracle);
    let summary = detector.run(&DetectionRequest::full(vec![config]));

    for clash in &summary.results {
        println!(
            "{} vs {}: severity={} depth={:.3}",
            clash.element_a_id, clash.element_b_id, clash.severity, clash.penetration_depth
        );
    }
    println!(
        "clashes={} candidates={} elements={} latency_ms={:.3}",
        summary.total_metrics.confirmed_clashes,
        summary.total_metrics.candidate_pairs,
        summary.total_metrics.elements_scanned,
        summary.total_metrics.duration_ms
    );
}
