mod common;

use std::thread::sleep;
use std::time::Duration;

use common::fixtures::{aabb, element, host_model, BoxOracle, FixtureModel, MemoryProvider};

use clash_detector::model::{CategoryPairRule, ClashConfig, ModelRef};
use clash_detector::{AutoDetectionCoordinator, ClashDetector, DetectionRequest};
use nalgebra::{Matrix4, Vector3};

#[test]
fn settled_trigger_drives_an_incremental_run() {
    let coordinator = AutoDetectionCoordinator::with_debounce(Duration::from_millis(1));
    coordinator.set_auto_mode(true);
    coordinator.register_change("link:5", [200]);
    assert!(
        coordinator.try_dequeue_trigger().is_none(),
        "window has not settled yet"
    );

    sleep(Duration::from_millis(300));
    let trigger = coordinator.try_dequeue_trigger().expect("settled trigger");

    let link = FixtureModel {
        model_ref: ModelRef::link(5, "Link: Plumbing"),
        transform_to_host: Matrix4::new_translation(&Vector3::new(3.0, 0.0, 0.0)),
        elements: vec![
            element(200, "Pipes", aabb((0.5, 0.2, 0.2), (1.5, 0.8, 0.8))),
            element(201, "Pipes", aabb((3.0, 0.2, 0.2), (4.0, 0.8, 0.8))),
        ],
    };
    let provider = MemoryProvider::new()
        .with_model(host_model(vec![element(
            100,
            "Ducts",
            aabb((0.0, 0.0, 0.0), (10.0, 1.0, 1.0)),
        )]))
        .with_model(link);
    let config = ClashConfig {
        model_a: ModelRef::host("Host"),
        model_b: ModelRef::link(5, "Link"),
        category_pairs: vec![CategoryPairRule::new("Ducts", "Pipes")],
        ..ClashConfig::default()
    };

    let detector = ClashDetector::new(provider, BoxOracle);
    let summary = detector.run(&DetectionRequest::incremental(
        vec![config],
        trigger.changed_element_ids_by_model,
    ));

    // Only the changed pipe's pair is rescanned.
    assert_eq!(summary.results.len(), 1);
    assert_eq!(summary.results[0].element_b_id, 200);

    assert!(
        coordinator.try_dequeue_trigger().is_none(),
        "one trigger per settled window"
    );
}
