//! Link-transform normalization.
//!
//! Link transforms reported by the host frequently carry sub-epsilon floating
//! noise (`0.99999994` where `1.0` is meant). Left as-is, repeated
//! bounding-box comparisons become non-reproducible across runs on
//! numerically adjacent inputs, so every transform is snapped once before any
//! geometry is mapped through it.

use nalgebra::{Matrix4, Point3};

/// Default snapping tolerance for transform components.
pub const DEFAULT_EPSILON: f64 = 1e-5;

/// Snap each of the 16 components to `0`, `1` or `-1` when within `epsilon`;
/// other components pass through unchanged.
pub fn normalize(transform: &Matrix4<f64>, epsilon: f64) -> Matrix4<f64> {
    let mut out = *transform;
    for value in out.iter_mut() {
        *value = snap(*value, epsilon);
    }
    out
}

/// Map a model-space point into host coordinates through the normalized
/// transform.
pub fn to_host_coordinates(point: &Point3<f64>, model_to_host: &Matrix4<f64>) -> Point3<f64> {
    normalize(model_to_host, DEFAULT_EPSILON).transform_point(point)
}

fn snap(value: f64, epsilon: f64) -> f64 {
    if value.abs() < epsilon {
        0.0
    } else if (value - 1.0).abs() < epsilon {
        1.0
    } else if (value + 1.0).abs() < epsilon {
        -1.0
    } else {
        value
    }
}
