//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use spirors::{Point, float_types::Real};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Same as [`approx_eq`] for both coordinates of a point.
pub fn point_approx_eq(a: &Point, b: &Point, eps: Real) -> bool {
    approx_eq(a.x, b.x, eps) && approx_eq(a.y, b.y, eps)
}

/// Returns `[min_x, min_y, max_x, max_y]` for a set of points.
pub fn bounding_box(points: &[Point]) -> [Real; 4] {
    points.iter().fold(
        [Real::MAX, Real::MAX, Real::MIN, Real::MIN],
        |[min_x, min_y, max_x, max_y], p| {
            [min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y)]
        },
    )
}
