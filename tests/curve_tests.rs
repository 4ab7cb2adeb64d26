use spirors::curve::{
    CurveKind, CurveParameters, DEFAULT_NUM_POINTS, bounding_extent, curve_line_string,
    epitrochoid_point, hypotrochoid_point, rotations,
};
use spirors::float_types::{FRAC_PI_2, PI, TAU};
use spirors::{Point, generate_curve, rotate_point};

mod support;
use support::{approx_eq, bounding_box, point_approx_eq};

#[test]
fn sample_count_is_budget_plus_one() {
    let params = CurveParameters::hypotrochoid(100.0, 40.0, 20.0);
    assert_eq!(generate_curve(&params, 1000).len(), 1001);
    assert_eq!(params.points().len(), DEFAULT_NUM_POINTS + 1);
    assert_eq!(generate_curve(&params, 7).len(), 8);
}

#[test]
fn hypotrochoid_closes() {
    let params = CurveParameters::hypotrochoid(100.0, 40.0, 20.0);
    assert_eq!(params.rotations(), 2.0);

    let points = generate_curve(&params, 1000);
    let first = points.first().unwrap();
    let last = points.last().unwrap();
    assert!(point_approx_eq(first, last, 1e-6), "{first:?} vs {last:?}");
    // θ = 0: (R - r + d, 0)
    assert!(point_approx_eq(first, &Point::new(80.0, 0.0), 1e-9));
}

#[test]
fn epitrochoid_closes() {
    let params = CurveParameters::epitrochoid(60.0, 20.0, 10.0);
    assert_eq!(params.kind, CurveKind::Epitrochoid);
    assert_eq!(params.rotations(), 1.0);

    let points = generate_curve(&params, 500);
    assert!(point_approx_eq(&points[0], &Point::new(70.0, 0.0), 1e-9));
    assert!(point_approx_eq(&points[0], points.last().unwrap(), 1e-6));
}

#[test]
fn rotations_is_gear_over_gcd() {
    assert_eq!(rotations(100.0, 40.0), 2.0);
    assert_eq!(rotations(100.0, 50.0), 1.0);
    assert_eq!(rotations(97.0, 13.0), 13.0);
    assert_eq!(rotations(200.0, 75.0), 3.0);
    // tiny but non-zero gears still use r / gcd(R, r)
    assert_eq!(rotations(1.0, 0.5), 1.0);
    assert_eq!(rotations(1.0, 0.375), 3.0);
}

#[test]
fn gear_center_distance_matches_kind() {
    assert_eq!(CurveKind::Hypotrochoid.gear_center_distance(100.0, 40.0), 60.0);
    assert_eq!(CurveKind::Epitrochoid.gear_center_distance(100.0, 40.0), 140.0);
}

#[test]
fn zero_radius_uses_one_rotation() {
    assert_eq!(rotations(0.0, 40.0), 1.0);
    assert_eq!(rotations(100.0, 0.0), 1.0);
}

#[test]
fn point_formulas_at_quarter_turn() {
    // R - r = 60, k = 1.5
    let p = hypotrochoid_point(100.0, 40.0, 20.0, FRAC_PI_2);
    let expected = Point::new(
        20.0 * (1.5 * FRAC_PI_2).cos(),
        60.0 - 20.0 * (1.5 * FRAC_PI_2).sin(),
    );
    assert!(point_approx_eq(&p, &expected, 1e-9));

    let e = epitrochoid_point(60.0, 20.0, 10.0, PI);
    // R + r = 80, k = 4: (-80 - 10 cos 4π, -10 sin 4π)
    assert!(point_approx_eq(&e, &Point::new(-90.0, 0.0), 1e-9));
}

#[test]
fn rotate_point_quarter_and_full_turn() {
    let p = rotate_point(Point::new(3.0, 4.0), FRAC_PI_2);
    assert!(point_approx_eq(&p, &Point::new(-4.0, 3.0), 1e-9));

    let q = rotate_point(Point::new(3.0, 4.0), TAU);
    assert!(point_approx_eq(&q, &Point::new(3.0, 4.0), 1e-9));
}

#[test]
fn start_angle_rotates_every_sample() {
    let base = CurveParameters::hypotrochoid(150.0, 50.0, 30.0);
    let turned = base.with_start_angle(PI / 3.0);

    let plain = generate_curve(&base, 200);
    let rotated = generate_curve(&turned, 200);
    assert_eq!(plain.len(), rotated.len());
    for (a, b) in plain.iter().zip(&rotated) {
        assert!(point_approx_eq(&rotate_point(*a, PI / 3.0), b, 1e-9));
    }
}

#[test]
fn generation_is_deterministic() {
    let params = CurveParameters::hypotrochoid(96.0, 36.0, 30.0);
    assert_eq!(generate_curve(&params, 300), generate_curve(&params, 300));
}

#[test]
fn zero_budget_yields_single_point() {
    let params = CurveParameters::hypotrochoid(100.0, 40.0, 20.0).with_start_angle(PI);
    let points = generate_curve(&params, 0);
    assert_eq!(points.len(), 1);
    assert!(point_approx_eq(&points[0], &Point::new(-80.0, 0.0), 1e-9));
}

#[test]
fn degenerate_gear_does_not_panic() {
    let params = CurveParameters::hypotrochoid(0.0, 0.0, 0.0);
    let points = generate_curve(&params, 10);
    assert_eq!(points.len(), 11);
}

#[test]
fn hypotrochoid_stays_inside_ring_plus_pen() {
    let params = CurveParameters::hypotrochoid(120.0, 45.0, 30.0);
    let points = generate_curve(&params, 2000);
    // |p| <= (R - r) + d
    assert!(bounding_extent(&points) <= 105.0 + 1e-9);
    let [min_x, min_y, max_x, max_y] = bounding_box(&points);
    assert!(min_x >= -105.0 - 1e-9 && max_x <= 105.0 + 1e-9);
    assert!(min_y >= -105.0 - 1e-9 && max_y <= 105.0 + 1e-9);
}

#[test]
fn bounding_extent_of_empty_is_zero() {
    assert_eq!(bounding_extent(&[]), 0.0);
}

#[test]
fn line_string_matches_samples() {
    let params = CurveParameters::hypotrochoid(100.0, 40.0, 20.0);
    let line = curve_line_string(&params, 100);
    let points = generate_curve(&params, 100);
    assert_eq!(line.0.len(), points.len());
    assert!(approx_eq(line.0[0].x, points[0].x, 1e-12));
    assert!(approx_eq(line.0[100].y, points[100].y, 1e-12));
}
