use spirors::HarmonyConfig;
use spirors::float_types::Real;
use spirors::harmony::{
    DEFAULT_MIN_HARMONY, closure_harmony, harmonize_gear_radius, harmony, nearest_valid_r,
    valid_r_values,
};

mod support;
use support::approx_eq;

#[test]
fn harmony_reference_values() {
    assert!(approx_eq(harmony(100.0, 50.0), 0.5516, 1e-3));
    assert!(approx_eq(harmony(100.0, 99.0), 0.1225, 1e-3));
    assert!(approx_eq(harmony(100.0, 40.0), 0.3535, 1e-3));
    assert!(approx_eq(harmony(100.0, 20.0), 0.7048, 1e-3));
    assert!(approx_eq(harmony(200.0, 75.0), 0.386, 1e-3));
}

#[test]
fn harmony_is_bounded() {
    for ring in [24.0, 60.0, 97.0, 100.0, 150.0, 300.0] {
        for gear in 1..ring as u32 {
            let h = harmony(ring, gear as Real);
            assert!((0.0..=1.0).contains(&h), "h({ring}, {gear}) = {h}");
        }
    }
}

#[test]
fn zero_or_negative_radius_scores_zero() {
    assert_eq!(harmony(100.0, 0.0), 0.0);
    assert_eq!(harmony(0.0, 40.0), 0.0);
    assert_eq!(harmony(-100.0, 40.0), 0.0);
    assert_eq!(harmony(Real::NAN, 40.0), 0.0);
}

#[test]
fn breakdown_of_half_gear() {
    let b = HarmonyConfig::default().breakdown(100.0, 50.0);
    // rotations 1, ratio 0.5, shares 5/10/25, R/r = 2 exactly
    assert!(approx_eq(b.complexity, 0.17242, 1e-4));
    assert!(approx_eq(b.organization, 0.03405, 1e-4));
    assert!(approx_eq(b.symmetry, 1.0, 1e-12));
    assert!(approx_eq(
        b.total,
        0.25 * b.complexity + 0.25 * b.organization + 0.5 * b.symmetry,
        1e-12
    ));
}

#[test]
fn valid_r_values_reference() {
    assert_eq!(
        valid_r_values(100.0, DEFAULT_MIN_HARMONY),
        vec![9, 10, 11, 13, 14, 17, 19, 20, 21, 25, 26, 50, 90, 95]
    );
    assert_eq!(valid_r_values(100.0, 0.6), vec![11, 17, 20]);
    assert_eq!(valid_r_values(100.0, 0.7), vec![20]);
    assert!(valid_r_values(100.0, 0.9).is_empty());
}

#[test]
fn valid_r_values_respect_cap_and_threshold() {
    for ring in [60.0, 120.0, 150.0, 200.0] {
        let cap = (ring * 0.95 as Real).floor() as u32;
        for r in valid_r_values(ring, 0.5) {
            assert!(r >= 1 && r <= cap);
            assert!(harmony(ring, r as Real) >= 0.5);
        }
    }
}

#[test]
fn valid_r_values_of_tiny_ring_is_empty() {
    assert!(valid_r_values(1.0, 0.0).is_empty());
    assert!(valid_r_values(0.0, 0.0).is_empty());
}

#[test]
fn nearest_valid_r_snaps_to_closest() {
    assert_eq!(nearest_valid_r(100.0, 5.0, 0.5), 9.0);
    assert_eq!(nearest_valid_r(100.0, 33.0, 0.5), 26.0);
    assert_eq!(nearest_valid_r(100.0, 20.0, 0.5), 20.0);
}

#[test]
fn nearest_valid_r_keeps_current_when_nothing_valid() {
    assert_eq!(nearest_valid_r(100.0, 5.0, 0.9), 5.0);
    assert_eq!(nearest_valid_r(100.0, 42.5, 0.9), 42.5);
}

#[test]
fn nearest_valid_r_prefers_earliest_on_tie() {
    // valid at 0.5 includes 21 and 25: 23 is equidistant
    assert_eq!(nearest_valid_r(100.0, 23.0, 0.5), 21.0);
}

#[test]
fn local_search_reference_moves() {
    assert_eq!(harmonize_gear_radius(100.0, 99.0, 0.5), 95.0);
    assert_eq!(harmonize_gear_radius(100.0, 37.0, 0.5), 26.0);
    assert_eq!(harmonize_gear_radius(100.0, 37.0, 0.3), 38.0);
    assert_eq!(harmonize_gear_radius(200.0, 77.0, 0.5), 70.0);
}

#[test]
fn local_search_keeps_current_without_improvement() {
    assert_eq!(harmonize_gear_radius(100.0, 93.0, 0.6), 93.0);
    assert_eq!(harmonize_gear_radius(97.0, 50.0, 0.6), 50.0);
}

#[test]
fn local_search_keeps_good_gear() {
    assert_eq!(harmonize_gear_radius(100.0, 20.0, 0.5), 20.0);
}

#[test]
fn custom_weights_change_the_score() {
    let symmetry_only = HarmonyConfig {
        complexity_weight: 0.0,
        organization_weight: 0.0,
        symmetry_weight: 1.0,
        ..HarmonyConfig::default()
    };
    assert!(symmetry_only.validate().is_ok());
    assert!(approx_eq(symmetry_only.score(100.0, 50.0), 1.0, 1e-12));
}

#[test]
fn closure_harmony_values() {
    assert!(approx_eq(closure_harmony(100.0, 40.0), 0.68, 1e-9));
    assert!(approx_eq(closure_harmony(100.0, 50.0), 0.9, 1e-9));
    assert_eq!(closure_harmony(100.0, 0.0), 0.0);
}
