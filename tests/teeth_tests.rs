use spirors::float_types::Real;
use spirors::optimal_tooth_sizes;
use spirors::teeth::{
    STANDARD_TOOTH_SIZES, best_tooth_size, quantize, suggested_tooth_sizes, tooth_harmony,
};

mod support;
use support::approx_eq;

#[test]
fn optimal_tooth_sizes_reference() {
    assert_eq!(optimal_tooth_sizes(100.0), vec![5, 10, 20]);
    assert_eq!(optimal_tooth_sizes(200.0), vec![10, 20]);
    assert_eq!(optimal_tooth_sizes(150.0), vec![10, 15]);
    assert_eq!(optimal_tooth_sizes(120.0), vec![6, 8, 10, 12, 15, 20, 24]);
    assert_eq!(optimal_tooth_sizes(300.0), vec![15, 20]);
}

#[test]
fn prime_and_tiny_rings_have_no_tooth_size() {
    assert!(optimal_tooth_sizes(97.0).is_empty());
    assert!(optimal_tooth_sizes(7.0).is_empty());
    assert!(optimal_tooth_sizes(0.0).is_empty());
    assert!(optimal_tooth_sizes(-100.0).is_empty());
}

#[test]
fn tooth_sizes_stay_in_window() {
    for ring in (20..=400).step_by(7) {
        let ring = ring as Real;
        for size in optimal_tooth_sizes(ring) {
            assert!((4..=24).contains(&size), "{size} for {ring}");
            assert!(size as Real >= (ring / 20.0).floor());
        }
    }
}

#[test]
fn suggested_sizes_fall_back_to_standard() {
    assert_eq!(suggested_tooth_sizes(97.0), STANDARD_TOOTH_SIZES.to_vec());
    assert_eq!(suggested_tooth_sizes(100.0), vec![5, 10, 20]);
}

#[test]
fn tooth_harmony_reference() {
    assert!(approx_eq(tooth_harmony(100.0, 40.0, 10.0), 1.0, 1e-12));
    assert!(approx_eq(tooth_harmony(100.0, 45.0, 10.0), 0.75, 1e-12));
    assert!(approx_eq(tooth_harmony(100.0, 43.0, 10.0), 0.85, 1e-12));
    assert_eq!(tooth_harmony(100.0, 40.0, 0.0), 0.0);
}

#[test]
fn best_tooth_size_prefers_smallest_on_tie() {
    assert_eq!(best_tooth_size(100.0, 40.0), Some(5));
    assert_eq!(best_tooth_size(120.0, 45.0), Some(15));
    assert_eq!(best_tooth_size(97.0, 50.0), Some(24));
}

#[test]
fn quantize_snaps_to_grid() {
    assert_eq!(quantize(123.0, 10), 120.0);
    assert_eq!(quantize(126.0, 10), 130.0);
    assert_eq!(quantize(123.4, 1), 123.0);
    assert_eq!(quantize(123.4, 0), 123.4);
}

#[test]
fn near_integer_rings_keep_their_divisors() {
    // R mod i just above 0
    assert_eq!(optimal_tooth_sizes(100.05), vec![5, 10, 20]);
    // R mod i just below i; the window also opens at 4 since ⌊99.95/20⌋ = 4
    assert_eq!(optimal_tooth_sizes(99.95), vec![4, 5, 10, 20]);
    assert_eq!(optimal_tooth_sizes(120.05), vec![6, 8, 10, 12, 15, 20, 24]);
}

#[test]
fn remainders_outside_band_are_rejected() {
    assert!(optimal_tooth_sizes(100.15).is_empty());
    assert!(optimal_tooth_sizes(99.85).is_empty());
}
