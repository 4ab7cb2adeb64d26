//! Tooth sizes: slider steps that divide a ring radius evenly.

use crate::float_types::Real;

/// Fallback steps offered when a ring has no usable divisor in the search window.
pub const STANDARD_TOOTH_SIZES: [u32; 5] = [24, 30, 36, 45, 60];

/// How far `R mod i` may sit from `0` (or from `i`) and still count as a divisor.
pub const DIVISIBILITY_TOLERANCE: Real = 0.1;

/// Tooth sizes in `max(4, ⌊R/20⌋) ..= min(24, ⌊R/4⌋)` that divide `R` within
/// [`DIVISIBILITY_TOLERANCE`], ascending.
///
/// The result is empty for primes and for rings too small to have a window;
/// see [`suggested_tooth_sizes`] for the version with a fallback.
///
/// # Example
/// ```
/// use spirors::teeth::optimal_tooth_sizes;
/// assert_eq!(optimal_tooth_sizes(100.0), vec![5, 10, 20]);
/// ```
pub fn optimal_tooth_sizes(ring_radius: Real) -> Vec<u32> {
    if !(ring_radius > 0.0) || !ring_radius.is_finite() {
        return Vec::new();
    }
    let min_teeth = ((ring_radius / 20.0).floor() as u32).max(4);
    let max_teeth = ((ring_radius / 4.0).floor() as u32).min(24);

    (min_teeth..=max_teeth)
        .filter(|&i| {
            let step = i as Real;
            let remainder = ring_radius % step;
            remainder < DIVISIBILITY_TOLERANCE || remainder > step - DIVISIBILITY_TOLERANCE
        })
        .collect()
}

/// [`optimal_tooth_sizes`], or [`STANDARD_TOOTH_SIZES`] when that is empty.
pub fn suggested_tooth_sizes(ring_radius: Real) -> Vec<u32> {
    let sizes = optimal_tooth_sizes(ring_radius);
    if sizes.is_empty() {
        tracing::debug!(ring_radius, "no divisor tooth size, using standard sizes");
        STANDARD_TOOTH_SIZES.to_vec()
    } else {
        sizes
    }
}

/// How well both radii sit on a tooth grid, in `[0.5, 1]` for a positive tooth.
///
/// `1 − (rError + RError) / 2`, each error being the distance of `x mod tooth`
/// to the nearest multiple, normalized by the tooth. A non-positive tooth
/// scores `0`.
pub fn tooth_harmony(ring_radius: Real, gear_radius: Real, tooth: Real) -> Real {
    if !(tooth > 0.0) {
        return 0.0;
    }
    let grid_error = |value: Real| {
        let remainder = value % tooth;
        remainder.min(tooth - remainder) / tooth
    };
    1.0 - (grid_error(gear_radius) + grid_error(ring_radius)) / 2.0
}

/// Best-ranked suggested tooth size for a ring/gear pair by [`tooth_harmony`];
/// the smallest size wins a tie.
pub fn best_tooth_size(ring_radius: Real, gear_radius: Real) -> Option<u32> {
    suggested_tooth_sizes(ring_radius)
        .into_iter()
        .fold(None, |best: Option<(u32, Real)>, size| {
            let score = tooth_harmony(ring_radius, gear_radius, size as Real);
            match best {
                Some((_, best_score)) if best_score >= score => best,
                _ => Some((size, score)),
            }
        })
        .map(|(size, _)| size)
}

/// Snaps `value` to the nearest positive multiple of `tooth`. `tooth == 0`
/// leaves the value as it is.
pub fn quantize(value: Real, tooth: u32) -> Real {
    if tooth == 0 {
        return value;
    }
    let step = tooth as Real;
    ((value / step).round() * step).max(step)
}
