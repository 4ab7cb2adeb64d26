//! Ring/gear harmony scoring and the searches built on it
//!
//! ## Scoring
//!
//! `harmony(R, r)` blends three sub-scores in `[0, 1]`:
//!
//! ```text
//! complexity   = G(r / gcd(R, r); μ = 16,    σ = 8)
//! organization = G(r / R;         μ = 0.175, σ = 0.125)
//! symmetry     = ½·min(1, shared / 3) + ½·alignment
//!
//! harmony      = 0.25·complexity + 0.25·organization + 0.5·symmetry
//! ```
//!
//! where `G(x; μ, σ) = exp(-(x - μ)² / 2σ²)`, `shared` counts the factors of
//! `R` in `[5, R/4]` that are also factors of `r` in `[5, r/2]`, and
//! `alignment = 1 - 2·|R/r - round(R/r)|`. A gear above 25 sharing no factor
//! with its ring has its symmetry halved.
//!
//! Too few rotations look trivial, too many look noisy; a mid-sized gear
//! neither crowds the ring nor vanishes; shared factors give visible
//! rotational symmetry. All constants live in [`HarmonyConfig`].
//!
//! ## Searching
//!
//! [`valid_r_values`] lists every integer gear in `[1, ⌊0.95·R⌋]` reaching a
//! harmony floor, [`nearest_valid_r`] snaps an edit onto that list, and
//! [`harmonize_gear_radius`] runs the bounded local search used when a
//! layer's own threshold is missed.

use crate::config::HarmonyConfig;
use crate::float_types::Real;
use crate::number_theory::{factors_in_range, gcd, integral_part};

/// Harmony floor used by the edit flow when none is given.
pub const DEFAULT_MIN_HARMONY: Real = 0.5;

/// The three sub-scores behind a harmony value.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HarmonyBreakdown {
    pub complexity: Real,
    pub organization: Real,
    pub symmetry: Real,
    /// Weighted blend of the three, the value [`harmony`] returns
    pub total: Real,
}

#[inline]
fn gaussian(x: Real, peak: Real, spread: Real) -> Real {
    let z = x - peak;
    (-(z * z) / (2.0 * spread * spread)).exp()
}

impl HarmonyConfig {
    /// Sub-scores and total for a ring/gear pair.
    ///
    /// Non-positive or non-finite radii score zero everywhere.
    pub fn breakdown(&self, ring_radius: Real, gear_radius: Real) -> HarmonyBreakdown {
        if !(ring_radius > 0.0 && gear_radius > 0.0) || !ring_radius.is_finite() || !gear_radius.is_finite() {
            return HarmonyBreakdown::default();
        }

        let rotations = gear_radius / gcd(ring_radius, gear_radius);
        let complexity = if rotations.is_finite() {
            gaussian(rotations, self.complexity_peak, self.complexity_spread)
        } else {
            0.0
        };

        let organization = gaussian(
            gear_radius / ring_radius,
            self.organization_peak,
            self.organization_spread,
        );

        let symmetry = self.symmetry(ring_radius, gear_radius);

        let total = (self.complexity_weight * complexity
            + self.organization_weight * organization
            + self.symmetry_weight * symmetry)
            .clamp(0.0, 1.0);

        HarmonyBreakdown {
            complexity,
            organization,
            symmetry,
            total,
        }
    }

    /// Harmony of a ring/gear pair, in `[0, 1]`.
    #[inline]
    pub fn score(&self, ring_radius: Real, gear_radius: Real) -> Real {
        self.breakdown(ring_radius, gear_radius).total
    }

    fn symmetry(&self, ring_radius: Real, gear_radius: Real) -> Real {
        let ring_factors = factors_in_range(
            integral_part(ring_radius),
            self.min_shared_factor,
            ring_radius / self.ring_factor_divisor,
        );
        let gear_factors = factors_in_range(
            integral_part(gear_radius),
            self.min_shared_factor,
            gear_radius / self.gear_factor_divisor,
        );
        // both lists are ascending and short
        let shared = gear_factors
            .iter()
            .filter(|&&f| ring_factors.binary_search(&f).is_ok())
            .count();

        let factor_term = (shared as Real / self.shared_factor_saturation as Real).min(1.0);

        let ratio = ring_radius / gear_radius;
        let alignment = (1.0 - 2.0 * (ratio - ratio.round()).abs()).clamp(0.0, 1.0);

        let mut symmetry = 0.5 * factor_term + 0.5 * alignment;
        if shared == 0 && gear_radius > self.penalty_gear_radius {
            symmetry *= self.unshared_penalty;
        }
        symmetry
    }

    /// Every integer gear radius in `[1, ⌊search_cap·R⌋]` scoring at least
    /// `min_harmony`, ascending. May be empty.
    pub fn valid_r_values(&self, ring_radius: Real, min_harmony: Real) -> Vec<u32> {
        let cap = (ring_radius * self.search_cap).floor();
        if !(cap >= 1.0) {
            return Vec::new();
        }
        (1..=cap as u32)
            .filter(|&r| self.score(ring_radius, r as Real) >= min_harmony)
            .collect()
    }

    /// The valid gear radius closest to `current`; the earliest one wins a
    /// tie. With no valid radius at all `current` comes back unchanged.
    pub fn nearest_valid_r(&self, ring_radius: Real, current: Real, min_harmony: Real) -> Real {
        let valid = self.valid_r_values(ring_radius, min_harmony);
        let Some(&first) = valid.first() else {
            tracing::debug!(ring_radius, current, min_harmony, "no valid gear radius, keeping current");
            return current;
        };

        let nearest = valid.iter().skip(1).fold(first, |best, &candidate| {
            if (candidate as Real - current).abs() < (best as Real - current).abs() {
                candidate
            } else {
                best
            }
        });
        nearest as Real
    }

    /// Bounded local search around `current` for a gear reaching `threshold`.
    ///
    /// Returns `current` untouched when it already meets the threshold.
    /// Otherwise offsets `1..=search_window` are tried outward, `+offset`
    /// before `-offset`, and the first candidate in `[1, R)` whose harmony is
    /// at least `threshold` and strictly above the best seen so far is
    /// returned immediately. This is deliberately not a best-in-window search:
    /// it yields the first improvement in that order. When nothing qualifies
    /// `current` is kept.
    pub fn harmonize_gear_radius(&self, ring_radius: Real, current: Real, threshold: Real) -> Real {
        let current_harmony = self.score(ring_radius, current);
        if current_harmony >= threshold {
            return current;
        }

        let best_harmony = current_harmony;
        for offset in 1..=self.search_window {
            let offset = offset as Real;
            for candidate in [current + offset, current - offset] {
                if candidate < 1.0 || candidate >= ring_radius {
                    continue;
                }
                let candidate_harmony = self.score(ring_radius, candidate);
                if candidate_harmony >= threshold && candidate_harmony > best_harmony {
                    tracing::debug!(
                        ring_radius,
                        from = current,
                        to = candidate,
                        harmony = candidate_harmony,
                        threshold,
                        "gear radius moved to reach harmony threshold"
                    );
                    return candidate;
                }
            }
        }

        tracing::trace!(ring_radius, current, threshold, "no harmonic gear in search window");
        current
    }
}

/// Harmony of a ring/gear pair with the default settings, in `[0, 1]`.
/// Zero whenever either radius is zero.
///
/// # Example
/// ```
/// use spirors::harmony::harmony;
/// assert_eq!(harmony(100.0, 0.0), 0.0);
/// assert!(harmony(100.0, 50.0) > harmony(100.0, 99.0));
/// ```
pub fn harmony(ring_radius: Real, gear_radius: Real) -> Real {
    HarmonyConfig::default().score(ring_radius, gear_radius)
}

/// [`HarmonyConfig::valid_r_values`] with the default settings.
pub fn valid_r_values(ring_radius: Real, min_harmony: Real) -> Vec<u32> {
    HarmonyConfig::default().valid_r_values(ring_radius, min_harmony)
}

/// [`HarmonyConfig::nearest_valid_r`] with the default settings.
pub fn nearest_valid_r(ring_radius: Real, current: Real, min_harmony: Real) -> Real {
    HarmonyConfig::default().nearest_valid_r(ring_radius, current, min_harmony)
}

/// [`HarmonyConfig::harmonize_gear_radius`] with the default settings.
pub fn harmonize_gear_radius(ring_radius: Real, current: Real, threshold: Real) -> Real {
    HarmonyConfig::default().harmonize_gear_radius(ring_radius, current, threshold)
}

/// First-order "closes quickly" score: `0.4·gcd/min(R, r) + 0.4·min(1, 5/rotations) + 0.2·min/max`.
///
/// Cheaper than [`harmony`] and blind to symmetry; kept for callers that only
/// need a rough closure indicator.
pub fn closure_harmony(ring_radius: Real, gear_radius: Real) -> Real {
    if ring_radius == 0.0 || gear_radius == 0.0 {
        return 0.0;
    }
    let divisor = gcd(ring_radius, gear_radius);
    let smaller = ring_radius.min(gear_radius);
    let larger = ring_radius.max(gear_radius);

    let gcd_ratio = divisor / smaller;
    let rotation_factor = (5.0 / (gear_radius / divisor)).min(1.0);
    let simple_ratio = smaller / larger;

    gcd_ratio * 0.4 + rotation_factor * 0.4 + simple_ratio * 0.2
}
