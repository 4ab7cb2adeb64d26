//! Hypotrochoid / epitrochoid sampling
//!
//! A trochoid is traced by a pen fixed at distance `d` from the centre of a
//! gear of radius `r` rolling without slipping along a ring of radius `R`:
//!
//! ```text
//! hypotrochoid (inside):  x = (R - r)·cos θ + d·cos((R - r)/r · θ)
//!                         y = (R - r)·sin θ - d·sin((R - r)/r · θ)
//!
//! epitrochoid (outside):  x = (R + r)·cos θ - d·cos((R + r)/r · θ)
//!                         y = (R + r)·sin θ - d·sin((R + r)/r · θ)
//! ```
//!
//! The pattern closes after `r / gcd(R, r)` full sweeps of θ.

use crate::config::LayerDefaults;
use crate::float_types::{Real, TAU};
use crate::number_theory::gcd;
use geo::{Coord, LineString};
use nalgebra::{Point2, Rotation2};
use serde::{Deserialize, Serialize};

/// A single sample in a curve's local frame, centred at the origin.
pub type Point = Point2<Real>;

/// Default sampling budget (segments, so `DEFAULT_NUM_POINTS + 1` points).
pub const DEFAULT_NUM_POINTS: usize = 1000;

/// Which side of the ring the gear rolls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CurveKind {
    /// Gear rolls inside the fixed ring
    #[default]
    Hypotrochoid,
    /// Gear rolls outside the fixed ring
    Epitrochoid,
}

impl CurveKind {
    /// Distance from the ring centre to the gear centre.
    pub fn gear_center_distance(self, ring_radius: Real, gear_radius: Real) -> Real {
        match self {
            CurveKind::Hypotrochoid => ring_radius - gear_radius,
            CurveKind::Epitrochoid => ring_radius + gear_radius,
        }
    }
}

/// Everything the generator reads for one curve.
///
/// This is a plain value: the generator only borrows it, and layer edits
/// build a new value instead of mutating one in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveParameters {
    /// Fixed ring radius `R`
    pub ring_radius: Real,
    /// Rolling gear radius `r`, kept below `R`
    pub gear_radius: Real,
    /// Pen offset `d` from the gear centre, kept in `[0, r)`
    pub pen_offset: Real,
    /// Inside or outside rolling
    pub kind: CurveKind,
    /// Rigid rotation applied after generation, in radians
    pub start_angle: Real,
    /// Quantization step for `R`; `0` disables quantization
    pub tooth_size: u32,
    /// Minimum harmony the threshold-aware search aims for
    pub harmony_threshold: Real,
    /// Upper bound for ring edits
    pub max_ring_radius: Real,
    /// Upper bound for requested gear radii
    pub max_gear_radius: Real,
}

impl Default for CurveParameters {
    fn default() -> Self {
        LayerDefaults::default().parameters()
    }
}

impl CurveParameters {
    /// Shorthand for a hypotrochoid with the default limits and no rotation.
    pub fn hypotrochoid(ring_radius: Real, gear_radius: Real, pen_offset: Real) -> Self {
        Self {
            ring_radius,
            gear_radius,
            pen_offset,
            kind: CurveKind::Hypotrochoid,
            start_angle: 0.0,
            ..Self::default()
        }
    }

    /// Shorthand for an epitrochoid with the default limits and no rotation.
    pub fn epitrochoid(ring_radius: Real, gear_radius: Real, pen_offset: Real) -> Self {
        Self {
            kind: CurveKind::Epitrochoid,
            ..Self::hypotrochoid(ring_radius, gear_radius, pen_offset)
        }
    }

    /// Returns a copy rotated to `start_angle` radians.
    pub fn with_start_angle(&self, start_angle: Real) -> Self {
        Self {
            start_angle,
            ..self.clone()
        }
    }

    /// Number of full 2π sweeps needed for this curve to close.
    pub fn rotations(&self) -> Real {
        rotations(self.ring_radius, self.gear_radius)
    }

    /// Samples the curve with the default budget.
    pub fn points(&self) -> Vec<Point> {
        generate_curve(self, DEFAULT_NUM_POINTS)
    }
}

/// Number of 2π sweeps after which the curve closes: `r / gcd(R, r)`.
///
/// A zero radius has no meaningful closure and falls back to a single sweep.
pub fn rotations(ring_radius: Real, gear_radius: Real) -> Real {
    if ring_radius == 0.0 || gear_radius == 0.0 {
        tracing::trace!(ring_radius, gear_radius, "degenerate radius, using one rotation");
        return 1.0;
    }
    gear_radius / gcd(ring_radius, gear_radius)
}

/// Base hypotrochoid point at parameter `theta`.
#[inline]
pub fn hypotrochoid_point(ring_radius: Real, gear_radius: Real, pen_offset: Real, theta: Real) -> Point {
    let diff = CurveKind::Hypotrochoid.gear_center_distance(ring_radius, gear_radius);
    let k = diff / gear_radius;
    Point::new(
        diff * theta.cos() + pen_offset * (k * theta).cos(),
        diff * theta.sin() - pen_offset * (k * theta).sin(),
    )
}

/// Base epitrochoid point at parameter `theta`.
#[inline]
pub fn epitrochoid_point(ring_radius: Real, gear_radius: Real, pen_offset: Real, theta: Real) -> Point {
    let sum = CurveKind::Epitrochoid.gear_center_distance(ring_radius, gear_radius);
    let k = sum / gear_radius;
    Point::new(
        sum * theta.cos() - pen_offset * (k * theta).cos(),
        sum * theta.sin() - pen_offset * (k * theta).sin(),
    )
}

/// Rotates `point` about the origin by `angle` radians.
///
/// # Example
/// ```
/// use spirors::curve::{Point, rotate_point};
/// use spirors::float_types::FRAC_PI_2;
/// let p = rotate_point(Point::new(1.0, 0.0), FRAC_PI_2);
/// assert!(p.x.abs() < 1e-6 && (p.y - 1.0).abs() < 1e-6);
/// ```
#[inline]
pub fn rotate_point(point: Point, angle: Real) -> Point {
    Rotation2::new(angle) * point
}

/// Samples `num_points + 1` points of the curve described by `params`.
///
/// θ runs uniformly over `[0, 2π · rotations]`, both ends included, so the
/// first and last samples coincide for a closed curve. A non-zero
/// `start_angle` rotates every sample about the origin. `num_points == 0`
/// returns only the point at θ = 0.
///
/// Pathological inputs never fail; a zero radius simply uses one sweep.
///
/// # Example
/// ```
/// use spirors::curve::{CurveParameters, generate_curve};
/// let params = CurveParameters::hypotrochoid(100.0, 40.0, 20.0);
/// let points = generate_curve(&params, 1000);
/// assert_eq!(points.len(), 1001);
/// ```
pub fn generate_curve(params: &CurveParameters, num_points: usize) -> Vec<Point> {
    let CurveParameters {
        ring_radius,
        gear_radius,
        pen_offset,
        kind,
        start_angle,
        ..
    } = *params;

    let sweeps = rotations(ring_radius, gear_radius);
    let theta_max = TAU * sweeps;
    tracing::trace!(ring_radius, gear_radius, sweeps, num_points, "sampling trochoid");

    let base = |theta: Real| match kind {
        CurveKind::Hypotrochoid => hypotrochoid_point(ring_radius, gear_radius, pen_offset, theta),
        CurveKind::Epitrochoid => epitrochoid_point(ring_radius, gear_radius, pen_offset, theta),
    };

    if num_points == 0 {
        let p = base(0.0);
        return vec![if start_angle != 0.0 { rotate_point(p, start_angle) } else { p }];
    }

    (0..=num_points)
        .map(|i| {
            let theta = (i as Real / num_points as Real) * theta_max;
            let p = base(theta);
            if start_angle != 0.0 {
                rotate_point(p, start_angle)
            } else {
                p
            }
        })
        .collect()
}

/// The sampled curve as a `geo` polyline.
pub fn curve_line_string(params: &CurveParameters, num_points: usize) -> LineString<Real> {
    generate_curve(params, num_points)
        .into_iter()
        .map(|p| Coord { x: p.x, y: p.y })
        .collect::<Vec<_>>()
        .into()
}

/// Largest distance from the origin over `points`, `0` for an empty slice.
///
/// Renderers use it to fit every layer inside a canvas.
pub fn bounding_extent(points: &[Point]) -> Real {
    points
        .iter()
        .map(|p| p.coords.norm())
        .fold(0.0, Real::max)
}
