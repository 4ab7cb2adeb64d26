//! Tunable settings for the harmony heuristic and for freshly created layers.
//!
//! Both structs implement `Default` with the production values, can be
//! loaded through serde from any format the caller picks, and expose a
//! `validate()` that reports the first out-of-range field.

use crate::curve::{CurveKind, CurveParameters};
use crate::errors::{SpiroError, SpiroResult};
use crate::float_types::Real;
use crate::style::{BlendMode, LineStyle, Rgb, Style};
use serde::{Deserialize, Serialize};

/// Harmony scoring and search settings.
///
/// The score blends three sub-scores:
/// `complexity_weight·complexity + organization_weight·organization + symmetry_weight·symmetry`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarmonyConfig {
    /// Rotation count that looks most interesting.
    pub complexity_peak: Real,
    /// Gaussian spread (σ) around `complexity_peak`.
    pub complexity_spread: Real,

    /// Preferred `r / R` ratio.
    pub organization_peak: Real,
    /// Gaussian spread (σ) around `organization_peak`.
    pub organization_spread: Real,

    /// Smallest factor that counts as a non-trivial shared factor.
    pub min_shared_factor: Real,
    /// Ring factors are considered up to `R / ring_factor_divisor`.
    pub ring_factor_divisor: Real,
    /// Gear factors are considered up to `r / gear_factor_divisor`.
    pub gear_factor_divisor: Real,
    /// Number of shared factors at which the factor term saturates.
    pub shared_factor_saturation: usize,
    /// Gears larger than this with no shared factor get penalized.
    pub penalty_gear_radius: Real,
    /// Multiplier applied to the symmetry score by that penalty.
    pub unshared_penalty: Real,

    pub complexity_weight: Real,
    pub organization_weight: Real,
    pub symmetry_weight: Real,

    /// `valid_r_values` stops at `floor(search_cap · R)`.
    pub search_cap: Real,
    /// Offsets tried on each side by the threshold-aware search.
    pub search_window: u32,
    /// Harmony required by `valid_r_values` / `nearest_valid_r` when editing.
    pub min_harmony: Real,
}

impl Default for HarmonyConfig {
    fn default() -> Self {
        Self {
            complexity_peak: 16.0,
            complexity_spread: 8.0,
            organization_peak: 0.175,
            organization_spread: 0.125,
            min_shared_factor: 5.0,
            ring_factor_divisor: 4.0,
            gear_factor_divisor: 2.0,
            shared_factor_saturation: 3,
            penalty_gear_radius: 25.0,
            unshared_penalty: 0.5,
            complexity_weight: 0.25,
            organization_weight: 0.25,
            symmetry_weight: 0.5,
            search_cap: 0.95,
            search_window: 20,
            min_harmony: 0.5,
        }
    }
}

impl HarmonyConfig {
    /// Validate the harmony configuration.
    pub fn validate(&self) -> SpiroResult<()> {
        if !(self.complexity_spread > 0.0) {
            return Err(invalid(format!(
                "complexity_spread must be > 0, got {}",
                self.complexity_spread
            )));
        }
        if !(self.organization_spread > 0.0) {
            return Err(invalid(format!(
                "organization_spread must be > 0, got {}",
                self.organization_spread
            )));
        }
        if !(self.ring_factor_divisor > 0.0) || !(self.gear_factor_divisor > 0.0) {
            return Err(invalid(format!(
                "factor divisors must be > 0, got ring={} gear={}",
                self.ring_factor_divisor, self.gear_factor_divisor
            )));
        }
        if self.shared_factor_saturation == 0 {
            return Err(invalid("shared_factor_saturation must be > 0".to_string()));
        }
        if !(0.0..=1.0).contains(&self.unshared_penalty) {
            return Err(invalid(format!(
                "unshared_penalty must be in [0, 1], got {}",
                self.unshared_penalty
            )));
        }
        for (name, weight) in [
            ("complexity_weight", self.complexity_weight),
            ("organization_weight", self.organization_weight),
            ("symmetry_weight", self.symmetry_weight),
        ] {
            if !(0.0..=1.0).contains(&weight) {
                return Err(invalid(format!("{name} must be in [0, 1], got {weight}")));
            }
        }
        let total = self.complexity_weight + self.organization_weight + self.symmetry_weight;
        if (total - 1.0).abs() > 1e-3 {
            return Err(invalid(format!("weights must sum to 1, got {total}")));
        }
        if !(self.search_cap > 0.0 && self.search_cap < 1.0) {
            return Err(invalid(format!(
                "search_cap must be in (0, 1), got {}",
                self.search_cap
            )));
        }
        if self.search_window == 0 {
            return Err(invalid("search_window must be > 0".to_string()));
        }
        if !(0.0..=1.0).contains(&self.min_harmony) {
            return Err(invalid(format!(
                "min_harmony must be in [0, 1], got {}",
                self.min_harmony
            )));
        }
        Ok(())
    }
}

/// Values a brand-new layer starts from when there is no layer to copy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerDefaults {
    pub ring_radius: Real,
    pub gear_radius: Real,
    pub pen_offset: Real,
    pub kind: CurveKind,
    pub start_angle: Real,
    pub tooth_size: u32,
    pub harmony_threshold: Real,
    pub max_ring_radius: Real,
    pub max_gear_radius: Real,
    pub style: Style,
    /// Hue shift, in degrees, applied when a layer is duplicated.
    pub hue_step: Real,
}

impl Default for LayerDefaults {
    fn default() -> Self {
        Self {
            ring_radius: 200.0,
            gear_radius: 75.0,
            pen_offset: 50.0,
            kind: CurveKind::Hypotrochoid,
            start_angle: 0.0,
            tooth_size: 1,
            harmony_threshold: 0.1,
            max_ring_radius: 300.0,
            max_gear_radius: 150.0,
            style: Style {
                color: Rgb::new(0x30, 0x60, 0xff),
                stroke_width: 2.0,
                blend_mode: BlendMode::Normal,
                line_style: LineStyle::Solid,
            },
            hue_step: 15.0,
        }
    }
}

impl LayerDefaults {
    /// Curve parameters for a new layer, with `d` clamped below `r`.
    pub fn parameters(&self) -> CurveParameters {
        CurveParameters {
            ring_radius: self.ring_radius,
            gear_radius: self.gear_radius,
            pen_offset: self.pen_offset.min(self.gear_radius - 1.0),
            kind: self.kind,
            start_angle: self.start_angle,
            tooth_size: self.tooth_size,
            harmony_threshold: self.harmony_threshold,
            max_ring_radius: self.max_ring_radius,
            max_gear_radius: self.max_gear_radius,
        }
    }

    /// Validate the layer defaults.
    pub fn validate(&self) -> SpiroResult<()> {
        if !(self.ring_radius > 0.0) {
            return Err(invalid(format!(
                "ring_radius must be > 0, got {}",
                self.ring_radius
            )));
        }
        if !(self.gear_radius > 0.0 && self.gear_radius < self.ring_radius) {
            return Err(invalid(format!(
                "gear_radius must be in (0, ring_radius), got {}",
                self.gear_radius
            )));
        }
        if self.pen_offset < 0.0 {
            return Err(invalid(format!(
                "pen_offset must be >= 0, got {}",
                self.pen_offset
            )));
        }
        if self.max_ring_radius < self.ring_radius || self.max_gear_radius < self.gear_radius {
            return Err(invalid(
                "max_ring_radius / max_gear_radius must not be below the defaults".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.harmony_threshold) {
            return Err(invalid(format!(
                "harmony_threshold must be in [0, 1], got {}",
                self.harmony_threshold
            )));
        }
        if !(self.style.stroke_width > 0.0) {
            return Err(invalid(format!(
                "stroke_width must be > 0, got {}",
                self.style.stroke_width
            )));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> SpiroError {
    SpiroError::InvalidConfig(msg)
}
