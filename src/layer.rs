//! Ordered layer collection and the parameter-edit flow.
//!
//! [`LayerStack`] owns every layer. Edits never touch a layer in place: each
//! one derives a new [`CurveParameters`] value and swaps it in at the layer's
//! index, so a snapshot handed to the generator (possibly on another thread)
//! is never aliased by a later edit.

use crate::config::{HarmonyConfig, LayerDefaults};
use crate::curve::{CurveKind, CurveParameters, DEFAULT_NUM_POINTS, Point, generate_curve};
use crate::errors::{SpiroError, SpiroResult};
use crate::float_types::Real;
use crate::style::Style;
use crate::teeth::quantize;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One drawable curve with its styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub id: u64,
    pub name: String,
    pub visible: bool,
    pub params: CurveParameters,
    pub style: Style,
}

impl Layer {
    /// Points of this layer's curve with the default sampling budget.
    pub fn points(&self) -> Vec<Point> {
        generate_curve(&self.params, DEFAULT_NUM_POINTS)
    }
}

/// Clamps the pen inside the gear: `d = min(d, r - 1)`, never negative.
#[inline]
pub fn clamp_pen_offset(pen_offset: Real, gear_radius: Real) -> Real {
    pen_offset.min(gear_radius - 1.0).max(0.0)
}

/// New parameters after the ring radius is edited.
///
/// The value is snapped to the tooth grid and capped at `max_ring_radius`;
/// the gear then moves to the nearest harmonic radius for the new ring, is
/// kept strictly inside it, and the pen is clamped again.
pub fn with_ring_radius(params: &CurveParameters, value: Real, harmony: &HarmonyConfig) -> CurveParameters {
    let ring_radius = quantize(value, params.tooth_size).min(params.max_ring_radius);
    let mut gear_radius = harmony.nearest_valid_r(ring_radius, params.gear_radius, harmony.min_harmony);
    let ceiling = (ring_radius * harmony.search_cap).floor().max(1.0);
    if gear_radius > ceiling {
        gear_radius = ceiling;
    }
    tracing::debug!(ring_radius, gear_radius, "ring radius edited");

    CurveParameters {
        ring_radius,
        gear_radius,
        pen_offset: clamp_pen_offset(params.pen_offset, gear_radius),
        ..params.clone()
    }
}

/// New parameters after the gear radius is edited.
///
/// The value is limited to `[1, max_gear_radius]`, snapped to the nearest
/// harmonic radius and, if still below the layer's `harmony_threshold`,
/// nudged by the bounded local search. Whatever comes out is kept below the
/// ring at `⌊search_cap·R⌋` (at least 1), and the pen is clamped afterwards.
pub fn with_gear_radius(params: &CurveParameters, value: Real, harmony: &HarmonyConfig) -> CurveParameters {
    let requested = value.min(params.max_gear_radius).max(1.0);
    let snapped = harmony.nearest_valid_r(params.ring_radius, requested, harmony.min_harmony);
    let searched = harmony.harmonize_gear_radius(params.ring_radius, snapped, params.harmony_threshold);
    let ceiling = (params.ring_radius * harmony.search_cap).floor().max(1.0);
    let gear_radius = searched.min(ceiling);
    tracing::debug!(requested, gear_radius, "gear radius edited");

    CurveParameters {
        gear_radius,
        pen_offset: clamp_pen_offset(params.pen_offset, gear_radius),
        ..params.clone()
    }
}

/// Ordered set of layers plus the active selection.
#[derive(Debug, Clone)]
pub struct LayerStack {
    layers: Vec<Layer>,
    active: Option<usize>,
    next_id: u64,
    defaults: LayerDefaults,
    harmony: HarmonyConfig,
}

impl Default for LayerStack {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerStack {
    /// Empty stack with the default configuration.
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            active: None,
            next_id: 1,
            defaults: LayerDefaults::default(),
            harmony: HarmonyConfig::default(),
        }
    }

    /// Empty stack with custom defaults and harmony settings, both validated.
    pub fn with_config(defaults: LayerDefaults, harmony: HarmonyConfig) -> SpiroResult<Self> {
        defaults.validate()?;
        harmony.validate()?;
        Ok(Self {
            defaults,
            harmony,
            ..Self::new()
        })
    }

    pub fn harmony_config(&self) -> &HarmonyConfig {
        &self.harmony
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Layer> {
        self.layers.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active(&self) -> Option<&Layer> {
        self.active.and_then(|index| self.layers.get(index))
    }

    pub fn set_active(&mut self, index: usize) -> SpiroResult<()> {
        self.check(index)?;
        self.active = Some(index);
        Ok(())
    }

    fn check(&self, index: usize) -> SpiroResult<()> {
        if index < self.layers.len() {
            Ok(())
        } else {
            Err(SpiroError::LayerOutOfRange {
                index,
                len: self.layers.len(),
            })
        }
    }

    /// Appends a layer and makes it active, returning its index.
    ///
    /// The new layer copies the last layer's parameters and style (or the
    /// configured defaults for the first one), with the color hue rotated by
    /// `hue_step` degrees and the pen clamped inside the gear.
    pub fn add_layer(&mut self) -> usize {
        let (params, style) = match self.layers.last() {
            Some(base) => (
                base.params.clone(),
                Style {
                    color: base.style.color.rotate_hue(self.defaults.hue_step),
                    ..base.style.clone()
                },
            ),
            None => (self.defaults.parameters(), self.defaults.style.clone()),
        };

        let params = CurveParameters {
            pen_offset: clamp_pen_offset(params.pen_offset, params.gear_radius),
            ..params
        };

        let index = self.layers.len();
        let layer = Layer {
            id: self.next_id,
            name: format!("Layer {}", index + 1),
            visible: true,
            params,
            style,
        };
        self.next_id += 1;
        tracing::debug!(id = layer.id, index, "layer added");

        self.layers.push(layer);
        self.active = Some(index);
        index
    }

    /// Swaps in a new value for the layer at `index`.
    pub fn replace(&mut self, index: usize, layer: Layer) -> SpiroResult<()> {
        self.check(index)?;
        self.layers[index] = layer;
        Ok(())
    }

    /// Removes and returns the layer at `index`. The first remaining layer
    /// becomes active, or none if the stack is now empty.
    pub fn remove(&mut self, index: usize) -> SpiroResult<Layer> {
        self.check(index)?;
        let removed = self.layers.remove(index);
        self.active = if self.layers.is_empty() { None } else { Some(0) };
        Ok(removed)
    }

    /// Moves a layer to a new position; the moved layer becomes active.
    pub fn move_layer(&mut self, from: usize, to: usize) -> SpiroResult<()> {
        self.check(from)?;
        self.check(to)?;
        let layer = self.layers.remove(from);
        self.layers.insert(to, layer);
        self.active = Some(to);
        Ok(())
    }

    fn update_params(
        &mut self,
        index: usize,
        edit: impl FnOnce(&CurveParameters, &HarmonyConfig) -> CurveParameters,
    ) -> SpiroResult<&Layer> {
        self.check(index)?;
        let current = &self.layers[index];
        let layer = Layer {
            params: edit(&current.params, &self.harmony),
            ..current.clone()
        };
        self.layers[index] = layer;
        Ok(&self.layers[index])
    }

    /// See [`with_ring_radius`].
    pub fn set_ring_radius(&mut self, index: usize, value: Real) -> SpiroResult<&Layer> {
        self.update_params(index, |params, harmony| with_ring_radius(params, value, harmony))
    }

    /// See [`with_gear_radius`].
    pub fn set_gear_radius(&mut self, index: usize, value: Real) -> SpiroResult<&Layer> {
        self.update_params(index, |params, harmony| with_gear_radius(params, value, harmony))
    }

    /// Sets the pen offset, clamped to `[0, r - 1]`.
    pub fn set_pen_offset(&mut self, index: usize, value: Real) -> SpiroResult<&Layer> {
        self.update_params(index, |params, _| CurveParameters {
            pen_offset: clamp_pen_offset(value, params.gear_radius),
            ..params.clone()
        })
    }

    /// Sets the rigid rotation, in radians.
    pub fn set_start_angle(&mut self, index: usize, radians: Real) -> SpiroResult<&Layer> {
        self.update_params(index, |params, _| params.with_start_angle(radians))
    }

    pub fn set_kind(&mut self, index: usize, kind: CurveKind) -> SpiroResult<&Layer> {
        self.update_params(index, |params, _| CurveParameters {
            kind,
            ..params.clone()
        })
    }

    /// Sets the ring quantization step; `0` turns quantization off. The ring
    /// radius is snapped on its next edit.
    pub fn set_tooth_size(&mut self, index: usize, tooth_size: u32) -> SpiroResult<&Layer> {
        self.update_params(index, |params, _| CurveParameters {
            tooth_size,
            ..params.clone()
        })
    }

    pub fn set_harmony_threshold(&mut self, index: usize, threshold: Real) -> SpiroResult<&Layer> {
        if !(0.0..=1.0).contains(&threshold) {
            return Err(SpiroError::InvalidParameter(format!(
                "harmony threshold must be in [0, 1], got {threshold}"
            )));
        }
        self.update_params(index, |params, _| CurveParameters {
            harmony_threshold: threshold,
            ..params.clone()
        })
    }

    pub fn set_visible(&mut self, index: usize, visible: bool) -> SpiroResult<()> {
        self.check(index)?;
        let layer = Layer {
            visible,
            ..self.layers[index].clone()
        };
        self.replace(index, layer)
    }

    pub fn rename(&mut self, index: usize, name: impl Into<String>) -> SpiroResult<()> {
        self.check(index)?;
        let layer = Layer {
            name: name.into(),
            ..self.layers[index].clone()
        };
        self.replace(index, layer)
    }

    pub fn set_style(&mut self, index: usize, style: Style) -> SpiroResult<()> {
        self.check(index)?;
        let layer = Layer {
            style,
            ..self.layers[index].clone()
        };
        self.replace(index, layer)
    }

    /// Curves of every visible layer, in stack order, with their indices.
    #[cfg(not(feature = "parallel"))]
    pub fn curves(&self, num_points: usize) -> Vec<(usize, Vec<Point>)> {
        self.layers
            .iter()
            .enumerate()
            .filter(|(_, layer)| layer.visible)
            .map(|(index, layer)| (index, generate_curve(&layer.params, num_points)))
            .collect()
    }

    /// Curves of every visible layer, in stack order, with their indices.
    /// Each layer is sampled on the rayon pool from its own parameter snapshot.
    #[cfg(feature = "parallel")]
    pub fn curves(&self, num_points: usize) -> Vec<(usize, Vec<Point>)> {
        let snapshots: Vec<(usize, CurveParameters)> = self
            .layers
            .iter()
            .enumerate()
            .filter(|(_, layer)| layer.visible)
            .map(|(index, layer)| (index, layer.params.clone()))
            .collect();

        snapshots
            .into_par_iter()
            .map(|(index, params)| (index, generate_curve(&params, num_points)))
            .collect()
    }
}

impl<'a> IntoIterator for &'a LayerStack {
    type Item = &'a Layer;
    type IntoIter = std::slice::Iter<'a, Layer>;

    fn into_iter(self) -> Self::IntoIter {
        self.layers.iter()
    }
}
