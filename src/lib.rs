//! Layered **hypotrochoid / epitrochoid** ("spirograph") curves with a
//! ring/gear **harmony** heuristic that keeps radius ratios pleasing.
//!
//! The numeric core is pure and stateless:
//! - [`curve::generate_curve`] samples a curve from a [`CurveParameters`] value
//! - [`harmony::harmony`] scores a ring/gear pair in `[0, 1]`
//! - [`harmony::valid_r_values`] / [`harmony::nearest_valid_r`] search the integer gear radii
//! - [`teeth::optimal_tooth_sizes`] suggests slider steps dividing the ring
//!
//! [`layer::LayerStack`] drives edits through the harmony engine before a new
//! parameter value is committed, and the [`io`] exporters draw the result.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - **svg-io**: export layer stacks as SVG documents
//! - **image-io**: rasterize layer stacks to PNG with blend modes
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to sample the layers of a stack concurrently

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod config;
pub mod curve;
pub mod errors;
pub mod float_types;
pub mod harmony;
pub mod io;
pub mod layer;
pub mod number_theory;
pub mod style;
pub mod teeth;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use config::{HarmonyConfig, LayerDefaults};
pub use curve::{CurveKind, CurveParameters, Point, generate_curve, rotate_point};
pub use errors::{SpiroError, SpiroResult};
pub use harmony::{harmony, nearest_valid_r, valid_r_values};
pub use layer::{Layer, LayerStack};
pub use teeth::optimal_tooth_sizes;
