//! Export of a [`LayerStack`](crate::layer::LayerStack) to vector and raster images.
//!
//! Both exporters place the curve origin at the canvas centre, skip hidden
//! layers and draw in stack order.

#[cfg(feature = "svg-io")]
pub mod svg;

#[cfg(feature = "image-io")]
pub mod png;

use crate::curve::Point;
use crate::float_types::Real;

/// Translates a curve sample from its local frame to canvas coordinates.
#[inline]
pub(crate) fn to_canvas(point: &Point, width: u32, height: u32) -> (Real, Real) {
    (
        width as Real / 2.0 + point.x,
        height as Real / 2.0 + point.y,
    )
}
