//! SVG export: one stroked `<path>` per visible layer.

use super::to_canvas;
use crate::errors::SpiroResult;
use crate::curve::{DEFAULT_NUM_POINTS, Point};
use crate::layer::{Layer, LayerStack};
use std::path::Path as FsPath;
use ::svg::Document;
use ::svg::node::element::Path;
use ::svg::node::element::path::Data;

/// Builds the `<path>` element for one layer's sampled curve.
///
/// Returns `None` for an empty point list.
pub fn layer_path(layer: &Layer, points: &[Point], width: u32, height: u32) -> Option<Path> {
    let (first, rest) = points.split_first()?;

    let (x0, y0) = to_canvas(first, width, height);
    let data = rest.iter().fold(
        Data::new().move_to((x0 as f32, y0 as f32)),
        |data, p| {
            let (x, y) = to_canvas(p, width, height);
            data.line_to((x as f32, y as f32))
        },
    );

    let style = &layer.style;
    let mut path = Path::new()
        .set("d", data)
        .set("fill", "none")
        .set("stroke", style.color.to_hex())
        .set("stroke-width", style.stroke_width.to_string())
        .set("style", format!("mix-blend-mode: {}", style.blend_mode.css_name()));

    if let Some([on, off]) = style.line_style.dash_pattern(style.stroke_width) {
        path = path.set("stroke-dasharray", format!("{on} {off}"));
    }
    Some(path)
}

/// SVG document with every visible layer of `stack`, sampled with `num_points` segments.
pub fn to_svg_with(stack: &LayerStack, width: u32, height: u32, num_points: usize) -> Document {
    let document = Document::new()
        .set("width", width.to_string())
        .set("height", height.to_string())
        .set("viewBox", format!("0 0 {width} {height}"));

    stack
        .curves(num_points)
        .into_iter()
        .filter_map(|(index, points)| {
            let layer = stack.get(index)?;
            layer_path(layer, &points, width, height)
        })
        .fold(document, |document, path| document.add(path))
}

/// SVG document with every visible layer of `stack` at the default sampling budget.
///
/// # Example
/// ```
/// use spirors::layer::LayerStack;
/// use spirors::io::svg::to_svg;
/// let mut stack = LayerStack::new();
/// stack.add_layer();
/// let markup = to_svg(&stack, 800, 600).to_string();
/// assert!(markup.contains("<path"));
/// ```
pub fn to_svg(stack: &LayerStack, width: u32, height: u32) -> Document {
    to_svg_with(stack, width, height, DEFAULT_NUM_POINTS)
}

/// Writes [`to_svg`] output to `path`.
pub fn write_svg(stack: &LayerStack, width: u32, height: u32, path: impl AsRef<FsPath>) -> SpiroResult<()> {
    let document = to_svg(stack, width, height);
    ::svg::save(path.as_ref(), &document)?;
    tracing::info!(path = %path.as_ref().display(), layers = stack.len(), "svg written");
    Ok(())
}
