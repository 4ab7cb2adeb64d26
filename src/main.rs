// main.rs
//
// Builds a small layer stack, reports the harmony of each layer and writes
// the drawing as SVG and PNG into ./out. `RUST_LOG=debug` shows every
// auto-correction made by the harmony engine.

use spirors::curve::CurveKind;
use spirors::float_types::PI;
use spirors::harmony::HarmonyBreakdown;
use spirors::style::BlendMode;
use spirors::{LayerStack, SpiroResult, optimal_tooth_sizes};
use std::fs;

const WIDTH: u32 = 800;
const HEIGHT: u32 = 800;

fn main() -> SpiroResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    fs::create_dir_all("out")?;

    let mut stack = LayerStack::new();

    // 1) default hypotrochoid, ring pulled down to 150
    let first = stack.add_layer();
    stack.set_ring_radius(first, 150.0)?;

    // 2) duplicate, switch to an epitrochoid with a small gear
    let second = stack.add_layer();
    stack.set_kind(second, CurveKind::Epitrochoid)?;
    stack.set_ring_radius(second, 120.0)?;
    stack.set_gear_radius(second, 24.0)?;
    stack.set_pen_offset(second, 18.0)?;

    // 3) duplicate again, rotated and multiplied over the others
    let third = stack.add_layer();
    stack.set_start_angle(third, PI / 7.0)?;
    let style = stack
        .get(third)
        .map(|layer| layer.style.clone())
        .unwrap_or_default();
    stack.set_style(
        third,
        spirors::style::Style {
            blend_mode: BlendMode::Multiply,
            ..style
        },
    )?;

    let config = stack.harmony_config().clone();
    for layer in &stack {
        let p = &layer.params;
        let HarmonyBreakdown {
            complexity,
            organization,
            symmetry,
            total,
        } = config.breakdown(p.ring_radius, p.gear_radius);
        tracing::info!(
            name = %layer.name,
            ring = p.ring_radius,
            gear = p.gear_radius,
            pen = p.pen_offset,
            rotations = p.rotations(),
            complexity,
            organization,
            symmetry,
            harmony = total,
            teeth = ?optimal_tooth_sizes(p.ring_radius),
            "layer"
        );
    }

    #[cfg(feature = "svg-io")]
    spirors::io::svg::write_svg(&stack, WIDTH, HEIGHT, "out/spirograph.svg")?;

    #[cfg(feature = "image-io")]
    spirors::io::png::write_png(&stack, WIDTH, HEIGHT, "out/spirograph.png")?;

    Ok(())
}
