//! Visual payload carried by each layer.
//!
//! Nothing in the numeric core reads these values; renderers do.

use crate::errors::SpiroError;
use crate::float_types::Real;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Stroke styling for one layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Style {
    pub color: Rgb,
    pub stroke_width: Real,
    pub blend_mode: BlendMode,
    pub line_style: LineStyle,
}

impl Default for Style {
    fn default() -> Self {
        crate::config::LayerDefaults::default().style
    }
}

/// 8-bit sRGB color, written as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb`, lowercase.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Shifts the hue by `degrees` in HSL space, keeping saturation and lightness.
    ///
    /// Grays have no hue and come back unchanged.
    pub fn rotate_hue(self, degrees: Real) -> Self {
        let r = self.r as Real / 255.0;
        let g = self.g as Real / 255.0;
        let b = self.b as Real / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return self;
        }

        let d = max - min;
        let s = if l > 0.5 { d / (2.0 - max - min) } else { d / (max + min) };
        let mut h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        h /= 6.0;

        h = (h + degrees / 360.0) % 1.0;
        if h < 0.0 {
            h += 1.0;
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;

        Self::new(
            channel(hue_to_rgb(p, q, h + 1.0 / 3.0)),
            channel(hue_to_rgb(p, q, h)),
            channel(hue_to_rgb(p, q, h - 1.0 / 3.0)),
        )
    }

    /// Channels as `[0, 1]` floats.
    pub fn to_unit(self) -> [Real; 3] {
        [
            self.r as Real / 255.0,
            self.g as Real / 255.0,
            self.b as Real / 255.0,
        ]
    }
}

fn hue_to_rgb(p: Real, q: Real, mut t: Real) -> Real {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 0.5 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

#[inline]
fn channel(unit: Real) -> u8 {
    (unit * 255.0).round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = SpiroError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || SpiroError::InvalidParameter(format!("malformed color {s:?}, expected #rrggbb"));
        let hex = s.strip_prefix('#').ok_or_else(malformed)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(malformed());
        }
        let component = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).map_err(|_| malformed());
        Ok(Self::new(component(0..2)?, component(2..4)?, component(4..6)?))
    }
}

impl TryFrom<String> for Rgb {
    type Error = SpiroError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Rgb> for String {
    fn from(value: Rgb) -> Self {
        value.to_hex()
    }
}

/// CSS compositing modes a layer can be drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
    Hue,
    Saturation,
    Color,
    Luminosity,
}

impl BlendMode {
    pub const ALL: [BlendMode; 16] = [
        BlendMode::Normal,
        BlendMode::Multiply,
        BlendMode::Screen,
        BlendMode::Overlay,
        BlendMode::Darken,
        BlendMode::Lighten,
        BlendMode::ColorDodge,
        BlendMode::ColorBurn,
        BlendMode::HardLight,
        BlendMode::SoftLight,
        BlendMode::Difference,
        BlendMode::Exclusion,
        BlendMode::Hue,
        BlendMode::Saturation,
        BlendMode::Color,
        BlendMode::Luminosity,
    ];

    /// Name used by CSS `mix-blend-mode`.
    pub const fn css_name(self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
            BlendMode::Darken => "darken",
            BlendMode::Lighten => "lighten",
            BlendMode::ColorDodge => "color-dodge",
            BlendMode::ColorBurn => "color-burn",
            BlendMode::HardLight => "hard-light",
            BlendMode::SoftLight => "soft-light",
            BlendMode::Difference => "difference",
            BlendMode::Exclusion => "exclusion",
            BlendMode::Hue => "hue",
            BlendMode::Saturation => "saturation",
            BlendMode::Color => "color",
            BlendMode::Luminosity => "luminosity",
        }
    }
}

/// Stroke pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    /// Dash pattern (on, off) scaled by the stroke width; `None` for solid lines.
    pub fn dash_pattern(self, stroke_width: Real) -> Option<[Real; 2]> {
        let w = stroke_width.max(1.0);
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some([6.0 * w, 4.0 * w]),
            LineStyle::Dotted => Some([w, 2.0 * w]),
        }
    }
}
