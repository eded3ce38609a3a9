//! Style configuration for the map renderer.
//!
//! Every field is independently optional in the source document and has a
//! declared default; out-of-range values are rejected at load time, never
//! clamped.

use anyhow::{bail, Result};
use serde::de::{self, Deserializer};
use serde::Deserialize;

const RANGE_LIMIT: f64 = 100_000.0;

/// A style color: named, RGB, or RGBA with opacity.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    Named(String),
    Rgb(u8, u8, u8),
    Rgba(u8, u8, u8, f64),
}

impl Color {
    /// Serialize to the SVG attribute form: the bare name, `rgb(r,g,b)`, or
    /// `rgba(r,g,b,o)` with the opacity printed compactly.
    pub fn to_svg(&self) -> String {
        match self {
            Color::Named(name) => name.clone(),
            Color::Rgb(r, g, b) => format!("rgb({r},{g},{b})"),
            Color::Rgba(r, g, b, opacity) => {
                format!("rgba({r},{g},{b},{})", format_opacity(*opacity))
            }
        }
    }
}

/// Opacity with trailing zeros and a trailing decimal point stripped.
fn format_opacity(opacity: f64) -> String {
    let mut text = format!("{opacity:.6}");
    while text.ends_with('0') {
        text.pop();
    }
    if text.ends_with('.') {
        text.pop();
    }
    text
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Named(String),
            Channels(Vec<serde_json::Number>),
        }

        fn channel<E: de::Error>(number: &serde_json::Number) -> Result<u8, E> {
            match number.as_u64() {
                Some(value) if value <= 255 => Ok(value as u8),
                _ => Err(E::custom("color channel must be an integer in [0, 255]")),
            }
        }

        match Repr::deserialize(deserializer)? {
            Repr::Named(name) => Ok(Color::Named(name)),
            Repr::Channels(channels) => match channels.as_slice() {
                [r, g, b] => Ok(Color::Rgb(channel(r)?, channel(g)?, channel(b)?)),
                [r, g, b, opacity] => {
                    let opacity = opacity
                        .as_f64()
                        .filter(|o| (0.0..=1.0).contains(o))
                        .ok_or_else(|| de::Error::custom("opacity must be in [0.0, 1.0]"))?;
                    Ok(Color::Rgba(channel(r)?, channel(g)?, channel(b)?, opacity))
                }
                _ => Err(de::Error::custom("color array must have 3 (RGB) or 4 (RGBA) elements")),
            },
        }
    }
}

/// A label offset in canvas pixels, read from a two-element `[dx, dy]` array.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Offset(pub f64, pub f64);

impl Offset {
    #[inline] pub fn dx(&self) -> f64 { self.0 }
    #[inline] pub fn dy(&self) -> f64 { self.1 }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    pub width: f64,
    pub height: f64,
    pub padding: f64,
    pub line_width: f64,
    pub stop_radius: f64,
    pub bus_label_font_size: u32,
    pub bus_label_offset: Offset,
    pub stop_label_font_size: u32,
    pub stop_label_offset: Offset,
    pub underlayer_color: Color,
    pub underlayer_width: f64,
    pub color_palette: Vec<Color>,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 1200.0,
            padding: 50.0,
            line_width: 14.0,
            stop_radius: 5.0,
            bus_label_font_size: 20,
            bus_label_offset: Offset(7.0, 15.0),
            stop_label_font_size: 20,
            stop_label_offset: Offset(7.0, -3.0),
            underlayer_color: Color::Named("white".to_owned()),
            underlayer_width: 3.0,
            color_palette: Vec::new(),
        }
    }
}

impl RenderSettings {
    /// Reject out-of-range values. Colors validate their own channels during
    /// deserialization.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("line_width", self.line_width),
            ("stop_radius", self.stop_radius),
            ("underlayer_width", self.underlayer_width),
        ] {
            if !(0.0..=RANGE_LIMIT).contains(&value) {
                bail!("{name} must be in range [0, 100000]");
            }
        }
        if self.padding < 0.0 || self.padding >= self.width.min(self.height) / 2.0 {
            bail!("padding must be >= 0 and < min(width, height)/2");
        }
        for (name, size) in [
            ("bus_label_font_size", self.bus_label_font_size),
            ("stop_label_font_size", self.stop_label_font_size),
        ] {
            if size > RANGE_LIMIT as u32 {
                bail!("{name} must be in range [0, 100000]");
            }
        }
        for (name, offset) in [
            ("bus_label_offset", self.bus_label_offset),
            ("stop_label_offset", self.stop_label_offset),
        ] {
            if offset.dx().abs() > RANGE_LIMIT || offset.dy().abs() > RANGE_LIMIT {
                bail!("{name} values must be in range [-100000, 100000]");
            }
        }
        Ok(())
    }
}
