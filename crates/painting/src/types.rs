use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use drawboard_ipc::{BrushKind, ExportFormat};

use crate::validation::{ValidationError, parse_hex_color};

/// Canvas-local coordinates in CSS pixels
pub type Point = glam::Vec2;

/// An opaque RGB color as entered through the hex color field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Color in surface format [r, g, b, a], components 0.0-1.0
    pub fn to_rgba_f32(self) -> [f32; 4] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            1.0,
        ]
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_color(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_hex_color(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Brush configuration read by the brush engine on every draw call.
///
/// This is a plain value: the engine receives a copy per call and never
/// mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushSettings {
    pub kind: BrushKind,
    /// Diameter in CSS pixels
    pub size: f32,
    pub color: Color,
    /// 0.0-1.0
    pub opacity: f32,
}

impl Default for BrushSettings {
    fn default() -> Self {
        Self {
            kind: BrushKind::Pencil,
            size: 5.0,
            color: Color::BLACK,
            opacity: 1.0,
        }
    }
}

impl BrushSettings {
    pub fn new(kind: BrushKind, size: f32, color: Color, opacity: f32) -> Self {
        Self {
            kind,
            size,
            color,
            opacity: opacity.clamp(0.0, 1.0),
        }
    }

    pub fn with_kind(mut self, kind: BrushKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size / 2.0
    }
}

/// What a single brush engine call put on the surface.
///
/// Primitives clipped away entirely, or drawn with zero size or opacity,
/// are not counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StrokeReport {
    /// Straight line segments (pencil)
    pub lines: u32,
    /// Filled circular dabs (brush)
    pub dabs: u32,
    /// Scattered dots (spray)
    pub dots: u32,
}

impl StrokeReport {
    pub fn is_empty(&self) -> bool {
        self.lines == 0 && self.dabs == 0 && self.dots == 0
    }
}
