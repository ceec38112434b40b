//! RGBA color type and the fixed annotation palette.

/// An RGBA color with floating-point components in the 0.0 - 1.0 range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    /// Creates a color from RGBA components in the 0.0 - 1.0 range.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a fully opaque color from unit-range RGB components.
    pub const fn opaque(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates an opaque color from 8-bit RGB components, as found in config
    /// files and color pickers.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::opaque(r as f64 / 255.0, g as f64 / 255.0, b as f64 / 255.0)
    }
}

// The drawing palette. Pink doubles as magenta; black is reached through the
// 'K' key since 'B' is taken by blue (see util::key_to_color).
pub const RED: Color = Color::opaque(1.0, 0.0, 0.0);
pub const GREEN: Color = Color::opaque(0.0, 1.0, 0.0);
pub const BLUE: Color = Color::opaque(0.0, 0.0, 1.0);
pub const YELLOW: Color = Color::opaque(1.0, 1.0, 0.0);
pub const ORANGE: Color = Color::opaque(1.0, 0.5, 0.0);
pub const PINK: Color = Color::opaque(1.0, 0.0, 1.0);
pub const WHITE: Color = Color::opaque(1.0, 1.0, 1.0);
pub const BLACK: Color = Color::opaque(0.0, 0.0, 0.0);
