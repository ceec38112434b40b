//! Configuration enum types.

use crate::draw::{Color, color::*};
use log::warn;
use serde::{Deserialize, Serialize};

/// How the hotkey toggles drawing mode.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivationMode {
    /// Drawing mode stays active only while the combination is physically held.
    #[default]
    Hold,
    /// Each full press-release cycle toggles drawing mode on or off.
    Lock,
}

/// A color as written in the config file: a palette name like `"orange"`, or
/// an RGB triple like `[255, 128, 0]` (0-255 per component).
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum ColorSpec {
    /// One of the palette names (red, green, blue, yellow, orange, pink,
    /// white, black).
    Name(String),
    /// A custom 8-bit RGB color, rendered fully opaque.
    Rgb([u8; 3]),
}

impl ColorSpec {
    /// Resolves the configured value to a concrete [`Color`].
    ///
    /// A name the palette does not know falls back to red with a warning, so
    /// a typo in the config never breaks a drawing session.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => crate::util::name_to_color(name).unwrap_or_else(|| {
                warn!("Unknown color '{}', using red", name);
                RED
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgb8(*r, *g, *b),
        }
    }
}
