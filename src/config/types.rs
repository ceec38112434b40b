//! Configuration type definitions.

use super::enums::{ActivationMode, ColorSpec};
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the default appearance of drawing tools when the overlay first
/// opens. Users can change these values at runtime; the "changed"
/// notifications keep live previews in sync.
#[derive(Debug, Serialize, Deserialize)]
pub struct DrawingConfig {
    /// Starting pen color: a palette name or an RGB array like `[255, 0, 0]`
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default pen thickness in pixels (clamped to the min/max bounds below)
    #[serde(default = "default_thickness")]
    pub default_thickness: f64,

    /// Smallest thickness reachable through adjustments
    #[serde(default = "default_thickness_min")]
    pub thickness_min: f64,

    /// Largest thickness reachable through adjustments
    #[serde(default = "default_thickness_max")]
    pub thickness_max: f64,

    /// Text-mode font size in points, clamped to 8.0 - 72.0
    #[serde(default = "default_font_size")]
    pub default_font_size: f64,

    /// Family name for text annotations ("Sans", "Monospace", ...)
    #[serde(default = "default_font_family")]
    pub font_family: String,

    /// Named weight ("normal", "bold", "light") or numeric 100-900
    #[serde(default = "default_font_weight")]
    pub font_weight: String,

    /// "normal", "italic", or "oblique"
    #[serde(default = "default_font_style")]
    pub font_style: String,

    /// Maximum number of elements on the canvas (0 = unlimited)
    #[serde(default)]
    pub max_elements: usize,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_thickness: default_thickness(),
            thickness_min: default_thickness_min(),
            thickness_max: default_thickness_max(),
            default_font_size: default_font_size(),
            font_family: default_font_family(),
            font_weight: default_font_weight(),
            font_style: default_font_style(),
            max_elements: 0,
        }
    }
}

/// Eraser settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct EraserConfig {
    /// Side of the square eraser test region in pixels (valid range: 4 - 200)
    #[serde(default = "default_eraser_size")]
    pub size: f64,
}

impl Default for EraserConfig {
    fn default() -> Self {
        Self {
            size: default_eraser_size(),
        }
    }
}

/// Hotkey settings.
///
/// # Example TOML
/// ```toml
/// [hotkey]
/// keys = ["ControlLeft", "Alt", "D"]   # or ["Ctrl+Alt+D"]
/// mode = "hold"                        # or "lock"
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct HotkeyConfig {
    /// Key names forming the combination; all must be held simultaneously.
    /// Entries may use the compound "Ctrl+Alt+D" form.
    #[serde(default = "default_hotkey_keys")]
    pub keys: Vec<String>,

    /// Hold: active while the combination is held.
    /// Lock: each full press-release cycle toggles.
    #[serde(default)]
    pub mode: ActivationMode,
}

impl Default for HotkeyConfig {
    fn default() -> Self {
        Self {
            keys: default_hotkey_keys(),
            mode: ActivationMode::default(),
        }
    }
}

// =============================================================================
// Default value functions (referenced by the serde attributes above)
// =============================================================================

fn default_color() -> ColorSpec {
    ColorSpec::Name("red".to_string())
}

fn default_thickness() -> f64 {
    3.0
}

fn default_thickness_min() -> f64 {
    1.0
}

fn default_thickness_max() -> f64 {
    20.0
}

fn default_font_size() -> f64 {
    32.0
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_font_weight() -> String {
    "bold".to_string()
}

fn default_font_style() -> String {
    "normal".to_string()
}

fn default_eraser_size() -> f64 {
    24.0
}

fn default_hotkey_keys() -> Vec<String> {
    vec![
        "ControlLeft".to_string(),
        "Alt".to_string(),
        "D".to_string(),
    ]
}
