//! Font descriptor and nominal text extents.

/// The font an external renderer should use for a text annotation.
///
/// Travels with each text element so preview and finalized text stay
/// consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontDescriptor {
    /// Family name, e.g. "Sans" or "Monospace".
    pub family: String,

    /// Named weight ("normal", "bold", "light") or numeric 100-900.
    pub weight: String,

    /// "normal", "italic", or "oblique".
    pub style: String,
}

impl FontDescriptor {
    pub fn new(family: String, weight: String, style: String) -> Self {
        Self {
            family,
            weight,
            style,
        }
    }
}

impl Default for FontDescriptor {
    fn default() -> Self {
        Self {
            family: "Sans".to_string(),
            weight: "bold".to_string(),
            style: "normal".to_string(),
        }
    }
}

// Nominal glyph metrics relative to the font size. Rendering happens outside
// this crate, so extents only need to be stable and monotonic in the text for
// hit testing and caret placement.
const ADVANCE_RATIO: f64 = 0.6;
const LINE_HEIGHT_RATIO: f64 = 1.2;

/// Estimates the rendered extents of `text` at the given size in pixels.
///
/// Multi-line text (embedded `\n`) measures as the widest line by the total
/// line count. Empty text measures as zero.
pub fn text_extents(text: &str, size: f64) -> (f64, f64) {
    if text.is_empty() {
        return (0.0, 0.0);
    }

    let mut max_chars = 0usize;
    let mut lines = 0usize;
    for line in text.split('\n') {
        lines += 1;
        max_chars = max_chars.max(line.chars().count());
    }

    let width = max_chars as f64 * size * ADVANCE_RATIO;
    let height = lines as f64 * size * LINE_HEIGHT_RATIO;
    (width, height)
}

/// Nominal horizontal advance of one character at the given size.
pub fn char_advance(size: f64) -> f64 {
    size * ADVANCE_RATIO
}

/// Nominal height of one text line at the given size.
pub fn line_height(size: f64) -> f64 {
    size * LINE_HEIGHT_RATIO
}
