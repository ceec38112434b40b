//! Geometry helpers and palette lookups shared across the crate.
//!
//! Arrowhead barb math, the rectangle type used for hit testing and bounding
//! boxes, segment intersection for the eraser, and the name/key mappings for
//! the drawing palette all live here.

use crate::draw::Color;
use crate::draw::color;

// ============================================================================
// Palette lookups
// ============================================================================

// Display name, selection key, and value for each palette slot. The key
// column drives quick color switching ('K' selects black since 'B' is blue).
const PALETTE: [(&str, char, Color); 8] = [
    ("Red", 'R', color::RED),
    ("Green", 'G', color::GREEN),
    ("Blue", 'B', color::BLUE),
    ("Yellow", 'Y', color::YELLOW),
    ("Orange", 'O', color::ORANGE),
    ("Pink", 'P', color::PINK),
    ("White", 'W', color::WHITE),
    ("Black", 'K', color::BLACK),
];

/// Resolves a color-selection key to its palette color, case-insensitively.
pub fn key_to_color(c: char) -> Option<Color> {
    let c = c.to_ascii_uppercase();
    PALETTE
        .iter()
        .find(|(_, key, _)| *key == c)
        .map(|&(_, _, color)| color)
}

/// Resolves a configured color name ("red", "orange", ...) to its palette
/// color, case-insensitively.
pub fn name_to_color(name: &str) -> Option<Color> {
    PALETTE
        .iter()
        .find(|(entry, _, _)| entry.eq_ignore_ascii_case(name))
        .map(|&(_, _, color)| color)
}

/// Names a color for display, or "Custom" when it is not close to any
/// palette slot.
///
/// Matching is approximate: every RGB component must land within 0.1 of the
/// palette value, so slightly tinted custom colors still read as custom.
pub fn color_to_name(color: &Color) -> &'static str {
    const TOLERANCE: f64 = 0.1;
    PALETTE
        .iter()
        .find(|(_, _, candidate)| {
            (color.r - candidate.r).abs() < TOLERANCE
                && (color.g - candidate.g).abs() < TOLERANCE
                && (color.b - candidate.b).abs() < TOLERANCE
        })
        .map(|&(name, _, _)| name)
        .unwrap_or("Custom")
}

// ============================================================================
// Arrowhead geometry
// ============================================================================

/// Computes the two barb endpoints of a V-shaped arrowhead.
///
/// The head sits at (x2, y2) and points along the shaft direction from
/// (x1, y1). Barbs are placed `length` pixels back from the tip and `width`
/// pixels apart across the shaft. A shaft shorter than one pixel has no
/// usable direction, so both barbs collapse onto the tip.
pub fn calculate_arrowhead(
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    length: f64,
    width: f64,
) -> [(f64, f64); 2] {
    let dx = (x2 - x1) as f64;
    let dy = (y2 - y1) as f64;
    let shaft = (dx * dx + dy * dy).sqrt();

    if shaft < 1.0 {
        return [(x2 as f64, y2 as f64); 2];
    }

    // Unit vectors along and across the shaft
    let (ux, uy) = (dx / shaft, dy / shaft);
    let (px, py) = (-uy, ux);

    let base_x = x2 as f64 - ux * length;
    let base_y = y2 as f64 - uy * length;
    let half = width / 2.0;

    [
        (base_x + px * half, base_y + py * half),
        (base_x - px * half, base_y - py * half),
    ]
}

// ============================================================================
// Rectangles and segments
// ============================================================================

/// Axis-aligned rectangle with a guaranteed positive area, used for bounding
/// boxes and eraser hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a rectangle, rejecting non-positive extents.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self {
            x,
            y,
            width,
            height,
        })
    }

    /// Builds a rectangle spanning min (inclusive) to max (exclusive) bounds.
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Returns true if the rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Point containment, edges inclusive.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    /// Rectangle overlap, touching edges inclusive.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.x + other.width
            && other.x <= self.x + self.width
            && self.y <= other.y + other.height
            && other.y <= self.y + self.height
    }
}

/// Tests whether segments P1P2 and P3P4 intersect.
///
/// Parametric form: with `d = (P2-P1) x (P4-P3)`, a `|d|` under the
/// parallel tolerance means no crossing is reported (collinear overlap
/// included). Otherwise the crossing parameters `t` and `u` are computed and
/// accepted only when both fall inside `[0, 1]`.
pub fn segments_intersect(p1: (f64, f64), p2: (f64, f64), p3: (f64, f64), p4: (f64, f64)) -> bool {
    const PARALLEL_TOLERANCE: f64 = 1e-9;

    let r = (p2.0 - p1.0, p2.1 - p1.1);
    let s = (p4.0 - p3.0, p4.1 - p3.1);

    let d = r.0 * s.1 - r.1 * s.0;
    if d.abs() < PARALLEL_TOLERANCE {
        return false;
    }

    let qp = (p3.0 - p1.0, p3.1 - p1.1);
    let t = (qp.0 * s.1 - qp.1 * s.0) / d;
    let u = (qp.0 * r.1 - qp.1 * r.0) / d;

    (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
}

/// Converts a corner-to-corner drag into ellipse center and radii.
pub fn ellipse_bounds(x1: i32, y1: i32, x2: i32, y2: i32) -> (i32, i32, i32, i32) {
    (
        (x1 + x2) / 2,
        (y1 + y2) / 2,
        (x2 - x1).abs() / 2,
        (y2 - y1).abs() / 2,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, ORANGE, RED, WHITE};

    #[test]
    fn arrowhead_barbs_straddle_the_shaft() {
        let [(lx, ly), (rx, ry)] = calculate_arrowhead(0, 0, 100, 0, 12.0, 8.0);
        assert!((lx - 88.0).abs() < f64::EPSILON);
        assert!((rx - 88.0).abs() < f64::EPSILON);
        assert!((ly + 4.0).abs() < f64::EPSILON);
        assert!((ry - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn arrowhead_collapses_on_a_degenerate_shaft() {
        let barbs = calculate_arrowhead(7, 3, 7, 3, 15.0, 9.0);
        assert_eq!(barbs, [(7.0, 3.0), (7.0, 3.0)]);
    }

    #[test]
    fn segments_crossing_at_right_angles_intersect() {
        assert!(segments_intersect(
            (0.0, 0.0),
            (10.0, 10.0),
            (0.0, 10.0),
            (10.0, 0.0)
        ));
    }

    #[test]
    fn parallel_and_collinear_segments_report_no_intersection() {
        assert!(!segments_intersect(
            (0.0, 0.0),
            (10.0, 0.0),
            (0.0, 1.0),
            (10.0, 1.0)
        ));
        assert!(!segments_intersect(
            (0.0, 0.0),
            (10.0, 0.0),
            (5.0, 0.0),
            (15.0, 0.0)
        ));
    }

    #[test]
    fn intersection_point_must_lie_on_both_segments() {
        // The infinite lines cross at (5, 5) but the second segment stops short
        assert!(!segments_intersect(
            (0.0, 0.0),
            (10.0, 10.0),
            (0.0, 10.0),
            (4.0, 6.0)
        ));
    }

    #[test]
    fn rect_containment_is_edge_inclusive() {
        let rect = Rect::new(4, 4, 2, 2).unwrap();
        assert!(rect.contains(4, 4));
        assert!(rect.contains(6, 6));
        assert!(!rect.contains(7, 5));
    }

    #[test]
    fn rect_intersection_detects_overlap_and_separation() {
        let a = Rect::new(0, 0, 10, 10).unwrap();
        let b = Rect::new(5, 5, 10, 10).unwrap();
        let c = Rect::new(20, 20, 3, 3).unwrap();
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn rect_rejects_non_positive_extents() {
        assert!(Rect::new(0, 0, 0, 5).is_none());
        assert!(Rect::from_min_max(10, 10, 10, 20).is_none());
    }

    #[test]
    fn ellipse_bounds_halve_the_dragged_extents() {
        assert_eq!(ellipse_bounds(2, 0, 14, 6), (8, 3, 6, 3));
        // Drag direction does not matter
        assert_eq!(ellipse_bounds(14, 6, 2, 0), (8, 3, 6, 3));
    }

    #[test]
    fn palette_lookups_by_key_and_name() {
        assert_eq!(key_to_color('r'), Some(RED));
        assert_eq!(key_to_color('K'), Some(BLACK));
        assert_eq!(key_to_color('q'), None);
        assert_eq!(name_to_color("ORANGE"), Some(ORANGE));
        assert_eq!(name_to_color("taupe"), None);
    }

    #[test]
    fn display_name_tolerates_small_component_drift() {
        assert_eq!(color_to_name(&WHITE), "White");
        assert_eq!(color_to_name(&Color::opaque(0.95, 0.02, 0.04)), "Red");
        assert_eq!(color_to_name(&Color::opaque(0.42, 0.42, 0.42)), "Custom");
    }
}
