//! Geometric hit testing for the eraser tool.
//!
//! The eraser sweeps a square test region across the canvas and removes every
//! element the region touches. Each shape kind gets its own intersection
//! rule, chosen to match how the shape is rendered rather than a single
//! generic test:
//!
//! - freehand strokes test vertex containment (a cheap approximation that
//!   skips segment interpolation),
//! - straight lines test endpoints plus edge crossings,
//! - rectangles and ellipses test bounding boxes only,
//! - arrows and text test their rendered bounding box.
//!
//! The scan is `O(elements x points-per-element)` with no spatial index; fine
//! for annotation volumes, and the first place to revisit if canvases grow
//! into the thousands of elements.

use super::shape::Shape;
use crate::util::{Rect, segments_intersect};

/// Square test region centered on the eraser cursor.
#[derive(Debug, Clone, Copy)]
pub struct EraserRegion {
    rect: Rect,
}

impl EraserRegion {
    /// Builds the test region: a square of side `size` centered on (x, y).
    ///
    /// Sizes below 2 pixels are rounded up so the region never degenerates.
    pub fn centered(x: i32, y: i32, size: f64) -> Self {
        let side = (size.round() as i32).max(2);
        let half = side / 2;
        let rect = Rect {
            x: x - half,
            y: y - half,
            width: side,
            height: side,
        };
        Self { rect }
    }

    /// The region's bounding rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Returns true if the region touches the given shape.
    pub fn hits(&self, shape: &Shape) -> bool {
        match shape {
            Shape::Freehand { points, .. } => self.hits_polyline(points),
            Shape::Line { x1, y1, x2, y2, .. } => self.hits_segment(*x1, *y1, *x2, *y2),
            Shape::Rect { x, y, w, h, .. } => self.hits_aabb(*x, *y, *w, *h),
            Shape::Ellipse { cx, cy, rx, ry, .. } => {
                // Bounding-box test only; the true curve is not evaluated
                self.hits_aabb(cx - rx, cy - ry, rx * 2, ry * 2)
            }
            Shape::Arrow { .. } | Shape::Text { .. } => match shape.bounding_box() {
                Some(bounds) => self.rect.intersects(&bounds),
                None => false,
            },
        }
    }

    /// Any vertex of the point sequence inside the region counts as a hit.
    fn hits_polyline(&self, points: &[(i32, i32)]) -> bool {
        points.iter().any(|&(px, py)| self.rect.contains(px, py))
    }

    /// A segment hits if either endpoint is inside the region, or the segment
    /// crosses any of the region's four edges.
    fn hits_segment(&self, x1: i32, y1: i32, x2: i32, y2: i32) -> bool {
        if self.rect.contains(x1, y1) || self.rect.contains(x2, y2) {
            return true;
        }

        let p1 = (x1 as f64, y1 as f64);
        let p2 = (x2 as f64, y2 as f64);

        let left = self.rect.x as f64;
        let top = self.rect.y as f64;
        let right = (self.rect.x + self.rect.width) as f64;
        let bottom = (self.rect.y + self.rect.height) as f64;

        let corners = [
            ((left, top), (right, top)),
            ((right, top), (right, bottom)),
            ((right, bottom), (left, bottom)),
            ((left, bottom), (left, top)),
        ];

        corners
            .iter()
            .any(|&(a, b)| segments_intersect(p1, p2, a, b))
    }

    fn hits_aabb(&self, x: i32, y: i32, w: i32, h: i32) -> bool {
        // Normalize in case of negative extents
        let (x, w) = if w < 0 { (x + w, -w) } else { (x, w) };
        let (y, h) = if h < 0 { (y + h, -h) } else { (y, h) };
        let other = Rect {
            x,
            y,
            width: w.max(1),
            height: h.max(1),
        };
        self.rect.intersects(&other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::RED;
    use crate::draw::shape::arrow_head_for_thickness;
    use crate::draw::{FontDescriptor, Shape};

    fn region(x: i32, y: i32, size: f64) -> EraserRegion {
        EraserRegion::centered(x, y, size)
    }

    #[test]
    fn freehand_hits_only_when_a_vertex_is_inside() {
        let stroke = Shape::Freehand {
            points: vec![(0, 0), (10, 10), (20, 20)],
            color: RED,
            thick: 2.0,
        };

        assert!(region(10, 10, 4.0).hits(&stroke));
        // Between vertices: the segment passes through but no vertex is inside
        assert!(!region(5, 5, 2.0).hits(&stroke));
        assert!(!region(50, 50, 10.0).hits(&stroke));
    }

    #[test]
    fn line_hit_by_endpoint_containment() {
        let line = Shape::Line {
            x1: 0,
            y1: 0,
            x2: 100,
            y2: 0,
            color: RED,
            thick: 2.0,
        };
        assert!(region(0, 0, 6.0).hits(&line));
        assert!(region(100, 1, 6.0).hits(&line));
    }

    #[test]
    fn line_hit_by_edge_crossing_without_endpoint_containment() {
        // Segment (0,0)-(10,10) passes through the region [4,4]-[6,6]
        let line = Shape::Line {
            x1: 0,
            y1: 0,
            x2: 10,
            y2: 10,
            color: RED,
            thick: 2.0,
        };
        assert!(region(5, 5, 2.0).hits(&line));
    }

    #[test]
    fn line_miss_when_segment_passes_outside() {
        let line = Shape::Line {
            x1: 0,
            y1: 0,
            x2: 10,
            y2: 10,
            color: RED,
            thick: 2.0,
        };
        assert!(!region(9, 1, 2.0).hits(&line));
    }

    #[test]
    fn rect_and_ellipse_hit_by_bounding_box() {
        let rect = Shape::Rect {
            x: 10,
            y: 10,
            w: 20,
            h: 20,
            color: RED,
            thick: 2.0,
        };
        // Center of the rectangle outline still hits: bounding-box test only
        assert!(region(20, 20, 4.0).hits(&rect));
        assert!(!region(50, 50, 4.0).hits(&rect));

        let ellipse = Shape::Ellipse {
            cx: 100,
            cy: 100,
            rx: 30,
            ry: 10,
            color: RED,
            thick: 2.0,
        };
        // Inside the box but outside the true curve still hits
        assert!(region(72, 92, 4.0).hits(&ellipse));
        assert!(!region(100, 130, 4.0).hits(&ellipse));
    }

    #[test]
    fn arrow_hit_uses_rendered_bounds_including_head() {
        let (head_length, head_width) = arrow_head_for_thickness(4.0);
        let arrow = Shape::Arrow {
            x1: 0,
            y1: 0,
            x2: 100,
            y2: 0,
            color: RED,
            thick: 4.0,
            head_length,
            head_width,
        };
        // Above the shaft but within the head's half-width near the tip
        assert!(region(95, -5, 4.0).hits(&arrow));
        assert!(!region(50, -30, 4.0).hits(&arrow));
    }

    #[test]
    fn text_hit_uses_rendered_bounds() {
        let text = Shape::Text {
            x: 10,
            y: 10,
            text: "note".to_string(),
            color: RED,
            size: 20.0,
            font: FontDescriptor::default(),
        };
        assert!(region(20, 20, 4.0).hits(&text));
        assert!(!region(10, 120, 4.0).hits(&text));
    }

    #[test]
    fn region_never_degenerates() {
        let r = EraserRegion::centered(5, 5, 0.0);
        assert!(r.rect().is_valid());
    }
}
