//! Shape definitions for screen annotations.

use super::color::Color;
use super::font::{self, FontDescriptor};
use crate::util::{self, Rect};

/// A finished (or in-preview) annotation primitive.
///
/// Every variant carries its own color and sizing so elements render
/// independently of the style active when they were drawn.
#[derive(Clone, Debug, PartialEq)]
pub enum Shape {
    /// Freehand stroke: the polyline traced by a pointer drag.
    Freehand {
        points: Vec<(i32, i32)>,
        color: Color,
        thick: f64,
    },
    /// Straight segment between two clicked points.
    Line {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
        thick: f64,
    },
    /// Rectangle outline, anchored at its top-left corner.
    Rect {
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        color: Color,
        thick: f64,
    },
    /// Ellipse outline around a center point with per-axis radii.
    Ellipse {
        cx: i32,
        cy: i32,
        rx: i32,
        ry: i32,
        color: Color,
        thick: f64,
    },
    /// Arrow shaft with a V head at (x2, y2).
    Arrow {
        x1: i32,
        y1: i32,
        x2: i32,
        y2: i32,
        color: Color,
        thick: f64,
        /// Head length, derived from the stroke thickness.
        head_length: f64,
        /// Head width, derived from the stroke thickness.
        head_width: f64,
    },
    /// Text block anchored at its top-left corner.
    Text {
        x: i32,
        y: i32,
        text: String,
        color: Color,
        /// Font size in points.
        size: f64,
        font: FontDescriptor,
    },
}

/// Arrowhead dimensions for the given stroke thickness.
///
/// The head scales with the brush so it stays proportionate at any size:
/// length is `max(12, thick * 4)`, width is `max(8, thick * 3)`.
pub fn arrow_head_for_thickness(thick: f64) -> (f64, f64) {
    ((thick * 4.0).max(12.0), (thick * 3.0).max(8.0))
}

/// Running min/max extent, padded and converted into a [`Rect`] once all of
/// a shape's defining points have been folded in.
#[derive(Debug, Clone, Copy)]
struct Extent {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

impl Extent {
    fn at(x: f64, y: f64) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn include(mut self, x: f64, y: f64) -> Self {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
        self
    }

    /// Grows the extent on all sides to cover half the stroke width, with a
    /// one-pixel floor so hairlines stay visible in damage tracking.
    fn pad_for_stroke(mut self, thick: f64) -> Self {
        let pad = (thick / 2.0).ceil().max(1.0);
        self.min_x -= pad;
        self.min_y -= pad;
        self.max_x += pad;
        self.max_y += pad;
        self
    }

    /// Snaps to pixels (min floored, max ceiled) and widens degenerate axes
    /// to one pixel so the result always has positive area.
    fn into_rect(self) -> Option<Rect> {
        let min_x = self.min_x.floor() as i32;
        let min_y = self.min_y.floor() as i32;
        let mut max_x = self.max_x.ceil() as i32;
        let mut max_y = self.max_y.ceil() as i32;

        if max_x == min_x {
            max_x += 1;
        }
        if max_y == min_y {
            max_y += 1;
        }
        Rect::from_min_max(min_x, min_y, max_x, max_y)
    }
}

impl Shape {
    /// Returns the axis-aligned bounding box, expanded to cover stroke width.
    ///
    /// `None` only for shapes with nothing to draw (an empty point list, an
    /// empty text buffer).
    pub fn bounding_box(&self) -> Option<Rect> {
        match self {
            Shape::Freehand { points, thick, .. } => {
                let (&(x0, y0), rest) = points.split_first()?;
                rest.iter()
                    .fold(Extent::at(x0 as f64, y0 as f64), |acc, &(x, y)| {
                        acc.include(x as f64, y as f64)
                    })
                    .pad_for_stroke(*thick)
                    .into_rect()
            }
            Shape::Line {
                x1,
                y1,
                x2,
                y2,
                thick,
                ..
            } => Extent::at(*x1 as f64, *y1 as f64)
                .include(*x2 as f64, *y2 as f64)
                .pad_for_stroke(*thick)
                .into_rect(),
            Shape::Rect {
                x, y, w, h, thick, ..
            } => Extent::at(*x as f64, *y as f64)
                .include((x + w) as f64, (y + h) as f64)
                .pad_for_stroke(*thick)
                .into_rect(),
            Shape::Ellipse {
                cx,
                cy,
                rx,
                ry,
                thick,
                ..
            } => Extent::at((cx - rx) as f64, (cy - ry) as f64)
                .include((cx + rx) as f64, (cy + ry) as f64)
                .pad_for_stroke(*thick)
                .into_rect(),
            Shape::Arrow {
                x1,
                y1,
                x2,
                y2,
                thick,
                head_length,
                head_width,
                ..
            } => {
                let barbs = util::calculate_arrowhead(*x1, *y1, *x2, *y2, *head_length, *head_width);
                barbs
                    .iter()
                    .fold(
                        Extent::at(*x1 as f64, *y1 as f64).include(*x2 as f64, *y2 as f64),
                        |acc, &(bx, by)| acc.include(bx, by),
                    )
                    .pad_for_stroke(*thick)
                    .into_rect()
            }
            Shape::Text { x, y, text, size, .. } => {
                if text.is_empty() {
                    return None;
                }
                let (width, height) = font::text_extents(text, *size);
                Extent::at(*x as f64, *y as f64)
                    .include(*x as f64 + width, *y as f64 + height)
                    .into_rect()
            }
        }
    }

    /// Replaces the shape's stroke/text color in place.
    ///
    /// Used to push live style changes into an in-progress preview.
    pub fn set_color(&mut self, new: Color) {
        match self {
            Shape::Freehand { color, .. }
            | Shape::Line { color, .. }
            | Shape::Rect { color, .. }
            | Shape::Ellipse { color, .. }
            | Shape::Arrow { color, .. }
            | Shape::Text { color, .. } => *color = new,
        }
    }

    /// Replaces the shape's stroke thickness in place.
    ///
    /// Arrow heads are re-derived from the new thickness so the head stays
    /// proportionate. Text has no stroke and is left unchanged.
    pub fn set_thickness(&mut self, new: f64) {
        match self {
            Shape::Freehand { thick, .. }
            | Shape::Line { thick, .. }
            | Shape::Rect { thick, .. }
            | Shape::Ellipse { thick, .. } => *thick = new,
            Shape::Arrow {
                thick,
                head_length,
                head_width,
                ..
            } => {
                *thick = new;
                (*head_length, *head_width) = arrow_head_for_thickness(new);
            }
            Shape::Text { .. } => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::WHITE;
    use crate::util;

    #[test]
    fn freehand_bounding_box_expands_with_thickness() {
        let shape = Shape::Freehand {
            points: vec![(10, 20), (30, 40)],
            color: WHITE,
            thick: 6.0,
        };

        let rect = shape.bounding_box().expect("freehand should have bounds");
        assert_eq!((rect.x, rect.y), (7, 17));
        assert_eq!((rect.width, rect.height), (26, 26));
    }

    #[test]
    fn empty_point_list_has_no_bounding_box() {
        let shape = Shape::Freehand {
            points: Vec::new(),
            color: WHITE,
            thick: 2.0,
        };
        assert!(shape.bounding_box().is_none());
    }

    #[test]
    fn line_bounding_box_covers_stroke() {
        let shape = Shape::Line {
            x1: 50,
            y1: 40,
            x2: 70,
            y2: 90,
            color: WHITE,
            thick: 4.0,
        };

        let rect = shape.bounding_box().expect("line should have bounds");
        assert_eq!((rect.x, rect.y), (48, 38));
        assert_eq!((rect.width, rect.height), (24, 54));
    }

    #[test]
    fn arrow_bounding_box_includes_head() {
        let (head_length, head_width) = arrow_head_for_thickness(3.0);
        let shape = Shape::Arrow {
            x1: 50,
            y1: 120,
            x2: 100,
            y2: 100,
            color: WHITE,
            thick: 3.0,
            head_length,
            head_width,
        };

        let rect = shape.bounding_box().expect("arrow should have bounds");
        let x_max = rect.x + rect.width;
        let y_max = rect.y + rect.height;

        assert!(rect.x <= 50 && x_max >= 100);
        assert!(rect.y <= 100 && y_max >= 120);

        let barbs = util::calculate_arrowhead(50, 120, 100, 100, head_length, head_width);
        for &(px, py) in &barbs {
            assert!(px >= rect.x as f64 && px <= x_max as f64);
            assert!(py >= rect.y as f64 && py <= y_max as f64);
        }
    }

    #[test]
    fn arrow_head_scales_with_thickness_with_floors() {
        assert_eq!(arrow_head_for_thickness(1.0), (12.0, 8.0));
        assert_eq!(arrow_head_for_thickness(2.0), (12.0, 8.0));
        assert_eq!(arrow_head_for_thickness(5.0), (20.0, 15.0));
    }

    #[test]
    fn ellipse_bounding_box_handles_radii_and_stroke() {
        let shape = Shape::Ellipse {
            cx: 200,
            cy: 150,
            rx: 40,
            ry: 20,
            color: WHITE,
            thick: 2.0,
        };

        let rect = shape.bounding_box().expect("ellipse should have bounds");
        assert_eq!((rect.x, rect.y), (159, 129));
        assert_eq!((rect.width, rect.height), (82, 42));
    }

    #[test]
    fn zero_size_rect_still_gets_positive_bounds() {
        let shape = Shape::Rect {
            x: 30,
            y: 30,
            w: 0,
            h: 0,
            color: WHITE,
            thick: 1.0,
        };
        assert!(shape.bounding_box().unwrap().is_valid());
    }

    #[test]
    fn text_bounding_box_is_anchored_and_non_zero() {
        let shape = Shape::Text {
            x: 10,
            y: 20,
            text: "Hello".to_string(),
            color: WHITE,
            size: 24.0,
            font: FontDescriptor::default(),
        };

        let rect = shape.bounding_box().expect("text should have bounds");
        assert_eq!((rect.x, rect.y), (10, 20));
        assert!(rect.width > 0 && rect.height > 0);
    }

    #[test]
    fn empty_text_has_no_bounding_box() {
        let shape = Shape::Text {
            x: 0,
            y: 0,
            text: String::new(),
            color: WHITE,
            size: 24.0,
            font: FontDescriptor::default(),
        };
        assert!(shape.bounding_box().is_none());
    }

    #[test]
    fn thickness_update_rederives_arrow_head() {
        let (head_length, head_width) = arrow_head_for_thickness(1.0);
        let mut shape = Shape::Arrow {
            x1: 0,
            y1: 0,
            x2: 100,
            y2: 0,
            color: WHITE,
            thick: 1.0,
            head_length,
            head_width,
        };

        shape.set_thickness(10.0);
        match shape {
            Shape::Arrow {
                head_length,
                head_width,
                thick,
                ..
            } => {
                assert_eq!(thick, 10.0);
                assert_eq!(head_length, 40.0);
                assert_eq!(head_width, 30.0);
            }
            _ => unreachable!(),
        }
    }
}
