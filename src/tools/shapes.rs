//! Two-click shape tools: line, rectangle, ellipse, arrow.
//!
//! All four share one state machine: the first pointer-down anchors the
//! shape and creates a zero-size preview, pointer-moves drag the preview's
//! free end after the cursor, and the second pointer-down finalizes. The
//! constrain modifier is sampled on every update, not just at finalize, so
//! the preview shows exactly what will be committed.

use super::{DrawingTool, ToolContext, ToolKind, ToolStyle};
use crate::draw::{Color, Shape, shape::arrow_head_for_thickness};
use crate::util;

/// Geometry recipe for one two-click tool variant.
pub trait ShapeBuilder: Default + 'static {
    const KIND: ToolKind;

    /// Builds the shape spanned by the anchor and the current cursor.
    fn build(
        anchor: (i32, i32),
        cursor: (i32, i32),
        style: &ToolStyle,
        constrain: bool,
    ) -> Shape;
}

/// Shared two-click state machine, parameterized by the shape recipe.
#[derive(Debug, Default)]
pub struct TwoPointTool<B: ShapeBuilder> {
    anchor: Option<(i32, i32)>,
    preview: Option<Shape>,
    builder: std::marker::PhantomData<B>,
}

impl<B: ShapeBuilder> TwoPointTool<B> {
    fn reset(&mut self) {
        self.anchor = None;
        self.preview = None;
    }
}

impl<B: ShapeBuilder> DrawingTool for TwoPointTool<B> {
    fn kind(&self) -> ToolKind {
        B::KIND
    }

    fn on_deactivated(&mut self, _ctx: &mut ToolContext<'_>) {
        self.reset();
    }

    fn on_pointer_down(&mut self, x: i32, y: i32, ctx: &mut ToolContext<'_>) {
        match self.anchor {
            None => {
                // First click anchors the shape and starts a zero-size preview
                self.anchor = Some((x, y));
                self.preview = Some(B::build((x, y), (x, y), ctx.style, ctx.constrain));
            }
            Some(anchor) => {
                // Second click finalizes from (anchor, cursor)
                let shape = B::build(anchor, (x, y), ctx.style, ctx.constrain);
                self.reset();
                ctx.finish_element(shape);
            }
        }
    }

    fn on_pointer_move(&mut self, x: i32, y: i32, _primary_down: bool, ctx: &mut ToolContext<'_>) {
        if let Some(anchor) = self.anchor {
            self.preview = Some(B::build(anchor, (x, y), ctx.style, ctx.constrain));
        }
    }

    fn on_pointer_up(&mut self, _x: i32, _y: i32, _ctx: &mut ToolContext<'_>) {
        // Two-click model: release between the clicks is meaningless
    }

    fn on_color_changed(&mut self, color: Color) {
        if let Some(shape) = &mut self.preview {
            shape.set_color(color);
        }
    }

    fn on_thickness_changed(&mut self, thickness: f64) {
        if let Some(shape) = &mut self.preview {
            shape.set_thickness(thickness);
        }
    }

    fn cancel(&mut self, _ctx: &mut ToolContext<'_>) {
        self.reset();
    }

    fn preview(&self) -> Option<&Shape> {
        self.preview.as_ref()
    }
}

/// Straight line between the two clicked points.
#[derive(Debug, Default)]
pub struct LineBuilder;

impl ShapeBuilder for LineBuilder {
    const KIND: ToolKind = ToolKind::Line;

    fn build(anchor: (i32, i32), cursor: (i32, i32), style: &ToolStyle, _constrain: bool) -> Shape {
        Shape::Line {
            x1: anchor.0,
            y1: anchor.1,
            x2: cursor.0,
            y2: cursor.1,
            color: style.color,
            thick: style.thickness,
        }
    }
}

/// Rectangle from corner to corner.
///
/// With constrain held the rectangle becomes a square whose side is the
/// **minimum** of the dragged dimensions, anchored at the first corner and
/// growing toward the cursor, so the square always fits inside the dragged
/// bounds.
#[derive(Debug, Default)]
pub struct RectBuilder;

impl ShapeBuilder for RectBuilder {
    const KIND: ToolKind = ToolKind::Rect;

    fn build(anchor: (i32, i32), cursor: (i32, i32), style: &ToolStyle, constrain: bool) -> Shape {
        let (ax, ay) = anchor;
        let (cx, cy) = cursor;

        let (mut w, mut h) = ((cx - ax).abs(), (cy - ay).abs());
        if constrain {
            let side = w.min(h);
            w = side;
            h = side;
        }

        let x = if cx >= ax { ax } else { ax - w };
        let y = if cy >= ay { ay } else { ay - h };

        Shape::Rect {
            x,
            y,
            w,
            h,
            color: style.color,
            thick: style.thickness,
        }
    }
}

/// Ellipse inscribed in the dragged bounds.
///
/// With constrain held the ellipse becomes a circle whose diameter is the
/// **maximum** of the dragged dimensions, so the circle's bounding box always
/// covers the dragged bounds. The min/max asymmetry against the rectangle
/// tool is intentional.
#[derive(Debug, Default)]
pub struct EllipseBuilder;

impl ShapeBuilder for EllipseBuilder {
    const KIND: ToolKind = ToolKind::Ellipse;

    fn build(anchor: (i32, i32), cursor: (i32, i32), style: &ToolStyle, constrain: bool) -> Shape {
        let (cx, cy, mut rx, mut ry) =
            util::ellipse_bounds(anchor.0, anchor.1, cursor.0, cursor.1);

        if constrain {
            let r = rx.max(ry);
            rx = r;
            ry = r;
        }

        Shape::Ellipse {
            cx,
            cy,
            rx,
            ry,
            color: style.color,
            thick: style.thickness,
        }
    }
}

/// Arrow from the first click to the second, head at the destination.
///
/// Head dimensions derive from the stroke thickness so the head stays
/// proportionate at any brush size.
#[derive(Debug, Default)]
pub struct ArrowBuilder;

impl ShapeBuilder for ArrowBuilder {
    const KIND: ToolKind = ToolKind::Arrow;

    fn build(anchor: (i32, i32), cursor: (i32, i32), style: &ToolStyle, _constrain: bool) -> Shape {
        let (head_length, head_width) = arrow_head_for_thickness(style.thickness);
        Shape::Arrow {
            x1: anchor.0,
            y1: anchor.1,
            x2: cursor.0,
            y2: cursor.1,
            color: style.color,
            thick: style.thickness,
            head_length,
            head_width,
        }
    }
}

pub type LineTool = TwoPointTool<LineBuilder>;
pub type RectTool = TwoPointTool<RectBuilder>;
pub type EllipseTool = TwoPointTool<EllipseBuilder>;
pub type ArrowTool = TwoPointTool<ArrowBuilder>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, RED};
    use crate::draw::{Canvas, ElementId, FontDescriptor};

    fn style() -> ToolStyle {
        ToolStyle {
            color: RED,
            thickness: 3.0,
            font_size: 32.0,
            font: FontDescriptor::default(),
            eraser_size: 24.0,
        }
    }

    struct Harness {
        canvas: Canvas,
        style: ToolStyle,
        constrain: bool,
        completed: Vec<ElementId>,
        erased: Vec<ElementId>,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                canvas: Canvas::new(),
                style: style(),
                constrain: false,
                completed: Vec::new(),
                erased: Vec::new(),
            }
        }

        fn ctx(&mut self) -> ToolContext<'_> {
            ToolContext::new(
                &mut self.canvas,
                &self.style,
                self.constrain,
                0,
                &mut self.completed,
                &mut self.erased,
            )
        }
    }

    #[test]
    fn line_uses_the_two_click_model() {
        let mut h = Harness::new();
        let mut tool = LineTool::default();

        tool.on_pointer_down(10, 10, &mut h.ctx());
        // A release between the clicks does not finalize
        tool.on_pointer_up(15, 15, &mut h.ctx());
        assert!(h.completed.is_empty());

        tool.on_pointer_move(40, 50, false, &mut h.ctx());
        match tool.preview().unwrap() {
            Shape::Line { x2, y2, .. } => assert_eq!((*x2, *y2), (40, 50)),
            other => panic!("expected line, got {other:?}"),
        }

        tool.on_pointer_down(40, 50, &mut h.ctx());
        assert_eq!(h.completed.len(), 1);
        assert!(tool.preview().is_none());
        match h.canvas.get(h.completed[0]).unwrap() {
            Shape::Line { x1, y1, x2, y2, .. } => {
                assert_eq!((*x1, *y1, *x2, *y2), (10, 10, 40, 50));
            }
            other => panic!("expected line, got {other:?}"),
        }
    }

    #[test]
    fn first_click_creates_a_zero_size_preview() {
        let mut h = Harness::new();
        let mut tool = RectTool::default();

        tool.on_pointer_down(30, 30, &mut h.ctx());
        match tool.preview().unwrap() {
            Shape::Rect { x, y, w, h, .. } => assert_eq!((*x, *y, *w, *h), (30, 30, 0, 0)),
            other => panic!("expected rect, got {other:?}"),
        }
    }

    #[test]
    fn rect_normalizes_any_drag_direction() {
        let mut h = Harness::new();
        let mut tool = RectTool::default();

        tool.on_pointer_down(50, 60, &mut h.ctx());
        tool.on_pointer_down(10, 20, &mut h.ctx());

        match h.canvas.get(h.completed[0]).unwrap() {
            Shape::Rect { x, y, w, h, .. } => {
                assert_eq!((*x, *y, *w, *h), (10, 20, 40, 40));
            }
            other => panic!("expected rect, got {other:?}"),
        }
    }

    #[test]
    fn constrained_rect_takes_the_minimum_dimension() {
        let mut h = Harness::new();
        h.constrain = true;
        let mut tool = RectTool::default();

        tool.on_pointer_down(0, 0, &mut h.ctx());
        tool.on_pointer_down(40, 10, &mut h.ctx());

        match h.canvas.get(h.completed[0]).unwrap() {
            Shape::Rect { w, h, .. } => assert_eq!((*w, *h), (10, 10)),
            other => panic!("expected rect, got {other:?}"),
        }
    }

    #[test]
    fn constrained_rect_grows_toward_the_cursor() {
        let mut h = Harness::new();
        h.constrain = true;
        let mut tool = RectTool::default();

        // Dragging up-left: the square's far corner must stay on the anchor
        tool.on_pointer_down(100, 100, &mut h.ctx());
        tool.on_pointer_down(60, 90, &mut h.ctx());

        match h.canvas.get(h.completed[0]).unwrap() {
            Shape::Rect { x, y, w, h, .. } => {
                assert_eq!((*w, *h), (10, 10));
                assert_eq!((*x, *y), (90, 90));
            }
            other => panic!("expected rect, got {other:?}"),
        }
    }

    #[test]
    fn constrained_ellipse_takes_the_maximum_dimension() {
        let mut h = Harness::new();
        h.constrain = true;
        let mut tool = EllipseTool::default();

        tool.on_pointer_down(0, 0, &mut h.ctx());
        tool.on_pointer_down(40, 10, &mut h.ctx());

        match h.canvas.get(h.completed[0]).unwrap() {
            Shape::Ellipse { rx, ry, .. } => assert_eq!((*rx, *ry), (20, 20)),
            other => panic!("expected ellipse, got {other:?}"),
        }
    }

    #[test]
    fn constrain_is_sampled_on_every_update() {
        let mut h = Harness::new();
        let mut tool = RectTool::default();

        tool.on_pointer_down(0, 0, &mut h.ctx());
        tool.on_pointer_move(40, 10, false, &mut h.ctx());
        match tool.preview().unwrap() {
            Shape::Rect { w, h, .. } => assert_eq!((*w, *h), (40, 10)),
            other => panic!("expected rect, got {other:?}"),
        }

        // Modifier pressed mid-gesture: the very next update constrains
        h.constrain = true;
        tool.on_pointer_move(40, 10, false, &mut h.ctx());
        match tool.preview().unwrap() {
            Shape::Rect { w, h, .. } => assert_eq!((*w, *h), (10, 10)),
            other => panic!("expected rect, got {other:?}"),
        }
    }

    #[test]
    fn arrow_head_derives_from_thickness() {
        let mut h = Harness::new();
        h.style.thickness = 5.0;
        let mut tool = ArrowTool::default();

        tool.on_pointer_down(0, 0, &mut h.ctx());
        tool.on_pointer_down(100, 0, &mut h.ctx());

        match h.canvas.get(h.completed[0]).unwrap() {
            Shape::Arrow {
                head_length,
                head_width,
                ..
            } => {
                assert_eq!(*head_length, 20.0);
                assert_eq!(*head_width, 15.0);
            }
            other => panic!("expected arrow, got {other:?}"),
        }
    }

    #[test]
    fn style_changes_restyle_the_preview_immediately() {
        let mut h = Harness::new();
        let mut tool = ArrowTool::default();

        tool.on_pointer_down(0, 0, &mut h.ctx());
        tool.on_color_changed(BLUE);
        tool.on_thickness_changed(10.0);

        match tool.preview().unwrap() {
            Shape::Arrow {
                color,
                thick,
                head_length,
                head_width,
                ..
            } => {
                assert_eq!(*color, BLUE);
                assert_eq!(*thick, 10.0);
                // Head re-derived from the new thickness
                assert_eq!(*head_length, 40.0);
                assert_eq!(*head_width, 30.0);
            }
            other => panic!("expected arrow, got {other:?}"),
        }
    }

    #[test]
    fn deactivation_discards_the_pending_shape() {
        let mut h = Harness::new();
        let mut tool = LineTool::default();

        tool.on_pointer_down(0, 0, &mut h.ctx());
        tool.on_deactivated(&mut h.ctx());
        assert!(tool.preview().is_none());

        // The next click anchors a fresh shape instead of finalizing
        tool.on_pointer_down(5, 5, &mut h.ctx());
        assert!(h.completed.is_empty());
    }
}
