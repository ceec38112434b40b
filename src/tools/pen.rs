//! Freehand pen tool.

use super::{DrawingTool, ToolContext, ToolKind};
use crate::draw::{Color, Shape};

/// Accumulates pointer positions into a freehand stroke.
///
/// Pointer-down starts the stroke with its first point; every pointer-move
/// with the primary button held appends one; pointer-up finalizes. The
/// in-flight stroke is the preview shape, so style changes restyle it live.
#[derive(Debug, Default)]
pub struct PenTool {
    stroke: Option<Shape>,
}

impl DrawingTool for PenTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Pen
    }

    fn on_deactivated(&mut self, _ctx: &mut ToolContext<'_>) {
        self.stroke = None;
    }

    fn on_pointer_down(&mut self, x: i32, y: i32, ctx: &mut ToolContext<'_>) {
        if self.stroke.is_none() {
            self.stroke = Some(Shape::Freehand {
                points: vec![(x, y)],
                color: ctx.style.color,
                thick: ctx.style.thickness,
            });
        }
    }

    fn on_pointer_move(&mut self, x: i32, y: i32, primary_down: bool, _ctx: &mut ToolContext<'_>) {
        if !primary_down {
            return;
        }
        if let Some(Shape::Freehand { points, .. }) = &mut self.stroke {
            points.push((x, y));
        }
    }

    fn on_pointer_up(&mut self, x: i32, y: i32, ctx: &mut ToolContext<'_>) {
        if let Some(mut shape) = self.stroke.take() {
            if let Shape::Freehand { points, .. } = &mut shape {
                if points.last() != Some(&(x, y)) {
                    points.push((x, y));
                }
            }
            ctx.finish_element(shape);
        }
    }

    fn on_color_changed(&mut self, color: Color) {
        if let Some(shape) = &mut self.stroke {
            shape.set_color(color);
        }
    }

    fn on_thickness_changed(&mut self, thickness: f64) {
        if let Some(shape) = &mut self.stroke {
            shape.set_thickness(thickness);
        }
    }

    fn cancel(&mut self, _ctx: &mut ToolContext<'_>) {
        self.stroke = None;
    }

    fn preview(&self) -> Option<&Shape> {
        self.stroke.as_ref()
    }
}
