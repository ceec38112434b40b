//! Drawing tools and the engine that routes pointer input to them.
//!
//! Exactly one tool is active at a time. Tools receive pointer events through
//! the [`DrawingTool`] trait, build a live preview while a gesture is in
//! flight, and report finished elements or erasures through the
//! [`ToolContext`]. The [`engine::ToolEngine`] owns the canvas, the undo
//! history, and the switching rules.

pub mod engine;
pub mod eraser;
pub mod pen;
pub mod shapes;
pub mod text;

// Re-export commonly used types at module level
pub use engine::ToolEngine;
pub use eraser::EraserTool;
pub use pen::PenTool;
pub use shapes::{ArrowTool, EllipseTool, LineTool, RectTool};
pub use text::TextTool;

use crate::draw::{Canvas, Color, ElementId, FontDescriptor, Shape};

/// Drawing tool selection.
///
/// The active tool determines what the pointer does on the annotation
/// surface. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// Freehand drawing - follows the pointer path (default)
    Pen,
    /// Straight line - between two clicked points
    Line,
    /// Rectangle outline - corner to corner (constrain: square)
    Rect,
    /// Ellipse outline - within the dragged bounds (constrain: circle)
    Ellipse,
    /// Arrow with a head scaled to the stroke thickness
    Arrow,
    /// Text placed by click, committed by clicking outside the edit region
    Text,
    /// Removes elements the cursor sweeps over
    Eraser,
}

/// Style snapshot handed to a tool with each event.
#[derive(Debug, Clone)]
pub struct ToolStyle {
    pub color: Color,
    pub thickness: f64,
    pub font_size: f64,
    pub font: FontDescriptor,
    pub eraser_size: f64,
}

/// Keyboard input routed to a text editing session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextInput {
    /// A printable character.
    Char(char),
    /// Delete the character before the caret.
    Backspace,
    /// Insert a line break (Shift+Return).
    Newline,
    /// Commit the session (plain Return).
    Commit,
}

/// Per-event context giving the active tool access to the canvas and a way
/// to report outcomes.
///
/// Finished elements and erasures are collected here and turned into history
/// records and notifications by the engine once the tool returns.
pub struct ToolContext<'a> {
    pub canvas: &'a mut Canvas,
    pub style: &'a ToolStyle,
    /// Constrain modifier state (square/circle), sampled at this event.
    pub constrain: bool,
    /// Canvas element cap (0 = unlimited).
    pub max_elements: usize,
    completed: &'a mut Vec<ElementId>,
    erased: &'a mut Vec<ElementId>,
}

impl<'a> ToolContext<'a> {
    pub(crate) fn new(
        canvas: &'a mut Canvas,
        style: &'a ToolStyle,
        constrain: bool,
        max_elements: usize,
        completed: &'a mut Vec<ElementId>,
        erased: &'a mut Vec<ElementId>,
    ) -> Self {
        Self {
            canvas,
            style,
            constrain,
            max_elements,
            completed,
            erased,
        }
    }

    /// Places a finished shape on the canvas and records the completion.
    ///
    /// Returns `None` (and drops the shape with a warning) when the element
    /// cap is reached.
    pub fn finish_element(&mut self, shape: Shape) -> Option<ElementId> {
        match self.canvas.try_insert(shape, self.max_elements) {
            Some(id) => {
                self.completed.push(id);
                Some(id)
            }
            None => {
                log::warn!(
                    "element limit ({}) reached; discarding finished gesture",
                    self.max_elements
                );
                None
            }
        }
    }

    /// Detaches an element from the canvas and records the erasure.
    pub fn erase_element(&mut self, id: ElementId) -> bool {
        if self.canvas.remove(id).is_some() {
            self.erased.push(id);
            true
        } else {
            false
        }
    }
}

/// Capability set every tool variant implements.
///
/// Pointer positions are in surface pixels, already normalized by the caller.
/// A tool must discard any half-finished gesture in
/// [`DrawingTool::on_deactivated`] and [`DrawingTool::cancel`].
pub trait DrawingTool {
    fn kind(&self) -> ToolKind;

    /// The tool became the active tool.
    fn on_activated(&mut self, _ctx: &mut ToolContext<'_>) {}

    /// Another tool is taking over; drop any in-flight gesture.
    fn on_deactivated(&mut self, ctx: &mut ToolContext<'_>);

    fn on_pointer_down(&mut self, x: i32, y: i32, ctx: &mut ToolContext<'_>);

    fn on_pointer_move(&mut self, x: i32, y: i32, primary_down: bool, ctx: &mut ToolContext<'_>);

    fn on_pointer_up(&mut self, x: i32, y: i32, ctx: &mut ToolContext<'_>);

    /// The active color changed; in-flight previews restyle immediately.
    fn on_color_changed(&mut self, _color: Color) {}

    /// The stroke thickness changed; in-flight previews restyle immediately.
    fn on_thickness_changed(&mut self, _thickness: f64) {}

    /// Keyboard input for tools that edit text; others ignore it.
    fn on_text_input(&mut self, _input: TextInput, _ctx: &mut ToolContext<'_>) {}

    /// Abandons the current gesture without producing an element.
    fn cancel(&mut self, ctx: &mut ToolContext<'_>);

    /// The in-flight gesture's preview shape, if any.
    fn preview(&self) -> Option<&Shape> {
        None
    }
}
