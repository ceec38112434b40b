//! Tool engine: routes pointer input to the active tool and keeps the
//! canvas and undo history consistent.

use super::eraser::EraserTool;
use super::pen::PenTool;
use super::shapes::{ArrowTool, EllipseTool, LineTool, RectTool};
use super::text::TextTool;
use super::{DrawingTool, TextInput, ToolContext, ToolKind, ToolStyle};
use crate::config::{SettingsChange, SettingsHandle};
use crate::draw::{Canvas, Color, ElementId, Shape};
use crate::event::Signal;
use crate::history::DrawingHistory;
use crate::util;

/// All seven tool instances; exactly one is active at a time.
#[derive(Default)]
struct ToolSet {
    pen: PenTool,
    line: LineTool,
    rect: RectTool,
    ellipse: EllipseTool,
    arrow: ArrowTool,
    text: TextTool,
    eraser: EraserTool,
}

impl ToolSet {
    fn get(&self, kind: ToolKind) -> &dyn DrawingTool {
        match kind {
            ToolKind::Pen => &self.pen,
            ToolKind::Line => &self.line,
            ToolKind::Rect => &self.rect,
            ToolKind::Ellipse => &self.ellipse,
            ToolKind::Arrow => &self.arrow,
            ToolKind::Text => &self.text,
            ToolKind::Eraser => &self.eraser,
        }
    }

    fn get_mut(&mut self, kind: ToolKind) -> &mut dyn DrawingTool {
        match kind {
            ToolKind::Pen => &mut self.pen,
            ToolKind::Line => &mut self.line,
            ToolKind::Rect => &mut self.rect,
            ToolKind::Ellipse => &mut self.ellipse,
            ToolKind::Arrow => &mut self.arrow,
            ToolKind::Text => &mut self.text,
            ToolKind::Eraser => &mut self.eraser,
        }
    }
}

/// Owns the canvas, the undo history, and pointer-event routing.
///
/// Every finished gesture becomes a history record the moment its element is
/// placed; every eraser removal tombstones its record. The two bookkeeping
/// steps happen inside the same dispatch, so no interleaving of draw, erase,
/// and undo calls can observe a canvas/history mismatch.
pub struct ToolEngine {
    tools: ToolSet,
    active: ToolKind,
    canvas: Canvas,
    history: DrawingHistory,
    settings: SettingsHandle,
    constrain: bool,
    /// A gesture produced a finished element (already on the canvas).
    pub action_completed: Signal<ElementId>,
    /// The eraser removed an element (already tombstoned in history).
    pub element_erased: Signal<ElementId>,
    /// The active tool switched.
    pub tool_changed: Signal<ToolKind>,
    /// The canvas was cleared by an explicit clear action.
    pub canvas_cleared: Signal<()>,
}

impl ToolEngine {
    pub fn new(settings: SettingsHandle) -> Self {
        Self {
            tools: ToolSet::default(),
            active: ToolKind::Pen,
            canvas: Canvas::new(),
            history: DrawingHistory::new(),
            settings,
            constrain: false,
            action_completed: Signal::new("action-completed"),
            element_erased: Signal::new("element-erased"),
            tool_changed: Signal::new("tool-changed"),
            canvas_cleared: Signal::new("canvas-cleared"),
        }
    }

    /// The currently active tool.
    pub fn active_tool(&self) -> ToolKind {
        self.active
    }

    /// Read access to the canvas, for rendering and tests.
    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Live (undoable) history entries.
    pub fn undoable_len(&self) -> usize {
        self.history.live_len()
    }

    /// The active tool's in-flight preview shape, if any.
    pub fn preview(&self) -> Option<&Shape> {
        self.tools.get(self.active).preview()
    }

    /// Switches the active tool.
    ///
    /// The outgoing tool is deactivated first (discarding any half-finished
    /// gesture) before the incoming tool activates.
    pub fn set_tool(&mut self, kind: ToolKind) {
        if self.active == kind {
            return;
        }

        self.with_active_tool(|tool, ctx| tool.on_deactivated(ctx));
        self.active = kind;
        self.with_active_tool(|tool, ctx| tool.on_activated(ctx));

        log::info!("tool switched to {kind:?}");
        self.tool_changed.emit(&kind);
    }

    pub fn pointer_down(&mut self, x: i32, y: i32) {
        self.with_active_tool(|tool, ctx| tool.on_pointer_down(x, y, ctx));
    }

    pub fn pointer_move(&mut self, x: i32, y: i32, primary_down: bool) {
        self.with_active_tool(|tool, ctx| tool.on_pointer_move(x, y, primary_down, ctx));
    }

    pub fn pointer_up(&mut self, x: i32, y: i32) {
        self.with_active_tool(|tool, ctx| tool.on_pointer_up(x, y, ctx));
    }

    /// Routes keyboard input to the active tool (text editing).
    pub fn text_input(&mut self, input: TextInput) {
        self.with_active_tool(|tool, ctx| tool.on_text_input(input, ctx));
    }

    /// Updates the constrain-modifier state (square/circle shapes).
    ///
    /// Tools sample the flag on their next update; a modifier toggle shows up
    /// in the preview with the next pointer event.
    pub fn set_constrain(&mut self, constrain: bool) {
        self.constrain = constrain;
    }

    /// Cancels the in-flight gesture of the active tool, if any.
    pub fn cancel_gesture(&mut self) {
        self.with_active_tool(|tool, ctx| tool.cancel(ctx));
    }

    /// Changes the active color and restyles any in-flight preview.
    pub fn set_color(&mut self, color: Color) {
        self.settings
            .update(SettingsChange::Style, |s| s.color = color);
        self.with_active_tool(|tool, _ctx| tool.on_color_changed(color));
    }

    /// Handles a palette selection key ('R', 'G', 'B', ...) pressed while
    /// drawing.
    ///
    /// Returns true when the key selected a color; unrecognized keys are left
    /// for other shortcuts.
    pub fn handle_color_key(&mut self, key: char) -> bool {
        match util::key_to_color(key) {
            Some(color) => {
                log::debug!("color switched to {}", util::color_to_name(&color));
                self.set_color(color);
                true
            }
            None => false,
        }
    }

    /// Changes the stroke thickness, clamped to the configured bounds, and
    /// restyles any in-flight preview.
    pub fn set_thickness(&mut self, value: f64) {
        let (min, max) = self
            .settings
            .with(|s| (s.thickness_min, s.thickness_max));
        let clamped = value.clamp(min, max);
        self.settings
            .update(SettingsChange::Style, |s| s.thickness = clamped);
        self.with_active_tool(|tool, _ctx| tool.on_thickness_changed(clamped));
    }

    /// Adjusts thickness by a delta (keyboard +/-).
    pub fn adjust_thickness(&mut self, delta: f64) {
        let current = self.settings.with(|s| s.thickness);
        self.set_thickness(current + delta);
    }

    /// Undoes the most recent still-present element.
    ///
    /// Entries tombstoned by the eraser are skipped without being returned;
    /// the detached element's id is returned so the renderer can drop it.
    pub fn undo(&mut self) -> Option<ElementId> {
        while let Some(id) = self.history.undo_last() {
            if self.canvas.remove(id).is_some() {
                log::debug!("undo removed element {id}");
                return Some(id);
            }
            // History said live but the canvas disagrees; skip and keep going
            log::warn!("undo entry {id} not on canvas; skipping");
        }
        None
    }

    /// Clears the canvas and history (explicit clear action).
    pub fn clear(&mut self) {
        self.with_active_tool(|tool, ctx| tool.cancel(ctx));
        self.canvas.clear();
        self.history.clear();
        log::info!("canvas cleared");
        self.canvas_cleared.emit(&());
    }

    /// Drops all session state when drawing mode exits.
    ///
    /// Same as [`ToolEngine::clear`] but silent: leaving drawing mode is not
    /// a user-visible "canvas cleared" action.
    pub fn reset_session(&mut self) {
        self.with_active_tool(|tool, ctx| tool.cancel(ctx));
        self.canvas.clear();
        self.history.clear();
    }

    fn style_snapshot(&self) -> (ToolStyle, usize) {
        self.settings.with(|s| {
            (
                ToolStyle {
                    color: s.color,
                    thickness: s.thickness,
                    font_size: s.font_size,
                    font: s.font.clone(),
                    eraser_size: s.eraser_size,
                },
                s.max_elements,
            )
        })
    }

    fn with_active_tool(&mut self, f: impl FnOnce(&mut dyn DrawingTool, &mut ToolContext<'_>)) {
        let (style, max_elements) = self.style_snapshot();
        let mut completed = Vec::new();
        let mut erased = Vec::new();

        {
            let mut ctx = ToolContext::new(
                &mut self.canvas,
                &style,
                self.constrain,
                max_elements,
                &mut completed,
                &mut erased,
            );
            let tool = self.tools.get_mut(self.active);
            f(tool, &mut ctx);
        }

        for id in completed {
            self.history.record(id);
            self.action_completed.emit(&id);
        }
        for id in erased {
            self.history.remove(id);
            self.element_erased.emit(&id);
        }
    }
}
