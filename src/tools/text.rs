//! Text tool: click to open an edit region, click outside to commit.

use super::{DrawingTool, TextInput, ToolContext, ToolKind};
use crate::draw::{Color, Shape, font};
use crate::util::Rect;

/// In-progress text editing session.
///
/// The session's shape doubles as the live preview; its `text` field is the
/// edit buffer. The caret is a character offset into that buffer, exposed so
/// the external renderer can draw it.
#[derive(Debug)]
struct TextSession {
    shape: Shape,
    caret: usize,
}

impl TextSession {
    fn text(&self) -> &str {
        match &self.shape {
            Shape::Text { text, .. } => text,
            _ => unreachable!("text session always holds a text shape"),
        }
    }

    fn text_mut(&mut self) -> &mut String {
        match &mut self.shape {
            Shape::Text { text, .. } => text,
            _ => unreachable!("text session always holds a text shape"),
        }
    }

    fn origin(&self) -> (i32, i32) {
        match &self.shape {
            Shape::Text { x, y, .. } => (*x, *y),
            _ => unreachable!("text session always holds a text shape"),
        }
    }

    fn size(&self) -> f64 {
        match &self.shape {
            Shape::Text { size, .. } => *size,
            _ => unreachable!("text session always holds a text shape"),
        }
    }

    /// The clickable edit region: the text bounds, or a minimal one-line box
    /// while the buffer is still empty.
    fn region(&self) -> Rect {
        let (x, y) = self.origin();
        let size = self.size();
        self.shape.bounding_box().unwrap_or_else(|| {
            let width = (font::char_advance(size) * 2.0).ceil() as i32;
            let height = font::line_height(size).ceil() as i32;
            Rect {
                x,
                y,
                width: width.max(1),
                height: height.max(1),
            }
        })
    }

    /// Maps a click inside the region to the closest caret offset.
    fn caret_for_click(&self, px: i32, py: i32) -> usize {
        let (x, y) = self.origin();
        let size = self.size();

        let line_height = font::line_height(size).max(1.0);
        let advance = font::char_advance(size).max(1.0);

        let lines: Vec<&str> = self.text().split('\n').collect();
        let line_index = (((py - y) as f64 / line_height).floor() as i64)
            .clamp(0, lines.len() as i64 - 1) as usize;

        let line_len = lines[line_index].chars().count();
        let column = (((px - x) as f64 / advance).round() as i64).clamp(0, line_len as i64) as usize;

        // Character offset of the clicked line's start (newlines count as one)
        let preceding: usize = lines[..line_index]
            .iter()
            .map(|line| line.chars().count() + 1)
            .sum();

        preceding + column
    }

    fn insert(&mut self, c: char) {
        let caret = self.caret;
        let byte = byte_offset(self.text(), caret);
        self.text_mut().insert(byte, c);
        self.caret = caret + 1;
    }

    fn backspace(&mut self) {
        if self.caret == 0 {
            return;
        }
        let caret = self.caret - 1;
        let byte = byte_offset(self.text(), caret);
        self.text_mut().remove(byte);
        self.caret = caret;
    }
}

fn byte_offset(text: &str, char_index: usize) -> usize {
    text.char_indices()
        .nth(char_index)
        .map(|(offset, _)| offset)
        .unwrap_or(text.len())
}

/// Click-click text tool.
///
/// The first click opens an editable region; while editing, clicks inside
/// the region only reposition the caret. A click outside commits the session
/// (creating an element only if the buffer is non-empty). Switching tools or
/// canceling discards the session without creating anything.
#[derive(Debug, Default)]
pub struct TextTool {
    session: Option<TextSession>,
}

impl TextTool {
    /// Caret offset of the active session, for the external renderer.
    pub fn caret(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.caret)
    }

    fn commit(&mut self, ctx: &mut ToolContext<'_>) {
        if let Some(session) = self.session.take() {
            if session.text().is_empty() {
                log::debug!("empty text session discarded");
            } else {
                ctx.finish_element(session.shape);
            }
        }
    }
}

impl DrawingTool for TextTool {
    fn kind(&self) -> ToolKind {
        ToolKind::Text
    }

    fn on_deactivated(&mut self, _ctx: &mut ToolContext<'_>) {
        // Tool switch discards the in-progress edit without creating an element
        self.session = None;
    }

    fn on_pointer_down(&mut self, x: i32, y: i32, ctx: &mut ToolContext<'_>) {
        match &mut self.session {
            None => {
                self.session = Some(TextSession {
                    shape: Shape::Text {
                        x,
                        y,
                        text: String::new(),
                        color: ctx.style.color,
                        size: ctx.style.font_size,
                        font: ctx.style.font.clone(),
                    },
                    caret: 0,
                });
            }
            Some(session) => {
                if session.region().contains(x, y) {
                    session.caret = session.caret_for_click(x, y);
                } else {
                    self.commit(ctx);
                }
            }
        }
    }

    fn on_pointer_move(&mut self, _x: i32, _y: i32, _primary_down: bool, _ctx: &mut ToolContext<'_>) {
    }

    fn on_pointer_up(&mut self, _x: i32, _y: i32, _ctx: &mut ToolContext<'_>) {}

    fn on_color_changed(&mut self, color: Color) {
        if let Some(session) = &mut self.session {
            session.shape.set_color(color);
        }
    }

    fn on_text_input(&mut self, input: TextInput, ctx: &mut ToolContext<'_>) {
        match input {
            TextInput::Commit => self.commit(ctx),
            _ => {
                let Some(session) = &mut self.session else {
                    return;
                };
                match input {
                    TextInput::Char(c) => session.insert(c),
                    TextInput::Backspace => session.backspace(),
                    TextInput::Newline => session.insert('\n'),
                    TextInput::Commit => unreachable!(),
                }
            }
        }
    }

    fn cancel(&mut self, _ctx: &mut ToolContext<'_>) {
        self.session = None;
    }

    fn preview(&self) -> Option<&Shape> {
        self.session.as_ref().map(|s| &s.shape)
    }
}
