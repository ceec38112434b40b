//! Core library for hotkey-toggled screen annotation.
//!
//! overscribe lets a user draw freehand or shaped annotations on top of any
//! running application, toggled by a global hotkey, and erase or undo those
//! annotations with pixel-accurate hit testing. This crate is the core: the
//! global input-capture state machine and the drawing-tool engine. Rendering,
//! screenshot capture, settings UI, and process wiring are external
//! collaborators reached through the narrow traits and signals exposed here.

pub mod config;
pub mod draw;
pub mod event;
pub mod history;
pub mod input;
pub mod tools;
pub mod util;

pub use config::{Config, Settings, SettingsHandle};
pub use history::DrawingHistory;
pub use input::{DrawingModeController, HotkeyStateMachine, KeyEventSource, ModeState};
pub use tools::{ToolEngine, ToolKind};
