//! Global input capture and drawing mode state machines.
//!
//! Event flow: the OS listener ([`KeyEventSource`]) queues raw key
//! transitions; the app thread drains them into the
//! [`HotkeyStateMachine`], whose edge signals drive the
//! [`DrawingModeController`], which in turn shows or hides the annotation
//! surface and arms hook-level key suppression.

pub mod hotkey;
pub mod key;
pub mod mode;
pub mod source;

// Re-export commonly used types at module level
pub use hotkey::{ESCAPE_KEY, HotkeySignal, HotkeyStateMachine};
pub use key::{KeyCode, KeyEvent, KeyState};
pub use mode::{DrawingModeController, EscapeOutcome, ModeState, OverlaySurface, SurfaceError};
pub use source::{CaptureBackend, HookCallback, HookError, KeyDisposition, KeyEventSource};
