//! Hotkey combination tracking with edge detection.

use super::key::{KeyCode, KeyEvent, KeyState};
use std::collections::HashMap;

/// The escape key is tracked outside the configurable combination and always
/// fires on key-down, even while drawing mode is inactive.
pub const ESCAPE_KEY: KeyCode = rdev::Key::Escape;

/// Signals produced by feeding raw key events through the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HotkeySignal {
    /// The full combination transitioned from "not all held" to "all held".
    Activated,
    /// The full combination transitioned from "all held" to "not all held".
    Deactivated,
    /// The hardcoded escape key went down (pure edge trigger, no hold state).
    EscapeActivated,
}

/// Edge-detecting state machine over a configurable key combination.
///
/// The machine keeps one pressed flag per configured code and compares the
/// "all held" predicate before and after every event: [`HotkeySignal::Activated`]
/// fires exactly once per transition into the fully-held state and
/// [`HotkeySignal::Deactivated`] exactly once on the way out. Keys outside the
/// combination never affect the predicate.
///
/// [`HotkeyStateMachine::configure`] swaps the combination atomically: the
/// pressed map is replaced wholesale, zero-initialized, and the edge flag is
/// reset, so stale state from the previous combination can never produce a
/// spurious signal.
#[derive(Debug)]
pub struct HotkeyStateMachine {
    pressed: HashMap<KeyCode, bool>,
    was_fully_pressed: bool,
}

impl HotkeyStateMachine {
    /// Creates a machine tracking the given combination.
    ///
    /// An empty combination never activates.
    pub fn new(combination: &[KeyCode]) -> Self {
        let mut machine = Self {
            pressed: HashMap::new(),
            was_fully_pressed: false,
        };
        machine.configure(combination);
        machine
    }

    /// Replaces the tracked combination, resetting all per-key bookkeeping.
    pub fn configure(&mut self, combination: &[KeyCode]) {
        self.pressed = combination.iter().map(|&key| (key, false)).collect();
        self.was_fully_pressed = false;
        log::debug!(
            "hotkey reconfigured to {}",
            super::key::combination_label(combination)
        );
    }

    /// The currently configured combination (in arbitrary order).
    pub fn combination(&self) -> Vec<KeyCode> {
        self.pressed.keys().copied().collect()
    }

    /// Feeds one raw key transition through the machine.
    ///
    /// Returns every signal the event produced, in order. A single event can
    /// yield at most one combination edge plus, for escape key-down, an
    /// escape signal.
    pub fn handle(&mut self, event: KeyEvent) -> Vec<HotkeySignal> {
        let mut signals = Vec::new();

        if event.key == ESCAPE_KEY && event.state == KeyState::Pressed {
            signals.push(HotkeySignal::EscapeActivated);
        }

        if let Some(flag) = self.pressed.get_mut(&event.key) {
            *flag = event.state == KeyState::Pressed;

            let is_fully_pressed =
                !self.pressed.is_empty() && self.pressed.values().all(|&held| held);

            if is_fully_pressed && !self.was_fully_pressed {
                signals.push(HotkeySignal::Activated);
            } else if !is_fully_pressed && self.was_fully_pressed {
                signals.push(HotkeySignal::Deactivated);
            }
            self.was_fully_pressed = is_fully_pressed;
        }

        signals
    }
}
