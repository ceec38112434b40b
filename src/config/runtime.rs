//! Runtime settings shared across components at wiring time.
//!
//! Configuration is loaded once at process start and then lives in a
//! [`Settings`] value behind an explicit [`SettingsHandle`] passed to
//! constructors. Components read it at need; edits go through
//! [`SettingsHandle::update`], which notifies subscribers. Nothing here is
//! reachable through ambient static state.

use super::enums::ActivationMode;
use crate::draw::{Color, FontDescriptor};
use crate::event::Signal;
use crate::input::key::KeyCode;
use std::cell::RefCell;
use std::rc::Rc;

/// Live, validated settings derived from the configuration file.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Keys that must be simultaneously held to toggle drawing mode.
    pub hotkey: Vec<KeyCode>,
    /// Whether the hotkey locks drawing mode or only holds it.
    pub activation_mode: ActivationMode,
    /// Active drawing color.
    pub color: Color,
    /// Active stroke thickness in pixels.
    pub thickness: f64,
    /// Lower bound for thickness adjustments.
    pub thickness_min: f64,
    /// Upper bound for thickness adjustments.
    pub thickness_max: f64,
    /// Font size for text annotations in points.
    pub font_size: f64,
    /// Font used for text annotations.
    pub font: FontDescriptor,
    /// Side of the square eraser test region in pixels.
    pub eraser_size: f64,
    /// Maximum elements on the canvas (0 = unlimited).
    pub max_elements: usize,
}

/// Which part of the settings an update touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsChange {
    /// Hotkey combination or activation mode changed.
    Hotkey,
    /// Color, thickness, or font changed.
    Style,
    /// Eraser size changed.
    Eraser,
}

struct HandleInner {
    settings: RefCell<Settings>,
    changed: RefCell<Signal<SettingsChange>>,
}

/// Cloneable handle to the process-wide settings value.
///
/// All clones observe the same state. Single-threaded by design: settings are
/// only touched from the event-processing thread (the capture callback reads
/// nothing from here).
#[derive(Clone)]
pub struct SettingsHandle {
    inner: Rc<HandleInner>,
}

impl SettingsHandle {
    /// Wraps an initial settings value built at wiring time.
    pub fn new(settings: Settings) -> Self {
        Self {
            inner: Rc::new(HandleInner {
                settings: RefCell::new(settings),
                changed: RefCell::new(Signal::new("settings-changed")),
            }),
        }
    }

    /// Reads a value out of the current settings.
    pub fn with<R>(&self, read: impl FnOnce(&Settings) -> R) -> R {
        read(&self.inner.settings.borrow())
    }

    /// Convenience accessor for the activation mode, read at need.
    pub fn activation_mode(&self) -> ActivationMode {
        self.inner.settings.borrow().activation_mode
    }

    /// Convenience accessor for the current hotkey combination.
    pub fn hotkey(&self) -> Vec<KeyCode> {
        self.inner.settings.borrow().hotkey.clone()
    }

    /// Applies an edit and notifies subscribers of the change kind.
    ///
    /// The edit completes (and its borrow is released) before any subscriber
    /// runs, so subscribers may read the settings freely.
    pub fn update(&self, change: SettingsChange, edit: impl FnOnce(&mut Settings)) {
        edit(&mut self.inner.settings.borrow_mut());
        self.inner.changed.borrow_mut().emit(&change);
    }

    /// Registers a subscriber for settings changes.
    pub fn subscribe(&self, subscriber: impl FnMut(&SettingsChange) + 'static) {
        self.inner.changed.borrow_mut().subscribe(subscriber);
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            hotkey: vec![rdev::Key::ControlLeft, rdev::Key::Alt, rdev::Key::KeyD],
            activation_mode: ActivationMode::Hold,
            color: crate::draw::color::RED,
            thickness: 3.0,
            thickness_min: 1.0,
            thickness_max: 20.0,
            font_size: 32.0,
            font: FontDescriptor::default(),
            eraser_size: 24.0,
            max_elements: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn updates_are_visible_through_every_clone() {
        let handle = SettingsHandle::new(Settings::default());
        let other = handle.clone();

        handle.update(SettingsChange::Style, |s| s.thickness = 7.0);
        assert_eq!(other.with(|s| s.thickness), 7.0);
    }

    #[test]
    fn subscribers_see_the_change_kind_and_the_new_value() {
        let handle = SettingsHandle::new(Settings::default());
        let seen = Rc::new(Cell::new(None));

        {
            let seen = Rc::clone(&seen);
            let reader = handle.clone();
            handle.subscribe(move |change| {
                // Reading during notification must not conflict with the edit
                let mode = reader.activation_mode();
                seen.set(Some((*change, mode)));
            });
        }

        handle.update(SettingsChange::Hotkey, |s| {
            s.activation_mode = ActivationMode::Lock;
        });
        assert_eq!(
            seen.get(),
            Some((SettingsChange::Hotkey, ActivationMode::Lock))
        );
    }
}
