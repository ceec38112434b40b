//! Drawing mode life cycle: enable, disable, escape, emergency reset.
//!
//! The controller owns the transition between the host system's normal input
//! path and the annotation overlay. Its one non-negotiable invariant: no code
//! path may leave the overlay shown (and input capture active) after an
//! unrecovered fault. Transition errors roll the state back to `Inactive`
//! before propagating, and the escape/emergency paths guard every cleanup
//! step independently so one failure cannot skip the rest.

use crate::config::{ActivationMode, SettingsHandle};
use crate::event::Signal;
use thiserror::Error;

/// A failed operation on the external drawing surface.
#[derive(Debug, Error)]
#[error("drawing surface operation '{operation}' failed: {message}")]
pub struct SurfaceError {
    pub operation: &'static str,
    pub message: String,
}

impl SurfaceError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// The annotation overlay, owned elsewhere and driven through this trait.
pub trait OverlaySurface {
    /// Makes the overlay visible above all other windows.
    fn show(&mut self) -> Result<(), SurfaceError>;

    /// Gives the overlay keyboard/pointer focus.
    fn focus(&mut self) -> Result<(), SurfaceError>;

    /// Hides the overlay, returning input to the host system.
    fn hide(&mut self) -> Result<(), SurfaceError>;

    /// Whether the help overlay is currently shown.
    fn help_visible(&self) -> bool;

    /// Closes the help overlay (only).
    fn hide_help(&mut self) -> Result<(), SurfaceError>;
}

/// Drawing mode state.
///
/// `ActiveLocked` is only entered and left through full hotkey press-release
/// cycles in lock mode; `ActiveHeld` exists only while the combination is
/// physically held in hold mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeState {
    Inactive,
    ActiveHeld,
    ActiveLocked,
}

impl ModeState {
    pub fn is_active(self) -> bool {
        !matches!(self, ModeState::Inactive)
    }
}

/// What an escape press did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EscapeOutcome {
    /// Only the help overlay was closed; drawing mode stays active.
    HelpDismissed,
    /// Drawing mode was forced inactive.
    Deactivated,
}

/// Owns the enable/disable/lock/hold life cycle of the annotation surface.
pub struct DrawingModeController {
    state: ModeState,
    surface: Box<dyn OverlaySurface>,
    settings: SettingsHandle,
    /// Fires on every state change; subscribers include the key event source
    /// (hook-level suppression) and the tool engine.
    pub mode_changed: Signal<ModeState>,
}

impl DrawingModeController {
    pub fn new(surface: Box<dyn OverlaySurface>, settings: SettingsHandle) -> Self {
        Self {
            state: ModeState::Inactive,
            surface,
            settings,
            mode_changed: Signal::new("drawing-mode-changed"),
        }
    }

    /// Current drawing mode state.
    pub fn state(&self) -> ModeState {
        self.state
    }

    /// Reacts to hotkey activation.
    ///
    /// The activation mode is read from settings at this moment, not cached,
    /// so the user can flip hold/lock between sessions. In lock mode a second
    /// activation while locked toggles drawing mode back off.
    ///
    /// # Errors
    /// A surface fault during the transition forces the state back to
    /// `Inactive` (best effort) and then propagates, so a top-level handler
    /// can run the emergency reset.
    pub fn enable(&mut self) -> Result<(), SurfaceError> {
        match self.settings.activation_mode() {
            ActivationMode::Lock => {
                if self.state == ModeState::ActiveLocked {
                    self.transition_inactive()
                } else {
                    self.transition_active(ModeState::ActiveLocked)
                }
            }
            ActivationMode::Hold => {
                if self.state == ModeState::ActiveHeld {
                    Ok(())
                } else {
                    self.transition_active(ModeState::ActiveHeld)
                }
            }
        }
    }

    /// Reacts to hotkey deactivation (combination released).
    ///
    /// In lock mode this is deliberately a no-op: a locked session only ends
    /// through another full hotkey cycle or escape, never through releasing
    /// the keys. In hold mode it ends the held session.
    pub fn disable(&mut self) -> Result<(), SurfaceError> {
        if self.settings.activation_mode() == ActivationMode::Lock {
            return Ok(());
        }
        if self.state == ModeState::ActiveHeld {
            self.transition_inactive()
        } else {
            Ok(())
        }
    }

    /// Reacts to the escape key.
    ///
    /// If the help overlay is open, only the overlay closes and drawing mode
    /// stays active. Otherwise the state is forced to `Inactive` regardless
    /// of how it was entered. Never propagates a fault: this is the last line
    /// of defense against leaving input capture active.
    pub fn force_disable(&mut self) -> EscapeOutcome {
        if self.state.is_active() && self.surface.help_visible() {
            if let Err(err) = self.surface.hide_help() {
                log::warn!("failed to close help overlay: {err}");
            }
            return EscapeOutcome::HelpDismissed;
        }

        self.force_inactive();
        EscapeOutcome::Deactivated
    }

    /// Callable from a top-level unhandled-fault handler.
    ///
    /// Idempotent. Forces `Inactive` and releases the surface; every cleanup
    /// step is independently guarded so a partial failure does not abort the
    /// remaining steps.
    pub fn emergency_reset(&mut self) {
        log::warn!("emergency reset: forcing drawing mode inactive");

        if let Err(err) = self.surface.hide_help() {
            log::warn!("emergency reset: failed to close help overlay: {err}");
        }
        self.force_inactive();
    }

    fn transition_active(&mut self, target: ModeState) -> Result<(), SurfaceError> {
        match self.try_show(target) {
            Ok(()) => Ok(()),
            Err(err) => {
                log::error!("failed to enter drawing mode: {err}; forcing inactive");
                self.force_inactive();
                Err(err)
            }
        }
    }

    fn try_show(&mut self, target: ModeState) -> Result<(), SurfaceError> {
        self.surface.show()?;
        self.surface.focus()?;
        self.state = target;
        log::info!("drawing mode entered ({target:?})");
        self.mode_changed.emit(&target);
        Ok(())
    }

    fn transition_inactive(&mut self) -> Result<(), SurfaceError> {
        match self.surface.hide() {
            Ok(()) => {
                self.state = ModeState::Inactive;
                log::info!("drawing mode left");
                self.mode_changed.emit(&ModeState::Inactive);
                Ok(())
            }
            Err(err) => {
                log::error!("failed to leave drawing mode cleanly: {err}; forcing inactive");
                self.force_inactive();
                Err(err)
            }
        }
    }

    /// Best-effort drop to `Inactive`; logs instead of propagating.
    fn force_inactive(&mut self) {
        if let Err(err) = self.surface.hide() {
            log::warn!("failed to hide drawing surface: {err}");
        }

        if self.state.is_active() {
            self.state = ModeState::Inactive;
            self.mode_changed.emit(&ModeState::Inactive);
        }
    }
}
