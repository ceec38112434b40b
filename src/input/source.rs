//! Global keyboard interception source.
//!
//! [`KeyEventSource`] owns the system-wide key listener and is the only
//! component that touches the operating system's input pipeline. The OS
//! invokes the capture callback on its own dispatch context, so the callback
//! obeys a hard contract: it never panics outward, never blocks, does no I/O,
//! and hands each event to an in-process queue before returning. The app
//! thread drains that queue at its own pace; ordering is FIFO end to end.
//!
//! Install/uninstall state is guarded by a single mutex shared between
//! `start`, `stop`, and `dispose` so a callback can never observe a
//! half-torn-down source: the event sender is cleared before the backend is
//! released, which instantly makes the callback inert.

use super::key::{KeyCode, KeyEvent};
use std::collections::HashSet;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Receiver, Sender, channel};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Input-pipeline failures. The hotkey cannot function without the listener,
/// so callers treat these as fatal to the application.
#[derive(Debug, Error)]
pub enum HookError {
    /// The OS-level listener could not be installed.
    #[error("failed to install global key listener: {0}")]
    Install(String),

    /// The listener thread died after a successful install.
    #[error("global key listener terminated unexpectedly: {0}")]
    ListenerDied(String),
}

/// What the capture callback tells the OS hook chain to do with an event.
///
/// Backends that merely observe the input stream ignore this; backends that
/// sit in the delivery path use it to withhold hotkey keys from other
/// applications while drawing mode is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    /// Pass the event on to the next handler in the system chain.
    Forward,
    /// Consume the event; other applications never see it.
    Suppress,
}

/// State shared between the source and the capture callback.
///
/// Everything here must stay cheap to touch: the callback runs on the OS
/// dispatch context and completes in microseconds.
#[derive(Default)]
struct HookShared {
    /// Queue into the app thread. `None` while stopped; the callback drops
    /// events instead of blocking.
    sender: Mutex<Option<Sender<KeyEvent>>>,
    /// True while drawing mode is active and hotkey keys should be withheld.
    suppress_active: AtomicBool,
    /// Keys eligible for suppression (hotkey combination plus escape).
    suppressed_keys: Mutex<HashSet<KeyCode>>,
    /// Asynchronous listener failure, surfaced via `take_fault`.
    fault: Mutex<Option<HookError>>,
}

/// The callback handed to a [`CaptureBackend`].
///
/// [`HookCallback::process`] is the single entry point from the OS side.
#[derive(Clone)]
pub struct HookCallback {
    shared: Arc<HookShared>,
}

impl HookCallback {
    /// Handles one key transition from the OS.
    ///
    /// Never panics outward: any fault in the dispatch path is caught and
    /// logged, and the event is forwarded so the system input chain keeps
    /// flowing no matter what.
    pub fn process(&self, event: KeyEvent) -> KeyDisposition {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.dispatch(event)));
        match outcome {
            Ok(disposition) => disposition,
            Err(_) => {
                log::error!("capture callback panicked; forwarding event and continuing");
                KeyDisposition::Forward
            }
        }
    }

    fn dispatch(&self, event: KeyEvent) -> KeyDisposition {
        if let Ok(guard) = self.shared.sender.lock() {
            if let Some(sender) = guard.as_ref() {
                // Queue-and-return; the app thread does the real work
                let _ = sender.send(event);
            }
        }

        if !self.shared.suppress_active.load(Ordering::Relaxed) {
            return KeyDisposition::Forward;
        }

        let suppressed = self
            .shared
            .suppressed_keys
            .lock()
            .map(|keys| keys.contains(&event.key))
            .unwrap_or(false);

        if suppressed {
            KeyDisposition::Suppress
        } else {
            KeyDisposition::Forward
        }
    }

    /// Records an asynchronous listener failure for `take_fault`.
    pub(crate) fn record_fault(&self, error: HookError) {
        if let Ok(mut slot) = self.shared.fault.lock() {
            *slot = Some(error);
        }
    }
}

/// Backend that physically installs the OS listener.
///
/// Production uses [`RdevBackend`]; tests substitute an in-memory fake so the
/// lifecycle contract can be exercised without touching the OS.
pub trait CaptureBackend: Send {
    /// Installs the listener, wiring every key transition into `callback`.
    fn install(&mut self, callback: HookCallback) -> Result<(), HookError>;

    /// Releases the listener. Must be safe to call when not installed.
    fn uninstall(&mut self) -> Result<(), HookError>;
}

/// `rdev`-based backend: a dedicated thread runs the OS event loop.
///
/// `rdev::listen` cannot be cancelled once running, so `uninstall` leaves the
/// thread parked in the OS loop; clearing the event sender (done by the
/// source before uninstall) makes the callback inert, which is the observable
/// teardown. The thread is reused if the source is started again.
#[derive(Default)]
pub struct RdevBackend {
    listening: bool,
}

impl CaptureBackend for RdevBackend {
    fn install(&mut self, callback: HookCallback) -> Result<(), HookError> {
        if self.listening {
            return Ok(());
        }

        let fault_reporter = callback.clone();
        std::thread::Builder::new()
            .name("overscribe-keyhook".to_string())
            .spawn(move || {
                let listener = callback.clone();
                let result = rdev::listen(move |event| {
                    let key_event = match event.event_type {
                        rdev::EventType::KeyPress(key) => KeyEvent::pressed(key),
                        rdev::EventType::KeyRelease(key) => KeyEvent::released(key),
                        _ => return,
                    };
                    listener.process(key_event);
                });
                if let Err(err) = result {
                    let message = format!("{err:?}");
                    log::error!("global key listener exited: {message}");
                    fault_reporter.record_fault(HookError::ListenerDied(message));
                }
            })
            .map_err(|err| HookError::Install(err.to_string()))?;

        self.listening = true;
        Ok(())
    }

    fn uninstall(&mut self) -> Result<(), HookError> {
        // The OS loop cannot be interrupted; the cleared sender already made
        // the callback inert. Keep the thread for a possible restart.
        log::debug!("key listener detached (OS loop left parked)");
        Ok(())
    }
}

struct SourceState {
    installed: bool,
    disposed: bool,
    backend: Box<dyn CaptureBackend>,
    receiver: Option<Receiver<KeyEvent>>,
}

/// Owner of the global key listener lifecycle.
pub struct KeyEventSource {
    shared: Arc<HookShared>,
    state: Mutex<SourceState>,
}

impl KeyEventSource {
    /// Creates a source backed by the OS listener.
    pub fn new() -> Self {
        Self::with_backend(Box::new(RdevBackend::default()))
    }

    /// Creates a source with a custom capture backend.
    pub fn with_backend(backend: Box<dyn CaptureBackend>) -> Self {
        Self {
            shared: Arc::new(HookShared::default()),
            state: Mutex::new(SourceState {
                installed: false,
                disposed: false,
                backend,
                receiver: None,
            }),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, SourceState> {
        // A panic while holding the lock poisons it; the state itself is
        // still coherent (every mutation is a single field store), so recover
        self.state
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Installs the global listener.
    ///
    /// Idempotent while the source is alive. After [`KeyEventSource::dispose`]
    /// this is a no-op that logs a warning. Install failure is returned as a
    /// structured [`HookError`]; the caller decides whether that is fatal
    /// (for a hotkey-driven overlay it is).
    pub fn start(&self) -> Result<(), HookError> {
        let mut state = self.lock_state();

        if state.disposed {
            log::warn!("start() called on a disposed key event source; ignoring");
            return Ok(());
        }
        if state.installed {
            return Ok(());
        }

        let (sender, receiver) = channel();
        if let Ok(mut slot) = self.shared.sender.lock() {
            *slot = Some(sender);
        }
        state.receiver = Some(receiver);

        let callback = HookCallback {
            shared: Arc::clone(&self.shared),
        };
        if let Err(err) = state.backend.install(callback) {
            // Roll back so a later retry starts clean
            if let Ok(mut slot) = self.shared.sender.lock() {
                *slot = None;
            }
            state.receiver = None;
            return Err(err);
        }

        state.installed = true;
        log::info!("global key listener installed");
        Ok(())
    }

    /// Releases the listener. Safe to call repeatedly and concurrently.
    pub fn stop(&self) {
        let mut state = self.lock_state();
        self.shutdown_locked(&mut state);
    }

    /// Releases the listener and permanently retires the source.
    pub fn dispose(&self) {
        let mut state = self.lock_state();
        self.shutdown_locked(&mut state);
        state.disposed = true;
    }

    fn shutdown_locked(&self, state: &mut SourceState) {
        if !state.installed {
            return;
        }

        // Clear the sender first: from this point the callback drops events,
        // even if the backend release below fails
        if let Ok(mut slot) = self.shared.sender.lock() {
            *slot = None;
        }

        if let Err(err) = state.backend.uninstall() {
            log::warn!("failed to release key listener: {err}");
        }

        state.receiver = None;
        state.installed = false;
        log::info!("global key listener released");
    }

    /// Drains queued key events in arrival order.
    pub fn drain_events(&self) -> Vec<KeyEvent> {
        let state = self.lock_state();
        let mut events = Vec::new();
        if let Some(receiver) = &state.receiver {
            while let Ok(event) = receiver.try_recv() {
                events.push(event);
            }
        }
        events
    }

    /// Turns hook-level key suppression on or off (drawing mode active).
    pub fn set_suppression_active(&self, active: bool) {
        self.shared.suppress_active.store(active, Ordering::Relaxed);
    }

    /// Replaces the set of keys eligible for suppression.
    ///
    /// Callers pass the current hotkey combination plus the escape key, and
    /// refresh it whenever the hotkey is reconfigured.
    pub fn set_suppressed_keys(&self, keys: &[KeyCode]) {
        if let Ok(mut slot) = self.shared.suppressed_keys.lock() {
            *slot = keys.iter().copied().collect();
        }
    }

    /// Takes the most recent asynchronous listener failure, if any.
    pub fn take_fault(&self) -> Option<HookError> {
        self.shared.fault.lock().ok().and_then(|mut slot| slot.take())
    }
}

impl Default for KeyEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for KeyEventSource {
    fn drop(&mut self) {
        self.dispose();
    }
}
