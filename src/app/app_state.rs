//! Usage: Tauri-managed state shared by tray handlers, window events and commands.

use crate::presence::PresenceController;
use crate::resident::TauriTray;
use crate::shared::mutex_ext::MutexExt;
use std::sync::{Mutex, TryLockError};
use tauri::Manager;

pub(crate) type WidgetController = PresenceController<tauri::WebviewWindow, TauriTray>;

/// Holds the presence controller of the live widget window. Empty until the window exists and
/// again after it is destroyed.
#[derive(Default)]
pub(crate) struct ControllerState(pub(crate) Mutex<Option<WidgetController>>);

impl ControllerState {
    pub(crate) fn install(&self, controller: WidgetController) {
        *self.0.lock_or_recover() = Some(controller);
    }

    pub(crate) fn clear(&self) {
        self.0.lock_or_recover().take();
    }
}

/// Runs `f` against the controller, if one is installed.
///
/// Only call this from the main (event loop) thread: window getters issued while the lock is
/// held are answered by that same thread.
pub(crate) fn with_controller<R>(
    app: &tauri::AppHandle,
    f: impl FnOnce(&mut WidgetController) -> R,
) -> Option<R> {
    let state = app.state::<ControllerState>();
    let mut guard = state.0.lock_or_recover();
    guard.as_mut().map(f)
}

/// Like [`with_controller`], but skips `f` when the controller is already borrowed further up
/// the stack (window events can be dispatched while a tray action is still running).
pub(crate) fn try_with_controller<R>(
    app: &tauri::AppHandle,
    f: impl FnOnce(&mut WidgetController) -> R,
) -> Option<R> {
    let state = app.state::<ControllerState>();
    let mut guard = match state.0.try_lock() {
        Ok(guard) => guard,
        Err(TryLockError::Poisoned(poisoned)) => {
            tracing::warn!("controller mutex was poisoned; continuing with recovered state");
            poisoned.into_inner()
        }
        Err(TryLockError::WouldBlock) => {
            tracing::debug!("controller busy, skipping window event");
            return None;
        }
    };
    guard.as_mut().map(f)
}
