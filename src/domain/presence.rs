//! Usage: Presence controller. Owns the input-passthrough / always-on-top flags and mirrors them
//! into the live window, the tray labels and `config.ini`.
//!
//! The window and tray sit behind small traits so the synchronization rules run without a GUI.

use crate::settings::{SettingsRecord, SettingsStore, WindowState};
use crate::tray_menu::{self, Toggleable, TrayAction, TrayEntry};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowBounds {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// The live widget window as the controller sees it.
pub(crate) trait WidgetSurface {
    /// `true` lets pointer events fall through to whatever is beneath the window.
    fn set_input_passthrough(&self, passthrough: bool) -> Result<(), String>;
    fn set_always_on_top(&self, on_top: bool) -> Result<(), String>;
    fn bounds(&self) -> Result<WindowBounds, String>;
    fn is_visible(&self) -> bool;
    fn show(&self) -> Result<(), String>;
    fn hide(&self) -> Result<(), String>;
}

pub(crate) trait TrayPresenter {
    fn render(&self, entries: &[TrayEntry]) -> Result<(), String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceFlag {
    Input,
    AlwaysOnTop,
}

impl PresenceFlag {
    fn noun(self) -> &'static str {
        match self {
            PresenceFlag::Input => "Input",
            PresenceFlag::AlwaysOnTop => "Always On Top",
        }
    }

    fn tray_action(self) -> TrayAction {
        match self {
            PresenceFlag::Input => TrayAction::ToggleInput,
            PresenceFlag::AlwaysOnTop => TrayAction::ToggleAlwaysOnTop,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresenceState {
    pub input_enabled: bool,
    pub always_on_top: bool,
}

impl PresenceState {
    pub fn from_window_state(window_state: &WindowState) -> Self {
        Self {
            input_enabled: window_state.input_enabled,
            always_on_top: window_state.always_on_top,
        }
    }

    pub fn get(&self, flag: PresenceFlag) -> bool {
        match flag {
            PresenceFlag::Input => self.input_enabled,
            PresenceFlag::AlwaysOnTop => self.always_on_top,
        }
    }

    fn set(&mut self, flag: PresenceFlag, enabled: bool) {
        match flag {
            PresenceFlag::Input => self.input_enabled = enabled,
            PresenceFlag::AlwaysOnTop => self.always_on_top = enabled,
        }
    }
}

pub(crate) struct PresenceController<W, T> {
    store: SettingsStore,
    state: PresenceState,
    // Last record loaded or written by this controller; the file stays the source of truth
    // for fields the controller does not own.
    current_record: SettingsRecord,
    window: W,
    tray: T,
}

impl<W: WidgetSurface, T: TrayPresenter> PresenceController<W, T> {
    pub(crate) fn new(store: SettingsStore, record: SettingsRecord, window: W, tray: T) -> Self {
        Self {
            store,
            state: PresenceState::from_window_state(&record.window_state),
            current_record: record,
            window,
            tray,
        }
    }

    pub(crate) fn state(&self) -> PresenceState {
        self.state
    }

    #[cfg(test)]
    pub(crate) fn current_record(&self) -> &SettingsRecord {
        &self.current_record
    }

    #[cfg(test)]
    pub(crate) fn window(&self) -> &W {
        &self.window
    }

    fn apply_flag(&self, flag: PresenceFlag) -> Result<(), String> {
        match flag {
            PresenceFlag::Input => self
                .window
                .set_input_passthrough(!self.state.input_enabled),
            PresenceFlag::AlwaysOnTop => self.window.set_always_on_top(self.state.always_on_top),
        }
    }

    pub(crate) fn apply_initial_flags(&self) -> Result<(), String> {
        self.apply_flag(PresenceFlag::AlwaysOnTop)?;
        self.apply_flag(PresenceFlag::Input)
    }

    pub(crate) fn toggle_of(&mut self, flag: PresenceFlag) -> PresenceToggle<'_, W, T> {
        PresenceToggle {
            controller: self,
            flag,
        }
    }

    pub(crate) fn toggle_input(&mut self) -> Result<bool, String> {
        self.flip(PresenceFlag::Input)
    }

    pub(crate) fn toggle_always_on_top(&mut self) -> Result<bool, String> {
        self.flip(PresenceFlag::AlwaysOnTop)
    }

    /// Flip, apply to the window, then reload-patch-save only the flipped field.
    fn flip(&mut self, flag: PresenceFlag) -> Result<bool, String> {
        let enabled = !self.state.get(flag);
        self.state.set(flag, enabled);

        if let Err(err) = self.apply_flag(flag) {
            tracing::warn!(?flag, enabled, "failed to apply presence flag to window: {}", err);
        }

        // Labels track the in-memory flag even when the save fails.
        let persisted = self.persist_flag(flag, enabled);
        self.refresh_tray();
        persisted?;

        tracing::info!(?flag, enabled, "presence flag toggled");
        Ok(enabled)
    }

    fn persist_flag(&mut self, flag: PresenceFlag, enabled: bool) -> Result<(), String> {
        let mut record = self.reload_record()?;
        match flag {
            PresenceFlag::Input => record.window_state.input_enabled = enabled,
            PresenceFlag::AlwaysOnTop => record.window_state.always_on_top = enabled,
        }
        self.store.save(&record)?;
        self.current_record = record;
        Ok(())
    }

    /// Re-reads the file before patching it, noting fields edited on disk since our last write.
    fn reload_record(&self) -> Result<SettingsRecord, String> {
        let record = self.store.load()?;
        if record.appearance != self.current_record.appearance {
            tracing::debug!(
                appearance = ?record.appearance,
                "appearance changed on disk, keeping the edited values"
            );
        }
        Ok(record)
    }

    /// Replaces `windowState` with the given bounds and the flags currently in effect.
    pub(crate) fn persist_geometry(&mut self, bounds: WindowBounds) -> Result<(), String> {
        let mut record = self.reload_record()?;
        record.window_state = WindowState {
            width: bounds.width.max(1),
            height: bounds.height.max(1),
            x: Some(bounds.x),
            y: Some(bounds.y),
            input_enabled: self.state.input_enabled,
            always_on_top: self.state.always_on_top,
        };
        self.store.save(&record)?;
        self.current_record = record;

        tracing::trace!(?bounds, "window geometry persisted");
        Ok(())
    }

    pub(crate) fn persist_current_geometry(&mut self) -> Result<(), String> {
        let bounds = self.window.bounds()?;
        self.persist_geometry(bounds)
    }

    /// Writes both flags without touching geometry (used right before quitting).
    pub(crate) fn persist_flags(&mut self) -> Result<(), String> {
        let mut record = self.reload_record()?;
        record.window_state.input_enabled = self.state.input_enabled;
        record.window_state.always_on_top = self.state.always_on_top;
        self.store.save(&record)?;
        self.current_record = record;
        Ok(())
    }

    pub(crate) fn show_window(&mut self) -> Result<(), String> {
        let result = self.window.show();
        self.refresh_tray();
        result
    }

    /// Returns whether the window is visible afterwards.
    pub(crate) fn toggle_visibility(&mut self) -> Result<bool, String> {
        let result = if self.window.is_visible() {
            self.window.hide().map(|()| false)
        } else {
            self.window.show().map(|()| true)
        };
        self.refresh_tray();
        result
    }

    pub(crate) fn tray_entries(&mut self) -> Vec<TrayEntry> {
        let window_visible = self.window.is_visible();
        let input = Self::flag_entry(&self.toggle_of(PresenceFlag::Input));
        let always_on_top = Self::flag_entry(&self.toggle_of(PresenceFlag::AlwaysOnTop));
        tray_menu::build_entries(window_visible, input, always_on_top)
    }

    fn flag_entry(toggle: &PresenceToggle<'_, W, T>) -> TrayEntry {
        tray_menu::toggle_entry(toggle.flag.tray_action(), toggle.flag.noun(), toggle)
    }

    pub(crate) fn refresh_tray(&mut self) {
        let entries = self.tray_entries();
        if let Err(err) = self.tray.render(&entries) {
            tracing::warn!("failed to refresh tray menu: {}", err);
        }
    }
}

/// Borrowed view exposing one presence flag as a [`Toggleable`].
pub(crate) struct PresenceToggle<'a, W, T> {
    controller: &'a mut PresenceController<W, T>,
    flag: PresenceFlag,
}

impl<W: WidgetSurface, T: TrayPresenter> Toggleable for PresenceToggle<'_, W, T> {
    fn toggle(&mut self) -> Result<(), String> {
        let result = match self.flag {
            PresenceFlag::Input => self.controller.toggle_input(),
            PresenceFlag::AlwaysOnTop => self.controller.toggle_always_on_top(),
        };
        result.map(|_| ())
    }

    fn is_enabled(&self) -> bool {
        self.controller.state.get(self.flag)
    }
}
