//! Usage: Desktop resident mode (tray icon + menu actions, widget window lifecycle hooks).

use crate::app_state::{try_with_controller, with_controller, ControllerState};
use crate::presence::{PresenceFlag, TrayPresenter};
use crate::tray_menu::{Toggleable, TrayAction, TrayEntry, TRAY_TOOLTIP};
use crate::{app_paths, text_editor, widget_window};

pub(crate) const MAIN_WINDOW_LABEL: &str = "main";
const TRAY_ID: &str = "main-tray";

/// On macOS an app conventionally stays alive (in the tray) with no windows open.
const KEEP_ALIVE_WITHOUT_WINDOWS: bool = cfg!(target_os = "macos");

#[cfg(not(desktop))]
pub(crate) struct TauriTray;

#[cfg(not(desktop))]
impl TauriTray {
    pub(crate) fn new(_app: tauri::AppHandle) -> Self {
        Self
    }
}

#[cfg(not(desktop))]
impl TrayPresenter for TauriTray {
    fn render(&self, _entries: &[TrayEntry]) -> Result<(), String> {
        Ok(())
    }
}

#[cfg(not(desktop))]
pub fn setup_tray(_app: &tauri::AppHandle) -> Result<(), String> {
    Ok(())
}

#[cfg(desktop)]
use tauri::menu::{IsMenuItem, Menu, MenuItem, PredefinedMenuItem};
#[cfg(desktop)]
use tauri::tray::{MouseButton, MouseButtonState, TrayIconBuilder, TrayIconEvent};
use tauri::Manager;

/// Renders tray entries into the tray icon's context menu.
#[cfg(desktop)]
pub(crate) struct TauriTray {
    app: tauri::AppHandle,
}

#[cfg(desktop)]
impl TauriTray {
    pub(crate) fn new(app: tauri::AppHandle) -> Self {
        Self { app }
    }
}

#[cfg(desktop)]
fn build_menu(app: &tauri::AppHandle, entries: &[TrayEntry]) -> Result<Menu<tauri::Wry>, String> {
    let items = entries
        .iter()
        .map(|entry| {
            MenuItem::with_id(app, entry.action.id(), &entry.label, true, None::<&str>)
                .map_err(|e| format!("failed to create tray menu item {}: {e}", entry.action.id()))
        })
        .collect::<Result<Vec<_>, String>>()?;
    let separator = PredefinedMenuItem::separator(app)
        .map_err(|e| format!("failed to create tray menu separator: {e}"))?;

    let mut refs: Vec<&dyn IsMenuItem<tauri::Wry>> = Vec::with_capacity(items.len() + 1);
    for (item, entry) in items.iter().zip(entries) {
        if entry.action == TrayAction::Quit {
            refs.push(&separator);
        }
        refs.push(item);
    }

    Menu::with_items(app, &refs).map_err(|e| format!("failed to create tray menu: {e}"))
}

#[cfg(desktop)]
impl TrayPresenter for TauriTray {
    fn render(&self, entries: &[TrayEntry]) -> Result<(), String> {
        let menu = build_menu(&self.app, entries)?;
        let tray = self
            .app
            .tray_by_id(TRAY_ID)
            .ok_or_else(|| "tray icon is not initialized".to_string())?;
        tray.set_menu(Some(menu))
            .map_err(|e| format!("failed to set tray menu: {e}"))
    }
}

#[cfg(desktop)]
pub fn setup_tray(app: &tauri::AppHandle) -> Result<(), String> {
    let entries = with_controller(app, |controller| controller.tray_entries())
        .ok_or_else(|| "widget window is not initialized".to_string())?;
    let menu = build_menu(app, &entries)?;

    #[cfg(target_os = "macos")]
    let icon_bytes = include_bytes!("../../icons/trayTemplate.png");
    #[cfg(not(target_os = "macos"))]
    let icon_bytes = include_bytes!("../../icons/32x32.png");

    let icon = tauri::image::Image::from_bytes(icon_bytes)
        .map_err(|e| format!("failed to load tray icon: {e}"))?;

    let tray_builder = TrayIconBuilder::with_id(TRAY_ID)
        .icon(icon)
        .tooltip(TRAY_TOOLTIP)
        .menu(&menu);

    #[cfg(target_os = "macos")]
    let tray_builder = tray_builder.icon_as_template(true);

    tray_builder
        .show_menu_on_left_click(false)
        .on_menu_event(|app, event| match TrayAction::from_id(event.id().as_ref()) {
            Some(action) => handle_tray_action(app, action),
            None => tracing::debug!(id = ?event.id(), "ignoring unknown tray menu id"),
        })
        .on_tray_icon_event(|tray, event| match event {
            TrayIconEvent::Click {
                button: MouseButton::Left,
                button_state: MouseButtonState::Up,
                ..
            }
            | TrayIconEvent::DoubleClick {
                button: MouseButton::Left,
                ..
            } => show_main_window(tray.app_handle()),
            _ => {}
        })
        .build(app)
        .map_err(|e| format!("failed to build tray icon: {e}"))?;

    Ok(())
}

fn toggle_flag(app: &tauri::AppHandle, flag: PresenceFlag) {
    let result = with_controller(app, |controller| controller.toggle_of(flag).toggle());
    if let Some(Err(err)) = result {
        tracing::error!(?flag, "failed to toggle presence flag: {}", err);
    }
}

pub(crate) fn handle_tray_action(app: &tauri::AppHandle, action: TrayAction) {
    match action {
        TrayAction::ToggleVisibility => {
            match with_controller(app, |controller| controller.toggle_visibility()) {
                Some(Ok(_)) => {}
                Some(Err(err)) => tracing::error!("failed to toggle window visibility: {}", err),
                None => recreate_main_window(app),
            }
        }
        TrayAction::ChangeTickers => match app_paths::widget_path(app) {
            Ok(path) => text_editor::open_in_text_editor(&path),
            Err(err) => tracing::warn!("failed to resolve widget source: {}", err),
        },
        TrayAction::ToggleInput => toggle_flag(app, PresenceFlag::Input),
        TrayAction::ToggleAlwaysOnTop => toggle_flag(app, PresenceFlag::AlwaysOnTop),
        TrayAction::Quit => {
            let result = with_controller(app, |controller| {
                let state = controller.state();
                controller.persist_flags().map(|()| state)
            });
            match result {
                Some(Ok(state)) => tracing::info!(?state, "quitting"),
                Some(Err(err)) => {
                    tracing::error!("failed to persist presence flags before quitting: {}", err)
                }
                None => tracing::info!("quitting"),
            }
            app.exit(0);
        }
    }
}

fn recreate_main_window(app: &tauri::AppHandle) {
    if let Err(err) = widget_window::create(app) {
        tracing::error!("failed to recreate widget window: {}", err);
        return;
    }
    with_controller(app, |controller| controller.refresh_tray());
}

/// Shows (and focuses) the widget, recreating it when no window is left.
pub fn show_main_window(app: &tauri::AppHandle) {
    match with_controller(app, |controller| controller.show_window()) {
        Some(Ok(())) => {}
        Some(Err(err)) => tracing::warn!("failed to show widget window: {}", err),
        None => recreate_main_window(app),
    }

    if let Some(window) = app.get_webview_window(MAIN_WINDOW_LABEL) {
        let _ = window.unminimize();
        let _ = window.set_focus();
    }
}

pub fn on_window_event(window: &tauri::Window, event: &tauri::WindowEvent) {
    if window.label() != MAIN_WINDOW_LABEL {
        return;
    }

    let app = window.app_handle();
    match event {
        tauri::WindowEvent::Moved(_)
        | tauri::WindowEvent::Resized(_)
        | tauri::WindowEvent::CloseRequested { .. } => {
            let result =
                try_with_controller(app, |controller| controller.persist_current_geometry());
            if let Some(Err(err)) = result {
                tracing::error!("failed to persist window geometry: {}", err);
            }
        }
        tauri::WindowEvent::Destroyed => {
            app.state::<ControllerState>().clear();
            tracing::debug!("widget window destroyed");
        }
        _ => {}
    }
}

#[cfg_attr(not(target_os = "macos"), allow(unused_variables))]
pub fn on_run_event(app: &tauri::AppHandle, event: tauri::RunEvent) {
    match event {
        // `code` is `None` when the last window closed on its own.
        tauri::RunEvent::ExitRequested { api, code, .. } => {
            if code.is_none() && KEEP_ALIVE_WITHOUT_WINDOWS {
                api.prevent_exit();
                tracing::info!("last window closed, staying resident");
            }
        }
        #[cfg(target_os = "macos")]
        tauri::RunEvent::Reopen {
            has_visible_windows,
            ..
        } => {
            if !has_visible_windows {
                show_main_window(app);
            }
        }
        _ => {}
    }
}
