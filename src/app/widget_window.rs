//! Usage: Create the frameless widget window and feed it content + appearance.

use crate::app_state::ControllerState;
use crate::presence::{PresenceController, WidgetSurface, WindowBounds};
use crate::resident::{TauriTray, MAIN_WINDOW_LABEL};
use crate::settings::{Appearance, SettingsStore};
use crate::{app_paths, widget_content};
use std::path::Path;
use tauri::webview::PageLoadEvent;
use tauri::{Emitter, Manager, WebviewUrl, WebviewWindow, WebviewWindowBuilder};

impl WidgetSurface for WebviewWindow {
    fn set_input_passthrough(&self, passthrough: bool) -> Result<(), String> {
        self.set_ignore_cursor_events(passthrough)
            .map_err(|e| format!("failed to set cursor passthrough: {e}"))
    }

    fn set_always_on_top(&self, on_top: bool) -> Result<(), String> {
        WebviewWindow::set_always_on_top(self, on_top)
            .map_err(|e| format!("failed to set always-on-top: {e}"))
    }

    // Logical pixels, matching what the window was created with.
    fn bounds(&self) -> Result<WindowBounds, String> {
        let scale = self
            .scale_factor()
            .map_err(|e| format!("failed to read scale factor: {e}"))?;
        let position = self
            .outer_position()
            .map_err(|e| format!("failed to read window position: {e}"))?
            .to_logical::<f64>(scale);
        let size = self
            .inner_size()
            .map_err(|e| format!("failed to read window size: {e}"))?
            .to_logical::<f64>(scale);

        Ok(WindowBounds {
            x: position.x.round() as i32,
            y: position.y.round() as i32,
            width: size.width.round() as u32,
            height: size.height.round() as u32,
        })
    }

    fn is_visible(&self) -> bool {
        WebviewWindow::is_visible(self).unwrap_or(false)
    }

    fn show(&self) -> Result<(), String> {
        WebviewWindow::show(self).map_err(|e| format!("failed to show window: {e}"))
    }

    fn hide(&self) -> Result<(), String> {
        WebviewWindow::hide(self).map_err(|e| format!("failed to hide window: {e}"))
    }
}

fn read_widget_html(path: &Path) -> Result<String, String> {
    std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read widget source {}: {e}", path.display()))
}

fn send_initial_content(
    window: &WebviewWindow,
    widget_path: &Path,
    appearance: &Appearance,
) -> Result<(), String> {
    let payload = widget_content::load_payload(&read_widget_html(widget_path)?);
    window
        .emit_to(MAIN_WINDOW_LABEL, widget_content::LOAD_EVENT, payload)
        .map_err(|e| format!("failed to send widget content: {e}"))?;
    window
        .emit_to(MAIN_WINDOW_LABEL, widget_content::APPEARANCE_EVENT, appearance)
        .map_err(|e| format!("failed to send widget appearance: {e}"))
}

/// Re-reads the widget source and pushes it to the content view.
pub(crate) fn reload_content(app: &tauri::AppHandle, widget_path: &Path) -> Result<(), String> {
    let payload = widget_content::load_payload(&read_widget_html(widget_path)?);
    app.emit_to(MAIN_WINDOW_LABEL, widget_content::LOAD_EVENT, payload)
        .map_err(|e| format!("failed to send widget content: {e}"))
}

/// Loads settings, builds the window from them and installs a fresh presence controller.
pub(crate) fn create(app: &tauri::AppHandle) -> Result<(), String> {
    let store = SettingsStore::for_app(app)?;
    let record = store.load()?;
    let widget_path = app_paths::widget_path(app)?;
    let window_state = &record.window_state;

    let appearance = record.appearance.clone();
    let mut builder = WebviewWindowBuilder::new(
        app,
        MAIN_WINDOW_LABEL,
        WebviewUrl::App("index.html".into()),
    )
    .title("Ticker Widget")
    .inner_size(f64::from(window_state.width), f64::from(window_state.height))
    .decorations(false)
    .transparent(true)
    .shadow(false)
    .resizable(true)
    .skip_taskbar(true)
    .always_on_top(window_state.always_on_top)
    .on_page_load(move |window, payload| {
        if !matches!(payload.event(), PageLoadEvent::Finished) {
            return;
        }
        if let Err(err) = send_initial_content(&window, &widget_path, &appearance) {
            tracing::warn!("failed to initialize widget content: {}", err);
        }
    });

    if let Some((x, y)) = window_state.position() {
        builder = builder.position(f64::from(x), f64::from(y));
    }

    let window = builder
        .build()
        .map_err(|e| format!("failed to create widget window: {e}"))?;

    tracing::info!(
        width = window_state.width,
        height = window_state.height,
        position = ?window_state.position(),
        input_enabled = window_state.input_enabled,
        always_on_top = window_state.always_on_top,
        "widget window created"
    );

    let controller = PresenceController::new(store, record, window, TauriTray::new(app.clone()));
    if let Err(err) = controller.apply_initial_flags() {
        tracing::warn!("failed to apply initial window flags: {}", err);
    }
    app.state::<ControllerState>().install(controller);

    Ok(())
}
