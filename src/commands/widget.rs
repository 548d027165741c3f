//! Usage: Commands the content view uses to drag the frameless window and open links.
//!
//! These talk to the window directly and never take the presence controller lock.

use crate::presence::{WidgetSurface, WindowBounds};
use tauri_plugin_opener::OpenerExt;

fn translate(bounds: WindowBounds, dx: i32, dy: i32) -> WindowBounds {
    WindowBounds {
        x: bounds.x.saturating_add(dx),
        y: bounds.y.saturating_add(dy),
        ..bounds
    }
}

fn validate_external_url(raw: &str) -> Result<&str, String> {
    let trimmed = raw.trim();
    let scheme = trimmed
        .split_once("://")
        .map(|(scheme, _)| scheme.to_ascii_lowercase());
    match scheme.as_deref() {
        Some("http") | Some("https") => Ok(trimmed),
        _ => Err(format!(
            "SEC_INVALID_INPUT: only http(s) links can be opened, got {trimmed}"
        )),
    }
}

#[tauri::command]
pub(crate) fn widget_bounds_get(window: tauri::WebviewWindow) -> Result<WindowBounds, String> {
    WidgetSurface::bounds(&window)
}

/// Moves the window by a logical-pixel delta, keeping its size. The resulting move event
/// persists the new geometry.
#[tauri::command]
pub(crate) fn widget_move_by(
    window: tauri::WebviewWindow,
    dx: i32,
    dy: i32,
) -> Result<WindowBounds, String> {
    let next = translate(WidgetSurface::bounds(&window)?, dx, dy);
    window
        .set_position(tauri::LogicalPosition::new(
            f64::from(next.x),
            f64::from(next.y),
        ))
        .map_err(|e| format!("failed to move window: {e}"))?;
    Ok(next)
}

#[tauri::command]
pub(crate) fn widget_open_link(app: tauri::AppHandle, url: String) -> Result<(), String> {
    let url = validate_external_url(&url)?;
    app.opener()
        .open_url(url, None::<&str>)
        .map_err(|e| format!("failed to open link: {e}"))
}
