//! Usage: Keep the widget registered for OS auto-start (best-effort, never fatal).

#[cfg(desktop)]
pub fn ensure_registered(app: &tauri::AppHandle) {
    use tauri_plugin_autostart::ManagerExt;

    let launcher = app.autolaunch();
    match launcher.is_enabled() {
        Ok(true) => tracing::debug!("auto-start already registered"),
        Ok(false) => match launcher.enable() {
            Ok(()) => tracing::info!("auto-start registered"),
            Err(err) => tracing::warn!("failed to enable auto-start: {}", err),
        },
        Err(err) => tracing::warn!("failed to query auto-start registration: {}", err),
    }
}

#[cfg(not(desktop))]
pub fn ensure_registered(_app: &tauri::AppHandle) {}
