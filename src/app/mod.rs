//! Usage: Application layer (Tauri-managed state, logging, tray/window lifecycle, window setup).

pub(crate) mod app_state;
pub(crate) mod logging;
pub(crate) mod resident;
pub(crate) mod widget_window;
