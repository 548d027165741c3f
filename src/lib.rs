mod app;
mod commands;
mod domain;
mod infra;
mod shared;

pub(crate) use app::{app_state, resident, widget_window};
pub(crate) use domain::{presence, tray_menu, widget_content};
pub(crate) use infra::{app_paths, autostart, settings, text_editor, widget_watch};

use app_state::ControllerState;
use commands::*;

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let builder = tauri::Builder::default();

    // Single instance first: a second process would be a second writer of config.ini.
    #[cfg(desktop)]
    let builder = builder
        .plugin(tauri_plugin_single_instance::init(|app, _argv, _cwd| {
            resident::show_main_window(app);
        }))
        .plugin(tauri_plugin_autostart::Builder::new().build());

    let app = builder
        .manage(ControllerState::default())
        .plugin(tauri_plugin_opener::init())
        .on_window_event(resident::on_window_event)
        .setup(|app| {
            crate::app::logging::init(app.handle());

            widget_window::create(app.handle())?;

            #[cfg(desktop)]
            {
                if let Err(err) = resident::setup_tray(app.handle()) {
                    tracing::error!("failed to initialize system tray: {}", err);
                }

                autostart::ensure_registered(app.handle());
            }

            match app_paths::widget_path(app.handle()) {
                Ok(path) => widget_watch::spawn(app.handle().clone(), path),
                Err(err) => tracing::warn!("widget source watch disabled: {}", err),
            }

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            widget_bounds_get,
            widget_move_by,
            widget_open_link
        ])
        .build(tauri::generate_context!())
        .expect("error while building tauri application");

    app.run(|app_handle, event| resident::on_run_event(app_handle, event));
}
