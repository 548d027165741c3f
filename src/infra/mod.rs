//! Usage: Infrastructure adapters (filesystem paths, persistence, OS integration).

pub(crate) mod app_paths;
pub(crate) mod autostart;
pub(crate) mod settings;
pub(crate) mod text_editor;
pub(crate) mod widget_watch;
