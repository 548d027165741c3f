//! Usage: Toolkit-independent logic (presence synchronization, tray menu model, widget content).

pub(crate) mod presence;
pub(crate) mod tray_menu;
pub(crate) mod widget_content;
