//! Usage: Tauri commands exposed to the widget content view.

mod widget;

pub(crate) use widget::*;
