//! Usage: Resolve the widget data directory (config.ini, widget.html, logs) and related paths.

use std::path::PathBuf;
use tauri::Manager;

pub const APP_DOTDIR_NAME: &str = ".ticker-widget";
const APP_DOTDIR_NAME_ENV: &str = "TICKER_WIDGET_DOTDIR_NAME";

pub const SETTINGS_FILE_NAME: &str = "config.ini";
pub const WIDGET_FILE_NAME: &str = "widget.html";
const BUNDLED_WIDGET_RESOURCE: &str = "resources/widget.html";

fn is_safe_dotdir_name(name: &str) -> bool {
    if name.is_empty() || name == "." || name == ".." {
        return false;
    }
    if !name.starts_with('.') {
        return false;
    }
    if name.contains('/') || name.contains('\\') {
        return false;
    }
    name.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_')
}

fn dotdir_name() -> String {
    std::env::var(APP_DOTDIR_NAME_ENV)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| is_safe_dotdir_name(v))
        .unwrap_or_else(|| APP_DOTDIR_NAME.to_string())
}

/// Development builds keep everything next to the sources so the files are easy to hand-edit;
/// packaged builds use a per-user dot directory.
pub fn app_data_dir(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    let dir = if cfg!(debug_assertions) {
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("resources")
    } else {
        let home_dir = app
            .path()
            .home_dir()
            .map_err(|e| format!("failed to resolve home dir: {e}"))?;
        home_dir.join(dotdir_name())
    };

    std::fs::create_dir_all(&dir).map_err(|e| format!("failed to create app dir: {e}"))?;

    Ok(dir)
}

pub fn settings_path(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    Ok(app_data_dir(app)?.join(SETTINGS_FILE_NAME))
}

pub fn logs_dir(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    Ok(app_data_dir(app)?.join("logs"))
}

/// Path of the editable widget source. In packaged builds the bundled copy is seeded into the
/// data dir on first use; an existing (possibly user-edited) file is never overwritten.
pub fn widget_path(app: &tauri::AppHandle) -> Result<PathBuf, String> {
    let path = app_data_dir(app)?.join(WIDGET_FILE_NAME);
    if cfg!(debug_assertions) || path.exists() {
        return Ok(path);
    }

    let bundled = app
        .path()
        .resolve(BUNDLED_WIDGET_RESOURCE, tauri::path::BaseDirectory::Resource)
        .map_err(|e| format!("failed to resolve bundled widget: {e}"))?;
    if crate::shared::fs::copy_file_if_missing(&bundled, &path)? {
        tracing::info!(path = %path.display(), "seeded widget source from bundle");
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::is_safe_dotdir_name;

    #[test]
    fn dotdir_name_must_be_a_single_hidden_segment() {
        assert!(is_safe_dotdir_name(".ticker-widget"));
        assert!(is_safe_dotdir_name(".ticker_widget.dev"));
        assert!(!is_safe_dotdir_name("ticker-widget"));
        assert!(!is_safe_dotdir_name(".."));
        assert!(!is_safe_dotdir_name("./x"));
        assert!(!is_safe_dotdir_name(".a\\b"));
        assert!(!is_safe_dotdir_name(".a b"));
    }
}
