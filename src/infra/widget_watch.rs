//! Usage: Poll the widget source file and push fresh content to the window when it changes.

use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};
use tokio::time::MissedTickBehavior;

const POLL_INTERVAL: Duration = Duration::from_secs(5);

/// Remembers the last observed modification time.
#[derive(Debug, Default)]
pub(crate) struct MtimeTracker {
    last: Option<SystemTime>,
}

impl MtimeTracker {
    pub(crate) fn new(initial: Option<SystemTime>) -> Self {
        Self { last: initial }
    }

    /// Returns `true` when the file exists and its mtime differs from the previous observation.
    pub(crate) fn observe(&mut self, current: Option<SystemTime>) -> bool {
        if current == self.last {
            return false;
        }
        self.last = current;
        current.is_some()
    }
}

fn modified_at(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

pub(crate) fn spawn(app: tauri::AppHandle, path: PathBuf) {
    tauri::async_runtime::spawn(async move {
        let mut tracker = MtimeTracker::new(modified_at(&path));
        let mut ticker = tokio::time::interval(POLL_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        tracing::debug!(path = %path.display(), "watching widget source");
        loop {
            ticker.tick().await;
            if !tracker.observe(modified_at(&path)) {
                continue;
            }

            tracing::info!(path = %path.display(), "widget source changed, reloading");
            if let Err(err) = crate::widget_window::reload_content(&app, &path) {
                tracing::warn!("failed to reload widget content: {}", err);
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::fs::test_support::unique_tmp_dir;

    #[test]
    fn tracker_reports_only_changes_of_existing_files() {
        let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(100);
        let t1 = t0 + Duration::from_secs(1);

        let mut tracker = MtimeTracker::new(Some(t0));
        assert!(!tracker.observe(Some(t0)));
        assert!(tracker.observe(Some(t1)));
        assert!(!tracker.observe(Some(t1)));
        // Deleted: remembered, but nothing to reload.
        assert!(!tracker.observe(None));
        assert!(!tracker.observe(None));
        // Recreated.
        assert!(tracker.observe(Some(t0)));
    }

    #[test]
    fn modified_at_is_none_for_missing_file() {
        let dir = unique_tmp_dir("watch");
        assert!(modified_at(&dir.join("widget.html")).is_none());

        std::fs::write(dir.join("widget.html"), "<div></div>").expect("write");
        assert!(modified_at(&dir.join("widget.html")).is_some());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
