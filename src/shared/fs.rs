//! Usage: Small filesystem helpers shared across infra adapters (atomic writes, optional reads).

use std::path::Path;

pub(crate) fn copy_file_if_missing(src: &Path, dst: &Path) -> Result<bool, String> {
    if dst.exists() {
        return Ok(false);
    }

    if let Some(parent) = dst.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create {}: {e}", parent.display()))?;
    }

    std::fs::copy(src, dst)
        .map_err(|e| format!("failed to copy {} -> {}: {e}", src.display(), dst.display()))?;
    Ok(true)
}

pub(crate) fn read_optional_to_string(path: &Path) -> Result<Option<String>, String> {
    if !path.exists() {
        return Ok(None);
    }
    std::fs::read_to_string(path)
        .map(Some)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))
}

pub(crate) fn write_file_atomic(path: &Path, bytes: &[u8]) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("failed to create dir {}: {e}", parent.display()))?;
    }

    let file_name = path.file_name().and_then(|v| v.to_str()).unwrap_or("file");
    let tmp_path = path.with_file_name(format!("{file_name}.widget-tmp"));

    std::fs::write(&tmp_path, bytes)
        .map_err(|e| format!("failed to write temp file {}: {e}", tmp_path.display()))?;

    // Windows rename requires target not to exist.
    if path.exists() {
        let _ = std::fs::remove_file(path);
    }

    std::fs::rename(&tmp_path, path)
        .map_err(|e| format!("failed to finalize file {}: {e}", path.display()))?;

    Ok(())
}


#[cfg(test)]
mod tests {
    use super::test_support::unique_tmp_dir;
    use super::*;

    #[test]
    fn unique_tmp_dir_is_unique_across_calls() {
        let a = unique_tmp_dir("fs");
        let b = unique_tmp_dir("fs");
        assert_ne!(a, b);
        let _ = std::fs::remove_dir_all(&a);
        let _ = std::fs::remove_dir_all(&b);
    }

    #[test]
    fn read_optional_to_string_missing_is_none() {
        let dir = unique_tmp_dir("fs");
        let out = read_optional_to_string(&dir.join("missing.ini")).expect("read");
        assert!(out.is_none());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn write_file_atomic_replaces_existing_content() {
        let dir = unique_tmp_dir("fs");
        let path = dir.join("nested").join("config.ini");
        write_file_atomic(&path, b"first").expect("write first");
        write_file_atomic(&path, b"second").expect("write second");
        let got = read_optional_to_string(&path)
            .expect("read")
            .expect("file exists");
        assert_eq!(got, "second");
        assert!(!dir.join("nested").join("config.ini.widget-tmp").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn copy_file_if_missing_never_overwrites_user_edits() {
        let dir = unique_tmp_dir("fs");
        let src = dir.join("bundled.html");
        let dst = dir.join("data").join("widget.html");

        std::fs::write(&src, "bundled").expect("write src");
        assert!(copy_file_if_missing(&src, &dst).expect("copy"));

        std::fs::write(&dst, "edited").expect("edit dst");
        assert!(!copy_file_if_missing(&src, &dst).expect("copy"));
        assert_eq!(std::fs::read_to_string(&dst).expect("read dst"), "edited");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
