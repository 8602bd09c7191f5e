//! File persistence helpers shared by the state documents.

use std::io::ErrorKind;
use std::path::Path;

/// Atomic write: write to a sibling temp file, then rename over `path`.
///
/// The temp filename includes the PID so two processes never share one.
/// Missing parent directories are created.
///
/// # Errors
///
/// Returns the underlying I/O error if the directory, temp file, or rename
/// fails. The temp file is removed on a failed rename.
pub fn write_atomic(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    let tmp_path = path.with_extension(format!("tmp.{}", std::process::id()));
    std::fs::write(&tmp_path, contents.as_bytes())?;
    if let Err(e) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(e);
    }
    Ok(())
}

/// Read a UTF-8 document, mapping "not found" to `Ok(None)`.
///
/// # Errors
///
/// Returns any I/O error other than [`ErrorKind::NotFound`].
pub fn read_optional(path: &Path) -> std::io::Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("sigintel-persist-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn write_atomic_creates_parent_and_replaces_content() {
        let dir = scratch_dir("replace");
        let path = dir.join("nested").join("doc.txt");

        write_atomic(&path, "first").unwrap();
        write_atomic(&path, "second").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(Result::ok)
            .filter(|e| e.file_name().to_string_lossy().contains(".tmp."))
            .collect();
        assert!(leftovers.is_empty(), "temp files left behind: {leftovers:?}");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn read_optional_maps_missing_to_none() {
        let dir = scratch_dir("missing");
        assert_eq!(read_optional(&dir.join("absent.txt")).unwrap(), None);
    }
}
