//! Locating map files.

use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Find the map named by `arg`: first as a path, then as a file name inside
/// `maps_dir`.
pub fn resolve_map(arg: &str, maps_dir: &Path) -> Result<PathBuf, CliError> {
    let direct = PathBuf::from(arg);
    if direct.is_file() {
        return Ok(direct);
    }
    let in_dir = maps_dir.join(arg);
    if in_dir.is_file() {
        return Ok(in_dir);
    }
    log::debug!(
        "map {arg} is neither a file nor inside {}",
        maps_dir.display()
    );
    Err(CliError::MapNotFound {
        name: arg.to_string(),
        available: available_maps(maps_dir),
    })
}

/// Sorted names of the `.txt` files in `maps_dir`. Unreadable directories
/// yield an empty list.
pub fn available_maps(maps_dir: &Path) -> Vec<String> {
    let Ok(entries) = std::fs::read_dir(maps_dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|ext| ext == "txt"))
        .filter_map(|p| p.file_name().and_then(|n| n.to_str()).map(String::from))
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_only_text_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.txt", "a.txt", "notes.md"] {
            std::fs::write(dir.path().join(name), "").unwrap();
        }
        std::fs::create_dir(dir.path().join("sub.txt")).unwrap();
        assert_eq!(available_maps(dir.path()), ["a.txt", "b.txt"]);
    }

    #[test]
    fn resolves_path_then_directory() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("m.txt");
        std::fs::write(&file, "").unwrap();

        let by_path = resolve_map(file.to_str().unwrap(), Path::new("/nonexistent")).unwrap();
        assert_eq!(by_path, file);
        assert_eq!(resolve_map("m.txt", dir.path()).unwrap(), file);

        match resolve_map("missing.txt", dir.path()) {
            Err(CliError::MapNotFound { name, available }) => {
                assert_eq!(name, "missing.txt");
                assert_eq!(available, ["m.txt"]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn missing_directory_lists_nothing() {
        assert!(available_maps(Path::new("/definitely/not/here")).is_empty());
    }
}
