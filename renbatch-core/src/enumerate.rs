use crate::error::{RenameError, Result};
use serde::Serialize;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::WalkDir;

/// A regular file found directly inside the target directory.
///
/// Taken once per run; later changes to the file are not observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    #[serde(skip)]
    pub modified: SystemTime,
}

/// List the regular, non-hidden files directly inside `dir`, sorted by name.
///
/// Names are compared byte-wise, so the order is the same on every platform.
/// Symlinks are not followed and not listed. Names that are not valid UTF-8
/// are skipped.
pub fn list_files(dir: &Path) -> Result<Vec<FileEntry>> {
    let unreadable = |source: io::Error| RenameError::DirectoryUnreadable {
        path: dir.to_path_buf(),
        source,
    };

    let mut files = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(false)
    {
        let entry = entry.map_err(|e| unreadable(io::Error::from(e)))?;

        if !entry.file_type().is_file() {
            continue;
        }

        let Some(name) = entry.file_name().to_str() else {
            continue;
        };
        if name.starts_with('.') {
            continue;
        }

        let modified = entry
            .metadata()
            .map_err(|e| unreadable(io::Error::from(e)))?
            .modified()
            .map_err(unreadable)?;

        files.push(FileEntry {
            name: name.to_string(),
            path: entry.path().to_path_buf(),
            modified,
        });
    }

    // String ordering is byte-wise
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn names(entries: &[FileEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    #[test]
    fn test_lists_regular_files_in_byte_order() {
        let temp_dir = TempDir::new().unwrap();
        for name in ["beta.txt", "Zeta.txt", "alpha.txt", "_under.txt"] {
            fs::write(temp_dir.path().join(name), "x").unwrap();
        }

        let entries = list_files(temp_dir.path()).unwrap();
        // 'Z' (0x5A) < '_' (0x5F) < 'a' (0x61)
        assert_eq!(
            names(&entries),
            vec!["Zeta.txt", "_under.txt", "alpha.txt", "beta.txt"]
        );
        assert_eq!(entries[2].path, temp_dir.path().join("alpha.txt"));
    }

    #[test]
    fn test_skips_hidden_files_and_directories() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(".hidden"), "x").unwrap();
        fs::write(temp_dir.path().join("visible.txt"), "x").unwrap();
        fs::create_dir(temp_dir.path().join("subdir")).unwrap();
        fs::write(temp_dir.path().join("subdir").join("nested.txt"), "x").unwrap();

        let entries = list_files(temp_dir.path()).unwrap();
        assert_eq!(names(&entries), vec!["visible.txt"]);
    }

    #[test]
    fn test_empty_directory_is_not_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let entries = list_files(temp_dir.path()).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_missing_directory_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("gone");

        let err = list_files(&missing).unwrap_err();
        assert!(matches!(err, RenameError::DirectoryUnreadable { ref path, .. } if *path == missing));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_not_listed() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("target.txt"), "x").unwrap();
        std::os::unix::fs::symlink(
            temp_dir.path().join("target.txt"),
            temp_dir.path().join("link.txt"),
        )
        .unwrap();

        let entries = list_files(temp_dir.path()).unwrap();
        assert_eq!(names(&entries), vec!["target.txt"]);
    }
}
