use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::debug;

use crate::error::{AppError, Result};

/// A single directory entry as produced by the listing provider.
///
/// Immutable once built; a directory refresh replaces the whole listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub size: u64,
    pub modified: SystemTime,
    /// Unix mode bits (`st_mode`), including the file type bits.
    pub mode: u32,
}

impl Entry {
    /// Build an entry from the filesystem metadata of `path`.
    ///
    /// Symlinks are followed so that a link to a directory behaves as one.
    /// A dangling link falls back to the link's own metadata.
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = match fs::metadata(path) {
            Ok(metadata) => metadata,
            Err(_) => fs::symlink_metadata(path)?,
        };
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        Ok(Self {
            name,
            path: path.to_path_buf(),
            is_dir: metadata.is_dir(),
            size: metadata.len(),
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
            mode: metadata.permissions().mode(),
        })
    }

    /// Whether the entry is a dotfile.
    pub fn is_hidden(&self) -> bool {
        self.name.starts_with('.')
    }

    /// `ls -l` style permission string, e.g. `drwxr-xr-x`.
    pub fn mode_string(&self) -> String {
        const BITS: [(u32, char); 9] = [
            (0o400, 'r'),
            (0o200, 'w'),
            (0o100, 'x'),
            (0o040, 'r'),
            (0o020, 'w'),
            (0o010, 'x'),
            (0o004, 'r'),
            (0o002, 'w'),
            (0o001, 'x'),
        ];

        let mut out = String::with_capacity(10);
        out.push(if self.is_dir { 'd' } else { '-' });
        for (bit, ch) in BITS {
            out.push(if self.mode & bit != 0 { ch } else { '-' });
        }
        out
    }
}

/// List the entries of `dir` in the order the OS returns them.
///
/// Entries whose metadata cannot be read at all (e.g. removed mid-listing)
/// are skipped rather than failing the whole listing.
pub fn list_directory(dir: &Path) -> Result<Vec<Entry>> {
    if !dir.exists() {
        return Err(AppError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut entries = Vec::new();
    for item in fs::read_dir(dir)? {
        let item = match item {
            Ok(i) => i,
            Err(e) => {
                debug!(dir = %dir.display(), error = %e, "skipping unreadable dir entry");
                continue;
            }
        };
        match Entry::from_path(&item.path()) {
            Ok(entry) => entries.push(entry),
            Err(e) => debug!(path = %item.path().display(), error = %e, "skipping entry"),
        }
    }
    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn setup_test_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        let mut f = File::create(dir.path().join("README")).unwrap();
        f.write_all(b"hello").unwrap();
        File::create(dir.path().join(".hidden")).unwrap();
        dir
    }

    #[test]
    fn entry_from_file() {
        let dir = setup_test_dir();
        let entry = Entry::from_path(&dir.path().join("README")).unwrap();
        assert_eq!(entry.name, "README");
        assert!(!entry.is_dir);
        assert_eq!(entry.size, 5);
        assert_eq!(entry.path, dir.path().join("README"));
    }

    #[test]
    fn entry_from_directory() {
        let dir = setup_test_dir();
        let entry = Entry::from_path(&dir.path().join("src")).unwrap();
        assert!(entry.is_dir);
        assert!(entry.mode_string().starts_with('d'));
    }

    #[test]
    fn hidden_entry_detection() {
        let dir = setup_test_dir();
        let entry = Entry::from_path(&dir.path().join(".hidden")).unwrap();
        assert!(entry.is_hidden());
    }

    #[test]
    fn mode_string_formats_bits() {
        let dir = setup_test_dir();
        let mut entry = Entry::from_path(&dir.path().join("README")).unwrap();
        entry.mode = 0o100644;
        assert_eq!(entry.mode_string(), "-rw-r--r--");
        entry.mode = 0o755;
        entry.is_dir = true;
        assert_eq!(entry.mode_string(), "drwxr-xr-x");
    }

    #[test]
    fn list_directory_returns_all_entries() {
        let dir = setup_test_dir();
        let mut names: Vec<String> = list_directory(dir.path())
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        names.sort();
        assert_eq!(names, vec![".hidden", "README", "src"]);
    }

    #[test]
    fn list_directory_empty() {
        let dir = TempDir::new().unwrap();
        assert!(list_directory(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn list_directory_missing_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        let err = list_directory(&missing).unwrap_err();
        assert!(matches!(err, AppError::DirectoryNotFound(_)));
    }

    #[test]
    fn list_directory_on_file_fails() {
        let dir = setup_test_dir();
        assert!(list_directory(&dir.path().join("README")).is_err());
    }

    #[test]
    fn list_directory_keeps_dangling_symlinks() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone"), dir.path().join("dangling")).unwrap();

        let mut names: Vec<String> = list_directory(dir.path())
            .unwrap()
            .into_iter()
            .map(|e| e.name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["dangling", "real"]);

        let link = Entry::from_path(&dir.path().join("dangling")).unwrap();
        assert!(!link.is_dir);
    }

    #[test]
    fn symlink_to_directory_is_a_directory() {
        let dir = setup_test_dir();
        std::os::unix::fs::symlink(dir.path().join("src"), dir.path().join("link")).unwrap();
        assert!(Entry::from_path(&dir.path().join("link")).unwrap().is_dir);
    }
}
