//! File mutation operations dispatched on behalf of the selection set.
//!
//! None of these are implemented yet: each one fails with a fixed
//! [`AppError::NotImplemented`]. Semantics for multi-item atomicity, name
//! collisions and partial failure still need to be decided before a real
//! implementation lands here.

use std::path::{Path, PathBuf};

use crate::error::{AppError, Result};

/// Copy `paths` into `dest_dir`.
pub fn copy(paths: &[PathBuf], dest_dir: &Path) -> Result<()> {
    let _ = (paths, dest_dir);
    Err(AppError::NotImplemented("copy"))
}

/// Move `paths` into `dest_dir`.
pub fn move_to(paths: &[PathBuf], dest_dir: &Path) -> Result<()> {
    let _ = (paths, dest_dir);
    Err(AppError::NotImplemented("move"))
}

/// Delete `paths`.
pub fn delete(paths: &[PathBuf]) -> Result<()> {
    let _ = paths;
    Err(AppError::NotImplemented("delete"))
}

/// Create an entry called `name` inside `dir`.
pub fn create(name: &str, dir: &Path) -> Result<()> {
    let _ = (name, dir);
    Err(AppError::NotImplemented("create"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn copy_fails_and_leaves_filesystem_alone() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.txt");
        std::fs::write(&src, "x").unwrap();
        let dest = dir.path().join("out");
        std::fs::create_dir(&dest).unwrap();

        let err = copy(&[src.clone()], &dest).unwrap_err();
        assert_eq!(err.to_string(), "copy is not implemented");
        assert!(src.exists());
        assert!(!dest.join("a.txt").exists());
    }

    #[test]
    fn move_fails() {
        let err = move_to(&[PathBuf::from("/tmp/x")], Path::new("/tmp")).unwrap_err();
        assert!(matches!(err, AppError::NotImplemented("move")));
    }

    #[test]
    fn delete_fails_and_keeps_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("keep");
        std::fs::write(&file, "").unwrap();
        assert!(delete(&[file.clone()]).is_err());
        assert!(file.exists());
    }

    #[test]
    fn create_fails() {
        let dir = TempDir::new().unwrap();
        assert!(create("new.txt", dir.path()).is_err());
        assert!(!dir.path().join("new.txt").exists());
    }
}
