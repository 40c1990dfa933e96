use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Set of selected absolute paths.
///
/// Selection belongs to the path, not to the current listing: entries stay
/// selected after navigating away and are never pruned automatically.
#[derive(Debug, Default, Clone)]
pub struct SelectionSet {
    paths: HashSet<PathBuf>,
}

impl SelectionSet {
    /// Add `path` if absent, remove it if present.
    pub fn toggle(&mut self, path: &Path) {
        if !self.paths.remove(path) {
            self.paths.insert(path.to_path_buf());
        }
    }

    pub fn clear(&mut self) {
        self.paths.clear();
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.paths.contains(path)
    }

    /// Non-strict superset test against `paths`.
    pub fn is_superset_of<'a, I>(&self, paths: I) -> bool
    where
        I: IntoIterator<Item = &'a Path>,
    {
        paths.into_iter().all(|p| self.contains(p))
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Owned snapshot of the selection for handing to a background task.
    pub fn to_vec(&self) -> Vec<PathBuf> {
        self.sorted().into_iter().cloned().collect()
    }

    /// Selected paths in lexicographic order, for display.
    pub fn sorted(&self) -> Vec<&PathBuf> {
        let mut out: Vec<&PathBuf> = self.paths.iter().collect();
        out.sort();
        out
    }
}
