use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Maps single-character keys to remembered directories.
#[derive(Debug, Clone, Default)]
pub struct BookmarkRegistry {
    marks: HashMap<char, PathBuf>,
}

impl BookmarkRegistry {
    /// Registry pre-seeded with conventional locations relative to `home`:
    /// `1` home, `2` Pictures, `3` Videos, `4` Downloads, `5` filesystem root.
    pub fn with_defaults(home: Option<&Path>) -> Self {
        let mut registry = Self::default();
        if let Some(home) = home {
            registry.set('1', home.to_path_buf());
            registry.set('2', home.join("Pictures"));
            registry.set('3', home.join("Videos"));
            registry.set('4', home.join("Downloads"));
        }
        registry.set('5', PathBuf::from("/"));
        registry
    }

    /// Remember `path` under `key`, overwriting any previous mark.
    pub fn set(&mut self, key: char, path: PathBuf) {
        self.marks.insert(key, path);
    }

    pub fn resolve(&self, key: char) -> Option<&Path> {
        self.marks.get(&key).map(PathBuf::as_path)
    }
}
