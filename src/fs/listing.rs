//! Sort/filter pipeline deriving the visible entry sequence from a raw listing.
//!
//! Sorting is eager: the sort order is recomputed whenever the raw entries,
//! the sort key or the directories-first flag change. Filtering is lazy and
//! reapplied on every read because visibility flags flip far more often.

use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::AppError;
use crate::fs::Entry;

/// Sort criteria for the listing. All keys sort ascending.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Name,
    ModifiedTime,
    Size,
}

impl SortKey {
    /// Short label used in status messages.
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Name => "name",
            SortKey::ModifiedTime => "time",
            SortKey::Size => "size",
        }
    }

    fn compare(&self, a: &Entry, b: &Entry) -> Ordering {
        match self {
            SortKey::Name => a.name.cmp(&b.name),
            SortKey::ModifiedTime => a.modified.cmp(&b.modified),
            SortKey::Size => a.size.cmp(&b.size),
        }
    }
}

impl FromStr for SortKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortKey::Name),
            "modified" => Ok(SortKey::ModifiedTime),
            "size" => Ok(SortKey::Size),
            other => Err(AppError::Config(format!("invalid sorting method: {other}"))),
        }
    }
}

/// Visibility flags applied on top of the sorted listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Filter {
    pub show_hidden: bool,
    pub dirs_only: bool,
}

impl Filter {
    fn admits(&self, entry: &Entry) -> bool {
        (self.show_hidden || !entry.is_hidden()) && (!self.dirs_only || entry.is_dir)
    }
}

/// Compute the display order of `entries` as indices into the slice.
///
/// Two stable passes: first by `key`, then (optionally) hoisting directories
/// ahead of files. Ties keep their input order, never falling back to name.
pub fn sort_order(entries: &[Entry], key: SortKey, dirs_first: bool) -> Vec<usize> {
    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by(|&a, &b| key.compare(&entries[a], &entries[b]));
    if dirs_first {
        order.sort_by_key(|&i| !entries[i].is_dir);
    }
    order
}

/// Apply `filter` to `entries` walked in `order`.
pub fn filter_visible<'a>(entries: &'a [Entry], order: &[usize], filter: Filter) -> Vec<&'a Entry> {
    order
        .iter()
        .map(|&i| &entries[i])
        .filter(|e| filter.admits(e))
        .collect()
}

/// The current directory's raw entries plus their cached sort order.
#[derive(Debug, Default)]
pub struct Listing {
    raw: Vec<Entry>,
    order: Vec<usize>,
    sort_key: SortKey,
    dirs_first: bool,
}

impl Listing {
    pub fn new(sort_key: SortKey, dirs_first: bool) -> Self {
        Self {
            raw: Vec::new(),
            order: Vec::new(),
            sort_key,
            dirs_first,
        }
    }

    /// Replace the raw entries wholesale and resort.
    pub fn replace(&mut self, entries: Vec<Entry>) {
        self.raw = entries;
        self.resort();
    }

    pub fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
        self.resort();
    }

    pub fn set_dirs_first(&mut self, dirs_first: bool) {
        self.dirs_first = dirs_first;
        self.resort();
    }

    pub fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    pub fn dirs_first(&self) -> bool {
        self.dirs_first
    }

    /// Raw entries in provider order.
    pub fn raw(&self) -> &[Entry] {
        &self.raw
    }

    /// Visible sequence under `filter`, recomputed on every call.
    pub fn visible(&self, filter: Filter) -> Vec<&Entry> {
        filter_visible(&self.raw, &self.order, filter)
    }

    fn resort(&mut self) {
        self.order = sort_order(&self.raw, self.sort_key, self.dirs_first);
    }
}
