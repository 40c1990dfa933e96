//! Preview pane state and the staleness guard for asynchronous preview loads.
//!
//! Preview requests are fire-and-forget; several can be in flight at once and
//! complete in any order. A completion only becomes visible when its path is
//! both the entry under the cursor at apply time and the latest request.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::event::PreviewResult;

/// Shown while a preview request is in flight.
pub const LOADING_PLACEHOLDER: &str = "...";

/// What happened to a completed preview result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewOutcome {
    /// Lines replaced the current preview.
    Applied,
    /// Result was for an entry no longer under the cursor; discarded.
    Stale,
    /// Loading failed; the message is scoped to the attempted path.
    Failed(String),
}

#[derive(Debug, Default)]
pub struct PreviewState {
    lines: Vec<String>,
    last_requested: Option<PathBuf>,
}

impl PreviewState {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Record a new request for `path` and show the loading placeholder.
    pub fn begin(&mut self, path: PathBuf) {
        self.lines = vec![LOADING_PLACEHOLDER.to_string()];
        self.last_requested = Some(path);
    }

    /// Nothing to preview (empty visible sequence).
    pub fn clear(&mut self) {
        self.lines.clear();
        self.last_requested = None;
    }

    /// Apply `result` if it belongs to `current`, the entry now under the cursor.
    pub fn apply(&mut self, result: PreviewResult, current: Option<&Path>) -> PreviewOutcome {
        let is_current = current == Some(result.path.as_path())
            && self.last_requested.as_deref() == current;

        match result.lines {
            Ok(lines) if is_current => {
                self.lines = lines;
                PreviewOutcome::Applied
            }
            Ok(_) => {
                debug!(path = %result.path.display(), "discarding stale preview");
                PreviewOutcome::Stale
            }
            Err(err) => {
                if is_current {
                    self.lines.clear();
                }
                PreviewOutcome::Failed(format!("previewing {}: {}", result.path.display(), err))
            }
        }
    }
}
