use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::bookmarks::BookmarkRegistry;
use crate::config::Settings;
use crate::event::{Event, ListingResult, MutationKind, MutationResult};
use crate::fs::listing::{Filter, Listing};
use crate::fs::Entry;
use crate::handler;
use crate::preview::{PreviewOutcome, PreviewState};
use crate::selection::SelectionSet;
use crate::status::{StatusNotifier, STATUS_CLEAR_DELAY};
use crate::task::Task;
use crate::viewport::Viewport;

/// Rows taken by the top line and the status line.
const CHROME_ROWS: u16 = 2;

/// Which screen is in front.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ActiveView {
    #[default]
    FileList,
    /// Key reference; any key dismisses.
    Help,
    /// Selected paths; any key dismisses.
    SelectionList,
    /// Name input for a new entry.
    CreatePrompt,
}

/// Single-line text input used by the create prompt.
#[derive(Debug, Default)]
pub struct PromptState {
    pub input: String,
    pub cursor_position: usize,
}

impl PromptState {
    /// Insert a character at the current cursor position.
    pub fn insert_char(&mut self, c: char) {
        self.input.insert(self.cursor_position, c);
        self.cursor_position += c.len_utf8();
    }

    /// Delete the character before the cursor (backspace).
    pub fn delete_char(&mut self) {
        if let Some(prev) = self.input[..self.cursor_position].chars().next_back() {
            self.cursor_position -= prev.len_utf8();
            self.input.remove(self.cursor_position);
        }
    }

    pub fn move_left(&mut self) {
        if let Some(prev) = self.input[..self.cursor_position].chars().next_back() {
            self.cursor_position -= prev.len_utf8();
        }
    }

    pub fn move_right(&mut self) {
        if let Some(next) = self.input[self.cursor_position..].chars().next() {
            self.cursor_position += next.len_utf8();
        }
    }

    pub fn home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn end(&mut self) {
        self.cursor_position = self.input.len();
    }
}

/// The browser engine: every piece of mutable UI state.
///
/// Only [`App::update`] mutates it, one message at a time. Background work is
/// returned as [`Task`]s for the caller to spawn.
pub struct App {
    pub editor: String,
    pub opener: String,
    pub listing: Listing,
    pub current_dir: PathBuf,
    /// Home directory, for `~` contraction in the top line.
    pub home: Option<PathBuf>,
    pub viewport: Viewport,
    pub selections: SelectionSet,
    pub bookmarks: BookmarkRegistry,
    pub filter: Filter,
    pub preview_enabled: bool,
    pub view: ActiveView,
    pub prompt: PromptState,
    pub status: StatusNotifier,
    pub preview: PreviewState,
    pub width: u16,
    pub height: u16,
    pub should_quit: bool,
}

impl App {
    /// Engine for `start_dir` with an empty listing; call [`App::init`] next.
    pub fn new(start_dir: &Path, settings: &Settings, home: Option<&Path>) -> Self {
        Self {
            editor: settings.editor.clone(),
            opener: settings.opener.clone(),
            listing: Listing::new(settings.sort, settings.dirs_first),
            current_dir: start_dir.to_path_buf(),
            home: home.map(Path::to_path_buf),
            viewport: Viewport::default(),
            selections: SelectionSet::default(),
            bookmarks: BookmarkRegistry::with_defaults(home),
            filter: Filter {
                show_hidden: settings.show_hidden,
                dirs_only: settings.dirs_only,
            },
            preview_enabled: settings.preview,
            view: ActiveView::FileList,
            prompt: PromptState::default(),
            status: StatusNotifier::default(),
            preview: PreviewState::default(),
            width: 0,
            height: 0,
            should_quit: false,
        }
    }

    /// Startup work: list the initial directory.
    pub fn init(&self) -> Vec<Task> {
        vec![Task::ListDirectory(self.current_dir.clone())]
    }

    /// Entries eligible for display, sorted and filtered.
    pub fn visible(&self) -> Vec<&Entry> {
        self.listing.visible(self.filter)
    }

    pub fn is_empty(&self) -> bool {
        self.visible().is_empty()
    }

    /// Entry under the cursor.
    pub fn current(&self) -> Option<&Entry> {
        self.visible().get(self.viewport.cursor()).copied()
    }

    /// Apply one message and return the background work it triggers.
    pub fn update(&mut self, event: Event) -> Vec<Task> {
        debug!(event = event.name(), view = ?self.view, "applying message");
        match event {
            Event::Key(key) => handler::handle_key_event(self, key),
            Event::Resize(width, height) => {
                self.handle_resize(width, height);
                Vec::new()
            }
            Event::ListingComplete(result) => self.handle_listing(result),
            Event::PreviewComplete(result) => {
                let current = self.current().map(|e| e.path.clone());
                match self.preview.apply(result, current.as_deref()) {
                    PreviewOutcome::Failed(message) => vec![self.notify(message, true)],
                    PreviewOutcome::Applied | PreviewOutcome::Stale => Vec::new(),
                }
            }
            Event::MutationComplete(result) => self.handle_mutation(result),
            Event::ClearStatus(generation) => {
                if !self.status.clear_if(generation) {
                    debug!(generation, "status clear superseded");
                }
                Vec::new()
            }
            Event::ProcessFinished(Ok(())) => Vec::new(),
            Event::ProcessFinished(Err(e)) => {
                vec![self.notify(format!("process finished: {e}"), true)]
            }
        }
    }

    /// Replace the status and schedule its deferred clear.
    pub fn notify(&mut self, text: impl Into<String>, is_error: bool) -> Task {
        let generation = self.status.set(text, is_error);
        Task::ClearStatusAfter {
            generation,
            delay: STATUS_CLEAR_DELAY,
        }
    }

    /// Request a preview of the entry under the cursor, if there is one.
    pub fn refresh_preview(&mut self) -> Option<Task> {
        match self.current().map(|e| e.path.clone()) {
            Some(path) => {
                self.preview.begin(path.clone());
                Some(Task::LoadPreview(path))
            }
            None => {
                self.preview.clear();
                None
            }
        }
    }

    /// Re-clamp cursor and window after the visible sequence changed.
    pub fn sync_view(&mut self) {
        let len = self.visible().len();
        self.viewport.sync_cursor(len);
        self.viewport.sync_viewport();
    }

    fn handle_resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.viewport
            .set_page_height(height.saturating_sub(CHROME_ROWS) as usize);
    }

    fn handle_listing(&mut self, result: ListingResult) -> Vec<Task> {
        let entries = match result.entries {
            Ok(entries) => entries,
            Err(e) => {
                warn!(path = %result.path.display(), error = %e, "listing failed");
                return vec![self.notify(e, true)];
            }
        };

        self.current_dir = result.path;
        self.listing.replace(entries);
        info!(
            path = %self.current_dir.display(),
            count = self.listing.raw().len(),
            "directory listed"
        );
        self.viewport.reset();
        self.refresh_preview().into_iter().collect()
    }

    fn handle_mutation(&mut self, result: MutationResult) -> Vec<Task> {
        // Cleared whatever the outcome; the follow-up refresh shows what happened.
        self.selections.clear();
        match result.error {
            Some(e) => vec![self.notify(e, true)],
            None => vec![self.notify(format!("{} finished", mutation_label(result.kind)), false)],
        }
    }
}

fn mutation_label(kind: MutationKind) -> &'static str {
    match kind {
        MutationKind::Copy => "copy",
        MutationKind::Move => "move",
        MutationKind::Delete => "delete",
        MutationKind::Create => "create",
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::event::PreviewResult;
    use crate::fs::listing::SortKey;
    use std::time::SystemTime;

    pub(crate) fn entry(dir: &str, name: &str, is_dir: bool, size: u64) -> Entry {
        Entry {
            name: name.to_string(),
            path: PathBuf::from(dir).join(name),
            is_dir,
            size,
            modified: SystemTime::UNIX_EPOCH,
            mode: 0o644,
        }
    }

    /// App showing `/work` with `count` files `f00..` and a five-row page.
    pub(crate) fn loaded_app(count: usize) -> App {
        let mut app = App::new(Path::new("/work"), &Settings::default(), Some(Path::new("/home/u")));
        app.update(Event::Resize(80, 7));
        let entries = (0..count)
            .map(|i| entry("/work", &format!("f{i:02}"), false, i as u64))
            .collect();
        app.update(Event::ListingComplete(ListingResult {
            path: PathBuf::from("/work"),
            entries: Ok(entries),
        }));
        app
    }

    #[test]
    fn starts_empty_on_file_list() {
        let app = App::new(Path::new("/work"), &Settings::default(), None);
        assert!(app.is_empty());
        assert_eq!(app.view, ActiveView::FileList);
        assert_eq!(app.viewport.cursor(), 0);
        assert_eq!(app.init(), vec![Task::ListDirectory(PathBuf::from("/work"))]);
    }

    #[test]
    fn listing_resets_cursor_and_requests_preview() {
        let mut app = loaded_app(10);
        app.viewport.move_cursor(6, 10);
        let tasks = app.update(Event::ListingComplete(ListingResult {
            path: PathBuf::from("/other"),
            entries: Ok(vec![entry("/other", "b", false, 0), entry("/other", "a", false, 0)]),
        }));
        assert_eq!(app.current_dir, PathBuf::from("/other"));
        assert_eq!(app.viewport.cursor(), 0);
        assert_eq!(app.viewport.top(), 0);
        assert_eq!(tasks, vec![Task::LoadPreview(PathBuf::from("/other/a"))]);
        assert_eq!(app.preview.lines(), &["..."]);
    }

    #[test]
    fn empty_listing_requests_no_preview() {
        let mut app = loaded_app(3);
        let tasks = app.update(Event::ListingComplete(ListingResult {
            path: PathBuf::from("/empty"),
            entries: Ok(vec![]),
        }));
        assert!(tasks.is_empty());
        assert!(app.is_empty());
        assert!(app.preview.lines().is_empty());
    }

    #[test]
    fn listing_error_keeps_previous_listing() {
        let mut app = loaded_app(3);
        let tasks = app.update(Event::ListingComplete(ListingResult {
            path: PathBuf::from("/nope"),
            entries: Err("directory /nope does not exist".into()),
        }));
        assert_eq!(app.current_dir, PathBuf::from("/work"));
        assert_eq!(app.visible().len(), 3);
        let status = app.status.current();
        assert!(status.is_error);
        assert_eq!(status.text, "directory /nope does not exist");
        assert_eq!(
            tasks,
            vec![Task::ClearStatusAfter {
                generation: status.generation,
                delay: STATUS_CLEAR_DELAY
            }]
        );
    }

    #[test]
    fn stale_status_clear_keeps_newer_message() {
        let mut app = loaded_app(1);
        app.notify("first", false);
        let g1 = app.status.current().generation;
        app.notify("second", true);
        app.update(Event::ClearStatus(g1));
        assert_eq!(app.status.message(), Some("second"));
        let g2 = app.status.current().generation;
        app.update(Event::ClearStatus(g2));
        assert_eq!(app.status.message(), None);
    }

    #[test]
    fn preview_for_previous_entry_never_lands() {
        let mut app = loaded_app(5);
        // cursor on f00, request A; move to f01, request B
        app.viewport.move_cursor(1, 5);
        app.refresh_preview();
        let b_result = PreviewResult {
            path: PathBuf::from("/work/f01"),
            lines: Ok(vec!["B".into()]),
        };
        let a_result = PreviewResult {
            path: PathBuf::from("/work/f00"),
            lines: Ok(vec!["A".into()]),
        };
        app.update(Event::PreviewComplete(b_result));
        app.update(Event::PreviewComplete(a_result));
        assert_eq!(app.preview.lines(), &["B"]);
    }

    #[test]
    fn preview_error_becomes_status() {
        let mut app = loaded_app(2);
        let tasks = app.update(Event::PreviewComplete(PreviewResult {
            path: PathBuf::from("/work/f00"),
            lines: Err("Permission denied".into()),
        }));
        assert_eq!(tasks.len(), 1);
        assert_eq!(
            app.status.message(),
            Some("previewing /work/f00: Permission denied")
        );
    }

    #[test]
    fn mutation_failure_clears_selection_and_reports() {
        let mut app = loaded_app(3);
        app.selections.toggle(Path::new("/work/f01"));
        app.update(Event::MutationComplete(MutationResult {
            kind: MutationKind::Copy,
            error: Some("copy is not implemented".into()),
        }));
        assert!(app.selections.is_empty());
        assert!(app.status.current().is_error);
        assert_eq!(app.status.message(), Some("copy is not implemented"));
    }

    #[test]
    fn mutation_success_is_informational() {
        let mut app = loaded_app(3);
        app.selections.toggle(Path::new("/work/f01"));
        app.update(Event::MutationComplete(MutationResult {
            kind: MutationKind::Move,
            error: None,
        }));
        assert!(app.selections.is_empty());
        assert!(!app.status.current().is_error);
        assert_eq!(app.status.message(), Some("move finished"));
    }

    #[test]
    fn process_error_is_reported() {
        let mut app = loaded_app(1);
        app.update(Event::ProcessFinished(Err("nvim: not found".into())));
        assert_eq!(app.status.message(), Some("process finished: nvim: not found"));
        assert!(app.update(Event::ProcessFinished(Ok(()))).is_empty());
    }

    #[test]
    fn resize_keeps_cursor_in_window() {
        let mut app = loaded_app(30);
        assert_eq!(app.viewport.page_height(), 5);
        app.viewport.move_cursor(4, 30);
        app.update(Event::Resize(80, 4));
        assert_eq!(app.viewport.page_height(), 2);
        assert_eq!(app.viewport.top(), 3);
        assert!(app.viewport.cursor() <= app.viewport.bottom_index());
    }

    #[test]
    fn settings_seed_state() {
        let settings = Settings {
            show_hidden: true,
            dirs_only: true,
            preview: false,
            sort: SortKey::Size,
            dirs_first: false,
            ..Settings::default()
        };
        let app = App::new(Path::new("/"), &settings, None);
        assert!(app.filter.show_hidden);
        assert!(app.filter.dirs_only);
        assert!(!app.preview_enabled);
        assert_eq!(app.listing.sort_key(), SortKey::Size);
        assert!(!app.listing.dirs_first());
    }

    #[test]
    fn prompt_editing() {
        let mut p = PromptState::default();
        for c in "néw".chars() {
            p.insert_char(c);
        }
        assert_eq!(p.cursor_position, "néw".len());
        p.move_left();
        p.move_left();
        p.delete_char();
        assert_eq!(p.input, "éw");
        p.home();
        p.delete_char();
        assert_eq!(p.input, "éw");
        p.end();
        p.move_right();
        assert_eq!(p.cursor_position, p.input.len());
    }
}
