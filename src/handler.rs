use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use crate::action::Action;
use crate::app::{ActiveView, App, PromptState};
use crate::task::{Launch, Mutation, Task};

/// Handle a key event.
///
/// Overlays take priority: in Help or SelectionList any key returns to the
/// file list and is consumed there, never reaching the file-list bindings.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> Vec<Task> {
    match app.view {
        ActiveView::Help | ActiveView::SelectionList => {
            app.view = ActiveView::FileList;
            Vec::new()
        }
        ActiveView::CreatePrompt => handle_prompt_key(app, key),
        ActiveView::FileList => apply_action(app, Action::from_key(key)),
    }
}

fn handle_prompt_key(app: &mut App, key: KeyEvent) -> Vec<Task> {
    match key.code {
        KeyCode::Esc => close_prompt(app),
        KeyCode::Enter => {
            let name = app.prompt.input.trim().to_string();
            close_prompt(app);
            if name.is_empty() {
                return Vec::new();
            }
            let dir = app.current_dir.clone();
            return vec![Task::Sequence(vec![
                Task::Mutate(Mutation::Create {
                    name,
                    dir: dir.clone(),
                }),
                Task::ListDirectory(dir),
            ])];
        }
        KeyCode::Backspace => app.prompt.delete_char(),
        KeyCode::Left => app.prompt.move_left(),
        KeyCode::Right => app.prompt.move_right(),
        KeyCode::Home => app.prompt.home(),
        KeyCode::End => app.prompt.end(),
        KeyCode::Char(c) if !key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            app.prompt.insert_char(c)
        }
        _ => {}
    }
    Vec::new()
}

fn close_prompt(app: &mut App) {
    app.view = ActiveView::FileList;
    app.prompt = PromptState::default();
}

/// Apply a file-list action to the engine.
pub fn apply_action(app: &mut App, action: Action) -> Vec<Task> {
    let len = app.visible().len();
    match action {
        Action::CursorDown => app.viewport.move_cursor(1, len),
        Action::CursorUp => app.viewport.move_cursor(-1, len),
        Action::HalfPageDown => app.viewport.half_page(1, len),
        Action::HalfPageUp => app.viewport.half_page(-1, len),
        Action::PageDown => app.viewport.full_page(1, len),
        Action::PageUp => app.viewport.full_page(-1, len),
        Action::First => app.viewport.jump_start(len),
        Action::Last => app.viewport.jump_end(len),
        Action::SortBy(key) => {
            app.listing.set_sort_key(key);
            let clear = app.notify(format!("sort by {}", key.label()), false);
            return with_preview(app, vec![clear]);
        }
        Action::ToggleDirsFirst => {
            let dirs_first = !app.listing.dirs_first();
            app.listing.set_dirs_first(dirs_first);
            let state = if dirs_first { "on" } else { "off" };
            let clear = app.notify(format!("directories first: {state}"), false);
            return with_preview(app, vec![clear]);
        }
        Action::Reload => return vec![Task::ListDirectory(app.current_dir.clone())],
        Action::Select(delta) => {
            let Some(path) = app.current().map(|e| e.path.clone()) else {
                return Vec::new();
            };
            app.selections.toggle(&path);
            app.viewport.move_cursor(delta, len);
        }
        Action::ClearSelections => {
            app.selections.clear();
            return Vec::new();
        }
        Action::SetBookmark(key) => {
            app.bookmarks.set(key, app.current_dir.clone());
            let text = format!("bookmark {key}: {}", app.current_dir.display());
            return vec![app.notify(text, false)];
        }
        Action::GoToBookmark(key) => {
            return match app.bookmarks.resolve(key) {
                Some(path) => vec![Task::ListDirectory(path.to_path_buf())],
                None => {
                    debug!(%key, "bookmark not set");
                    Vec::new()
                }
            };
        }
        Action::Copy => {
            let mutation = Mutation::Copy {
                paths: app.selections.to_vec(),
                dest: app.current_dir.clone(),
            };
            return mutate_then_refresh(app, mutation);
        }
        Action::Move => {
            let mutation = Mutation::Move {
                paths: app.selections.to_vec(),
                dest: app.current_dir.clone(),
            };
            return mutate_then_refresh(app, mutation);
        }
        Action::Delete => {
            let mutation = Mutation::Delete {
                paths: app.selections.to_vec(),
            };
            return mutate_then_refresh(app, mutation);
        }
        Action::Create => {
            app.prompt = PromptState::default();
            app.view = ActiveView::CreatePrompt;
            return Vec::new();
        }
        Action::Parent => {
            let parent = app
                .current_dir
                .parent()
                .unwrap_or(&app.current_dir)
                .to_path_buf();
            return vec![Task::ListDirectory(parent)];
        }
        Action::Open => {
            return match app.current() {
                Some(entry) if entry.is_dir => vec![Task::ListDirectory(entry.path.clone())],
                Some(entry) => vec![Task::LaunchForeground(launch(app, &app.editor, entry))],
                None => Vec::new(),
            };
        }
        Action::OpenExternal => {
            return match app.current() {
                Some(entry) => vec![Task::LaunchBackground(launch(app, &app.opener, entry))],
                None => Vec::new(),
            };
        }
        Action::ToggleHidden => {
            app.filter.show_hidden = !app.filter.show_hidden;
            app.sync_view();
        }
        Action::ToggleDirsOnly => {
            app.filter.dirs_only = !app.filter.dirs_only;
            app.sync_view();
        }
        Action::TogglePreview => {
            app.preview_enabled = !app.preview_enabled;
            return Vec::new();
        }
        Action::Quit => {
            app.should_quit = true;
            return Vec::new();
        }
        Action::Help => {
            app.view = ActiveView::Help;
            return Vec::new();
        }
        Action::ShowSelections => {
            app.view = ActiveView::SelectionList;
            return Vec::new();
        }
        Action::Unmapped(name) => return vec![app.notify(format!("unmapped key: {name}"), false)],
    }
    // Everything that falls through may have changed the entry under the cursor.
    with_preview(app, Vec::new())
}

fn with_preview(app: &mut App, mut tasks: Vec<Task>) -> Vec<Task> {
    tasks.extend(app.refresh_preview());
    tasks
}

fn mutate_then_refresh(app: &App, mutation: Mutation) -> Vec<Task> {
    debug!(kind = ?mutation.kind(), selected = app.selections.len(), "dispatching mutation");
    vec![Task::Sequence(vec![
        Task::Mutate(mutation),
        Task::ListDirectory(app.current_dir.clone()),
    ])]
}

fn launch(app: &App, program: &str, entry: &crate::fs::Entry) -> Launch {
    Launch {
        program: program.to_string(),
        args: vec![entry.path.to_string_lossy().to_string()],
        cwd: app.current_dir.clone(),
    }
}
