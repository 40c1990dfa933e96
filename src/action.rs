use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::fs::listing::SortKey;

/// Everything a key press can ask the file list to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CursorDown,
    CursorUp,
    HalfPageDown,
    HalfPageUp,
    PageDown,
    PageUp,
    First,
    Last,
    SortBy(SortKey),
    ToggleDirsFirst,
    Reload,
    /// Toggle selection of the current entry, then move the cursor by the delta.
    Select(isize),
    ClearSelections,
    SetBookmark(char),
    GoToBookmark(char),
    Copy,
    Move,
    Delete,
    Create,
    Parent,
    Open,
    OpenExternal,
    ToggleHidden,
    ToggleDirsOnly,
    TogglePreview,
    Quit,
    Help,
    ShowSelections,
    /// No binding; carries a printable description of the key.
    Unmapped(String),
}

impl Action {
    /// Look up the file-list binding for `key`.
    pub fn from_key(key: KeyEvent) -> Self {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('c') => Action::Quit,
                KeyCode::Char('d') => Action::HalfPageDown,
                KeyCode::Char('u') => Action::HalfPageUp,
                KeyCode::Char('f') => Action::PageDown,
                KeyCode::Char('b') => Action::PageUp,
                KeyCode::Char('l') => Action::Reload,
                _ => Action::Unmapped(describe_key(&key)),
            };
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => Action::CursorDown,
            KeyCode::Char('k') | KeyCode::Up => Action::CursorUp,
            KeyCode::PageDown => Action::PageDown,
            KeyCode::PageUp => Action::PageUp,
            KeyCode::Char('g') | KeyCode::Home => Action::First,
            KeyCode::Char('G') | KeyCode::End => Action::Last,
            KeyCode::Char('n') => Action::SortBy(SortKey::Name),
            KeyCode::Char('t') => Action::SortBy(SortKey::ModifiedTime),
            KeyCode::Char('s') => Action::SortBy(SortKey::Size),
            KeyCode::Char('S') => Action::ToggleDirsFirst,
            KeyCode::Char('v') => Action::Select(1),
            KeyCode::Char('V') => Action::Select(-1),
            KeyCode::Esc => Action::ClearSelections,
            KeyCode::Char(c @ '1'..='9') => Action::SetBookmark(c),
            KeyCode::F(n @ 1..=9) => match char::from_digit(u32::from(n), 10) {
                Some(c) => Action::GoToBookmark(c),
                None => Action::Unmapped(describe_key(&key)),
            },
            KeyCode::Char('p') => Action::Copy,
            KeyCode::Char('P') => Action::Move,
            KeyCode::Char('D') => Action::Delete,
            KeyCode::Char('a') => Action::Create,
            KeyCode::Char('h') | KeyCode::Left | KeyCode::Backspace => Action::Parent,
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Enter => Action::Open,
            KeyCode::Char('o') => Action::OpenExternal,
            KeyCode::Char('.') => Action::ToggleHidden,
            KeyCode::Char('/') => Action::ToggleDirsOnly,
            KeyCode::Char('f') => Action::TogglePreview,
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('?') => Action::Help,
            KeyCode::Char(' ') => Action::ShowSelections,
            _ => Action::Unmapped(describe_key(&key)),
        }
    }
}

/// Human readable key name, e.g. `ctrl+x`, `f10`, `tab`.
pub fn describe_key(key: &KeyEvent) -> String {
    let base = match key.code {
        KeyCode::Char(' ') => "space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("f{n}"),
        KeyCode::Tab => "tab".to_string(),
        KeyCode::BackTab => "backtab".to_string(),
        KeyCode::Insert => "insert".to_string(),
        KeyCode::Delete => "delete".to_string(),
        other => format!("{other:?}").to_lowercase(),
    };
    let mut out = String::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        out.push_str("ctrl+");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        out.push_str("alt+");
    }
    out.push_str(&base);
    out
}
