use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};

use crate::theme::ThemeColors;

/// A single keybinding entry for display.
struct KeyEntry {
    key: &'static str,
    description: &'static str,
}

/// A category of keybindings.
struct KeyCategory {
    name: &'static str,
    entries: &'static [KeyEntry],
}

const NAVIGATION_KEYS: &[KeyEntry] = &[
    KeyEntry {
        key: "j/k/g/G",
        description: "Down/Up/First/Last",
    },
    KeyEntry {
        key: "C-d/C-u",
        description: "Half page down/up",
    },
    KeyEntry {
        key: "C-f/C-b",
        description: "Page down/up",
    },
    KeyEntry {
        key: "h/l",
        description: "Updir/Downdir (or edit file)",
    },
    KeyEntry {
        key: "o",
        description: "Open in app",
    },
    KeyEntry {
        key: "{1..9}",
        description: "Bookmark this dir",
    },
    KeyEntry {
        key: "f{1..9}",
        description: "Go to bookmark",
    },
];

const LISTING_KEYS: &[KeyEntry] = &[
    KeyEntry {
        key: "s/t/n",
        description: "Sort by size/time/name",
    },
    KeyEntry {
        key: "S",
        description: "Toggle dirs first",
    },
    KeyEntry {
        key: ".",
        description: "Toggle hidden",
    },
    KeyEntry {
        key: "/",
        description: "Toggle dirs only",
    },
    KeyEntry {
        key: "f",
        description: "Toggle preview",
    },
    KeyEntry {
        key: "C-l",
        description: "Reload files",
    },
];

const SELECTION_KEYS: &[KeyEntry] = &[
    KeyEntry {
        key: "v/V",
        description: "Select file",
    },
    KeyEntry {
        key: "esc",
        description: "Clear selections",
    },
    KeyEntry {
        key: "space",
        description: "Show selections",
    },
    KeyEntry {
        key: "p",
        description: "Copy selections",
    },
    KeyEntry {
        key: "P",
        description: "Move selections",
    },
    KeyEntry {
        key: "D",
        description: "Remove selections",
    },
    KeyEntry {
        key: "a",
        description: "Create entry",
    },
];

const GENERAL_KEYS: &[KeyEntry] = &[
    KeyEntry {
        key: "?",
        description: "Open this help",
    },
    KeyEntry {
        key: "q",
        description: "Quit application",
    },
];

const CATEGORIES: &[KeyCategory] = &[
    KeyCategory {
        name: "Navigation",
        entries: NAVIGATION_KEYS,
    },
    KeyCategory {
        name: "Listing",
        entries: LISTING_KEYS,
    },
    KeyCategory {
        name: "Selections",
        entries: SELECTION_KEYS,
    },
    KeyCategory {
        name: "General",
        entries: GENERAL_KEYS,
    },
];

const KEY_WIDTH: usize = 10;

/// Key reference table filling the main area.
pub struct HelpOverlay<'a> {
    theme: &'a ThemeColors,
}

impl<'a> HelpOverlay<'a> {
    pub fn new(theme: &'a ThemeColors) -> Self {
        Self { theme }
    }

    fn build_content_lines(&self) -> Vec<Line<'static>> {
        let header = Style::default()
            .fg(self.theme.header_fg)
            .add_modifier(Modifier::BOLD);
        let mut lines = vec![Line::from(vec![
            Span::styled(format!("{:<KEY_WIDTH$}", "Key"), header),
            Span::styled("Action", header),
        ])];

        for category in CATEGORIES {
            lines.push(Line::from(Span::styled(
                format!("-- {}", category.name),
                Style::default().fg(self.theme.dim_fg),
            )));
            for entry in category.entries {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{:<KEY_WIDTH$}", entry.key),
                        Style::default().fg(self.theme.mode_fg),
                    ),
                    Span::raw(entry.description),
                ]));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Press any key to close help",
            Style::default().fg(self.theme.dim_fg),
        )));
        lines
    }

    pub fn total_lines() -> usize {
        let entries: usize = CATEGORIES.iter().map(|c| c.entries.len() + 1).sum();
        entries + 3 // header, blank, footer
    }
}

impl Widget for HelpOverlay<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(" Help ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_fg));
        let inner = block.inner(area);
        block.render(area, buf);

        for (i, line) in self
            .build_content_lines()
            .iter()
            .take(inner.height as usize)
            .enumerate()
        {
            buf.set_line(inner.x + 1, inner.y + i as u16, line, inner.width.saturating_sub(1));
        }
    }
}
