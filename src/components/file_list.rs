use chrono::{DateTime, Local};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::fs::Entry;
use crate::selection::SelectionSet;
use crate::theme::ThemeColors;
use crate::viewport::Viewport;

/// Narrowest list width that still shows mode and modification time.
pub const METADATA_MIN_WIDTH: u16 = 45;

/// Visible window of the sorted and filtered listing.
pub struct FileListWidget<'a> {
    entries: &'a [&'a Entry],
    viewport: &'a Viewport,
    selections: &'a SelectionSet,
    theme: &'a ThemeColors,
}

impl<'a> FileListWidget<'a> {
    pub fn new(
        entries: &'a [&'a Entry],
        viewport: &'a Viewport,
        selections: &'a SelectionSet,
        theme: &'a ThemeColors,
    ) -> Self {
        Self {
            entries,
            viewport,
            selections,
            theme,
        }
    }

    fn row(&self, entry: &Entry, is_cursor: bool, with_metadata: bool) -> Line<'static> {
        let selected = self.selections.contains(&entry.path);

        let mut name_style = Style::default().fg(if entry.is_dir {
            self.theme.dir_fg
        } else {
            self.theme.file_fg
        });
        if selected {
            name_style = name_style.add_modifier(Modifier::BOLD);
        }
        if is_cursor {
            name_style = name_style.bg(self.theme.cursor_bg);
        }

        let mut spans = Vec::with_capacity(4);
        if with_metadata {
            spans.push(Span::styled(
                format!("{} ", entry.mode_string()),
                Style::default().fg(self.theme.mode_fg),
            ));
            spans.push(Span::styled(
                format!("{} ", format_modified(entry)),
                Style::default().fg(self.theme.modified_fg),
            ));
        }
        let marker = if selected { '*' } else { ' ' };
        let suffix = if entry.is_dir { "/" } else { "" };
        spans.push(Span::styled(
            format!("{marker} {}{suffix}", entry.name),
            name_style,
        ));
        Line::from(spans)
    }
}

fn format_modified(entry: &Entry) -> String {
    DateTime::<Local>::from(entry.modified)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

impl Widget for FileListWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 || self.entries.is_empty() {
            return;
        }

        let with_metadata = area.width >= METADATA_MIN_WIDTH;
        let top = self.viewport.top();
        let cursor = self.viewport.cursor();
        let rows = self
            .entries
            .iter()
            .enumerate()
            .skip(top)
            .take(area.height as usize);

        for (offset, (index, entry)) in rows.enumerate() {
            let line = self.row(entry, index == cursor, with_metadata);
            buf.set_line(area.x, area.y + offset as u16, &line, area.width);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::entry;
    use std::path::Path;

    fn row_text(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width)
            .map(|x| buf.cell((x, y)).unwrap().symbol().to_string())
            .collect::<String>()
            .trim_end()
            .to_string()
    }

    #[test]
    fn renders_window_from_viewport_top() {
        let owned: Vec<Entry> = (0..10)
            .map(|i| entry("/w", &format!("f{i}"), false, 0))
            .collect();
        let entries: Vec<&Entry> = owned.iter().collect();
        let mut viewport = Viewport::default();
        viewport.set_page_height(3);
        viewport.move_cursor(4, entries.len());
        let selections = SelectionSet::default();
        let theme = ThemeColors::default();

        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        FileListWidget::new(&entries, &viewport, &selections, &theme).render(area, &mut buf);

        assert_eq!(row_text(&buf, 0), "  f2");
        assert_eq!(row_text(&buf, 2), "  f4");
        assert_eq!(buf.cell((2, 2)).unwrap().bg, theme.cursor_bg);
    }

    #[test]
    fn selected_entries_are_marked() {
        let owned = vec![entry("/w", "a", false, 0), entry("/w", "src", true, 0)];
        let entries: Vec<&Entry> = owned.iter().collect();
        let mut viewport = Viewport::default();
        viewport.set_page_height(5);
        let mut selections = SelectionSet::default();
        selections.toggle(Path::new("/w/src"));
        let theme = ThemeColors::default();

        let area = Rect::new(0, 0, 20, 5);
        let mut buf = Buffer::empty(area);
        FileListWidget::new(&entries, &viewport, &selections, &theme).render(area, &mut buf);

        assert_eq!(row_text(&buf, 0), "  a");
        assert_eq!(row_text(&buf, 1), "* src/");
        assert_eq!(buf.cell((2, 1)).unwrap().fg, theme.dir_fg);
    }

    #[test]
    fn wide_area_shows_mode_and_time() {
        let owned = vec![entry("/w", "notes", false, 0)];
        let entries: Vec<&Entry> = owned.iter().collect();
        let viewport = Viewport::default();
        let selections = SelectionSet::default();
        let theme = ThemeColors::default();

        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        FileListWidget::new(&entries, &viewport, &selections, &theme).render(area, &mut buf);

        let text = row_text(&buf, 0);
        assert!(text.starts_with("-rw-r--r-- "), "{text}");
        assert!(text.ends_with("  notes"), "{text}");
    }
}
