use ratatui::{buffer::Buffer, layout::Rect, text::Line, widgets::Widget};

use crate::selection::SelectionSet;

pub const NO_SELECTIONS: &str = "no selections";

/// Every selected path, one per line, in lexicographic order.
pub struct SelectionsWidget<'a> {
    selections: &'a SelectionSet,
}

impl<'a> SelectionsWidget<'a> {
    pub fn new(selections: &'a SelectionSet) -> Self {
        Self { selections }
    }
}

impl Widget for SelectionsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        if self.selections.is_empty() {
            buf.set_line(area.x, area.y, &Line::from(NO_SELECTIONS), area.width);
            return;
        }
        for (i, path) in self
            .selections
            .sorted()
            .into_iter()
            .take(area.height as usize)
            .enumerate()
        {
            let line = Line::from(path.display().to_string());
            buf.set_line(area.x, area.y + i as u16, &line, area.width);
        }
    }
}
