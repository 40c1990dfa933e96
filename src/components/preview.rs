use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

/// Preview pane: the loaded lines, clipped to the area.
pub struct PreviewWidget<'a> {
    lines: &'a [String],
    theme: &'a ThemeColors,
}

impl<'a> PreviewWidget<'a> {
    pub fn new(lines: &'a [String], theme: &'a ThemeColors) -> Self {
        Self { lines, theme }
    }
}

impl Widget for PreviewWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        let style = Style::default().fg(self.theme.preview_fg);
        for (i, text) in self.lines.iter().take(area.height as usize).enumerate() {
            // Tabs would desync cell widths
            let line = Line::from(Span::styled(text.replace('\t', "    "), style));
            buf.set_line(area.x, area.y + i as u16, &line, area.width);
        }
    }
}
