use std::path::Path;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::ThemeColors;

/// `path` with a leading `home` replaced by `~`.
pub fn with_tilde(path: &Path, home: Option<&Path>) -> String {
    match home.and_then(|home| path.strip_prefix(home).ok()) {
        Some(rest) if rest.as_os_str().is_empty() => "~".to_string(),
        Some(rest) => format!("~/{}", rest.display()),
        None => path.display().to_string(),
    }
}

/// Top line: current directory, the highlighted name, and a marker when
/// every visible entry is selected.
pub struct TopLineWidget<'a> {
    dir: &'a Path,
    home: Option<&'a Path>,
    current_name: Option<&'a str>,
    all_selected: bool,
    theme: &'a ThemeColors,
}

impl<'a> TopLineWidget<'a> {
    pub fn new(dir: &'a Path, home: Option<&'a Path>, theme: &'a ThemeColors) -> Self {
        Self {
            dir,
            home,
            current_name: None,
            all_selected: false,
            theme,
        }
    }

    pub fn current_name(mut self, name: Option<&'a str>) -> Self {
        self.current_name = name;
        self
    }

    pub fn all_selected(mut self, all_selected: bool) -> Self {
        self.all_selected = all_selected;
        self
    }
}

impl Widget for TopLineWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }

        let mut dir = with_tilde(self.dir, self.home);
        if !dir.ends_with('/') {
            dir.push('/');
        }

        let mut spans = vec![Span::styled(
            dir,
            Style::default()
                .fg(self.theme.dir_path_fg)
                .add_modifier(Modifier::BOLD),
        )];
        if let Some(name) = self.current_name {
            spans.push(Span::styled(
                name.to_string(),
                Style::default().fg(self.theme.current_name_fg),
            ));
        }
        if self.all_selected {
            spans.push(Span::styled(
                " [all selected]",
                Style::default().fg(self.theme.accent_fg),
            ));
        }
        buf.set_line(area.x, area.y, &Line::from(spans), area.width);
    }
}

/// Bottom line: the transient status message, if any.
pub struct StatusBarWidget<'a> {
    theme: &'a ThemeColors,
    status_message: Option<&'a str>,
    is_error: bool,
}

impl<'a> StatusBarWidget<'a> {
    pub fn new(theme: &'a ThemeColors) -> Self {
        Self {
            theme,
            status_message: None,
            is_error: false,
        }
    }

    pub fn status_message(mut self, msg: &'a str, is_error: bool) -> Self {
        self.status_message = Some(msg);
        self.is_error = is_error;
        self
    }
}

impl Widget for StatusBarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let Some(msg) = self.status_message else {
            return;
        };

        let span = if self.is_error {
            Span::styled(
                format!("error: {msg}"),
                Style::default().fg(self.theme.error_fg),
            )
        } else {
            Span::styled(msg.to_string(), Style::default().add_modifier(Modifier::ITALIC))
        };
        buf.set_line(area.x, area.y, &Line::from(span), area.width);
    }
}

/// Bottom line while the create prompt is open.
pub struct PromptWidget<'a> {
    input: &'a str,
    theme: &'a ThemeColors,
}

pub const PROMPT_LABEL: &str = "create: ";

impl<'a> PromptWidget<'a> {
    pub fn new(input: &'a str, theme: &'a ThemeColors) -> Self {
        Self { input, theme }
    }
}

impl Widget for PromptWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        let line = Line::from(vec![
            Span::styled(PROMPT_LABEL, Style::default().fg(self.theme.accent_fg)),
            Span::raw(self.input.to_string()),
        ]);
        buf.set_line(area.x, area.y, &line, area.width);
    }
}
