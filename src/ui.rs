use ratatui::{
    layout::{Constraint, Direction, Layout, Position},
    text::Line,
    Frame,
};

use crate::app::{ActiveView, App};
use crate::components::file_list::FileListWidget;
use crate::components::help::HelpOverlay;
use crate::components::preview::PreviewWidget;
use crate::components::selections::SelectionsWidget;
use crate::components::status_bar::{PromptWidget, StatusBarWidget, TopLineWidget, PROMPT_LABEL};
use crate::theme::ThemeColors;

/// Below this size only a placeholder is drawn.
const MIN_WIDTH: u16 = 10;
const MIN_HEIGHT: u16 = 3;

pub const TOO_SMALL: &str = "...";
pub const EMPTY_DIRECTORY: &str = "very empty here, innit?";

/// Render the application UI.
pub fn render(app: &App, frame: &mut Frame) {
    let area = frame.area();
    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        frame.render_widget(Line::from(TOO_SMALL), area);
        return;
    }

    let theme = ThemeColors::default();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(area);

    let visible = app.visible();
    let current = visible.get(app.viewport.cursor()).copied();
    let all_selected =
        !visible.is_empty() && app.selections.is_superset_of(visible.iter().map(|e| e.path.as_path()));

    frame.render_widget(
        TopLineWidget::new(&app.current_dir, app.home.as_deref(), &theme)
            .current_name(current.map(|e| e.name.as_str()))
            .all_selected(all_selected),
        chunks[0],
    );

    let main = chunks[1];
    match app.view {
        ActiveView::Help => frame.render_widget(HelpOverlay::new(&theme), main),
        ActiveView::SelectionList => frame.render_widget(SelectionsWidget::new(&app.selections), main),
        ActiveView::FileList | ActiveView::CreatePrompt if visible.is_empty() => {
            frame.render_widget(Line::from(EMPTY_DIRECTORY), main);
        }
        ActiveView::FileList | ActiveView::CreatePrompt => {
            let list = FileListWidget::new(&visible, &app.viewport, &app.selections, &theme);
            if app.preview_enabled {
                let halves = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                    .split(main);
                frame.render_widget(list, halves[0]);
                frame.render_widget(PreviewWidget::new(app.preview.lines(), &theme), halves[1]);
            } else {
                frame.render_widget(list, main);
            }
        }
    }

    let bottom = chunks[2];
    if app.view == ActiveView::CreatePrompt {
        frame.render_widget(PromptWidget::new(&app.prompt.input, &theme), bottom);
        let before_cursor = &app.prompt.input[..app.prompt.cursor_position];
        let x = bottom.x + (PROMPT_LABEL.len() + before_cursor.chars().count()) as u16;
        frame.set_cursor_position(Position::new(x.min(bottom.right().saturating_sub(1)), bottom.y));
    } else {
        let mut bar = StatusBarWidget::new(&theme);
        if let Some(msg) = app.status.message() {
            bar = bar.status_message(msg, app.status.current().is_error);
        }
        frame.render_widget(bar, bottom);
    }
}
