use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::app::App;
use crate::types::SelectMode;
use crate::ui::theme;

/// Render the status bar at the bottom of the screen.
pub fn render(frame: &mut Frame, area: Rect, app: &App) {
    let line = if let Some(msg) = &app.message {
        Line::from(Span::styled(
            format!(" {} ", msg),
            theme::status_bar_style(),
        ))
    } else {
        let mode = match app.panel.as_ref().map(|p| p.mode) {
            Some(SelectMode::Range) => "RANGE",
            Some(SelectMode::Hunk) => "HUNK",
            _ => "LINE",
        };
        let action = if app.cached {
            "space:unstage"
        } else {
            "space:stage"
        };

        Line::from(vec![
            Span::styled(
                format!(" j/k:line  h/l:hunk  v:range  a:hunk  {action}  tab:files  q:quit  ?:help "),
                theme::status_bar_style(),
            ),
            Span::styled(
                format!(
                    " [{}] [{}/{}] ",
                    mode,
                    (app.selected_file + 1).min(app.files.len()),
                    app.files.len()
                ),
                theme::status_bar_style(),
            ),
        ])
    };

    let paragraph = Paragraph::new(line);
    frame.render_widget(paragraph, area);
}
