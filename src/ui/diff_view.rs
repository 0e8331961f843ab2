use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::App;
use crate::types::FocusPanel;
use crate::ui::theme;

/// Render the diff view panel: the core's display spans mapped to theme
/// styles, with the selected range highlighted and the cursor kept visible.
pub fn render(frame: &mut Frame, area: Rect, app: &mut App) {
    let border_style = if app.focus == FocusPanel::DiffView {
        theme::border_focused_style()
    } else {
        theme::border_unfocused_style()
    };

    let title = match app.current_path() {
        Some(path) => format!(" {path} "),
        None => " No file selected ".to_string(),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);

    let Some(panel) = &app.panel else {
        let paragraph = Paragraph::new("Nothing left to stage.").block(block);
        frame.render_widget(paragraph, area);
        return;
    };

    let rendered = panel.model.render(panel.first_line, panel.last_line);
    let lines: Vec<Line> = rendered
        .iter()
        .map(|display_line| {
            let spans: Vec<Span> = display_line
                .spans
                .iter()
                .map(|span| {
                    let mut style = theme::class_style(span.class);
                    if span.selected {
                        style = style.bg(theme::SELECTED_BG);
                    }
                    Span::styled(span.text.clone(), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();

    // keep the cursor within the viewport with a three-line margin
    let cursor = panel.cursor_line().min(u16::MAX as usize) as u16;
    let viewport = area.height.saturating_sub(2);
    let mut origin = app.scroll_offset;
    if cursor.saturating_sub(origin) < 3 {
        origin = cursor.saturating_sub(3);
    } else if cursor.saturating_sub(origin) > viewport.saturating_sub(3) {
        origin = (cursor + 3).saturating_sub(viewport);
    }
    app.scroll_offset = origin;

    let paragraph = Paragraph::new(lines).block(block).scroll((origin, 0));
    frame.render_widget(paragraph, area);
}
