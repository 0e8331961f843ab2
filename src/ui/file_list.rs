use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Modifier;
use ratatui::widgets::{Block, Borders, List, ListItem, ListState};

use crate::ui::theme;

/// Render the file list panel.
pub fn render(frame: &mut Frame, area: Rect, files: &[String], selected: usize, focused: bool) {
    let border_style = if focused {
        theme::border_focused_style()
    } else {
        theme::border_unfocused_style()
    };

    let block = Block::default()
        .title(" Files ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let items: Vec<ListItem> = files
        .iter()
        .map(|path| ListItem::new(path.clone()))
        .collect();

    let mut state = ListState::default();
    state.select((!files.is_empty()).then_some(selected));

    let list = List::new(items)
        .block(block)
        .highlight_style(theme::selected_style().add_modifier(Modifier::BOLD))
        .highlight_symbol("▶ ");

    frame.render_stateful_widget(list, area, &mut state);
}
