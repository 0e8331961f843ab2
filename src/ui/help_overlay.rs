use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

/// Render a centered help overlay listing all keybindings.
pub fn render(frame: &mut Frame, area: Rect) {
    let width = 54u16.min(area.width.saturating_sub(4));
    let height = 17u16.min(area.height.saturating_sub(2));
    let overlay = centered_rect(width, height, area);

    frame.render_widget(Clear, overlay);

    let title_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let desc_style = Style::default().fg(Color::White);
    let section_style = Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD);
    let footer_style = Style::default()
        .fg(Color::DarkGray)
        .add_modifier(Modifier::ITALIC);

    let inner_width = width.saturating_sub(2) as usize;

    let lines = vec![
        centered_line("Keyboard Shortcuts", title_style, inner_width),
        Line::from(""),
        centered_line("── Navigation ──", section_style, inner_width),
        key_line("j / k  ↓ / ↑", "Next / previous change", key_style, desc_style),
        key_line("h / l  ← / →", "Previous / next hunk", key_style, desc_style),
        key_line("Tab", "Toggle panel focus", key_style, desc_style),
        Line::from(""),
        centered_line("── Selection ──", section_style, inner_width),
        key_line("v", "Toggle range selection", key_style, desc_style),
        key_line("a", "Toggle hunk selection", key_style, desc_style),
        key_line("Esc", "Collapse selection / quit", key_style, desc_style),
        Line::from(""),
        centered_line("── Actions ──", section_style, inner_width),
        key_line("Space", "Stage (or unstage) selection", key_style, desc_style),
        key_line("q", "Quit", key_style, desc_style),
        Line::from(""),
        centered_line("Press any key to dismiss", footer_style, inner_width),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Help ")
        .title_style(title_style);

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, overlay);
}

fn key_line<'a>(key: &'a str, desc: &'a str, key_style: Style, desc_style: Style) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<16}", key), key_style),
        Span::styled(desc, desc_style),
    ])
}

fn centered_line(text: &str, style: Style, width: usize) -> Line<'static> {
    let text_len = text.chars().count();
    let padding = width.saturating_sub(text_len) / 2;
    let padded = format!("{:>width$}", text, width = padding + text_len);
    Line::from(Span::styled(padded, style))
}

/// Create a centered rect of given width and height within `area`.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(ratatui::layout::Direction::Vertical)
        .constraints([
            Constraint::Length((area.height.saturating_sub(height)) / 2),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(ratatui::layout::Direction::Horizontal)
        .constraints([
            Constraint::Length((area.width.saturating_sub(width)) / 2),
            Constraint::Length(width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}
