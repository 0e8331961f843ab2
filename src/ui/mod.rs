pub mod diff_view;
pub mod file_list;
pub mod help_overlay;
pub mod status_bar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::app::App;
use crate::types::FocusPanel;

/// Render the full TUI layout.
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // main content area
            Constraint::Length(1), // status bar
        ])
        .split(frame.area());

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25), // file list
            Constraint::Percentage(75), // diff view
        ])
        .split(chunks[0]);

    // store for mouse click mapping
    app.file_list_area = main_chunks[0];

    file_list::render(
        frame,
        main_chunks[0],
        &app.files,
        app.selected_file,
        app.focus == FocusPanel::FileList,
    );

    diff_view::render(frame, main_chunks[1], app);

    status_bar::render(frame, chunks[1], app);

    if app.show_help {
        help_overlay::render(frame, frame.area());
    }
}
