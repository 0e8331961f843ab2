use ratatui::style::{Color, Modifier, Style};

use crate::types::ColorClass;

/// Foreground for addition lines
pub const ADDED_FG: Color = Color::Green;

/// Foreground for deletion lines
pub const REMOVED_FG: Color = Color::Red;

/// Context lines and the no-newline marker
pub const CONTEXT_FG: Color = Color::Gray;

/// The `@@ ... @@` part of a hunk header
pub const HUNK_HEADER_FG: Color = Color::Cyan;

/// The trailing heading of a hunk header
pub const HEADING_FG: Color = Color::White;

/// Background for the highlighted selection range
pub const SELECTED_BG: Color = Color::Blue;

/// Selected item in the file list
pub const SELECTED_FG: Color = Color::White;

/// Status bar
pub const STATUS_BAR_BG: Color = Color::Rgb(30, 30, 30);
pub const STATUS_BAR_FG: Color = Color::White;

/// Panel borders
pub const BORDER_FOCUSED: Color = Color::Cyan;
pub const BORDER_UNFOCUSED: Color = Color::DarkGray;

/// Map a renderer color class to a concrete terminal style.
pub fn class_style(class: ColorClass) -> Style {
    match class {
        ColorClass::PatchHeader => Style::default().add_modifier(Modifier::BOLD),
        ColorClass::HunkHeaderSigil => Style::default().fg(HUNK_HEADER_FG),
        ColorClass::HunkHeaderHeading => Style::default().fg(HEADING_FG),
        ColorClass::Addition => Style::default().fg(ADDED_FG),
        ColorClass::Deletion => Style::default().fg(REMOVED_FG),
        ColorClass::Context => Style::default().fg(CONTEXT_FG),
        ColorClass::NewlineMessage => Style::default().fg(CONTEXT_FG),
    }
}

/// Helper for selected file list entries
pub fn selected_style() -> Style {
    Style::default().fg(SELECTED_FG).bg(SELECTED_BG)
}

/// Helper for the status bar
pub fn status_bar_style() -> Style {
    Style::default().fg(STATUS_BAR_FG).bg(STATUS_BAR_BG)
}

/// Helper for focused borders
pub fn border_focused_style() -> Style {
    Style::default().fg(BORDER_FOCUSED)
}

/// Helper for unfocused borders
pub fn border_unfocused_style() -> Style {
    Style::default().fg(BORDER_UNFOCUSED)
}
