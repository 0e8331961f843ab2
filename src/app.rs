use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, MouseButton, MouseEventKind};
use git2::Repository;
use ratatui::layout::Rect;
use std::io;
use std::time::Duration;

use crate::generator;
use crate::git;
use crate::patch::PatchModel;
use crate::types::{FocusPanel, SelectMode};
use crate::ui;

/// Cursor and selection state over one file's parsed diff.
pub struct StagingPanel {
    pub model: PatchModel,
    /// Index into `model.stageable_lines` of the cursor line.
    pub selected: usize,
    /// First diff-line of the highlighted range.
    pub first_line: usize,
    /// Last diff-line of the highlighted range.
    pub last_line: usize,
    pub mode: SelectMode,
}

impl StagingPanel {
    /// Build a panel for a parsed diff, keeping the previous cursor position
    /// where possible. `None` when the diff has nothing stageable.
    fn new(model: PatchModel, previous_selected: usize) -> Option<Self> {
        if model.stageable_lines.is_empty() {
            return None;
        }
        let selected = previous_selected.min(model.stageable_lines.len() - 1);
        let line = model.stageable_lines[selected];
        Some(Self {
            model,
            selected,
            first_line: line,
            last_line: line,
            mode: SelectMode::Line,
        })
    }

    /// The diff-line index under the cursor.
    pub fn cursor_line(&self) -> usize {
        self.model.stageable_lines[self.selected]
    }

    /// Move the cursor to the previous/next stageable line, wrapping around.
    /// In range mode the highlight grows; in hunk mode the highlight walks
    /// whole hunks instead.
    fn cycle_line(&mut self, prev: bool) {
        if self.mode == SelectMode::Hunk {
            self.cycle_hunk_selection(prev);
            return;
        }

        let len = self.model.stageable_lines.len();
        self.selected = if prev {
            (self.selected + len - 1) % len
        } else {
            (self.selected + 1) % len
        };

        let line = self.cursor_line();
        if self.mode == SelectMode::Range {
            if line < self.first_line {
                self.first_line = line;
            } else {
                self.last_line = line;
            }
        } else {
            self.first_line = line;
            self.last_line = line;
        }
    }

    /// Walk the hunk-sized highlight to the adjacent hunk, without wrapping.
    fn cycle_hunk_selection(&mut self, prev: bool) {
        let target = if prev {
            if self.first_line == self.model.hunk_starts[0] {
                return;
            }
            self.first_line.saturating_sub(1)
        } else {
            if self.last_line >= self.model.patch_lines.len().saturating_sub(1) {
                return;
            }
            self.last_line + 1
        };
        self.select_hunk_at(target);
    }

    /// Jump the cursor into the previous/next hunk.
    fn cycle_hunk(&mut self, prev: bool) {
        let delta: isize = if prev { -1 } else { 1 };
        let Some(hunk) = self.model.hunk_containing_line(self.cursor_line(), delta) else {
            return;
        };
        let first_line_index = hunk.first_line_index;
        let last_line_index = hunk.last_line_index;

        let line = self.model.next_stageable_line_index(first_line_index);
        if let Some(position) = self.model.stageable_lines.iter().position(|&idx| idx == line) {
            self.selected = position;
        }

        if self.mode == SelectMode::Hunk {
            self.first_line = first_line_index;
            self.last_line = last_line_index;
        } else {
            self.mode = SelectMode::Line;
            self.first_line = line;
            self.last_line = line;
        }
    }

    /// Snap the highlight to the hunk containing `line` and put the cursor
    /// on its first stageable line.
    fn select_hunk_at(&mut self, line: usize) {
        let Some(hunk) = self.model.hunk_containing_line(line, 0) else {
            return;
        };
        self.first_line = hunk.first_line_index;
        self.last_line = hunk.last_line_index;
        if let Some(position) = self
            .model
            .stageable_lines
            .iter()
            .position(|&idx| idx >= self.first_line)
        {
            self.selected = position;
        }
    }

    fn toggle_range(&mut self) {
        let line = self.cursor_line();
        self.mode = if self.mode == SelectMode::Range {
            SelectMode::Line
        } else {
            SelectMode::Range
        };
        self.first_line = line;
        self.last_line = line;
    }

    fn toggle_hunk(&mut self) {
        if self.mode == SelectMode::Hunk {
            self.mode = SelectMode::Line;
            let line = self.cursor_line();
            self.first_line = line;
            self.last_line = line;
        } else {
            self.mode = SelectMode::Hunk;
            self.select_hunk_at(self.cursor_line());
        }
    }
}

/// Application state for the TUI.
pub struct App {
    /// Repo-relative paths with changes left to work through.
    pub files: Vec<String>,
    pub selected_file: usize,
    pub panel: Option<StagingPanel>,
    /// Operating on the index (`--cached`): space un-stages instead of staging.
    pub cached: bool,
    pub focus: FocusPanel,
    pub message: Option<String>,
    pub show_help: bool,
    /// Scroll position of the diff view, maintained during render so the
    /// cursor stays visible.
    pub scroll_offset: u16,
    /// Cached file list area for mouse click mapping.
    pub file_list_area: Rect,
    /// Whether the UI needs to be redrawn.
    pub dirty: bool,
}

impl App {
    pub fn new(files: Vec<String>, cached: bool) -> Self {
        Self {
            files,
            selected_file: 0,
            panel: None,
            cached,
            focus: FocusPanel::DiffView,
            message: None,
            show_help: false,
            scroll_offset: 0,
            file_list_area: Rect::default(),
            dirty: true,
        }
    }

    /// The path of the currently selected file, if any.
    pub fn current_path(&self) -> Option<&str> {
        self.files.get(self.selected_file).map(String::as_str)
    }

    /// Build the staging panel for the selected file. Files with nothing
    /// stageable left (fully staged, binary, empty diff) are dropped from
    /// the list and the next file is tried.
    fn open_selected(&mut self, repo: &Repository) -> Result<()> {
        loop {
            if self.files.is_empty() {
                self.panel = None;
                return Ok(());
            }
            if self.selected_file >= self.files.len() {
                self.selected_file = self.files.len() - 1;
            }

            let previous = self.panel.as_ref().map_or(0, |p| p.selected);
            let text = git::diff_text(repo, &self.files[self.selected_file], self.cached)?;
            if text.len() >= 2 {
                let model = PatchModel::parse(&text)?;
                if let Some(panel) = StagingPanel::new(model, previous) {
                    self.panel = Some(panel);
                    self.dirty = true;
                    return Ok(());
                }
            }

            self.files.remove(self.selected_file);
            self.panel = None;
            self.dirty = true;
        }
    }

    fn select_next_file(&mut self, repo: &Repository) -> Result<()> {
        if self.files.is_empty() {
            return Ok(());
        }
        self.selected_file = (self.selected_file + 1) % self.files.len();
        self.panel = None;
        self.scroll_offset = 0;
        self.open_selected(repo)
    }

    fn select_prev_file(&mut self, repo: &Repository) -> Result<()> {
        if self.files.is_empty() {
            return Ok(());
        }
        self.selected_file = (self.selected_file + self.files.len() - 1) % self.files.len();
        self.panel = None;
        self.scroll_offset = 0;
        self.open_selected(repo)
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            FocusPanel::FileList => FocusPanel::DiffView,
            FocusPanel::DiffView => FocusPanel::FileList,
        };
        self.dirty = true;
    }

    /// Collapse range/hunk selection back to the cursor line. Returns false
    /// when there was nothing to collapse.
    fn clear_selection_mode(&mut self) -> bool {
        let Some(panel) = &mut self.panel else {
            return false;
        };
        if panel.mode == SelectMode::Line {
            return false;
        }
        panel.mode = SelectMode::Line;
        let line = panel.cursor_line();
        panel.first_line = line;
        panel.last_line = line;
        self.dirty = true;
        true
    }

    /// Generate the sub-patch for the highlighted range and apply it to the
    /// index: forward to stage, reverse to un-stage under `--cached`.
    fn apply_selection(&mut self, repo: &Repository) -> Result<()> {
        let Some(panel) = &mut self.panel else {
            return Ok(());
        };
        let Some(path) = self.files.get(self.selected_file) else {
            return Ok(());
        };

        let patch = generator::generate_patch(
            &panel.model,
            path,
            panel.first_line,
            panel.last_line,
            self.cached,
        );

        panel.mode = SelectMode::Line;

        if patch.is_empty() {
            self.message = Some("No changes in selection".to_string());
            self.dirty = true;
            return Ok(());
        }

        git::apply_patch(repo, &patch)?;

        self.message = Some(
            if self.cached {
                "Selection unstaged"
            } else {
                "Selection staged"
            }
            .to_string(),
        );

        // the diff has changed shape; rebuild the model around the cursor
        self.open_selected(repo)
    }

    /// Handle a mouse click at the given coordinates.
    fn handle_mouse_click(&mut self, column: u16, row: u16, repo: &Repository) -> Result<()> {
        let area = self.file_list_area;
        if column >= area.x
            && column < area.x + area.width
            && row >= area.y
            && row < area.y + area.height
        {
            // +1 for the border
            let idx = row.saturating_sub(area.y + 1) as usize;
            if idx < self.files.len() && idx != self.selected_file {
                self.selected_file = idx;
                self.panel = None;
                self.scroll_offset = 0;
                self.focus = FocusPanel::FileList;
                self.open_selected(repo)?;
            }
        }
        Ok(())
    }
}

/// Guard that restores terminal state on drop (including panics).
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            io::stdout(),
            crossterm::terminal::LeaveAlternateScreen,
            crossterm::event::DisableMouseCapture,
        );
    }
}

/// Run the TUI application over the given changed files.
pub fn run(files: Vec<String>, repo: &Repository, cached: bool) -> Result<()> {
    crossterm::terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(
        stdout,
        crossterm::terminal::EnterAlternateScreen,
        crossterm::event::EnableMouseCapture,
    )?;

    // guard ensures the terminal is restored even on panic
    let _guard = TerminalGuard;

    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let mut app = App::new(files, cached);
    app.open_selected(repo)?;

    loop {
        if app.files.is_empty() {
            break;
        }

        if app.dirty {
            terminal.draw(|frame| {
                ui::render(frame, &mut app);
            })?;
            app.dirty = false;
        }

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => {
                    if app.show_help {
                        app.show_help = false;
                        app.dirty = true;
                        continue;
                    }

                    match key.code {
                        KeyCode::Char('q') => break,
                        KeyCode::Esc => {
                            if !app.clear_selection_mode() {
                                break;
                            }
                        }
                        KeyCode::Char('?') => {
                            app.show_help = true;
                            app.dirty = true;
                        }
                        KeyCode::Tab => app.toggle_focus(),
                        KeyCode::Up | KeyCode::Char('k') => {
                            if app.focus == FocusPanel::FileList {
                                if let Err(e) = app.select_prev_file(repo) {
                                    app.message = Some(format!("Error: {e}"));
                                }
                            } else if let Some(panel) = &mut app.panel {
                                panel.cycle_line(true);
                            }
                            app.dirty = true;
                        }
                        KeyCode::Down | KeyCode::Char('j') => {
                            if app.focus == FocusPanel::FileList {
                                if let Err(e) = app.select_next_file(repo) {
                                    app.message = Some(format!("Error: {e}"));
                                }
                            } else if let Some(panel) = &mut app.panel {
                                panel.cycle_line(false);
                            }
                            app.dirty = true;
                        }
                        KeyCode::Left | KeyCode::Char('h') => {
                            if let Some(panel) = &mut app.panel {
                                panel.cycle_hunk(true);
                                app.dirty = true;
                            }
                        }
                        KeyCode::Right | KeyCode::Char('l') => {
                            if let Some(panel) = &mut app.panel {
                                panel.cycle_hunk(false);
                                app.dirty = true;
                            }
                        }
                        KeyCode::Char('v') => {
                            if let Some(panel) = &mut app.panel {
                                panel.toggle_range();
                                app.dirty = true;
                            }
                        }
                        KeyCode::Char('a') => {
                            if let Some(panel) = &mut app.panel {
                                panel.toggle_hunk();
                                app.dirty = true;
                            }
                        }
                        KeyCode::Char(' ') => {
                            if let Err(e) = app.apply_selection(repo) {
                                app.message = Some(format!("Apply error: {e}"));
                                app.dirty = true;
                            }
                        }
                        _ => {}
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollDown => {
                        if let Some(panel) = &mut app.panel {
                            panel.cycle_line(false);
                            app.dirty = true;
                        }
                    }
                    MouseEventKind::ScrollUp => {
                        if let Some(panel) = &mut app.panel {
                            panel.cycle_line(true);
                            app.dirty = true;
                        }
                    }
                    MouseEventKind::Down(MouseButton::Left) => {
                        if let Err(e) = app.handle_mouse_click(mouse.column, mouse.row, repo) {
                            app.message = Some(format!("Error: {e}"));
                            app.dirty = true;
                        }
                    }
                    _ => {}
                },
                Event::Resize(_, _) => {
                    app.dirty = true;
                }
                _ => {}
            }
        }
    }

    Ok(())
}
