/// The classification of a single line of a unified diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Anything before the first hunk header (`diff --git`, `index`, `---`, `+++`),
    /// plus unexpected trailing metadata after it.
    PatchHeader,
    /// An `@@ -a,b +c,d @@` line.
    HunkHeader,
    Addition,
    Deletion,
    Context,
    /// The `\ No newline at end of file` marker.
    NewlineMessage,
}

impl LineKind {
    /// Only additions and deletions can be picked up by a selection.
    pub fn is_stageable(self) -> bool {
        matches!(self, LineKind::Addition | LineKind::Deletion)
    }
}

/// A single line of the displayed diff. `content` keeps the leading sigil
/// (`+`, `-`, ` `, `@`, `\`) and excludes the terminating newline.
#[derive(Debug, Clone)]
pub struct PatchLine {
    pub kind: LineKind,
    pub content: String,
}

/// One `@@` hunk: starting coordinates from the header plus its body.
///
/// `body_lines` keep their sigil and trailing newline. Line indices are
/// 0-based positions within the whole diff; the body spans
/// `first_line_index + 1 ..= last_line_index`.
#[derive(Debug, Clone)]
pub struct Hunk {
    /// 1-based starting line in the pre-image.
    pub old_start: u32,
    /// 1-based starting line in the post-image.
    pub new_start: u32,
    /// Trailing text after the closing `@@`, usually a function signature.
    pub heading: String,
    /// Diff-line index of the `@@` header line.
    pub first_line_index: usize,
    /// `first_line_index + body_lines.len()`.
    pub last_line_index: usize,
    pub body_lines: Vec<String>,
}

/// Color classes the renderer assigns to display spans. Mapping a class to a
/// concrete terminal style is the UI's concern (`ui::theme`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorClass {
    PatchHeader,
    HunkHeaderSigil,
    HunkHeaderHeading,
    Addition,
    Deletion,
    Context,
    NewlineMessage,
}

/// A run of characters with a single color class and selection state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplaySpan {
    pub class: ColorClass,
    pub selected: bool,
    pub text: String,
}

/// One rendered diff line. Hunk headers carry two spans (the `@@ ... @@`
/// part and the trailing heading); every other line carries one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLine {
    pub spans: Vec<DisplaySpan>,
}

/// How the highlighted range tracks the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectMode {
    /// The range is the cursor line alone.
    Line,
    /// The range grows as the cursor moves.
    Range,
    /// The range snaps to whole hunks.
    Hunk,
}

/// Which panel is focused in the TUI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPanel {
    FileList,
    DiffView,
}
