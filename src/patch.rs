use anyhow::{Result, anyhow};

use crate::types::{ColorClass, DisplayLine, DisplaySpan, Hunk, LineKind, PatchLine};

/// Parsed model of one file's unified diff: every line classified, hunk
/// boundaries located, stageable lines enumerated.
///
/// The model is built once per diff and read-only afterwards; patch
/// generation works on its own copies (see `generator`), so one model can
/// serve any number of selections.
#[derive(Debug, Clone)]
pub struct PatchModel {
    /// Every line of the diff, in order, split on `\n`.
    pub patch_lines: Vec<PatchLine>,
    /// Diff-line indices of hunk headers, ascending.
    pub hunk_starts: Vec<usize>,
    /// Diff-line indices of additions and deletions, ascending.
    pub stageable_lines: Vec<usize>,
    pub hunks: Vec<Hunk>,
}

impl PatchModel {
    /// Parse a unified diff of a single file, as produced by `git diff`.
    pub fn parse(diff: &str) -> Result<Self> {
        let lines: Vec<&str> = diff.split('\n').collect();

        let mut patch_lines = Vec::with_capacity(lines.len());
        let mut hunk_starts = Vec::new();
        let mut stageable_lines = Vec::new();
        let mut past_first_hunk_header = false;

        for (index, line) in lines.iter().enumerate() {
            let first_char = line.chars().next().unwrap_or(' ');
            let kind = if first_char == '@' {
                past_first_hunk_header = true;
                hunk_starts.push(index);
                LineKind::HunkHeader
            } else if !past_first_hunk_header {
                LineKind::PatchHeader
            } else {
                match first_char {
                    '+' => {
                        stageable_lines.push(index);
                        LineKind::Addition
                    }
                    '-' => {
                        stageable_lines.push(index);
                        LineKind::Deletion
                    }
                    '\\' => LineKind::NewlineMessage,
                    ' ' => LineKind::Context,
                    // unexpected trailing metadata
                    _ => LineKind::PatchHeader,
                }
            };
            patch_lines.push(PatchLine {
                kind,
                content: (*line).to_string(),
            });
        }

        let mut hunks = Vec::with_capacity(hunk_starts.len());
        for (i, &start) in hunk_starts.iter().enumerate() {
            let end = hunk_starts.get(i + 1).copied().unwrap_or(lines.len());
            hunks.push(build_hunk(&lines, start, end)?);
        }

        Ok(Self {
            patch_lines,
            hunk_starts,
            stageable_lines,
            hunks,
        })
    }

    /// Smallest stageable index at or after `from`, falling back to the
    /// largest one. Callers check `stageable_lines` for emptiness before
    /// navigating; on an empty model this returns 0.
    pub fn next_stageable_line_index(&self, from: usize) -> usize {
        self.stageable_lines
            .iter()
            .copied()
            .find(|&index| index >= from)
            .or_else(|| self.stageable_lines.last().copied())
            .unwrap_or(0)
    }

    /// The hunk containing `line_index`, shifted by `delta` hunks and
    /// clamped to the ends of the hunk list. `delta` is the caller's
    /// navigation step (-1 previous, 0 containing, +1 next). `None` only
    /// when the diff has no hunks.
    pub fn hunk_containing_line(&self, line_index: usize, delta: isize) -> Option<&Hunk> {
        if self.hunks.is_empty() {
            return None;
        }
        let containing = self.hunk_starts.partition_point(|&start| start <= line_index) as isize - 1;
        let clamped = (containing + delta).clamp(0, self.hunks.len() as isize - 1);
        self.hunks.get(clamped as usize)
    }

    /// Render the whole diff as display spans, marking lines within
    /// `[first_line, last_line]` as selected. Pure function of the model
    /// and the range; turning spans into escape sequences is the UI's job.
    pub fn render(&self, first_line: usize, last_line: usize) -> Vec<DisplayLine> {
        self.patch_lines
            .iter()
            .enumerate()
            .map(|(index, line)| {
                let selected = index >= first_line && index <= last_line;
                render_line(line, selected)
            })
            .collect()
    }
}

fn build_hunk(lines: &[&str], start: usize, end: usize) -> Result<Hunk> {
    let (old_start, new_start, heading) = parse_hunk_header(lines[start])?;

    let mut body_lines = Vec::with_capacity(end.saturating_sub(start + 1));
    for index in start + 1..end {
        let mut line = lines[index].to_string();
        if index + 1 < lines.len() {
            line.push('\n');
        }
        // splitting on `\n` leaves an empty entry at end of input; it owns no content
        if !line.is_empty() {
            body_lines.push(line);
        }
    }

    Ok(Hunk {
        old_start,
        new_start,
        heading,
        first_line_index: start,
        last_line_index: start + body_lines.len(),
        body_lines,
    })
}

/// Parse `@@ -oldStart[,oldLen] +newStart[,newLen] @@[ heading]`, keeping
/// only the two starting numbers and the trailing heading. Length fields
/// are recomputed from body counts whenever a patch is generated, so they
/// are not retained.
fn parse_hunk_header(line: &str) -> Result<(u32, u32, String)> {
    let malformed = || anyhow!("malformed hunk header: {line:?}");

    let rest = line.strip_prefix("@@ -").ok_or_else(malformed)?;
    let (old_start, rest) = take_number(rest).ok_or_else(malformed)?;
    let plus = rest.find('+').ok_or_else(malformed)?;
    if plus == 0 {
        return Err(malformed());
    }
    let (new_start, rest) = take_number(&rest[plus + 1..]).ok_or_else(malformed)?;
    let close = rest.find("@@").ok_or_else(malformed)?;
    if close == 0 {
        return Err(malformed());
    }
    let heading = rest[close + 2..].to_string();
    Ok((old_start, new_start, heading))
}

fn take_number(s: &str) -> Option<(u32, &str)> {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let value = s[..end].parse().ok()?;
    Some((value, &s[end..]))
}

fn render_line(line: &PatchLine, selected: bool) -> DisplayLine {
    // hunk headers split into a highlighted prefix and a neutral heading
    if line.kind == LineKind::HunkHeader {
        if let Some(split) = closing_marker(&line.content) {
            let (sigil, heading) = line.content.split_at(split);
            return DisplayLine {
                spans: vec![
                    DisplaySpan {
                        class: ColorClass::HunkHeaderSigil,
                        selected,
                        text: sigil.to_string(),
                    },
                    DisplaySpan {
                        class: ColorClass::HunkHeaderHeading,
                        selected,
                        text: heading.to_string(),
                    },
                ],
            };
        }
    }

    let class = match line.kind {
        LineKind::PatchHeader => ColorClass::PatchHeader,
        LineKind::HunkHeader => ColorClass::HunkHeaderSigil,
        LineKind::Addition => ColorClass::Addition,
        LineKind::Deletion => ColorClass::Deletion,
        LineKind::Context => ColorClass::Context,
        LineKind::NewlineMessage => ColorClass::NewlineMessage,
    };
    DisplayLine {
        spans: vec![DisplaySpan {
            class,
            selected,
            text: line.content.clone(),
        }],
    }
}

/// Byte offset just past the closing `@@` of a hunk header.
fn closing_marker(content: &str) -> Option<usize> {
    content
        .get(2..)
        .and_then(|rest| rest.find("@@"))
        .map(|pos| 2 + pos + 2)
}
