use crate::patch::PatchModel;
use crate::types::Hunk;

/// Synthesize a unified diff containing only the additions and deletions
/// whose diff-line indices fall inside `[first_line, last_line]`. With
/// `reverse` the sigils are flipped so that applying the result un-does the
/// selected changes instead of introducing them.
///
/// Returns the empty string when no addition or deletion survives the
/// selection; callers treat that as a no-op. The model itself is never
/// mutated — every invocation works on its own copies of the hunks.
pub fn generate_patch(
    model: &PatchModel,
    filename: &str,
    first_line: usize,
    last_line: usize,
    reverse: bool,
) -> String {
    let mut candidates: Vec<Hunk> = model
        .hunks
        .iter()
        .filter(|hunk| hunk.last_line_index >= first_line && hunk.first_line_index <= last_line)
        .cloned()
        .collect();

    for hunk in &mut candidates {
        rewrite_body(hunk, reverse, first_line, last_line);
    }

    let mut start_offset: i64 = 0;
    let mut formatted = String::new();
    for hunk in &mut candidates {
        if let Some(header) = updated_header(hunk, &mut start_offset, reverse) {
            formatted.push_str(&header);
            for line in &hunk.body_lines {
                formatted.push_str(line);
            }
        }
    }

    if formatted.is_empty() {
        return String::new();
    }

    format!("--- a/{filename}\n+++ b/{filename}\n{formatted}")
}

/// Rewrite a hunk body to contain only the selected changes. Unselected
/// additions disappear; unselected deletions demote to context lines, since
/// the line still exists in the image the stripped patch applies to.
fn rewrite_body(hunk: &mut Hunk, reverse: bool, first_line: usize, last_line: usize) {
    let mut new_lines = Vec::with_capacity(hunk.body_lines.len());
    // set when an addition is dropped, so that an immediately following
    // `\ No newline at end of file` marker is dropped with it
    let mut skipped_index = None;

    // the hunk header itself sits at first_line_index
    let mut line_index = hunk.first_line_index;
    for line in &hunk.body_lines {
        line_index += 1;
        let mut chars = line.chars();
        let first_char = chars.next().unwrap_or(' ');
        let rest = chars.as_str();

        if first_char == ' ' || (first_char == '\\' && skipped_index != Some(line_index)) {
            new_lines.push(line.clone());
            continue;
        }

        let new_first_char = match first_char {
            '+' if reverse => '-',
            '-' if reverse => '+',
            other => other,
        };

        if (first_line..=last_line).contains(&line_index) {
            new_lines.push(format!("{new_first_char}{rest}"));
            continue;
        }

        if new_first_char == '+' {
            skipped_index = Some(line_index + 1);
        } else if new_first_char == '-' {
            new_lines.push(format!(" {rest}"));
        }
    }

    hunk.body_lines = new_lines;
}

/// Recompute the `@@` header for a rewritten hunk. Returns `None` when the
/// body no longer changes anything, leaving `start_offset` untouched.
fn updated_header(hunk: &mut Hunk, start_offset: &mut i64, reverse: bool) -> Option<String> {
    let mut additions: i64 = 0;
    let mut deletions: i64 = 0;
    let mut contexts: i64 = 0;
    for line in &hunk.body_lines {
        match line.chars().next() {
            Some('+') => additions += 1,
            Some('-') => deletions += 1,
            Some(' ') => contexts += 1,
            _ => {}
        }
    }

    if additions == 0 && deletions == 0 {
        return None;
    }

    // the caller-intended application direction swaps the image roles
    if reverse {
        hunk.old_start = hunk.new_start;
    }

    let old_length = contexts + deletions;
    let new_length = contexts + additions;

    // a hunk that grows from nothing starts one line after its anchor; one
    // that shrinks to nothing starts one line before it
    let adjustment = if old_length == 0 {
        1
    } else if new_length == 0 {
        -1
    } else {
        0
    };

    let new_start = i64::from(hunk.old_start) + *start_offset + adjustment;
    *start_offset += new_length - old_length;

    Some(format!(
        "@@ -{},{} +{},{} @@{}\n",
        hunk.old_start, old_length, new_start, new_length, hunk.heading
    ))
}
