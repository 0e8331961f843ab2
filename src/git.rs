use anyhow::{Context, Result, bail};
use git2::{Diff, DiffFormat, DiffOptions, Repository, StatusOptions};
use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use std::process::{Command, Stdio};

/// Open a git repository at or above the given path.
pub fn open_repo(path: impl AsRef<Path>) -> Result<Repository> {
    Repository::discover(path.as_ref())
        .context("Failed to open git repository. Are you in a git repo?")
}

/// Paths with unstaged changes, or staged changes when `cached` is set.
/// Sorted, repo-relative.
pub fn changed_files(repo: &Repository, cached: bool) -> Result<Vec<String>> {
    let mut opts = StatusOptions::new();
    opts.include_untracked(true).recurse_untracked_dirs(true);
    let statuses = repo
        .statuses(Some(&mut opts))
        .context("Failed to get repo status")?;

    let wanted = if cached {
        git2::Status::INDEX_NEW | git2::Status::INDEX_MODIFIED | git2::Status::INDEX_DELETED
    } else {
        git2::Status::WT_NEW | git2::Status::WT_MODIFIED | git2::Status::WT_DELETED
    };

    let mut files: Vec<String> = statuses
        .iter()
        .filter(|entry| entry.status().intersects(wanted))
        .filter_map(|entry| entry.path().map(String::from))
        .collect();
    files.sort();
    files.dedup();
    Ok(files)
}

/// Add all untracked files to the index with intent-to-add (`git add -N`),
/// so their full content shows up as unstaged changes and individual lines
/// can be staged out of them.
pub fn intent_to_add_untracked(repo: &Repository) -> Result<()> {
    let mut opts = StatusOptions::new();
    opts.include_untracked(true).recurse_untracked_dirs(true);
    let statuses = repo
        .statuses(Some(&mut opts))
        .context("Failed to get repo status")?;

    let untracked: Vec<String> = statuses
        .iter()
        .filter(|entry| entry.status().contains(git2::Status::WT_NEW))
        .filter_map(|entry| entry.path().map(String::from))
        .collect();

    if untracked.is_empty() {
        return Ok(());
    }

    let workdir = repo.workdir().context("Bare repository not supported")?;
    let mut index = repo.index().context("Failed to open index")?;
    let empty_oid = repo.blob(&[]).context("Failed to create empty blob")?;

    for path in &untracked {
        let metadata = std::fs::metadata(workdir.join(path))
            .with_context(|| format!("Failed to stat {path}"))?;

        let mut entry = git2::IndexEntry {
            ctime: git2::IndexTime::new(0, 0),
            mtime: git2::IndexTime::new(0, 0),
            dev: 0,
            ino: 0,
            mode: if metadata.permissions().mode() & 0o111 != 0 {
                0o100755
            } else {
                0o100644
            },
            uid: 0,
            gid: 0,
            file_size: 0,
            id: empty_oid,
            flags: 0,
            flags_extended: 0,
            path: path.as_bytes().to_vec(),
        };
        const GIT_IDXENTRY_INTENT_TO_ADD: u16 = 1 << 13;
        entry.flags_extended |= GIT_IDXENTRY_INTENT_TO_ADD;

        index
            .add(&entry)
            .with_context(|| format!("Failed to add intent-to-add entry for {path}"))?;
    }

    index.write().context("Failed to write index")?;

    // reload so subsequent diffs see the new entries
    repo.set_index(&mut repo.index().context("Failed to reload index")?)
        .context("Failed to refresh repo index")?;

    Ok(())
}

/// Unified diff text for a single file, in the form `git diff` prints it:
/// file header lines included, default three lines of context.
pub fn diff_text(repo: &Repository, path: &str, cached: bool) -> Result<String> {
    let mut opts = DiffOptions::new();
    opts.pathspec(path)
        .include_untracked(true)
        .recurse_untracked_dirs(true)
        .show_untracked_content(true);

    let diff = if cached {
        // unborn HEAD means everything in the index is new
        let head_tree = match repo.head() {
            Ok(head) => Some(head.peel_to_tree().context("Failed to resolve HEAD tree")?),
            Err(_) => None,
        };
        let index = repo.index().context("Failed to open index")?;
        repo.diff_tree_to_index(head_tree.as_ref(), Some(&index), Some(&mut opts))
            .context("Failed to compute staged diff")?
    } else {
        let index = repo.index().context("Failed to open index")?;
        repo.diff_index_to_workdir(Some(&index), Some(&mut opts))
            .context("Failed to compute diff")?
    };

    diff_to_text(&diff)
}

fn diff_to_text(diff: &Diff) -> Result<String> {
    let mut text = String::new();
    diff.print(DiffFormat::Patch, |_delta, _hunk, line| {
        match line.origin() {
            '+' | '-' | ' ' => text.push(line.origin()),
            _ => {}
        }
        text.push_str(&String::from_utf8_lossy(line.content()));
        true
    })
    .context("Failed to render diff")?;
    Ok(text)
}

/// Apply a generated patch to the index by piping it to `git apply --cached`.
pub fn apply_patch(repo: &Repository, patch: &str) -> Result<()> {
    let workdir = repo.workdir().context("Bare repository not supported")?;

    let mut child = Command::new("git")
        .args(["apply", "--cached", "-"])
        .current_dir(workdir)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("Failed to spawn git apply")?;

    child
        .stdin
        .take()
        .context("Failed to open git apply stdin")?
        .write_all(patch.as_bytes())
        .context("Failed to write patch to git apply")?;

    let output = child
        .wait_with_output()
        .context("Failed to wait for git apply")?;

    if !output.status.success() {
        bail!(
            "git apply failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }

    Ok(())
}
