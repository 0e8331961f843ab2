#![allow(dead_code)]

use git2::{Repository, Signature};
use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

/// Create a temporary git repository with an initial commit.
pub fn create_temp_repo() -> (TempDir, Repository) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let repo = Repository::init(dir.path()).expect("Failed to init repo");

    // Create initial commit so HEAD exists
    {
        let mut index = repo.index().unwrap();
        let tree_oid = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_oid).unwrap();
        let sig = Signature::now("Test", "test@test.com").unwrap();
        repo.commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
            .unwrap();
    }

    (dir, repo)
}

/// Add and commit a file to the repository.
pub fn commit_file(repo: &Repository, path: &str, content: &str) {
    let workdir = repo.workdir().expect("Not a bare repo");
    let full_path = workdir.join(path);

    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }

    fs::write(&full_path, content).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(path)).unwrap();
    index.write().unwrap();

    let tree_oid = index.write_tree().unwrap();
    let tree = repo.find_tree(tree_oid).unwrap();
    let sig = Signature::now("Test", "test@test.com").unwrap();

    let head = repo.head().unwrap();
    let parent_commit = head.peel_to_commit().unwrap();

    repo.commit(
        Some("HEAD"),
        &sig,
        &sig,
        &format!("Add {}", path),
        &tree,
        &[&parent_commit],
    )
    .unwrap();
}

/// Modify a file in the working directory (without staging).
pub fn modify_file(repo: &Repository, path: &str, content: &str) {
    let workdir = repo.workdir().expect("Not a bare repo");
    let full_path = workdir.join(path);

    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }

    fs::write(&full_path, content).unwrap();
}

/// Delete a tracked file from the working directory.
pub fn delete_file(repo: &Repository, path: &str) {
    let workdir = repo.workdir().expect("Not a bare repo");
    fs::remove_file(workdir.join(path)).unwrap();
}

/// Stage a file's current working tree content (`git add`).
pub fn stage_file(repo: &Repository, path: &str) {
    let mut index = repo.index().unwrap();
    index.add_path(Path::new(path)).unwrap();
    index.write().unwrap();
}

/// Read a file's content as currently staged in the index.
pub fn index_content(repo: &Repository, path: &str) -> String {
    let index = repo.index().unwrap();
    let entry = index
        .get_path(Path::new(path), 0)
        .unwrap_or_else(|| panic!("{} not in index", path));
    let blob = repo.find_blob(entry.id).unwrap();
    String::from_utf8(blob.content().to_vec()).unwrap()
}

/// Run `git diff` in the given repo and return the output as a string.
pub fn git_diff_output(repo: &Repository, extra_args: &[&str]) -> String {
    let workdir = repo.workdir().expect("not a bare repo");
    let mut args = vec!["diff"];
    args.extend_from_slice(extra_args);
    let output = Command::new("git")
        .args(&args)
        .current_dir(workdir)
        .output()
        .expect("failed to run git diff");
    String::from_utf8(output.stdout).expect("git diff produced invalid UTF-8")
}
