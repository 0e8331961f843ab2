mod helpers;

use helpers::*;
use linestage::git::{apply_patch, changed_files, diff_text, intent_to_add_untracked};
use linestage::patch::PatchModel;

#[test]
fn test_changed_files_lists_worktree_changes() {
    let (_dir, repo) = create_temp_repo();
    commit_file(&repo, "a.txt", "aaa\n");
    commit_file(&repo, "b.txt", "bbb\n");
    modify_file(&repo, "a.txt", "aaa modified\n");

    let files = changed_files(&repo, false).unwrap();
    assert_eq!(files, vec!["a.txt".to_string()]);
}

#[test]
fn test_changed_files_cached_lists_staged_changes() {
    let (_dir, repo) = create_temp_repo();
    commit_file(&repo, "a.txt", "aaa\n");
    modify_file(&repo, "a.txt", "aaa modified\n");

    assert!(changed_files(&repo, true).unwrap().is_empty());

    stage_file(&repo, "a.txt");
    assert_eq!(changed_files(&repo, true).unwrap(), vec!["a.txt".to_string()]);
    // once staged, the file no longer shows as a worktree change
    assert!(changed_files(&repo, false).unwrap().is_empty());
}

#[test]
fn test_changed_files_includes_untracked_and_deleted() {
    let (_dir, repo) = create_temp_repo();
    commit_file(&repo, "doomed.txt", "going away\n");
    delete_file(&repo, "doomed.txt");
    modify_file(&repo, "fresh.txt", "brand new\n");

    let files = changed_files(&repo, false).unwrap();
    assert_eq!(
        files,
        vec!["doomed.txt".to_string(), "fresh.txt".to_string()]
    );
}

#[test]
fn test_diff_text_parses_into_model() {
    let (_dir, repo) = create_temp_repo();
    commit_file(&repo, "file.txt", "one\ntwo\nthree\n");
    modify_file(&repo, "file.txt", "one\nTWO\nthree\n");

    let text = diff_text(&repo, "file.txt", false).unwrap();
    assert!(text.contains("--- a/file.txt"));
    assert!(text.contains("+++ b/file.txt"));
    assert!(text.contains("-two"));
    assert!(text.contains("+TWO"));

    let model = PatchModel::parse(&text).unwrap();
    assert_eq!(model.hunk_starts.len(), 1);
    assert_eq!(model.stageable_lines.len(), 2);
}

#[test]
fn test_diff_text_scopes_to_one_file() {
    let (_dir, repo) = create_temp_repo();
    commit_file(&repo, "a.txt", "aaa\n");
    commit_file(&repo, "b.txt", "bbb\n");
    modify_file(&repo, "a.txt", "aaa modified\n");
    modify_file(&repo, "b.txt", "bbb modified\n");

    let text = diff_text(&repo, "a.txt", false).unwrap();
    assert!(text.contains("a.txt"));
    assert!(!text.contains("b.txt"));
}

#[test]
fn test_diff_text_cached_shows_staged_side() {
    let (_dir, repo) = create_temp_repo();
    commit_file(&repo, "file.txt", "one\n");
    modify_file(&repo, "file.txt", "one\ntwo\n");
    stage_file(&repo, "file.txt");
    // a further unstaged edit must not leak into the cached diff
    modify_file(&repo, "file.txt", "one\ntwo\nthree\n");

    let text = diff_text(&repo, "file.txt", true).unwrap();
    assert!(text.contains("+two"));
    assert!(!text.contains("three"));
}

#[test]
fn test_intent_to_add_makes_untracked_stageable() {
    let (_dir, repo) = create_temp_repo();
    modify_file(&repo, "fresh.txt", "first\nsecond\n");

    intent_to_add_untracked(&repo).unwrap();

    let text = diff_text(&repo, "fresh.txt", false).unwrap();
    let model = PatchModel::parse(&text).unwrap();
    assert_eq!(model.stageable_lines.len(), 2);

    // individual lines of the new file can now be staged
    let target = model.stageable_lines[0];
    let patch = linestage::generator::generate_patch(&model, "fresh.txt", target, target, false);
    apply_patch(&repo, &patch).unwrap();
    assert_eq!(index_content(&repo, "fresh.txt"), "first\n");
}

#[test]
fn test_stage_deleted_file_lines() {
    let (_dir, repo) = create_temp_repo();
    commit_file(&repo, "doomed.txt", "one\ntwo\n");
    delete_file(&repo, "doomed.txt");

    let text = diff_text(&repo, "doomed.txt", false).unwrap();
    let model = PatchModel::parse(&text).unwrap();
    assert_eq!(model.stageable_lines.len(), 2);

    // stage only the first deletion; the second demotes to context
    let target = model.stageable_lines[0];
    let patch = linestage::generator::generate_patch(&model, "doomed.txt", target, target, false);
    apply_patch(&repo, &patch).unwrap();
    assert_eq!(index_content(&repo, "doomed.txt"), "two\n");
}

#[test]
fn test_apply_patch_rejects_garbage() {
    let (_dir, repo) = create_temp_repo();
    let err = apply_patch(&repo, "not a patch at all\n").unwrap_err();
    assert!(err.to_string().contains("git apply failed"));
}
