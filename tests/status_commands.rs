mod common;

use crate::common::command::{commit_file, init_repository_dir, run_grit_command};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::{PredicateBooleanExt, predicate};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn status_output(dir: &std::path::Path) -> String {
    let output = run_grit_command(dir, &["status"]).assert().success();
    String::from_utf8(output.get_output().stdout.clone()).unwrap()
}

#[rstest]
fn status_renders_every_section_in_order(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    run_grit_command(dir, &["branch", "side"]).assert().success();
    write_file(FileSpec::new(dir.join("wug.txt"), "wug".to_string()));
    run_grit_command(dir, &["add", "wug.txt"]).assert().success();
    write_file(FileSpec::new(dir.join("junk.txt"), "junk".to_string()));

    assert_eq!(
        status_output(dir),
        "=== Branches ===\n\
         *master\n\
         side\n\
         \n\
         === Staged Files ===\n\
         wug.txt\n\
         \n\
         === Removed Files ===\n\
         \n\
         === Modifications Not Staged For Commit ===\n\
         \n\
         === Untracked Files ===\n\
         junk.txt\n\
         \n"
    );
}

#[rstest]
fn files_marked_for_removal_show_in_the_removed_section(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    commit_file(dir, "doomed.txt", "short-lived", "added doomed");
    run_grit_command(dir, &["rm", "doomed.txt"]).assert().success();

    assert_eq!(
        status_output(dir),
        "=== Branches ===\n\
         *master\n\
         \n\
         === Staged Files ===\n\
         \n\
         === Removed Files ===\n\
         doomed.txt\n\
         \n\
         === Modifications Not Staged For Commit ===\n\
         \n\
         === Untracked Files ===\n\
         \n"
    );
}

#[rstest]
fn unstaged_edits_and_deletions_are_reported(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    commit_file(dir, "edited.txt", "before", "added edited");
    commit_file(dir, "gone.txt", "still here", "added gone");

    write_file(FileSpec::new(dir.join("edited.txt"), "after".to_string()));
    std::fs::remove_file(dir.join("gone.txt")).unwrap();

    let output = status_output(dir);

    assert!(output.contains("edited.txt (modified)"));
    assert!(output.contains("gone.txt (deleted)"));
}

#[rstest]
fn drift_entries_are_suppressed_while_head_is_a_merge_commit(init_repository_dir: TempDir) {
    let dir = init_repository_dir.path();

    commit_file(dir, "base.txt", "base", "base commit");
    run_grit_command(dir, &["branch", "side"]).assert().success();
    commit_file(dir, "ours.txt", "ours", "master edit");
    run_grit_command(dir, &["checkout", "side"]).assert().success();
    commit_file(dir, "theirs.txt", "theirs", "side edit");
    run_grit_command(dir, &["checkout", "master"]).assert().success();
    run_grit_command(dir, &["merge", "side"]).assert().success();

    write_file(FileSpec::new(dir.join("base.txt"), "drifted".to_string()));

    run_grit_command(dir, &["status"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "=== Modifications Not Staged For Commit ===",
        ))
        .stdout(predicate::str::contains("base.txt (modified)").not());
}
