use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn init_repository_dir(repository_dir: TempDir) -> TempDir {
    run_grit_command(repository_dir.path(), &["init"])
        .assert()
        .success();

    repository_dir
}

pub fn run_grit_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("grit").expect("Failed to find grit binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn grit_commit(dir: &Path, message: &str) -> Command {
    run_grit_command(dir, &["commit", "-m", message])
}

/// Write a file and run it through add and commit in one step
pub fn commit_file(dir: &Path, name: &str, content: &str, message: &str) {
    write_file(FileSpec::new(dir.join(name), content.to_string()));
    run_grit_command(dir, &["add", name]).assert().success();
    grit_commit(dir, message).assert().success();
}

/// Extract the newest commit id from the log output
pub fn head_commit_id(dir: &Path) -> String {
    let output = run_grit_command(dir, &["log"]).assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())
        .expect("log output was not valid UTF-8");

    stdout
        .lines()
        .find(|line| line.starts_with("commit "))
        .map(|line| line.strip_prefix("commit ").unwrap().to_string())
        .expect("log output contained no commit line")
}
