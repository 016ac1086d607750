//! End-to-end tests for the `rbguard` binary.
//!
//! Each test builds a small git history in a temp directory and runs the
//! compiled binary inside it.

use std::path::Path;
use std::process::{Command, Output};

fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args([
            "-c",
            "user.name=rbguard tests",
            "-c",
            "user.email=rbguard@example.invalid",
            "-c",
            "commit.gpgsign=false",
        ])
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap()
        .status;
    assert!(status.success(), "git {args:?} failed");
}

fn write(dir: &Path, rel: &str, content: &str) {
    let path = dir.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn commit(dir: &Path, message: &str) {
    git(dir, &["add", "-A"]);
    git(dir, &["commit", "-q", "--allow-empty", "-m", message]);
}

/// Two packs, then a commit importing teamA from teamB.
fn repo_with_cross_pack_import() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    git(dir.path(), &["init", "-q"]);
    write(dir.path(), "runbooks/teamA/pack.yaml", "ref: team-a\n");
    write(dir.path(), "runbooks/teamA/util.py", "def helper():\n    pass\n");
    write(dir.path(), "runbooks/teamB/pack.yaml", "ref: team-b\n");
    write(dir.path(), "runbooks/teamB/run.py", "import os\n");
    commit(dir.path(), "initial");
    write(
        dir.path(),
        "runbooks/teamB/run.py",
        "import os\nfrom runbooks.teamA.util import helper\n",
    );
    commit(dir.path(), "cross pack");
    dir
}

fn rbguard(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rbguard"))
        .args(args)
        .arg("--no-color")
        .current_dir(dir)
        .env_remove("JENKINS_URL")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn failing_check_still_exits_zero_by_default() {
    if !git_available() {
        return;
    }
    let repo = repo_with_cross_pack_import();
    let out = rbguard(repo.path(), &["check"]);

    assert_eq!(out.status.code(), Some(0));
    let text = stdout(&out);
    assert_eq!(text.lines().count(), 1);
    assert!(text.starts_with("Runbook Validation"));
    assert!(text.trim_end().ends_with("Failed"));
}

#[test]
fn passing_check_prints_passed() {
    if !git_available() {
        return;
    }
    let repo = repo_with_cross_pack_import();
    write(repo.path(), "runbooks/teamB/notes.txt", "nothing to see\n");
    commit(repo.path(), "docs");

    let out = rbguard(repo.path(), &["check"]);
    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).trim_end().ends_with("Passed"));
}

#[test]
fn details_flag_prints_violations() {
    if !git_available() {
        return;
    }
    let repo = repo_with_cross_pack_import();
    let out = rbguard(repo.path(), &["check", "--details"]);

    let text = stdout(&out);
    assert!(text.contains("cross pack import is not allowed:"));
    assert!(text.contains(" - file path: runbooks/teamB/run.py"));
    assert!(text.contains(" - line: from runbooks.teamA.util import helper"));
}

#[test]
fn exit_policy_always_fails_the_process() {
    if !git_available() {
        return;
    }
    let repo = repo_with_cross_pack_import();
    let out = rbguard(repo.path(), &["check", "--exit-on-failure", "always"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn exit_policy_outside_ci_respects_ci_variable() {
    if !git_available() {
        return;
    }
    let repo = repo_with_cross_pack_import();

    let local = rbguard(repo.path(), &["check", "--exit-on-failure", "outside-ci"]);
    assert_eq!(local.status.code(), Some(1));

    let on_ci = Command::new(env!("CARGO_BIN_EXE_rbguard"))
        .args(["check", "--exit-on-failure", "outside-ci", "--no-color"])
        .current_dir(repo.path())
        .env("JENKINS_URL", "https://ci.example.invalid/")
        .output()
        .unwrap();
    assert_eq!(on_ci.status.code(), Some(0));
}

#[test]
fn config_file_sets_exit_policy() {
    if !git_available() {
        return;
    }
    let repo = repo_with_cross_pack_import();
    // Written after the last commit: the config is read from the working tree.
    write(repo.path(), ".rbguard.yaml", "exit_policy: always\n");

    let out = rbguard(repo.path(), &["check"]);
    assert_eq!(out.status.code(), Some(1));
}

#[test]
fn json_output_lists_violations() {
    if !git_available() {
        return;
    }
    let repo = repo_with_cross_pack_import();
    let out = rbguard(repo.path(), &["check", "--json"]);

    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value[0]["kind"], "cross_pack_import");
    assert_eq!(value[0]["file"], "runbooks/teamB/run.py");
    assert!(String::from_utf8_lossy(&out.stderr).contains("Failed"));
}

#[test]
fn dot_slash_root_flag_still_finds_violations() {
    if !git_available() {
        return;
    }
    let repo = repo_with_cross_pack_import();
    let out = rbguard(repo.path(), &["check", "--root", "./runbooks"]);

    assert_eq!(out.status.code(), Some(0));
    assert!(stdout(&out).trim_end().ends_with("Failed"));
}

#[test]
fn root_flag_outside_repository_is_an_error() {
    if !git_available() {
        return;
    }
    let repo = repo_with_cross_pack_import();
    let out = rbguard(repo.path(), &["check", "--root", "/"]);

    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).is_empty());
}

#[test]
fn git_failure_exits_one() {
    if !git_available() {
        return;
    }
    let dir = tempfile::tempdir().unwrap();
    git(dir.path(), &["init", "-q"]);
    write(dir.path(), "runbooks/teamA/pack.yaml", "ref: team-a\n");
    commit(dir.path(), "only commit");

    let out = rbguard(dir.path(), &["check"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stdout(&out).is_empty());
}

#[test]
fn packs_json_inventory() {
    if !git_available() {
        return;
    }
    let repo = repo_with_cross_pack_import();
    let out = rbguard(repo.path(), &["packs", "--json"]);

    assert_eq!(out.status.code(), Some(0));
    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["directories"][0], "runbooks/teamA");
    assert_eq!(value["directories"][1], "runbooks/teamB");
    assert_eq!(value["manifests"][0]["ref"], "team-a");
    assert!(value["duplicate_refs"].as_array().unwrap().is_empty());
}
