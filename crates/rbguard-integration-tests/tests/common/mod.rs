//! Scratch git repositories for end-to-end tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::process::Command;

/// Whether a usable `git` binary is on PATH. Tests return early without it.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// A throwaway repository with a fixed committer identity.
pub struct TestRepo {
    dir: tempfile::TempDir,
}

impl TestRepo {
    pub fn init() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let repo = Self { dir };
        repo.git(&["init", "-q"]);
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args([
                "-c",
                "user.name=rbguard tests",
                "-c",
                "user.email=rbguard@example.invalid",
                "-c",
                "commit.gpgsign=false",
            ])
            .args(args)
            .current_dir(self.path())
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap()
    }

    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path().join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, content).unwrap();
        path
    }

    pub fn commit_all(&self, message: &str) {
        self.git(&["add", "-A"]);
        self.git(&["commit", "-q", "--allow-empty", "-m", message]);
    }

    /// Two packs, `teamA` and `teamB`, each with a manifest and a module.
    pub fn with_two_packs() -> Self {
        let repo = Self::init();
        repo.write("runbooks/teamA/pack.yaml", "ref: team-a\nname: Team A\n");
        repo.write("runbooks/teamA/util.py", "def helper():\n    return 1\n");
        repo.write("runbooks/teamB/pack.yaml", "ref: team-b\nname: Team B\n");
        repo.write("runbooks/teamB/tasks/run.py", "import os\n");
        repo.commit_all("initial packs");
        repo
    }
}
