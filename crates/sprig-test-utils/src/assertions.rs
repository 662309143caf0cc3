// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Sprig Contributors

//! Custom test assertions for Sprig tests.

use crate::repo::TestRepo;
use std::path::Path;

/// Assert that a repository is initialized at `path`.
pub fn assert_repo_initialized(path: &Path) {
    let sprig_dir = path.join(".sprig");
    assert!(sprig_dir.is_dir(), ".sprig directory should exist at {path:?}");
    assert!(sprig_dir.join("state").is_file(), "state record should exist");
    assert!(
        sprig_dir.join("objects").join("commits").is_dir(),
        "commit store should exist"
    );
}

/// The lines of one `=== <title> ===` section of `status` output.
pub fn status_section(status: &str, title: &str) -> Vec<String> {
    let header = format!("=== {title} ===");
    status
        .lines()
        .skip_while(|line| *line != header)
        .skip(1)
        .take_while(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Assert that `branch` is the current branch.
pub fn assert_on_branch(repo: &TestRepo, branch: &str) {
    let branches = status_section(&repo.run(&["status"]), "Branches");
    assert!(
        branches.contains(&format!("*{branch}")),
        "expected to be on {branch}, branches: {branches:?}"
    );
}

/// Assert that `branch` exists.
pub fn assert_branch_exists(repo: &TestRepo, branch: &str) {
    let branches = status_section(&repo.run(&["status"]), "Branches");
    assert!(
        branches
            .iter()
            .any(|b| b.trim_start_matches('*') == branch),
        "branch {branch} missing from {branches:?}"
    );
}

/// Assert that `branch` does not exist.
pub fn assert_branch_not_exists(repo: &TestRepo, branch: &str) {
    let branches = status_section(&repo.run(&["status"]), "Branches");
    assert!(
        branches
            .iter()
            .all(|b| b.trim_start_matches('*') != branch),
        "branch {branch} still listed in {branches:?}"
    );
}

/// Assert that a sprig command prints exactly `expected` on stdout.
#[macro_export]
macro_rules! assert_sprig_prints {
    ($repo:expr, $expected:expr, $($arg:expr),+ $(,)?) => {
        $crate::sprig()
            $(.arg($arg))+
            .current_dir($repo.path())
            .assert()
            .success()
            .stdout($expected)
    };
}
