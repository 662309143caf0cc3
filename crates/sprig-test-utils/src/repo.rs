// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Sprig Contributors

//! Test repository helper for integration tests.

use crate::cli::SprigCommand;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary working directory with automatic cleanup.
///
/// # Example
/// ```ignore
/// use sprig_test_utils::TestRepo;
///
/// let repo = TestRepo::initialized();
/// repo.write_file("a.txt", "hello");
/// repo.run(&["add", "a.txt"]);
/// repo.run(&["commit", "first"]);
/// ```
pub struct TestRepo {
    temp_dir: TempDir,
}

impl TestRepo {
    /// Create a new empty directory (not initialized as a repo).
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Create a new directory and run `sprig init` in it.
    pub fn initialized() -> Self {
        let repo = Self::new();
        let out = repo.run(&["init"]);
        assert!(out.is_empty(), "unexpected init output: {out}");
        repo
    }

    /// Get the path to the working directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the .sprig directory.
    pub fn sprig_dir(&self) -> PathBuf {
        self.temp_dir.path().join(".sprig")
    }

    /// Run `sprig` with `args` in this directory, returning its stdout.
    pub fn run(&self, args: &[&str]) -> String {
        SprigCommand::new().in_dir(self.path()).args(args).stdout()
    }

    /// Start a command in this directory for custom assertions.
    pub fn command(&self) -> SprigCommand {
        SprigCommand::new().in_dir(self.path())
    }

    /// Write a file into the working directory.
    pub fn write_file(&self, name: &str, content: impl AsRef<[u8]>) {
        fs::write(self.temp_dir.path().join(name), content).expect("Failed to write file");
    }

    /// Read a text file from the working directory.
    pub fn read_file(&self, name: &str) -> String {
        fs::read_to_string(self.temp_dir.path().join(name)).expect("Failed to read file")
    }

    /// Check if a file exists in the working directory.
    pub fn file_exists(&self, name: &str) -> bool {
        self.temp_dir.path().join(name).exists()
    }

    /// Delete a file from the working directory.
    pub fn delete_file(&self, name: &str) {
        let path = self.temp_dir.path().join(name);
        if path.exists() {
            fs::remove_file(&path).expect("Failed to delete file");
        }
    }

    /// Write, add and commit a single file.
    pub fn add_and_commit(&self, name: &str, content: &str, message: &str) {
        self.write_file(name, content);
        assert_eq!(self.run(&["add", name]), "");
        assert_eq!(self.run(&["commit", message]), "");
    }

    /// Full id of every commit `find` reports for `message`.
    pub fn find(&self, message: &str) -> Vec<String> {
        self.run(&["find", message])
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Default for TestRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_creation() {
        let repo = TestRepo::new();
        assert!(repo.path().exists());
        assert!(!repo.sprig_dir().exists());
    }

    #[test]
    fn test_write_and_read_file() {
        let repo = TestRepo::new();
        repo.write_file("test.txt", "Hello, World!");
        assert_eq!(repo.read_file("test.txt"), "Hello, World!");
        repo.delete_file("test.txt");
        assert!(!repo.file_exists("test.txt"));
    }
}
