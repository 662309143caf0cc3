// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2026 Sprig Contributors

//! CLI command helpers for testing the `sprig` binary.

use assert_cmd::Command;
use std::path::Path;

/// Creates a new `sprig` Command for testing.
///
/// # Example
/// ```ignore
/// use sprig_test_utils::sprig;
///
/// sprig()
///     .arg("init")
///     .current_dir(temp_dir.path())
///     .assert()
///     .success();
/// ```
#[allow(deprecated)] // cargo_bin is deprecated but still works for our use case
pub fn sprig() -> Command {
    let mut cmd = Command::cargo_bin("sprig").expect("sprig binary not found");
    for var in [
        "SPRIG_CACHE_CAPACITY",
        "SPRIG_LOCK_TIMEOUT_MS",
        "SPRIG_REMOTE_TIMEOUT_SECS",
        "SPRIG_LOG_LEVEL",
        "SPRIG_LOG_FORMAT",
        "RUST_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Fluent wrapper for building and executing `sprig` commands.
pub struct SprigCommand {
    cmd: Command,
}

impl SprigCommand {
    /// Create a new SprigCommand.
    pub fn new() -> Self {
        Self { cmd: sprig() }
    }

    /// Set the working directory for the command.
    pub fn in_dir(mut self, dir: &Path) -> Self {
        self.cmd.current_dir(dir);
        self
    }

    /// Add an argument to the command.
    pub fn arg(mut self, arg: &str) -> Self {
        self.cmd.arg(arg);
        self
    }

    /// Add multiple arguments to the command.
    pub fn args(mut self, args: &[&str]) -> Self {
        self.cmd.args(args);
        self
    }

    /// Execute the command and assert success.
    pub fn run_success(mut self) -> assert_cmd::assert::Assert {
        self.cmd.assert().success()
    }

    /// Execute the command and assert failure.
    pub fn run_failure(mut self) -> assert_cmd::assert::Assert {
        self.cmd.assert().failure()
    }

    /// Execute the command and return its stdout as a string.
    ///
    /// Every diagnostic of the command surface is printed to stdout with
    /// exit status 0, so this is the usual way to observe an outcome.
    pub fn stdout(mut self) -> String {
        let output = self.cmd.output().expect("failed to run sprig");
        assert!(
            output.status.success(),
            "sprig exited with {:?}: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("stdout is not UTF-8")
    }

    /// Get the underlying Command for custom assertions.
    pub fn into_inner(self) -> Command {
        self.cmd
    }
}

impl Default for SprigCommand {
    fn default() -> Self {
        Self::new()
    }
}
