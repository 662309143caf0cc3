// Sprig - a small content-addressed version control engine
// Copyright (C) 2025 Sprig Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published
// by the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.

//! Repository lock
//!
//! An advisory `flock(2)`-style lock on `sprig.lock` inside the repository
//! directory, taken through `fs2`. It serialises whole command invocations
//! across processes. The OS drops the lock when the holder exits, crashed or
//! not, so there is no stale lock to clean up.

use crate::error::{RepoError, RepoResult};
use anyhow::Context;
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::time::Duration;
use tokio::time::{sleep, Instant};
use tracing::{debug, trace};

/// Lock file name inside the repository directory
pub const LOCK_FILE: &str = "sprig.lock";

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// An exclusive repository lock, released on drop.
#[derive(Debug)]
pub struct RepoLock {
    _file: File,
}

impl RepoLock {
    /// Acquire the lock on `repo_dir`, polling until `timeout` expires.
    ///
    /// # Errors
    ///
    /// [`RepoError::Timeout`] when another holder keeps the lock past
    /// `timeout`, and a fatal error when the lock file cannot be opened.
    pub async fn acquire(repo_dir: &Path, timeout: Duration) -> RepoResult<Self> {
        let lock_path = repo_dir.join(LOCK_FILE);
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .with_context(|| format!("cannot open {}", lock_path.display()))?;

        let start = Instant::now();
        loop {
            match file.try_lock_exclusive() {
                Ok(()) => {
                    debug!(path = %lock_path.display(), "acquired repository lock");
                    return Ok(RepoLock { _file: file });
                }
                Err(_) if start.elapsed() >= timeout => {
                    return Err(RepoError::Timeout(format!(
                        "the repository lock at {}",
                        lock_path.display()
                    )));
                }
                Err(e) => {
                    trace!(error = %e, "repository lock busy");
                    sleep(POLL_INTERVAL).await;
                }
            }
        }
    }
}
