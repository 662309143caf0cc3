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

//! Repository utilities for the CLI
//!
//! Every command except `init` runs inside a [`Session`]: the repository in
//! the current directory, opened while holding its lock so that the whole
//! load, compute and save sequence of one invocation is exclusive.

use anyhow::{Context, Result};
use sprig_config::SprigConfig;
use sprig_storage::{LocalBackend, StorageBackend};
use sprig_versioning::{
    DiskWorkTree, LocalConnector, RemoteConnector, RepoError, RepoLock, Repository,
    RepositoryOptions, WorkTree, REPO_DIR,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tracing::info;

/// The `.sprig` directory of the working tree at `root`.
pub fn repo_dir(root: &Path) -> PathBuf {
    root.join(REPO_DIR)
}

/// Load the configuration of the repository at `root`.
///
/// Outside a repository, or when it has no `config.toml`, this yields the
/// defaults with environment overrides applied.
pub async fn load_config(root: &Path) -> Result<SprigConfig> {
    SprigConfig::load(repo_dir(root))
        .await
        .context("Failed to load repository configuration")
}

/// Repository options derived from `config`.
pub fn options(config: &SprigConfig) -> RepositoryOptions {
    RepositoryOptions {
        cache_capacity: config.core.cache_capacity,
        remote_timeout: config.remote.timeout(),
    }
}

/// An open repository and the lock that guards it.
#[derive(Debug)]
pub struct Session {
    repository: Repository,
    _lock: RepoLock,
}

impl Session {
    /// Open the repository whose working tree is `root`.
    ///
    /// # Errors
    ///
    /// [`RepoError::NotInitialized`] when `root` has no `.sprig` directory.
    pub async fn open(root: &Path, config: &SprigConfig) -> Result<Self> {
        let dir = repo_dir(root);
        if !fs::try_exists(&dir).await? {
            return Err(RepoError::NotInitialized.into());
        }

        let lock = RepoLock::acquire(&dir, config.core.lock_timeout()).await?;
        let storage: Arc<dyn StorageBackend> = Arc::new(
            LocalBackend::open_existing(&dir)
                .await
                .context("Failed to open repository storage")?,
        );
        let repository = Repository::open(storage, worktree(root), options(config))
            .await?
            .with_connector(connector(root, config));

        Ok(Self {
            repository,
            _lock: lock,
        })
    }

    /// Create a repository at `root` with the default configuration file.
    ///
    /// # Errors
    ///
    /// [`RepoError::AlreadyInitialized`] when `root` already has a `.sprig`
    /// directory.
    pub async fn init(root: &Path, config: &SprigConfig) -> Result<Self> {
        let dir = repo_dir(root);
        if fs::try_exists(&dir).await? {
            return Err(RepoError::AlreadyInitialized.into());
        }

        let storage: Arc<dyn StorageBackend> = Arc::new(
            LocalBackend::new(&dir)
                .await
                .context("Failed to create repository storage")?,
        );
        let lock = RepoLock::acquire(&dir, config.core.lock_timeout()).await?;
        SprigConfig::default()
            .save(&dir)
            .await
            .context("Failed to write default configuration")?;
        let repository = Repository::init(storage, worktree(root), options(config))
            .await?
            .with_connector(connector(root, config));

        info!(path = %dir.display(), "created repository");
        Ok(Self {
            repository,
            _lock: lock,
        })
    }

    /// The open repository
    pub fn repository(&self) -> &Repository {
        &self.repository
    }

    /// The open repository, mutably
    pub fn repository_mut(&mut self) -> &mut Repository {
        &mut self.repository
    }
}

fn worktree(root: &Path) -> Arc<dyn WorkTree> {
    Arc::new(DiskWorkTree::new(root))
}

// Remote addresses are resolved against the working tree, as typed by the user.
fn connector(root: &Path, config: &SprigConfig) -> Arc<dyn RemoteConnector> {
    Arc::new(LocalConnector::new(root, config.core.lock_timeout()))
}
