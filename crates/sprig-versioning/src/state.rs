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

//! Persisted repository state
//!
//! Branches, the staging area and the remote table are saved together as a
//! single bincode record. The storage backend replaces a record atomically,
//! so a reader only ever sees the state before or after an operation.

use crate::error::{RepoError, RepoResult};
use crate::{BranchTable, RemoteTable, StagingArea};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use sprig_storage::StorageBackend;
use tracing::debug;

/// Storage key of the state record
pub const STATE_KEY: &str = "state";

/// Everything about a repository that is not an immutable object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoState {
    /// Branch pointers and the current branch
    pub branches: BranchTable,
    /// Pending additions and removals
    pub staging: StagingArea,
    /// Known remotes
    pub remotes: RemoteTable,
}

impl RepoState {
    /// Fresh state: one branch at `root`, nothing staged, no remotes.
    pub fn new(branch: &str, root: crate::Oid) -> Self {
        Self {
            branches: BranchTable::new(branch, root),
            staging: StagingArea::new(),
            remotes: RemoteTable::default(),
        }
    }

    /// Load the state record.
    ///
    /// # Errors
    ///
    /// [`RepoError::NotInitialized`] when there is no record, and a fatal
    /// error when it cannot be read or decoded.
    pub async fn load(storage: &dyn StorageBackend) -> RepoResult<Self> {
        let bytes = match storage.get(STATE_KEY).await {
            Ok(bytes) => bytes,
            Err(e) if sprig_storage::is_not_found(&e) => return Err(RepoError::NotInitialized),
            Err(e) => return Err(e.context("failed to read repository state").into()),
        };

        let state: RepoState =
            bincode::deserialize(&bytes).context("corrupted repository state")?;
        state.branches.validate()?;
        debug!(branch = %state.branches.current(), "loaded repository state");
        Ok(state)
    }

    /// Replace the stored state record with `self`.
    pub async fn save(&self, storage: &dyn StorageBackend) -> anyhow::Result<()> {
        let bytes = bincode::serialize(self).context("failed to encode repository state")?;
        storage
            .put(STATE_KEY, &bytes)
            .await
            .context("failed to write repository state")
    }
}
