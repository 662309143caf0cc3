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

//! Staging area
//!
//! Pending changes for the next commit. Each path is either staged for
//! addition (holding the raw content to commit) or staged for removal
//! (holding the content being removed), never both.

use crate::commit::Snapshot;
use crate::error::{RepoError, RepoResult};
use crate::{ObjectDatabase, ObjectKind, Oid};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;

/// What [`StagingArea::stage_addition`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// Content differs from HEAD and is now staged
    Staged,
    /// Content matches HEAD; any pending addition was dropped
    Unchanged,
}

/// Pending additions and removals, keyed by path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingArea {
    additions: BTreeMap<String, Vec<u8>>,
    removals: BTreeMap<String, Vec<u8>>,
}

impl StagingArea {
    /// An empty staging area
    pub fn new() -> Self {
        Self::default()
    }

    /// Stage `content` for `path`.
    ///
    /// `head_blob` is the blob HEAD tracks at `path`, if any. When the content
    /// hashes to it the path is unchanged and any staged addition is dropped
    /// instead. A staged removal of `path` is always cancelled.
    pub fn stage_addition(
        &mut self,
        path: &str,
        content: Vec<u8>,
        head_blob: Option<&Oid>,
    ) -> AddOutcome {
        self.removals.remove(path);

        if head_blob == Some(&Oid::hash(&content)) {
            self.additions.remove(path);
            debug!(path = %path, "content matches HEAD, nothing staged");
            AddOutcome::Unchanged
        } else {
            self.additions.insert(path.to_string(), content);
            debug!(path = %path, "staged for addition");
            AddOutcome::Staged
        }
    }

    /// Stage the removal of `path`.
    ///
    /// `head_content` is the content HEAD tracks at `path`, or `None` when the
    /// path is untracked. Returns true when the path was tracked, meaning the
    /// caller must also delete the working file.
    ///
    /// # Errors
    ///
    /// [`RepoError::NothingToRemove`] when the path is neither tracked nor
    /// staged for addition. Nothing changes in that case.
    pub fn stage_removal(&mut self, path: &str, head_content: Option<Vec<u8>>) -> RepoResult<bool> {
        if head_content.is_none() && !self.additions.contains_key(path) {
            return Err(RepoError::NothingToRemove);
        }

        self.additions.remove(path);
        match head_content {
            Some(content) => {
                self.removals.insert(path.to_string(), content);
                debug!(path = %path, "staged for removal");
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// True when nothing is staged
    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    /// Drop every pending change
    pub fn clear(&mut self) {
        self.additions.clear();
        self.removals.clear();
    }

    /// Staged additions, sorted by path
    pub fn additions(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.additions
    }

    /// Staged removals, sorted by path
    pub fn removals(&self) -> &BTreeMap<String, Vec<u8>> {
        &self.removals
    }

    /// True when `path` is staged for addition
    pub fn is_staged_for_addition(&self, path: &str) -> bool {
        self.additions.contains_key(path)
    }

    /// True when `path` is staged for removal
    pub fn is_staged_for_removal(&self, path: &str) -> bool {
        self.removals.contains_key(path)
    }

    /// Apply the staged changes on top of `base`: write every staged
    /// addition into the object store and return the resulting snapshot.
    ///
    /// Blobs written here are unreferenced until a commit points at them,
    /// so a failure part way leaves no visible change.
    pub async fn apply_to(&self, base: &Snapshot, odb: &ObjectDatabase) -> anyhow::Result<Snapshot> {
        let mut snapshot = base.clone();
        for (path, content) in &self.additions {
            let oid = odb.put(ObjectKind::Blob, content).await?;
            snapshot.insert(path.clone(), oid);
        }
        for path in self.removals.keys() {
            snapshot.remove(path);
        }
        Ok(snapshot)
    }
}
