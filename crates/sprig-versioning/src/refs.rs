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

//! Branch references
//!
//! Branches are plain name to commit pointers. One of them is current, and
//! HEAD is always derived from it, so HEAD and the current branch pointer can
//! never disagree. Remote-tracking references (`origin/master`) live in the
//! same table.

use crate::error::{RepoError, RepoResult};
use crate::Oid;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Branch name to head commit, plus the current branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchTable {
    branches: BTreeMap<String, Oid>,
    current: String,
}

impl BranchTable {
    /// A table holding only `branch`, pointing at `root`, and current.
    pub fn new(branch: &str, root: Oid) -> Self {
        Self {
            branches: BTreeMap::from([(branch.to_string(), root)]),
            current: branch.to_string(),
        }
    }

    /// Name of the current branch
    pub fn current(&self) -> &str {
        &self.current
    }

    /// Commit the current branch points at.
    pub fn head(&self) -> anyhow::Result<Oid> {
        self.branches.get(&self.current).copied().ok_or_else(|| {
            anyhow::anyhow!(
                "corrupted repository record: current branch {} has no head",
                self.current
            )
        })
    }

    /// Head of `name`
    pub fn get(&self, name: &str) -> Option<Oid> {
        self.branches.get(name).copied()
    }

    /// True when `name` exists
    pub fn contains(&self, name: &str) -> bool {
        self.branches.contains_key(name)
    }

    /// All branches, sorted by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, Oid)> {
        self.branches.iter().map(|(name, oid)| (name.as_str(), *oid))
    }

    /// Create a new branch at `oid`.
    pub fn create(&mut self, name: &str, oid: Oid) -> RepoResult<()> {
        if self.branches.contains_key(name) {
            return Err(RepoError::BranchExists);
        }
        self.branches.insert(name.to_string(), oid);
        Ok(())
    }

    /// Delete a branch. The current branch cannot be deleted.
    pub fn delete(&mut self, name: &str) -> RepoResult<()> {
        if !self.branches.contains_key(name) {
            return Err(RepoError::BranchNotFound);
        }
        if name == self.current {
            return Err(RepoError::CannotRemoveCurrentBranch);
        }
        self.branches.remove(name);
        Ok(())
    }

    /// Make `name` the current branch.
    pub fn switch_to(&mut self, name: &str) -> RepoResult<()> {
        if !self.branches.contains_key(name) {
            return Err(RepoError::NoSuchBranch);
        }
        self.current = name.to_string();
        Ok(())
    }

    /// Point `name` at `oid`, creating it if needed.
    pub fn set(&mut self, name: &str, oid: Oid) {
        self.branches.insert(name.to_string(), oid);
    }

    /// Move the current branch (and therefore HEAD) to `oid`.
    pub fn advance_current(&mut self, oid: Oid) {
        let current = self.current.clone();
        self.branches.insert(current, oid);
    }

    /// Check the table after loading it from storage.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.head().map(|_| ())
    }
}
