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

//! The commit graph
//!
//! `CommitGraph` stores and loads commits through the object database and
//! answers the graph questions the rest of the engine asks: prefix lookup,
//! ancestor sets and first-parent history.
//!
//! Ancestor sets are computed with an explicit work queue and a visited set,
//! so each commit is loaded at most once per traversal no matter how many
//! merge paths lead to it.

use crate::commit::{Commit, Parents, Snapshot};
use crate::error::{RepoError, RepoResult};
use crate::{ObjectDatabase, ObjectKind, Oid};
use anyhow::Context;
use chrono::Utc;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tracing::{debug, instrument};

/// Every ancestor of a commit (the commit itself included), in the order a
/// breadth-first walk discovered them. Parents are visited first parent first.
#[derive(Debug, Clone, Default)]
pub struct Ancestry {
    order: Vec<Oid>,
    members: HashSet<Oid>,
}

impl Ancestry {
    /// True when `oid` is an ancestor
    pub fn contains(&self, oid: &Oid) -> bool {
        self.members.contains(oid)
    }

    /// Ancestors in discovery order
    pub fn iter(&self) -> impl Iterator<Item = &Oid> {
        self.order.iter()
    }

    /// Number of ancestors
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always false for a real commit, which is its own ancestor
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Commit storage and traversal.
#[derive(Debug, Clone)]
pub struct CommitGraph {
    odb: Arc<ObjectDatabase>,
}

impl CommitGraph {
    /// Build a graph over `odb`
    pub fn new(odb: Arc<ObjectDatabase>) -> Self {
        Self { odb }
    }

    /// Object database backing this graph
    pub fn odb(&self) -> &Arc<ObjectDatabase> {
        &self.odb
    }

    /// Store `commit` and return its id.
    pub async fn store(&self, commit: &Commit) -> anyhow::Result<Oid> {
        let bytes = commit.serialize()?;
        self.odb.put(ObjectKind::Commit, &bytes).await
    }

    /// Create and store an ordinary one-parent commit stamped with the current time.
    pub async fn create_commit(
        &self,
        message: &str,
        parent: Oid,
        snapshot: Snapshot,
        branch: &str,
        depth: u32,
    ) -> anyhow::Result<(Oid, Commit)> {
        self.create(message, Parents::Single(parent), snapshot, branch, depth)
            .await
    }

    /// Create and store a two-parent merge commit stamped with the current time.
    pub async fn create_merge_commit(
        &self,
        message: &str,
        first: Oid,
        second: Oid,
        snapshot: Snapshot,
        branch: &str,
        depth: u32,
    ) -> anyhow::Result<(Oid, Commit)> {
        self.create(message, Parents::Merge { first, second }, snapshot, branch, depth)
            .await
    }

    async fn create(
        &self,
        message: &str,
        parents: Parents,
        snapshot: Snapshot,
        branch: &str,
        depth: u32,
    ) -> anyhow::Result<(Oid, Commit)> {
        let commit = Commit {
            message: message.to_string(),
            timestamp: Utc::now(),
            parents,
            snapshot,
            branch: branch.to_string(),
            depth,
        };
        let oid = self.store(&commit).await?;
        debug!(commit = %oid, branch = %branch, depth, merge = commit.is_merge(), "created commit");
        Ok((oid, commit))
    }

    /// Load a commit.
    pub async fn read(&self, oid: &Oid) -> anyhow::Result<Commit> {
        let bytes = self
            .odb
            .get(ObjectKind::Commit, oid)
            .await
            .with_context(|| format!("failed to load commit {oid}"))?;
        Commit::deserialize(&bytes)
    }

    /// True when the commit is stored.
    pub async fn contains(&self, oid: &Oid) -> anyhow::Result<bool> {
        self.odb.contains(ObjectKind::Commit, oid).await
    }

    /// Every stored commit id, ascending.
    pub async fn all(&self) -> anyhow::Result<Vec<Oid>> {
        self.odb.list(ObjectKind::Commit).await
    }

    /// Resolve an abbreviated commit id.
    ///
    /// A prefix matching more than one stored commit is rejected rather than
    /// resolved to whichever the store happens to list first.
    ///
    /// # Errors
    ///
    /// [`RepoError::CommitNotFound`] when nothing matches (or the prefix is
    /// empty or not hex), [`RepoError::AmbiguousCommit`] when several do.
    pub async fn resolve_prefix(&self, prefix: &str) -> RepoResult<Oid> {
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(RepoError::CommitNotFound);
        }

        let mut matches = self
            .all()
            .await?
            .into_iter()
            .filter(|oid| oid.matches_prefix(prefix));

        match (matches.next(), matches.next()) {
            (Some(oid), None) => Ok(oid),
            (Some(_), Some(_)) => Err(RepoError::AmbiguousCommit),
            (None, _) => Err(RepoError::CommitNotFound),
        }
    }

    /// Transitive closure over parent links (both parents of merges),
    /// starting with `head` itself.
    #[instrument(level = "debug", skip(self))]
    pub async fn ancestors(&self, head: &Oid) -> anyhow::Result<Ancestry> {
        let mut ancestry = Ancestry::default();
        let mut queue = VecDeque::from([*head]);

        while let Some(oid) = queue.pop_front() {
            if !ancestry.members.insert(oid) {
                continue;
            }
            ancestry.order.push(oid);

            let commit = self.read(&oid).await?;
            queue.extend(commit.parents.iter().filter(|p| !ancestry.members.contains(p)));
        }

        debug!(head = %head, count = ancestry.len(), "computed ancestors");
        Ok(ancestry)
    }

    /// Commits reached by following first parents from `head`, newest first.
    pub async fn first_parent_history(&self, head: &Oid) -> anyhow::Result<Vec<(Oid, Commit)>> {
        let mut history = Vec::new();
        let mut next = Some(*head);

        while let Some(oid) = next {
            let commit = self.read(&oid).await?;
            next = commit.parents.first();
            history.push((oid, commit));
        }

        Ok(history)
    }
}
