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

//! Commit records
//!
//! A commit is an immutable node of the history graph: a message, a
//! timestamp, its parent link(s), the snapshot (path to blob id), the branch
//! that was active when it was made and its depth from the root.
//!
//! The commit's identity is the SHA-1 of its serialized form. The record
//! never stores its own id, so there is nothing circular to hash.

use crate::Oid;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Message of the commit every repository starts from
pub const INITIAL_MESSAGE: &str = "initial commit";

/// Branch created by `init`. The root commit records it, so it is fixed.
pub const DEFAULT_BRANCH: &str = "master";

/// Path to blob id, ordered by path.
pub type Snapshot = BTreeMap<String, Oid>;

/// Parent link(s) of a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parents {
    /// The repository's first commit
    Root,
    /// An ordinary commit
    Single(Oid),
    /// A merge commit: `first` is the branch merged into, `second` the branch merged in
    Merge {
        /// Head of the current branch at merge time
        first: Oid,
        /// Head of the merged branch
        second: Oid,
    },
}

impl Parents {
    /// First parent, if any. `log` follows this link.
    pub fn first(&self) -> Option<Oid> {
        match *self {
            Parents::Root => None,
            Parents::Single(p) | Parents::Merge { first: p, .. } => Some(p),
        }
    }

    /// Second parent of a merge commit
    pub fn second(&self) -> Option<Oid> {
        match *self {
            Parents::Merge { second, .. } => Some(second),
            _ => None,
        }
    }

    /// All parents, first parent first
    pub fn iter(&self) -> impl Iterator<Item = Oid> {
        self.first().into_iter().chain(self.second())
    }
}

fn epoch() -> DateTime<Utc> {
    DateTime::from_timestamp(0, 0).unwrap_or_default()
}

/// An immutable commit record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Commit message
    pub message: String,
    /// Creation time
    pub timestamp: DateTime<Utc>,
    /// Parent link(s)
    pub parents: Parents,
    /// Tracked files at this commit
    pub snapshot: Snapshot,
    /// Branch that was current when the commit was made
    pub branch: String,
    /// Distance from the root along the path actually taken
    pub depth: u32,
}

impl Commit {
    /// The root commit. Identical in every repository, so every repository
    /// shares its id.
    pub fn initial() -> Self {
        Self {
            message: INITIAL_MESSAGE.to_string(),
            timestamp: epoch(),
            parents: Parents::Root,
            snapshot: Snapshot::new(),
            branch: DEFAULT_BRANCH.to_string(),
            depth: 0,
        }
    }

    /// Serialize to the stored byte form.
    pub fn serialize(&self) -> anyhow::Result<Vec<u8>> {
        bincode::serialize(self).context("failed to serialize commit")
    }

    /// Parse the stored byte form.
    pub fn deserialize(data: &[u8]) -> anyhow::Result<Self> {
        bincode::deserialize(data).context("corrupted commit record")
    }

    /// Identity hash: SHA-1 of the serialized record.
    pub fn id(&self) -> anyhow::Result<Oid> {
        Ok(Oid::hash(&self.serialize()?))
    }

    /// True for the root commit
    pub fn is_root(&self) -> bool {
        matches!(self.parents, Parents::Root)
    }

    /// True for a two-parent commit
    pub fn is_merge(&self) -> bool {
        matches!(self.parents, Parents::Merge { .. })
    }

    /// Blob id tracked at `path`
    pub fn blob(&self, path: &str) -> Option<&Oid> {
        self.snapshot.get(path)
    }

    /// True when `path` is tracked by this commit
    pub fn tracks(&self, path: &str) -> bool {
        self.snapshot.contains_key(path)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample(message: &str) -> Commit {
        let mut snapshot = Snapshot::new();
        snapshot.insert("a.txt".to_string(), Oid::hash(b"hello"));
        Commit {
            message: message.to_string(),
            timestamp: epoch(),
            parents: Parents::Single(Commit::initial().id().unwrap()),
            snapshot,
            branch: DEFAULT_BRANCH.to_string(),
            depth: 1,
        }
    }

    #[test]
    fn test_initial_commit_identity_is_stable() {
        let a = Commit::initial();
        let b = Commit::initial();
        assert_eq!(a.id().unwrap(), b.id().unwrap());
        assert!(a.is_root());
        assert_eq!(a.depth, 0);
        assert_eq!(a.timestamp.timestamp(), 0);
    }

    #[test]
    fn test_serialize_roundtrip_preserves_id() {
        let commit = sample("first");
        let bytes = commit.serialize().unwrap();
        let back = Commit::deserialize(&bytes).unwrap();
        assert_eq!(back, commit);
        assert_eq!(back.id().unwrap(), Oid::hash(&bytes));
    }

    #[test]
    fn test_every_field_feeds_the_id() {
        let base = sample("first");
        let id = base.id().unwrap();

        let mut other = base.clone();
        other.message = "second".into();
        assert_ne!(other.id().unwrap(), id);

        let mut other = base.clone();
        other.branch = "feature".into();
        assert_ne!(other.id().unwrap(), id);

        let mut other = base.clone();
        other.depth = 2;
        assert_ne!(other.id().unwrap(), id);

        let mut other = base;
        other.parents = Parents::Merge {
            first: Oid::hash(b"p1"),
            second: Oid::hash(b"p2"),
        };
        assert_ne!(other.id().unwrap(), id);
    }

    #[test]
    fn test_parents_iteration() {
        let p1 = Oid::hash(b"p1");
        let p2 = Oid::hash(b"p2");

        assert_eq!(Parents::Root.iter().count(), 0);
        assert_eq!(Parents::Single(p1).iter().collect::<Vec<_>>(), vec![p1]);
        let merge = Parents::Merge { first: p1, second: p2 };
        assert_eq!(merge.iter().collect::<Vec<_>>(), vec![p1, p2]);
        assert_eq!(merge.first(), Some(p1));
        assert_eq!(merge.second(), Some(p2));
    }

    #[test]
    fn test_corrupted_record() {
        assert!(Commit::deserialize(b"\x01\x02").is_err());
    }
}
