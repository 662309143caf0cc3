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

//! Remote synchronisation
//!
//! A remote is another repository reachable through a storage backend,
//! normally the `.sprig` directory of a second working tree on the same
//! machine. Push and fetch both reduce to [`RemoteSync::replicate`]: copy
//! every commit the destination lacks, parents before children, each
//! commit's blobs before the commit itself. An interrupted transfer therefore
//! leaves the destination with a consistent prefix of history, and a retry
//! skips whatever already arrived.

use crate::error::{RepoError, RepoResult};
use crate::lock::RepoLock;
use crate::{Commit, CommitGraph, ObjectKind, Oid};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sprig_storage::{LocalBackend, StorageBackend};
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Remote name to address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteTable {
    remotes: BTreeMap<String, String>,
}

impl RemoteTable {
    /// Register `name` at `address`.
    pub fn add(&mut self, name: &str, address: &str) -> RepoResult<()> {
        if self.remotes.contains_key(name) {
            return Err(RepoError::RemoteExists);
        }
        self.remotes.insert(name.to_string(), address.to_string());
        Ok(())
    }

    /// Forget `name`.
    pub fn remove(&mut self, name: &str) -> RepoResult<()> {
        self.remotes
            .remove(name)
            .map(|_| ())
            .ok_or(RepoError::RemoteNotFound)
    }

    /// Address of `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.remotes.get(name).map(String::as_str)
    }

    /// Every remote, sorted by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.remotes.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// An open connection to a remote repository's store.
///
/// Holds the remote's repository lock, when it has one, until dropped.
pub struct RemoteHandle {
    storage: Arc<dyn StorageBackend>,
    lock: Option<RepoLock>,
}

impl RemoteHandle {
    /// Handle over `storage`, optionally holding `lock`
    pub fn new(storage: Arc<dyn StorageBackend>, lock: Option<RepoLock>) -> Self {
        Self {
            storage,
            lock,
        }
    }

    /// The remote's store
    pub fn storage(&self) -> &Arc<dyn StorageBackend> {
        &self.storage
    }
}

impl fmt::Debug for RemoteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteHandle")
            .field("storage", &self.storage)
            .field("locked", &self.lock.is_some())
            .finish()
    }
}

/// Turns a remote address into an open [`RemoteHandle`].
#[async_trait]
pub trait RemoteConnector: Send + Sync + fmt::Debug {
    /// Open the remote at `address`.
    ///
    /// # Errors
    ///
    /// [`RepoError::RemoteUnreachable`] when nothing is there.
    async fn connect(&self, address: &str) -> RepoResult<RemoteHandle>;
}

/// Connects to repository directories on the local filesystem.
///
/// Relative addresses are resolved against `base`, the working tree the
/// command runs in.
#[derive(Debug, Clone)]
pub struct LocalConnector {
    base: PathBuf,
    lock_timeout: Duration,
}

impl LocalConnector {
    /// Connector resolving addresses against `base`
    pub fn new(base: impl Into<PathBuf>, lock_timeout: Duration) -> Self {
        Self {
            base: base.into(),
            lock_timeout,
        }
    }
}

#[async_trait]
impl RemoteConnector for LocalConnector {
    async fn connect(&self, address: &str) -> RepoResult<RemoteHandle> {
        let dir = self.base.join(address);
        let backend = match LocalBackend::open_existing(&dir).await {
            Ok(backend) => backend,
            Err(e) if sprig_storage::is_not_found(&e) => return Err(RepoError::RemoteUnreachable),
            Err(e) => return Err(e.into()),
        };
        let lock = RepoLock::acquire(&dir, self.lock_timeout).await?;
        debug!(remote = %dir.display(), "connected to remote");
        Ok(RemoteHandle::new(Arc::new(backend), Some(lock)))
    }
}

/// Connects to in-memory stores registered by address.
#[derive(Debug, Clone, Default)]
pub struct MemoryConnector {
    stores: BTreeMap<String, Arc<dyn StorageBackend>>,
}

impl MemoryConnector {
    /// Connector with no stores
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `storage` reachable at `address`
    pub fn register(&mut self, address: &str, storage: Arc<dyn StorageBackend>) {
        self.stores.insert(address.to_string(), storage);
    }
}

#[async_trait]
impl RemoteConnector for MemoryConnector {
    async fn connect(&self, address: &str) -> RepoResult<RemoteHandle> {
        self.stores
            .get(address)
            .map(|storage| RemoteHandle::new(Arc::clone(storage), None))
            .ok_or(RepoError::RemoteUnreachable)
    }
}

/// Run one remote round trip under `limit`.
pub async fn with_timeout<T, F>(limit: Duration, what: &str, fut: F) -> RepoResult<T>
where
    F: Future<Output = RepoResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(RepoError::Timeout(what.to_string())),
    }
}

/// Copies history between two commit graphs.
#[derive(Debug, Clone, Copy)]
pub struct RemoteSync {
    timeout: Duration,
}

impl RemoteSync {
    /// Sync bounded by `timeout` per object copy
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Per-copy time limit
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// True when `remote_head` is reached by following first parents from
    /// `local_head` in `graph`.
    pub async fn is_fast_forward(
        &self,
        graph: &CommitGraph,
        local_head: &Oid,
        remote_head: &Oid,
    ) -> anyhow::Result<bool> {
        let mut next = Some(*local_head);
        while let Some(oid) = next {
            if oid == *remote_head {
                return Ok(true);
            }
            next = graph.read(&oid).await?.parents.first();
        }
        Ok(false)
    }

    /// Copy `head` and every ancestor `dest` lacks from `source` into `dest`.
    ///
    /// The walk stops at commits `dest` already has, since their ancestry
    /// is present too. Returns the number of commits copied.
    #[instrument(level = "debug", skip(self, source, dest))]
    pub async fn replicate(
        &self,
        source: &CommitGraph,
        dest: &CommitGraph,
        head: &Oid,
    ) -> RepoResult<usize> {
        let mut missing: Vec<(Oid, Commit)> = Vec::new();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::from([*head]);

        while let Some(oid) = queue.pop_front() {
            if !seen.insert(oid) {
                continue;
            }
            if self.bounded("a remote commit lookup", dest.contains(&oid)).await? {
                continue;
            }
            let commit = self.bounded("a remote commit read", source.read(&oid)).await?;
            queue.extend(commit.parents.iter());
            missing.push((oid, commit));
        }

        // parents are always shallower than their children
        missing.sort_by_key(|(_, commit)| commit.depth);

        for (oid, commit) in &missing {
            self.copy_commit(source, dest, oid, commit).await?;
        }

        info!(head = %head, commits = missing.len(), "replicated history");
        Ok(missing.len())
    }

    async fn copy_commit(
        &self,
        source: &CommitGraph,
        dest: &CommitGraph,
        oid: &Oid,
        commit: &Commit,
    ) -> RepoResult<()> {
        let blobs: HashSet<&Oid> = commit.snapshot.values().collect();
        for blob in blobs {
            self.copy_object(source, dest, ObjectKind::Blob, blob).await?;
        }
        self.copy_object(source, dest, ObjectKind::Commit, oid).await?;
        debug!(commit = %oid, "copied commit");
        Ok(())
    }

    async fn copy_object(
        &self,
        source: &CommitGraph,
        dest: &CommitGraph,
        kind: ObjectKind,
        oid: &Oid,
    ) -> RepoResult<()> {
        let (src, dst) = (source.odb(), dest.odb());
        if self.bounded("a remote object lookup", dst.contains(kind, oid)).await? {
            return Ok(());
        }

        let data = self.bounded("a remote object read", src.get(kind, oid)).await?;
        let written = self.bounded("a remote object write", dst.put(kind, &data)).await?;
        if written != *oid {
            return Err(anyhow::anyhow!("{kind} {oid} changed in transit (got {written})").into());
        }
        Ok(())
    }

    async fn bounded<T>(
        &self,
        what: &str,
        fut: impl Future<Output = anyhow::Result<T>>,
    ) -> RepoResult<T> {
        with_timeout(self.timeout, what, async { fut.await.map_err(RepoError::from) }).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::{ObjectDatabase, Snapshot};
    use sprig_storage::MockBackend;

    fn graph_over(storage: MockBackend) -> CommitGraph {
        CommitGraph::new(Arc::new(ObjectDatabase::new(Arc::new(storage), 64)))
    }

    async fn commit_with_file(
        graph: &CommitGraph,
        parent: Oid,
        name: &str,
        content: &[u8],
    ) -> Oid {
        let parent_commit = graph.read(&parent).await.unwrap();
        let blob = graph.odb().put(ObjectKind::Blob, content).await.unwrap();
        let mut snapshot: Snapshot = parent_commit.snapshot.clone();
        snapshot.insert(name.to_string(), blob);
        graph
            .create_commit(name, parent, snapshot, "master", parent_commit.depth + 1)
            .await
            .unwrap()
            .0
    }

    #[test]
    fn test_remote_table() {
        let mut table = RemoteTable::default();
        table.add("origin", "../a/.sprig").unwrap();
        assert!(matches!(table.add("origin", "x"), Err(RepoError::RemoteExists)));
        assert_eq!(table.get("origin"), Some("../a/.sprig"));

        table.remove("origin").unwrap();
        assert!(matches!(table.remove("origin"), Err(RepoError::RemoteNotFound)));
    }

    #[tokio::test]
    async fn test_replicate_copies_missing_history() {
        let source = graph_over(MockBackend::new());
        let dest_store = MockBackend::new();
        let dest = graph_over(dest_store.clone());

        let root = source.store(&Commit::initial()).await.unwrap();
        dest.store(&Commit::initial()).await.unwrap();
        let a = commit_with_file(&source, root, "a", b"one").await;
        let b = commit_with_file(&source, a, "b", b"two").await;

        let sync = RemoteSync::new(Duration::from_secs(5));
        assert_eq!(sync.replicate(&source, &dest, &b).await.unwrap(), 2);

        let copied = dest.read(&b).await.unwrap();
        for blob in copied.snapshot.values() {
            assert!(dest.odb().contains(ObjectKind::Blob, blob).await.unwrap());
        }
        assert!(dest.contains(&a).await.unwrap());

        // nothing left to do on retry
        let writes = dest_store.write_count().await;
        assert_eq!(sync.replicate(&source, &dest, &b).await.unwrap(), 0);
        assert_eq!(dest_store.write_count().await, writes);
    }

    #[tokio::test]
    async fn test_interrupted_replication_leaves_consistent_prefix() {
        let source = graph_over(MockBackend::new());
        let dest_store = MockBackend::new();
        let dest = graph_over(dest_store.clone());

        let root = source.store(&Commit::initial()).await.unwrap();
        dest.store(&Commit::initial()).await.unwrap();
        let a = commit_with_file(&source, root, "a", b"one").await;
        let b = commit_with_file(&source, a, "b", b"two").await;

        // the blob "two" only appears in b, so a arrives and b does not
        let two = Oid::hash(b"two");
        dest_store
            .fail_writes_with_prefix(ObjectKind::Blob.key(&two))
            .await;

        let sync = RemoteSync::new(Duration::from_secs(5));
        assert!(sync.replicate(&source, &dest, &b).await.is_err());
        assert!(dest.contains(&a).await.unwrap());
        assert!(!dest.contains(&b).await.unwrap());

        dest_store.heal().await;
        assert_eq!(sync.replicate(&source, &dest, &b).await.unwrap(), 1);
        assert!(dest.contains(&b).await.unwrap());
    }

    #[tokio::test]
    async fn test_fast_forward_walk_uses_first_parents() {
        let graph = graph_over(MockBackend::new());
        let root = graph.store(&Commit::initial()).await.unwrap();
        let a = commit_with_file(&graph, root, "a", b"1").await;
        let b = commit_with_file(&graph, a, "b", b"2").await;
        let side = commit_with_file(&graph, root, "side", b"3").await;

        let sync = RemoteSync::new(Duration::from_secs(5));
        assert!(sync.is_fast_forward(&graph, &b, &a).await.unwrap());
        assert!(sync.is_fast_forward(&graph, &b, &root).await.unwrap());
        assert!(!sync.is_fast_forward(&graph, &b, &side).await.unwrap());
        assert!(!sync.is_fast_forward(&graph, &b, &Oid::hash(b"elsewhere")).await.unwrap());
    }

    #[tokio::test]
    async fn test_memory_connector() {
        let mut connector = MemoryConnector::new();
        connector.register("remote", Arc::new(MockBackend::new()));

        assert!(connector.connect("remote").await.is_ok());
        assert!(matches!(
            connector.connect("nowhere").await,
            Err(RepoError::RemoteUnreachable)
        ));
    }

    #[tokio::test]
    async fn test_local_connector_missing_directory() {
        let temp = tempfile::tempdir().unwrap();
        let connector = LocalConnector::new(temp.path(), Duration::from_secs(1));

        assert!(matches!(
            connector.connect("missing/.sprig").await,
            Err(RepoError::RemoteUnreachable)
        ));
        std::fs::create_dir(temp.path().join(".sprig")).unwrap();
        assert!(connector.connect(".sprig").await.is_ok());
    }
}
