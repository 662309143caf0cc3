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

//! Repository handle
//!
//! [`Repository`] ties the object database, the commit graph, the persisted
//! state and a working tree together and exposes one method per user
//! operation.
//!
//! Every mutating operation follows the same shape:
//!
//! 1. validate against the current state, failing with no change
//! 2. write any new objects (unreferenced until step 3 succeeds)
//! 3. build the next [`RepoState`] on a clone and save it in one write
//! 4. swap the new state in, then bring the working tree in line
//!
//! A failure before step 3 completes therefore leaves the repository exactly
//! as it was.

use crate::error::{RepoError, RepoResult};
use crate::merge::{MergeEngine, MergeOutcome, MergePlan};
use crate::remote::{
    with_timeout, MemoryConnector, RemoteConnector, RemoteHandle, RemoteSync,
};
use crate::state::{RepoState, STATE_KEY};
use crate::worktree::WorkTree;
use crate::{
    AddOutcome, BranchTable, Commit, CommitGraph, ObjectDatabase, ObjectKind, Oid, RemoteTable,
    Snapshot, StagingArea, DEFAULT_BRANCH,
};
use sprig_storage::StorageBackend;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Default object cache size, in entries
pub const DEFAULT_CACHE_CAPACITY: u64 = 1024;

/// Default limit for one remote round trip
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(30);

/// Tuning knobs for a [`Repository`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepositoryOptions {
    /// Entries kept in the object read cache
    pub cache_capacity: u64,
    /// Limit for each remote round trip
    pub remote_timeout: Duration,
}

impl Default for RepositoryOptions {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            remote_timeout: DEFAULT_REMOTE_TIMEOUT,
        }
    }
}

/// Why a file shows up under "Modifications Not Staged For Commit".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modification {
    /// Content differs from what is tracked or staged
    Modified,
    /// Tracked or staged, but missing from the working tree
    Deleted,
}

impl fmt::Display for Modification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Modification::Modified => write!(f, "modified"),
            Modification::Deleted => write!(f, "deleted"),
        }
    }
}

/// Everything `status` reports, each list sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusReport {
    /// Branch names, with the current one flagged
    pub branches: Vec<(String, bool)>,
    /// Paths staged for addition
    pub staged: Vec<String>,
    /// Paths staged for removal
    pub removed: Vec<String>,
    /// Working files whose changes are not staged
    pub modified: Vec<(String, Modification)>,
    /// Working files that are neither tracked nor staged
    pub untracked: Vec<String>,
}

enum TreeUpdate {
    Write(String, Vec<u8>),
    Remove(String),
}

/// An open repository.
pub struct Repository {
    storage: Arc<dyn StorageBackend>,
    graph: CommitGraph,
    state: RepoState,
    worktree: Arc<dyn WorkTree>,
    connector: Arc<dyn RemoteConnector>,
    sync: RemoteSync,
    options: RepositoryOptions,
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("storage", &self.storage)
            .field("worktree", &self.worktree)
            .field("branch", &self.state.branches.current())
            .finish_non_exhaustive()
    }
}

impl Repository {
    /// Create a repository in `storage`: the root commit, a `master` branch
    /// pointing at it, nothing staged and no remotes.
    ///
    /// # Errors
    ///
    /// [`RepoError::AlreadyInitialized`] when `storage` already holds one.
    #[instrument(level = "debug", skip_all)]
    pub async fn init(
        storage: Arc<dyn StorageBackend>,
        worktree: Arc<dyn WorkTree>,
        options: RepositoryOptions,
    ) -> RepoResult<Self> {
        if storage.exists(STATE_KEY).await? {
            return Err(RepoError::AlreadyInitialized);
        }

        let graph = Self::graph_over(&storage, &options);
        let root = graph.store(&Commit::initial()).await?;
        let state = RepoState::new(DEFAULT_BRANCH, root);
        state.save(storage.as_ref()).await?;

        info!(root = %root, "initialized repository");
        Ok(Self::assemble(storage, graph, state, worktree, options))
    }

    /// Open the repository stored in `storage`.
    ///
    /// # Errors
    ///
    /// [`RepoError::NotInitialized`] when `storage` holds none.
    pub async fn open(
        storage: Arc<dyn StorageBackend>,
        worktree: Arc<dyn WorkTree>,
        options: RepositoryOptions,
    ) -> RepoResult<Self> {
        let state = RepoState::load(storage.as_ref()).await?;
        let graph = Self::graph_over(&storage, &options);
        Ok(Self::assemble(storage, graph, state, worktree, options))
    }

    /// Use `connector` to reach remotes.
    pub fn with_connector(mut self, connector: Arc<dyn RemoteConnector>) -> Self {
        self.connector = connector;
        self
    }

    fn graph_over(storage: &Arc<dyn StorageBackend>, options: &RepositoryOptions) -> CommitGraph {
        let odb = ObjectDatabase::new(Arc::clone(storage), options.cache_capacity);
        CommitGraph::new(Arc::new(odb))
    }

    fn assemble(
        storage: Arc<dyn StorageBackend>,
        graph: CommitGraph,
        state: RepoState,
        worktree: Arc<dyn WorkTree>,
        options: RepositoryOptions,
    ) -> Self {
        Self {
            storage,
            graph,
            state,
            worktree,
            connector: Arc::new(MemoryConnector::new()),
            sync: RemoteSync::new(options.remote_timeout),
            options,
        }
    }

    /// The commit graph
    pub fn graph(&self) -> &CommitGraph {
        &self.graph
    }

    /// The object database
    pub fn odb(&self) -> &Arc<ObjectDatabase> {
        self.graph.odb()
    }

    /// Branch pointers
    pub fn branches(&self) -> &BranchTable {
        &self.state.branches
    }

    /// Pending changes
    pub fn staging(&self) -> &StagingArea {
        &self.state.staging
    }

    /// Known remotes
    pub fn remotes(&self) -> &RemoteTable {
        &self.state.remotes
    }

    /// The working tree
    pub fn worktree(&self) -> &Arc<dyn WorkTree> {
        &self.worktree
    }

    /// Name of the current branch
    pub fn current_branch(&self) -> &str {
        self.state.branches.current()
    }

    /// Head commit id of the current branch
    pub fn head(&self) -> RepoResult<Oid> {
        Ok(self.state.branches.head()?)
    }

    /// Head commit of the current branch
    pub async fn head_commit(&self) -> RepoResult<Commit> {
        Ok(self.graph.read(&self.head()?).await?)
    }

    async fn persist(&mut self, next: RepoState) -> RepoResult<()> {
        next.save(self.storage.as_ref()).await?;
        self.state = next;
        Ok(())
    }

    async fn blob(&self, oid: &Oid) -> RepoResult<Vec<u8>> {
        Ok(self.odb().get(ObjectKind::Blob, oid).await?)
    }

    /// Stage the working file `path` for the next commit.
    ///
    /// Content identical to HEAD's cancels any staged addition instead.
    ///
    /// # Errors
    ///
    /// [`RepoError::FileNotFound`] when there is no such working file.
    #[instrument(level = "debug", skip(self))]
    pub async fn add(&mut self, path: &str) -> RepoResult<AddOutcome> {
        let content = self
            .worktree
            .read(path)
            .await?
            .ok_or(RepoError::FileNotFound)?;
        let head = self.head_commit().await?;

        let mut next = self.state.clone();
        let outcome = next.staging.stage_addition(path, content, head.blob(path));
        self.persist(next).await?;
        Ok(outcome)
    }

    /// Unstage `path`, and if HEAD tracks it, stage its removal and delete
    /// the working file.
    ///
    /// # Errors
    ///
    /// [`RepoError::NothingToRemove`] when `path` is neither tracked nor
    /// staged.
    #[instrument(level = "debug", skip(self))]
    pub async fn remove(&mut self, path: &str) -> RepoResult<()> {
        let head = self.head_commit().await?;
        let head_content = match head.blob(path) {
            Some(oid) => Some(self.blob(oid).await?),
            None => None,
        };

        let mut next = self.state.clone();
        let tracked = next.staging.stage_removal(path, head_content)?;
        self.persist(next).await?;

        if tracked {
            self.worktree.remove(path).await?;
        }
        Ok(())
    }

    /// Record the staged changes as a new commit on the current branch.
    ///
    /// # Errors
    ///
    /// [`RepoError::EmptyMessage`] for an empty message and
    /// [`RepoError::NoChanges`] when nothing is staged.
    #[instrument(level = "debug", skip(self))]
    pub async fn commit(&mut self, message: &str) -> RepoResult<Oid> {
        if message.is_empty() {
            return Err(RepoError::EmptyMessage);
        }
        if self.state.staging.is_empty() {
            return Err(RepoError::NoChanges);
        }

        let head = self.head()?;
        let parent = self.graph.read(&head).await?;
        let snapshot = self.state.staging.apply_to(&parent.snapshot, self.odb()).await?;
        let (oid, _) = self
            .graph
            .create_commit(message, head, snapshot, self.current_branch(), parent.depth + 1)
            .await?;

        let mut next = self.state.clone();
        next.staging.clear();
        next.branches.advance_current(oid);
        self.persist(next).await?;

        info!(commit = %oid, branch = %self.current_branch(), "committed");
        Ok(oid)
    }

    /// Overwrite the working file `path` with its version in `commit`
    /// (an id prefix), or in HEAD when `commit` is `None`. Staging is left
    /// alone.
    ///
    /// # Errors
    ///
    /// [`RepoError::CommitNotFound`], [`RepoError::AmbiguousCommit`] or
    /// [`RepoError::FileNotInCommit`].
    pub async fn checkout_file(&self, commit: Option<&str>, path: &str) -> RepoResult<()> {
        let oid = match commit {
            Some(prefix) => self.graph.resolve_prefix(prefix).await?,
            None => self.head()?,
        };
        let commit = self.graph.read(&oid).await?;
        let blob = commit.blob(path).ok_or(RepoError::FileNotInCommit)?;
        let content = self.blob(blob).await?;

        self.worktree.write(path, &content).await?;
        debug!(path = %path, commit = %oid, "checked out file");
        Ok(())
    }

    /// Switch to branch `name`, replacing the working files with its head's.
    ///
    /// # Errors
    ///
    /// [`RepoError::NoSuchBranch`], [`RepoError::AlreadyOnBranch`] or
    /// [`RepoError::UntrackedConflict`].
    #[instrument(level = "debug", skip(self))]
    pub async fn checkout_branch(&mut self, name: &str) -> RepoResult<()> {
        let target = self.state.branches.get(name).ok_or(RepoError::NoSuchBranch)?;
        if name == self.current_branch() {
            return Err(RepoError::AlreadyOnBranch);
        }

        let head = self.head_commit().await?;
        let target = self.graph.read(&target).await?;
        self.check_untracked(&head.snapshot, |path| target.tracks(path))
            .await?;
        let updates = self.tree_updates(&head.snapshot, &target.snapshot).await?;

        let mut next = self.state.clone();
        next.branches.switch_to(name)?;
        next.staging.clear();
        self.persist(next).await?;

        self.apply_tree_updates(updates).await?;
        info!(branch = %name, "switched branch");
        Ok(())
    }

    /// Move the current branch to `commit` (an id prefix) and check out its
    /// files.
    ///
    /// # Errors
    ///
    /// [`RepoError::CommitNotFound`], [`RepoError::AmbiguousCommit`] or
    /// [`RepoError::UntrackedConflict`].
    #[instrument(level = "debug", skip(self))]
    pub async fn reset(&mut self, commit: &str) -> RepoResult<Oid> {
        let oid = self.graph.resolve_prefix(commit).await?;
        let target = self.graph.read(&oid).await?;
        self.move_current_to(oid, &target).await?;
        info!(commit = %oid, "reset current branch");
        Ok(oid)
    }

    async fn move_current_to(&mut self, oid: Oid, target: &Commit) -> RepoResult<()> {
        let head = self.head_commit().await?;
        self.check_untracked(&head.snapshot, |path| target.tracks(path))
            .await?;
        let updates = self.tree_updates(&head.snapshot, &target.snapshot).await?;

        let mut next = self.state.clone();
        next.staging.clear();
        next.branches.advance_current(oid);
        self.persist(next).await?;

        self.apply_tree_updates(updates).await
    }

    /// Create branch `name` at HEAD. The current branch does not change.
    ///
    /// # Errors
    ///
    /// [`RepoError::BranchExists`]
    pub async fn create_branch(&mut self, name: &str) -> RepoResult<()> {
        let head = self.head()?;
        let mut next = self.state.clone();
        next.branches.create(name, head)?;
        self.persist(next).await
    }

    /// Delete the pointer `name`. Its commits stay.
    ///
    /// # Errors
    ///
    /// [`RepoError::BranchNotFound`] or [`RepoError::CannotRemoveCurrentBranch`].
    pub async fn remove_branch(&mut self, name: &str) -> RepoResult<()> {
        let mut next = self.state.clone();
        next.branches.delete(name)?;
        self.persist(next).await
    }

    /// History from HEAD following first parents, newest first.
    pub async fn log(&self) -> RepoResult<Vec<(Oid, Commit)>> {
        Ok(self.graph.first_parent_history(&self.head()?).await?)
    }

    /// Every stored commit, ordered by id.
    pub async fn global_log(&self) -> RepoResult<Vec<(Oid, Commit)>> {
        let mut commits = Vec::new();
        for oid in self.graph.all().await? {
            commits.push((oid, self.graph.read(&oid).await?));
        }
        Ok(commits)
    }

    /// Ids of every commit whose message is exactly `message`, ordered by id.
    ///
    /// # Errors
    ///
    /// [`RepoError::NoMatchingCommit`] when there are none.
    pub async fn find(&self, message: &str) -> RepoResult<Vec<Oid>> {
        let matches: Vec<Oid> = self
            .global_log()
            .await?
            .into_iter()
            .filter(|(_, commit)| commit.message == message)
            .map(|(oid, _)| oid)
            .collect();

        if matches.is_empty() {
            return Err(RepoError::NoMatchingCommit);
        }
        Ok(matches)
    }

    /// Compare HEAD, the staging area and the working tree.
    pub async fn status(&self) -> RepoResult<StatusReport> {
        let head = self.head_commit().await?;
        let staging = &self.state.staging;
        let current = self.current_branch();

        let mut report = StatusReport {
            branches: self
                .state
                .branches
                .iter()
                .map(|(name, _)| (name.to_string(), name == current))
                .collect(),
            staged: staging.additions().keys().cloned().collect(),
            removed: staging.removals().keys().cloned().collect(),
            ..StatusReport::default()
        };

        let files = self.worktree.list().await?;
        let mut candidates: Vec<&String> = head
            .snapshot
            .keys()
            .chain(staging.additions().keys())
            .chain(files.iter())
            .collect();
        candidates.sort();
        candidates.dedup();

        for path in candidates {
            let working = self.worktree.read(path).await?;
            let tracked = head.blob(path);

            match (staging.additions().get(path), working) {
                (Some(_), None) => report.modified.push((path.clone(), Modification::Deleted)),
                (Some(staged), Some(content)) if *staged != content => {
                    report.modified.push((path.clone(), Modification::Modified))
                }
                (Some(_), Some(_)) => {}
                (None, None) => {
                    if tracked.is_some() && !staging.is_staged_for_removal(path) {
                        report.modified.push((path.clone(), Modification::Deleted));
                    }
                }
                (None, Some(content)) => match tracked {
                    _ if staging.is_staged_for_removal(path) => {
                        report.untracked.push(path.clone())
                    }
                    Some(oid) if *oid != Oid::hash(&content) => {
                        report.modified.push((path.clone(), Modification::Modified))
                    }
                    Some(_) => {}
                    None => report.untracked.push(path.clone()),
                },
            }
        }

        Ok(report)
    }

    /// Merge branch `name` into the current branch.
    ///
    /// Preconditions are checked in order: not the current branch, the
    /// branch exists, no untracked file would be overwritten, nothing is
    /// staged. When the split point is the target head nothing happens; when
    /// it is the current head the current branch fast-forwards. Otherwise a
    /// two-parent commit is created, even when some paths conflict.
    #[instrument(level = "debug", skip(self))]
    pub async fn merge(&mut self, name: &str) -> RepoResult<MergeOutcome> {
        let current_branch = self.current_branch().to_string();
        if name == current_branch {
            return Err(RepoError::MergeWithSelf);
        }
        let target = self.state.branches.get(name).ok_or(RepoError::BranchNotFound)?;

        let head = self.head()?;
        let engine = MergeEngine::new(&self.graph);
        let split = engine.split_point(&head, &target).await?;

        let ours = self.graph.read(&head).await?;
        let theirs = self.graph.read(&target).await?;
        let base = self.graph.read(&split).await?;
        self.check_untracked(&ours.snapshot, |path| {
            theirs.tracks(path) && theirs.blob(path) != base.blob(path)
        })
        .await?;
        if !self.state.staging.is_empty() {
            return Err(RepoError::UncommittedChanges);
        }

        if split == target {
            debug!(target = %name, "target already merged");
            return Ok(MergeOutcome::AlreadyAncestor);
        }
        if split == head {
            self.move_current_to(target, &theirs).await?;
            info!(to = %target, "fast-forwarded");
            return Ok(MergeOutcome::FastForwarded { to: target });
        }

        let plan = MergePlan::build(&base.snapshot, &ours.snapshot, &theirs.snapshot);
        let mut next = self.state.clone();
        let conflicts = engine.stage(&plan, &ours.snapshot, &mut next.staging).await?;
        let (commit, _) = engine
            .commit(&head, &target, &current_branch, name, &next.staging)
            .await?;

        let updates: Vec<TreeUpdate> = next
            .staging
            .additions()
            .iter()
            .map(|(path, content)| TreeUpdate::Write(path.clone(), content.clone()))
            .chain(
                next.staging
                    .removals()
                    .keys()
                    .map(|path| TreeUpdate::Remove(path.clone())),
            )
            .collect();

        next.staging.clear();
        next.branches.advance_current(commit);
        self.persist(next).await?;
        self.apply_tree_updates(updates).await?;

        if !conflicts.is_empty() {
            warn!(count = conflicts.len(), "merge left conflicts");
        }
        Ok(MergeOutcome::Merged { commit, conflicts })
    }

    /// Register a remote repository.
    ///
    /// # Errors
    ///
    /// [`RepoError::RemoteExists`]
    pub async fn add_remote(&mut self, name: &str, address: &str) -> RepoResult<()> {
        let mut next = self.state.clone();
        next.remotes.add(name, address)?;
        self.persist(next).await
    }

    /// Forget a remote repository.
    ///
    /// # Errors
    ///
    /// [`RepoError::RemoteNotFound`]
    pub async fn remove_remote(&mut self, name: &str) -> RepoResult<()> {
        let mut next = self.state.clone();
        next.remotes.remove(name)?;
        self.persist(next).await
    }

    /// Send the current head to branch `branch` of `remote`.
    ///
    /// A branch the remote lacks is created. An existing one must be reached
    /// by following first parents back from the local head. Returns the
    /// number of commits sent.
    ///
    /// # Errors
    ///
    /// [`RepoError::RemoteUnreachable`] or [`RepoError::NonFastForward`],
    /// with the remote left unchanged.
    #[instrument(level = "debug", skip(self))]
    pub async fn push(&self, remote: &str, branch: &str) -> RepoResult<usize> {
        let (remote_graph, handle, mut remote_state) = self.connect(remote).await?;
        let local_head = self.head()?;

        if let Some(remote_head) = remote_state.branches.get(branch) {
            let reachable = self
                .sync
                .is_fast_forward(&self.graph, &local_head, &remote_head)
                .await?;
            if !reachable {
                return Err(RepoError::NonFastForward);
            }
        }

        let copied = self
            .sync
            .replicate(&self.graph, &remote_graph, &local_head)
            .await?;

        remote_state.branches.set(branch, local_head);
        with_timeout(self.options.remote_timeout, "the remote state write", async {
            remote_state
                .save(handle.storage().as_ref())
                .await
                .map_err(RepoError::from)
        })
        .await?;

        info!(remote = %remote, branch = %branch, commits = copied, "pushed");
        Ok(copied)
    }

    /// Copy branch `branch` of `remote` into the local store and point the
    /// tracking branch `<remote>/<branch>` at it. Returns the number of
    /// commits received.
    ///
    /// # Errors
    ///
    /// [`RepoError::RemoteUnreachable`] or [`RepoError::RemoteBranchNotFound`];
    /// [`RepoError::FetchIntoCurrentBranch`] when the tracking branch is
    /// checked out.
    #[instrument(level = "debug", skip(self))]
    pub async fn fetch(&mut self, remote: &str, branch: &str) -> RepoResult<usize> {
        let tracking = tracking_branch(remote, branch);
        if tracking == self.current_branch() {
            return Err(RepoError::FetchIntoCurrentBranch);
        }

        let (remote_graph, _handle, remote_state) = self.connect(remote).await?;
        let remote_head = remote_state
            .branches
            .get(branch)
            .ok_or(RepoError::RemoteBranchNotFound)?;

        let copied = self
            .sync
            .replicate(&remote_graph, &self.graph, &remote_head)
            .await?;

        let mut next = self.state.clone();
        next.branches.set(&tracking, remote_head);
        self.persist(next).await?;

        info!(remote = %remote, branch = %branch, commits = copied, "fetched");
        Ok(copied)
    }

    /// Fetch `branch` from `remote`, then merge `<remote>/<branch>`.
    pub async fn pull(&mut self, remote: &str, branch: &str) -> RepoResult<MergeOutcome> {
        self.fetch(remote, branch).await?;
        self.merge(&tracking_branch(remote, branch)).await
    }

    async fn connect(
        &self,
        remote: &str,
    ) -> RepoResult<(CommitGraph, RemoteHandle, RepoState)> {
        let address = self
            .state
            .remotes
            .get(remote)
            .ok_or(RepoError::RemoteUnreachable)?;
        let limit = self.options.remote_timeout;

        let handle = with_timeout(limit, "the remote", self.connector.connect(address)).await?;
        let state = match with_timeout(
            limit,
            "the remote state",
            RepoState::load(handle.storage().as_ref()),
        )
        .await
        {
            Ok(state) => state,
            Err(RepoError::NotInitialized) => return Err(RepoError::RemoteUnreachable),
            Err(e) => return Err(e),
        };

        let graph = Self::graph_over(handle.storage(), &self.options);
        Ok((graph, handle, state))
    }

    /// Fail when a working file that is neither tracked by `head` nor staged
    /// for addition would be overwritten.
    async fn check_untracked<F>(&self, head: &Snapshot, overwritten: F) -> RepoResult<()>
    where
        F: Fn(&str) -> bool,
    {
        let staging = &self.state.staging;
        for path in self.worktree.list().await? {
            let untracked = !head.contains_key(&path) && !staging.is_staged_for_addition(&path);
            if untracked && overwritten(&path) {
                debug!(path = %path, "untracked file in the way");
                return Err(RepoError::UntrackedConflict);
            }
        }
        Ok(())
    }

    /// Working tree changes turning `from` into `to`. All blobs are read
    /// here so that applying the result cannot fail on a missing object.
    async fn tree_updates(&self, from: &Snapshot, to: &Snapshot) -> RepoResult<Vec<TreeUpdate>> {
        let mut updates: Vec<TreeUpdate> = from
            .keys()
            .filter(|path| !to.contains_key(*path))
            .map(|path| TreeUpdate::Remove(path.clone()))
            .collect();
        for (path, oid) in to {
            updates.push(TreeUpdate::Write(path.clone(), self.blob(oid).await?));
        }
        Ok(updates)
    }

    async fn apply_tree_updates(&self, updates: Vec<TreeUpdate>) -> RepoResult<()> {
        for update in updates {
            match update {
                TreeUpdate::Write(path, content) => self.worktree.write(&path, &content).await?,
                TreeUpdate::Remove(path) => self.worktree.remove(&path).await?,
            }
        }
        Ok(())
    }
}

/// Local name of the tracking branch for `branch` on `remote`.
pub fn tracking_branch(remote: &str, branch: &str) -> String {
    format!("{remote}/{branch}")
}
