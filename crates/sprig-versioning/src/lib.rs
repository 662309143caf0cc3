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

//! Version control engine for Sprig
//!
//! This crate implements everything below the command line:
//! - Content-addressed object database with SHA-1 addressing and a moka read cache
//! - Immutable commits with one or two parents, and the commit graph over them
//! - Branch pointers, the staging area and the persisted repository state
//! - Three-way merge with split-point detection and conflict markers
//! - Push, fetch and pull between repositories
//!
//! # Architecture
//!
//! Objects and state live in any [`sprig_storage::StorageBackend`]:
//!
//! - **Objects**: blobs under `objects/blobs/<id>`, commits under
//!   `objects/commits/<id>`, written once and never changed
//! - **State**: branches, staging area and remotes in one `state` record,
//!   replaced atomically by each mutating operation
//!
//! Working files are reached through the [`WorkTree`] trait, and remotes
//! through [`RemoteConnector`].
//!
//! # Examples
//!
//! ```no_run
//! use sprig_storage::LocalBackend;
//! use sprig_versioning::{DiskWorkTree, Repository, RepositoryOptions};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let storage = Arc::new(LocalBackend::new("/tmp/work/.sprig").await?);
//!     let tree = Arc::new(DiskWorkTree::new("/tmp/work"));
//!     let mut repo = Repository::init(storage, tree, RepositoryOptions::default()).await?;
//!
//!     std::fs::write("/tmp/work/notes.txt", "hello")?;
//!     repo.add("notes.txt").await?;
//!     let oid = repo.commit("add notes").await?;
//!     println!("committed {oid}");
//!
//!     Ok(())
//! }
//! ```

mod commit;
mod conflict;
mod error;
mod graph;
mod index;
mod lca;
mod lock;
mod merge;
mod metrics;
mod object;
mod odb;
mod oid;
mod refs;
mod remote;
mod repository;
mod state;
mod worktree;

pub use commit::{Commit, Parents, Snapshot, DEFAULT_BRANCH, INITIAL_MESSAGE};
pub use conflict::{render_conflict, Conflict, ConflictType};
pub use error::{ErrorCategory, RepoError, RepoResult};
pub use graph::{Ancestry, CommitGraph};
pub use index::{AddOutcome, StagingArea};
pub use lca::SplitPointFinder;
pub use lock::{RepoLock, LOCK_FILE};
pub use merge::{classify, MergeAction, MergeEngine, MergeOutcome, MergePlan};
pub use metrics::OdbMetrics;
pub use object::ObjectKind;
pub use odb::ObjectDatabase;
pub use oid::{Oid, OID_HEX_LEN, OID_LEN};
pub use refs::BranchTable;
pub use remote::{
    LocalConnector, MemoryConnector, RemoteConnector, RemoteHandle, RemoteSync, RemoteTable,
};
pub use repository::{
    tracking_branch, Modification, Repository, RepositoryOptions, StatusReport,
    DEFAULT_CACHE_CAPACITY, DEFAULT_REMOTE_TIMEOUT,
};
pub use state::{RepoState, STATE_KEY};
pub use worktree::{DiskWorkTree, MemoryWorkTree, WorkTree, REPO_DIR};
