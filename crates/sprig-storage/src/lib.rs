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

//! Storage abstraction layer for Sprig
//!
//! Every piece of repository state (blobs, commits and the repository record)
//! lives in a flat store of `key -> bytes` pairs. This crate defines that
//! store as the async [`StorageBackend`] trait and ships two implementations:
//!
//! - [`LocalBackend`]: files under a repository directory, written atomically
//! - [`MockBackend`]: an in-memory map used by tests and throwaway handles
//!
//! # Keys
//!
//! Keys are `/`-separated relative paths such as `objects/blobs/3f2a...`.
//! The first segments act as namespaces; [`StorageBackend::list_objects`]
//! filters by a string prefix and always returns keys in sorted order.
//!
//! # Examples
//!
//! ```no_run
//! use sprig_storage::{MockBackend, StorageBackend};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let storage = MockBackend::new();
//!
//!     storage.put("objects/blobs/abc", b"hello").await?;
//!     assert_eq!(storage.get("objects/blobs/abc").await?, b"hello");
//!
//!     let blobs = storage.list_objects("objects/blobs/").await?;
//!     assert_eq!(blobs, vec!["objects/blobs/abc".to_string()]);
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! Trait methods return `anyhow::Result`. Backends raise [`StorageError`]
//! values inside it so callers can tell a missing key apart from an I/O
//! failure with [`is_not_found`].

pub mod error;
pub mod local;
pub mod mock;

use async_trait::async_trait;
use std::fmt::Debug;

pub use error::{StorageError, StorageResult};
pub use local::LocalBackend;
pub use mock::MockBackend;

/// Async key/value storage used by the object store and the repository record.
///
/// Implementations must be `Send + Sync` so a single backend can be shared
/// behind an `Arc` by the object database and the repository handle.
///
/// # Contract
///
/// - `put` replaces the whole value atomically: readers see either the old
///   bytes or the new bytes, never a mix.
/// - `delete` of a missing key succeeds.
/// - `list_objects` returns keys sorted lexicographically.
/// - An empty key is rejected with [`StorageError::InvalidKey`].
#[async_trait]
pub trait StorageBackend: Send + Sync + Debug {
    /// Retrieve the bytes stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns a [`StorageError::NotFound`] if nothing is stored under `key`,
    /// or an I/O error from the underlying medium.
    async fn get(&self, key: &str) -> anyhow::Result<Vec<u8>>;

    /// Store `data` under `key`, replacing any previous value.
    async fn put(&self, key: &str, data: &[u8]) -> anyhow::Result<()>;

    /// Check whether `key` holds a value.
    async fn exists(&self, key: &str) -> anyhow::Result<bool>;

    /// Remove `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> anyhow::Result<()>;

    /// List every key starting with `prefix`, sorted.
    async fn list_objects(&self, prefix: &str) -> anyhow::Result<Vec<String>>;
}

/// Returns true when `err` carries a [`StorageError::NotFound`].
pub fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<StorageError>()
        .map(StorageError::is_not_found)
        .unwrap_or(false)
}
