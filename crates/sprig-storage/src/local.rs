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

//! Local filesystem storage backend
//!
//! Maps each key onto a file below the backend root, one directory per key
//! segment:
//!
//! ```text
//! .sprig/
//!   objects/
//!     blobs/
//!       2aae6c35c94fcfb415dbe95f408b9ce91ee846ed
//!     commits/
//!       9d1b...
//!   state
//! ```
//!
//! Writes go to a sibling `*.tmp` file which is synced and then renamed over
//! the destination, so a crash mid-write never leaves a torn value behind.

use crate::error::{validate_key, StorageError};
use crate::StorageBackend;
use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

const TEMP_SUFFIX: &str = ".tmp";

/// Filesystem-backed [`StorageBackend`].
#[derive(Clone)]
pub struct LocalBackend {
    root: PathBuf,
}

impl LocalBackend {
    /// Open (creating if needed) a backend rooted at `root`.
    ///
    /// # Errors
    ///
    /// Fails if `root` exists but is not a directory, or cannot be created.
    pub async fn new<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();

        if !root.exists() {
            fs::create_dir_all(&root).await?;
        } else if !root.is_dir() {
            return Err(StorageError::backend(format!(
                "path exists but is not a directory: {}",
                root.display()
            ))
            .into());
        }

        Ok(LocalBackend { root })
    }

    /// Open a backend over a directory that must already exist.
    ///
    /// Used for remotes, where a missing directory is a user error rather
    /// than something to create.
    pub async fn open_existing<P: AsRef<Path>>(root: P) -> anyhow::Result<Self> {
        let root = root.as_ref().to_path_buf();
        match fs::metadata(&root).await {
            Ok(meta) if meta.is_dir() => Ok(LocalBackend { root }),
            Ok(_) => Err(StorageError::backend(format!(
                "path exists but is not a directory: {}",
                root.display()
            ))
            .into()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::not_found(root.display().to_string()).into())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Root directory of this backend
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn object_path(&self, key: &str) -> PathBuf {
        key.split('/').fold(self.root.clone(), |path, seg| path.join(seg))
    }

    fn temp_path(path: &Path) -> PathBuf {
        let mut name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(TEMP_SUFFIX);
        path.with_file_name(name)
    }

    /// Collect every stored key under the root, skipping in-flight temp files.
    async fn walk_keys(&self) -> anyhow::Result<Vec<String>> {
        let mut keys = Vec::new();
        let mut pending = vec![(self.root.clone(), String::new())];

        while let Some((dir, key_prefix)) = pending.pop() {
            let mut entries = match fs::read_dir(&dir).await {
                Ok(entries) => entries,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };

            while let Some(entry) = entries.next_entry().await? {
                let name = entry.file_name().to_string_lossy().into_owned();
                let key = if key_prefix.is_empty() {
                    name.clone()
                } else {
                    format!("{key_prefix}/{name}")
                };

                let file_type = entry.file_type().await?;
                if file_type.is_dir() {
                    pending.push((entry.path(), key));
                } else if file_type.is_file() && !name.ends_with(TEMP_SUFFIX) {
                    keys.push(key);
                }
            }
        }

        Ok(keys)
    }
}

impl fmt::Debug for LocalBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalBackend")
            .field("root", &self.root)
            .finish()
    }
}

#[async_trait]
impl StorageBackend for LocalBackend {
    async fn get(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        validate_key(key)?;
        let path = self.object_path(key);

        match fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::not_found(key).into())
            }
            Err(e) => Err(StorageError::Io(e).into()),
        }
    }

    async fn put(&self, key: &str, data: &[u8]) -> anyhow::Result<()> {
        validate_key(key)?;
        let path = self.object_path(key);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let temp_path = Self::temp_path(&path);
        let _ = fs::remove_file(&temp_path).await;

        let mut file = fs::File::create(&temp_path).await?;
        file.write_all(data).await?;
        file.sync_all().await?;
        drop(file);

        fs::rename(&temp_path, &path).await?;
        tracing::trace!(key = %key, bytes = data.len(), "stored object");
        Ok(())
    }

    async fn exists(&self, key: &str) -> anyhow::Result<bool> {
        validate_key(key)?;
        Ok(fs::try_exists(self.object_path(key)).await?)
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        validate_key(key)?;
        match fs::remove_file(self.object_path(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn list_objects(&self, prefix: &str) -> anyhow::Result<Vec<String>> {
        let mut keys: Vec<String> = self
            .walk_keys()
            .await?
            .into_iter()
            .filter(|key| key.starts_with(prefix))
            .collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_new_creates_root_directory() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join(".sprig");
        assert!(!root.exists());

        let backend = LocalBackend::new(&root).await.unwrap();
        assert!(root.is_dir());
        assert_eq!(backend.root(), root.as_path());
    }

    #[tokio::test]
    async fn test_new_fails_with_file_path() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("plain");
        std::fs::write(&file, b"x").unwrap();

        assert!(LocalBackend::new(&file).await.is_err());
    }

    #[tokio::test]
    async fn test_open_existing_requires_directory() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let err = LocalBackend::open_existing(&missing).await.unwrap_err();
        assert!(crate::is_not_found(&err));
        assert!(LocalBackend::open_existing(temp.path()).await.is_ok());
    }

    #[tokio::test]
    async fn test_put_and_get_nested_key() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path()).await.unwrap();

        backend.put("objects/blobs/abc123", b"hello").await.unwrap();
        assert_eq!(backend.get("objects/blobs/abc123").await.unwrap(), b"hello");
        assert!(temp.path().join("objects").join("blobs").join("abc123").is_file());
    }

    #[tokio::test]
    async fn test_get_nonexistent() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path()).await.unwrap();

        let err = backend.get("objects/blobs/missing").await.unwrap_err();
        assert!(crate::is_not_found(&err));
    }

    #[tokio::test]
    async fn test_overwrite_leaves_no_temp_file() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path()).await.unwrap();

        backend.put("state", b"one").await.unwrap();
        backend.put("state", b"two").await.unwrap();

        assert_eq!(backend.get("state").await.unwrap(), b"two");
        assert!(!temp.path().join("state.tmp").exists());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path()).await.unwrap();

        backend.put("k", b"v").await.unwrap();
        backend.delete("k").await.unwrap();
        backend.delete("k").await.unwrap();
        assert!(!backend.exists("k").await.unwrap());
    }

    #[tokio::test]
    async fn test_list_objects_filters_and_sorts() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path()).await.unwrap();

        backend.put("objects/commits/bb", b"2").await.unwrap();
        backend.put("objects/commits/aa", b"1").await.unwrap();
        backend.put("objects/blobs/cc", b"3").await.unwrap();
        backend.put("state", b"s").await.unwrap();
        std::fs::write(temp.path().join("objects").join("commits").join("zz.tmp"), b"partial")
            .unwrap();

        let commits = backend.list_objects("objects/commits/").await.unwrap();
        assert_eq!(commits, vec!["objects/commits/aa", "objects/commits/bb"]);

        let all = backend.list_objects("").await.unwrap();
        assert_eq!(all.len(), 4);
    }

    #[tokio::test]
    async fn test_list_objects_empty_root() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path()).await.unwrap();
        assert!(backend.list_objects("objects/").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_rejects_escaping_keys() {
        let temp = TempDir::new().unwrap();
        let backend = LocalBackend::new(temp.path()).await.unwrap();

        assert!(backend.put("../outside", b"x").await.is_err());
        assert!(backend.get("").await.is_err());
    }
}
