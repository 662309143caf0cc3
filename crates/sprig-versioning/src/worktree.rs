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

//! Working tree access
//!
//! The engine never touches the filesystem directly. Checkout, reset, merge
//! and status go through [`WorkTree`], which is a flat set of named files.
//! [`DiskWorkTree`] maps it onto the plain files at the top level of a
//! directory, and [`MemoryWorkTree`] keeps everything in memory for tests and
//! for remote handles, which have no working tree at all.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::RwLock;

/// Name of the repository directory inside a working tree
pub const REPO_DIR: &str = ".sprig";

/// A flat collection of working files.
#[async_trait]
pub trait WorkTree: Send + Sync + fmt::Debug {
    /// Contents of `path`, or `None` when there is no such file.
    async fn read(&self, path: &str) -> anyhow::Result<Option<Vec<u8>>>;

    /// Create or overwrite `path`.
    async fn write(&self, path: &str, data: &[u8]) -> anyhow::Result<()>;

    /// Delete `path`. Missing files are not an error.
    async fn remove(&self, path: &str) -> anyhow::Result<()>;

    /// Every file name, sorted.
    async fn list(&self) -> anyhow::Result<Vec<String>>;
}

/// Plain files at the top level of a directory.
///
/// Subdirectories (including the repository directory itself) are ignored.
#[derive(Clone)]
pub struct DiskWorkTree {
    root: PathBuf,
}

impl DiskWorkTree {
    /// Working tree rooted at `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn is_top_level(path: &str) -> bool {
        !(path.is_empty()
            || path == REPO_DIR
            || path == "."
            || path == ".."
            || path.contains(['/', '\\']))
    }

    fn file_path(&self, path: &str) -> anyhow::Result<PathBuf> {
        if !Self::is_top_level(path) {
            anyhow::bail!("not a top-level file name: {path:?}");
        }
        Ok(self.root.join(path))
    }
}

impl fmt::Debug for DiskWorkTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiskWorkTree").field("root", &self.root).finish()
    }
}

#[async_trait]
impl WorkTree for DiskWorkTree {
    async fn read(&self, path: &str) -> anyhow::Result<Option<Vec<u8>>> {
        // nested or parent paths are outside the flat tree
        if !Self::is_top_level(path) {
            return Ok(None);
        }
        let file = self.file_path(path)?;
        match fs::metadata(&file).await {
            Ok(meta) if meta.is_file() => Ok(Some(fs::read(&file).await?)),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, path: &str, data: &[u8]) -> anyhow::Result<()> {
        fs::write(self.file_path(path)?, data).await?;
        Ok(())
    }

    async fn remove(&self, path: &str) -> anyhow::Result<()> {
        match fs::remove_file(self.file_path(path)?).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> anyhow::Result<Vec<String>> {
        let mut names = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }
}

/// In-memory working tree. Clones share the same files.
#[derive(Clone, Default)]
pub struct MemoryWorkTree {
    files: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryWorkTree {
    /// Empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Tree holding `files`
    pub fn with_files<I, K, V>(files: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Vec<u8>>,
    {
        let files = files.into_iter().map(|(k, v)| (k.into(), v.into())).collect();
        Self {
            files: Arc::new(RwLock::new(files)),
        }
    }

    /// Snapshot of every file
    pub async fn files(&self) -> BTreeMap<String, Vec<u8>> {
        self.files.read().await.clone()
    }
}

impl fmt::Debug for MemoryWorkTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryWorkTree").finish_non_exhaustive()
    }
}

#[async_trait]
impl WorkTree for MemoryWorkTree {
    async fn read(&self, path: &str) -> anyhow::Result<Option<Vec<u8>>> {
        Ok(self.files.read().await.get(path).cloned())
    }

    async fn write(&self, path: &str, data: &[u8]) -> anyhow::Result<()> {
        self.files.write().await.insert(path.to_string(), data.to_vec());
        Ok(())
    }

    async fn remove(&self, path: &str) -> anyhow::Result<()> {
        self.files.write().await.remove(path);
        Ok(())
    }

    async fn list(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.files.read().await.keys().cloned().collect())
    }
}
