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

//! In-memory storage backend
//!
//! `MockBackend` keeps every value in a shared `BTreeMap`. Clones share the
//! same map, which lets a test hold one handle for inspection while a
//! repository owns another.
//!
//! Writes can be made to fail for keys under a given prefix, which is how
//! tests exercise the storage-failure paths of the repository.

use crate::error::{validate_key, StorageError};
use crate::StorageBackend;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Inner {
    objects: BTreeMap<String, Vec<u8>>,
    failing_prefixes: Vec<String>,
    writes: usize,
}

/// In-memory [`StorageBackend`].
#[derive(Clone, Default)]
pub struct MockBackend {
    inner: Arc<RwLock<Inner>>,
}

impl MockBackend {
    /// Create an empty backend
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend pre-populated with `initial_data`
    pub fn with_data(initial_data: impl IntoIterator<Item = (String, Vec<u8>)>) -> Self {
        let inner = Inner {
            objects: initial_data.into_iter().collect(),
            ..Inner::default()
        };
        MockBackend {
            inner: Arc::new(RwLock::new(inner)),
        }
    }

    /// Number of stored keys
    pub async fn len(&self) -> usize {
        self.inner.read().await.objects.len()
    }

    /// True when nothing is stored
    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.objects.is_empty()
    }

    /// Every stored key, sorted
    pub async fn keys(&self) -> Vec<String> {
        self.inner.read().await.objects.keys().cloned().collect()
    }

    /// Number of successful `put` calls so far
    pub async fn write_count(&self) -> usize {
        self.inner.read().await.writes
    }

    /// Make every later `put` on a key starting with `prefix` fail with an I/O error.
    pub async fn fail_writes_with_prefix(&self, prefix: impl Into<String>) {
        self.inner.write().await.failing_prefixes.push(prefix.into());
    }

    /// Stop injecting write failures
    pub async fn heal(&self) {
        self.inner.write().await.failing_prefixes.clear();
    }
}

impl fmt::Debug for MockBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockBackend").finish_non_exhaustive()
    }
}

#[async_trait]
impl StorageBackend for MockBackend {
    async fn get(&self, key: &str) -> anyhow::Result<Vec<u8>> {
        validate_key(key)?;
        let inner = self.inner.read().await;
        inner
            .objects
            .get(key)
            .cloned()
            .ok_or_else(|| StorageError::not_found(key).into())
    }

    async fn put(&self, key: &str, data: &[u8]) -> anyhow::Result<()> {
        validate_key(key)?;
        let mut inner = self.inner.write().await;
        if inner.failing_prefixes.iter().any(|p| key.starts_with(p.as_str())) {
            return Err(StorageError::Io(std::io::Error::other(format!(
                "injected write failure for {key}"
            )))
            .into());
        }
        inner.objects.insert(key.to_string(), data.to_vec());
        inner.writes += 1;
        Ok(())
    }

    async fn exists(&self, key: &str) -> anyhow::Result<bool> {
        validate_key(key)?;
        Ok(self.inner.read().await.objects.contains_key(key))
    }

    async fn delete(&self, key: &str) -> anyhow::Result<()> {
        validate_key(key)?;
        self.inner.write().await.objects.remove(key);
        Ok(())
    }

    async fn list_objects(&self, prefix: &str) -> anyhow::Result<Vec<String>> {
        let inner = self.inner.read().await;
        Ok(inner
            .objects
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, _)| k.clone())
            .collect())
    }
}
