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

//! Object Database (ODB): the content-addressed object store
//!
//! The ODB provides:
//! - **Content addressing**: every object is keyed by the SHA-1 of its bytes
//! - **Idempotent writes**: storing identical bytes twice keeps a single copy
//! - **Read caching**: recently used objects are kept in a moka cache
//! - **Integrity checks**: bytes read back must hash to the requested id
//!
//! Blobs and commits share this store under separate namespaces (see
//! [`ObjectKind`]). Nothing is ever deleted.

use crate::{ObjectKind, OdbMetrics, Oid};
use anyhow::Context;
use moka::future::Cache;
use sprig_storage::StorageBackend;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

/// Content-addressed store for blobs and commits.
pub struct ObjectDatabase {
    storage: Arc<dyn StorageBackend>,
    cache: Cache<(ObjectKind, Oid), Arc<Vec<u8>>>,
    metrics: Arc<RwLock<OdbMetrics>>,
}

impl ObjectDatabase {
    /// Create an object database over `storage` caching up to `cache_capacity` objects.
    pub fn new(storage: Arc<dyn StorageBackend>, cache_capacity: u64) -> Self {
        debug!(capacity = cache_capacity, "creating object database");
        Self {
            storage,
            cache: Cache::new(cache_capacity),
            metrics: Arc::new(RwLock::new(OdbMetrics::new())),
        }
    }

    /// Store `data` and return its id. Writing bytes that are already stored
    /// is a no-op apart from the metrics.
    #[instrument(level = "debug", skip(self, data), fields(size = data.len()))]
    pub async fn put(&self, kind: ObjectKind, data: &[u8]) -> anyhow::Result<Oid> {
        let oid = Oid::hash(data);
        let key = kind.key(&oid);

        let is_new = !self.storage.exists(&key).await?;
        if is_new {
            self.storage
                .put(&key, data)
                .await
                .with_context(|| format!("failed to store {kind} {oid}"))?;
            debug!(oid = %oid, kind = %kind, "stored new object");
        } else {
            debug!(oid = %oid, kind = %kind, "object already stored (deduplicated)");
        }

        self.metrics.write().await.record_write(data.len() as u64, is_new);
        self.cache.insert((kind, oid), Arc::new(data.to_vec())).await;
        Ok(oid)
    }

    /// Read the object `oid` of the given kind.
    ///
    /// # Errors
    ///
    /// Fails when the object is missing (the error carries a storage
    /// `NotFound`) or when the stored bytes do not hash to `oid`.
    pub async fn get(&self, kind: ObjectKind, oid: &Oid) -> anyhow::Result<Vec<u8>> {
        if let Some(cached) = self.cache.get(&(kind, *oid)).await {
            self.metrics.write().await.record_cache_hit();
            return Ok((*cached).clone());
        }
        self.metrics.write().await.record_cache_miss();

        let data = self.storage.get(&kind.key(oid)).await?;

        let computed = Oid::hash(&data);
        if computed != *oid {
            warn!(expected = %oid, computed = %computed, kind = %kind, "object integrity check failed");
            anyhow::bail!("object integrity check failed: expected {oid}, got {computed}");
        }

        self.cache.insert((kind, *oid), Arc::new(data.clone())).await;
        Ok(data)
    }

    /// Check whether `oid` is stored.
    pub async fn contains(&self, kind: ObjectKind, oid: &Oid) -> anyhow::Result<bool> {
        if self.cache.contains_key(&(kind, *oid)) {
            return Ok(true);
        }
        self.storage.exists(&kind.key(oid)).await
    }

    /// Every stored id of the given kind, in ascending hex order.
    pub async fn list(&self, kind: ObjectKind) -> anyhow::Result<Vec<Oid>> {
        let keys = self.storage.list_objects(kind.namespace()).await?;
        Ok(keys.iter().filter_map(|key| kind.oid_from_key(key)).collect())
    }

    /// Snapshot of the counters
    pub async fn metrics(&self) -> OdbMetrics {
        self.metrics.read().await.clone()
    }

    /// Drop every cached object
    pub async fn clear_cache(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks().await;
    }

    /// Underlying storage backend
    pub fn storage(&self) -> &Arc<dyn StorageBackend> {
        &self.storage
    }
}

impl std::fmt::Debug for ObjectDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ObjectDatabase")
            .field("storage", &self.storage)
            .finish_non_exhaustive()
    }
}
