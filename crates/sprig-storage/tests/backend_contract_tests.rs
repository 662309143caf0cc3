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

//! Runs the same behavioural checks against every backend so the local and
//! in-memory stores stay interchangeable under the object database.

#![allow(clippy::unwrap_used)]

use sprig_storage::{is_not_found, LocalBackend, MockBackend, StorageBackend};
use std::sync::Arc;
use tempfile::TempDir;

async fn check_contract(backend: Arc<dyn StorageBackend>) {
    // missing keys
    let err = backend.get("objects/blobs/none").await.unwrap_err();
    assert!(is_not_found(&err), "{backend:?} must report NotFound");
    assert!(!backend.exists("objects/blobs/none").await.unwrap());

    // replace semantics
    backend.put("state", b"first").await.unwrap();
    backend.put("state", b"second").await.unwrap();
    assert_eq!(backend.get("state").await.unwrap(), b"second");

    // namespaced listing
    backend.put("objects/commits/02", b"c2").await.unwrap();
    backend.put("objects/commits/01", b"c1").await.unwrap();
    backend.put("objects/blobs/ff", b"b").await.unwrap();
    assert_eq!(
        backend.list_objects("objects/commits/").await.unwrap(),
        vec!["objects/commits/01", "objects/commits/02"]
    );
    assert_eq!(
        backend.list_objects("objects/").await.unwrap(),
        vec!["objects/blobs/ff", "objects/commits/01", "objects/commits/02"]
    );

    // binary payloads survive untouched
    let payload: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
    backend.put("objects/blobs/bin", &payload).await.unwrap();
    assert_eq!(backend.get("objects/blobs/bin").await.unwrap(), payload);

    // idempotent delete
    backend.delete("objects/blobs/ff").await.unwrap();
    backend.delete("objects/blobs/ff").await.unwrap();
    assert!(!backend.exists("objects/blobs/ff").await.unwrap());
}

#[tokio::test]
async fn test_mock_backend_satisfies_contract() {
    check_contract(Arc::new(MockBackend::new())).await;
}

#[tokio::test]
async fn test_local_backend_satisfies_contract() {
    let temp = TempDir::new().unwrap();
    let backend = LocalBackend::new(temp.path().join(".sprig")).await.unwrap();
    check_contract(Arc::new(backend)).await;
}

#[tokio::test]
async fn test_local_backend_concurrent_writers() {
    let temp = TempDir::new().unwrap();
    let backend = Arc::new(LocalBackend::new(temp.path()).await.unwrap());

    let mut handles = Vec::new();
    for i in 0..16 {
        let backend = Arc::clone(&backend);
        handles.push(tokio::spawn(async move {
            let key = format!("objects/blobs/{i:02}");
            backend.put(&key, key.as_bytes()).await.unwrap();
        }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let keys = backend.list_objects("objects/blobs/").await.unwrap();
    assert_eq!(keys.len(), 16);
    for key in keys {
        assert_eq!(backend.get(&key).await.unwrap(), key.as_bytes());
    }
}
