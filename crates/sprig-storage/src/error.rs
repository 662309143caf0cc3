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

//! Storage error types

use std::io;
use thiserror::Error;

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors raised by storage backends
#[derive(Error, Debug)]
pub enum StorageError {
    /// Nothing is stored under the key
    #[error("object not found: {0}")]
    NotFound(String),

    /// Key is empty or escapes the store root
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// I/O error from the underlying medium
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Backend misconfigured or unusable
    #[error("storage backend error: {0}")]
    Backend(String),

    /// Any other failure, forwarded as-is
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StorageError {
    /// Create a NotFound error for `key`
    pub fn not_found<S: Into<String>>(key: S) -> Self {
        StorageError::NotFound(key.into())
    }

    /// Create an InvalidKey error
    pub fn invalid_key<S: Into<String>>(msg: S) -> Self {
        StorageError::InvalidKey(msg.into())
    }

    /// Create a Backend error
    pub fn backend<S: Into<String>>(msg: S) -> Self {
        StorageError::Backend(msg.into())
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound(_))
    }

    /// Check if this is an InvalidKey error
    pub fn is_invalid_key(&self) -> bool {
        matches!(self, StorageError::InvalidKey(_))
    }
}

/// Reject keys the backends cannot map safely.
///
/// A key must be non-empty, must not start with `/` and must not contain
/// `..` segments, so a [`crate::LocalBackend`] can never write outside its root.
pub(crate) fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::invalid_key("key cannot be empty"));
    }
    if key.starts_with('/') || key.split('/').any(|seg| seg == ".." || seg.is_empty()) {
        return Err(StorageError::invalid_key(format!("malformed key: {key}")));
    }
    Ok(())
}
