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

//! Object kinds and their storage namespaces

use crate::oid::Oid;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The two kinds of immutable object in the store.
///
/// Blobs and commits are keyed the same way (SHA-1 of their bytes) but live
/// under separate key prefixes, so a blob whose bytes happened to equal a
/// serialized commit could never be mistaken for one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    /// Raw file content
    Blob,
    /// Serialized commit record
    Commit,
}

impl ObjectKind {
    /// Short lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Blob => "blob",
            ObjectKind::Commit => "commit",
        }
    }

    /// Key prefix of this namespace in the storage backend
    pub fn namespace(&self) -> &'static str {
        match self {
            ObjectKind::Blob => "objects/blobs/",
            ObjectKind::Commit => "objects/commits/",
        }
    }

    /// Storage key for `oid` in this namespace
    pub fn key(&self, oid: &Oid) -> String {
        format!("{}{}", self.namespace(), oid.to_hex())
    }

    /// Recover the object id from a storage key of this namespace.
    pub fn oid_from_key(&self, key: &str) -> Option<Oid> {
        key.strip_prefix(self.namespace())
            .and_then(|hex| Oid::from_hex(hex).ok())
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
