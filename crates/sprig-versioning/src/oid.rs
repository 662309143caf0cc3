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

//! Object Identifier (OID) for content-addressable storage
//!
//! An OID is the SHA-1 digest of an object's bytes, rendered as 40 lowercase
//! hex characters. Blobs and commits share the identifier type but live in
//! separate namespaces of the object store.

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use std::fmt;

/// Length in bytes of a SHA-1 digest
pub const OID_LEN: usize = 20;

/// Length of the full hex form of an [`Oid`]
pub const OID_HEX_LEN: usize = OID_LEN * 2;

/// SHA-1 object identifier.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Oid([u8; OID_LEN]);

impl Oid {
    /// Hash `data` with SHA-1.
    ///
    /// ```
    /// use sprig_versioning::Oid;
    ///
    /// let oid = Oid::hash(b"hello");
    /// assert_eq!(oid.to_hex(), "aaf4c61ddcc5e8a2dabede0f3b482cd9aea9434d");
    /// ```
    pub fn hash(data: &[u8]) -> Self {
        let digest = Sha1::digest(data);
        let mut bytes = [0u8; OID_LEN];
        bytes.copy_from_slice(&digest);
        Oid(bytes)
    }

    /// Raw digest bytes
    pub fn as_bytes(&self) -> &[u8; OID_LEN] {
        &self.0
    }

    /// Full 40-character hex form
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// First `len` hex characters, as shown in merge log lines
    pub fn short(&self, len: usize) -> String {
        let hex = self.to_hex();
        hex[..len.min(OID_HEX_LEN)].to_string()
    }

    /// Parse a full 40-character hex identifier.
    pub fn from_hex(s: &str) -> anyhow::Result<Self> {
        if s.len() != OID_HEX_LEN {
            anyhow::bail!("OID hex string must be {OID_HEX_LEN} characters, got {}", s.len());
        }

        let bytes = hex::decode(s)?;
        let mut oid = [0u8; OID_LEN];
        oid.copy_from_slice(&bytes);
        Ok(Oid(oid))
    }

    /// True when the hex form of this id starts with `prefix` (case-insensitive).
    pub fn matches_prefix(&self, prefix: &str) -> bool {
        !prefix.is_empty() && self.to_hex().starts_with(&prefix.to_ascii_lowercase())
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self.to_hex())
    }
}

impl From<[u8; OID_LEN]> for Oid {
    fn from(bytes: [u8; OID_LEN]) -> Self {
        Oid(bytes)
    }
}
