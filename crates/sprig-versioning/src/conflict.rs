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

//! Merge conflicts and conflict-marker rendering

use crate::Oid;
use serde::{Deserialize, Serialize};

/// Opening marker line
pub const MARKER_OURS: &[u8] = b"<<<<<<< HEAD\n";
/// Separator between the two sides
pub const MARKER_SEPARATOR: &[u8] = b"=======\n";
/// Closing marker line
pub const MARKER_THEIRS: &[u8] = b">>>>>>>\n";

/// How the two sides disagree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictType {
    /// Both sides changed the file, differently
    ModifyModify,
    /// Both sides added the path, with different content
    AddAdd,
    /// The current branch deleted the file, the target changed it
    DeleteModify,
    /// The current branch changed the file, the target deleted it
    ModifyDelete,
}

/// A conflicting path found by the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// Conflicting path
    pub path: String,
    /// Kind of disagreement
    pub conflict_type: ConflictType,
    /// Blob at the split point
    pub base: Option<Oid>,
    /// Blob on the current branch
    pub ours: Option<Oid>,
    /// Blob on the target branch
    pub theirs: Option<Oid>,
}

impl Conflict {
    /// Build a conflict, deriving its type from which sides are present.
    pub fn new(path: &str, base: Option<Oid>, ours: Option<Oid>, theirs: Option<Oid>) -> Self {
        let conflict_type = match (base, ours, theirs) {
            (None, _, _) => ConflictType::AddAdd,
            (Some(_), None, _) => ConflictType::DeleteModify,
            (Some(_), _, None) => ConflictType::ModifyDelete,
            (Some(_), Some(_), Some(_)) => ConflictType::ModifyModify,
        };
        Self {
            path: path.to_string(),
            conflict_type,
            base,
            ours,
            theirs,
        }
    }
}

/// Render the conflict-marked file content.
///
/// The two sides are concatenated verbatim between the markers; an absent
/// side contributes nothing. No newline is inserted after a side that lacks
/// one.
///
/// ```
/// use sprig_versioning::render_conflict;
///
/// let merged = render_conflict(Some(b"world"), Some(b"there"));
/// assert_eq!(merged, b"<<<<<<< HEAD\nworld=======\nthere>>>>>>>\n");
/// ```
pub fn render_conflict(ours: Option<&[u8]>, theirs: Option<&[u8]>) -> Vec<u8> {
    let ours = ours.unwrap_or_default();
    let theirs = theirs.unwrap_or_default();

    let mut out = Vec::with_capacity(
        MARKER_OURS.len() + ours.len() + MARKER_SEPARATOR.len() + theirs.len() + MARKER_THEIRS.len(),
    );
    out.extend_from_slice(MARKER_OURS);
    out.extend_from_slice(ours);
    out.extend_from_slice(MARKER_SEPARATOR);
    out.extend_from_slice(theirs);
    out.extend_from_slice(MARKER_THEIRS);
    out
}
