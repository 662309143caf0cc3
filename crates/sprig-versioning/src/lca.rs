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

//! Split-point (merge base) detection
//!
//! The split point of two heads is the deepest commit in the intersection of
//! their ancestries, where depth is the distance from the root along the path
//! each commit was built on.
//!
//! # Algorithm
//!
//! 1. Walk the ancestry of the current head breadth-first, first parents
//!    before second parents, recording the discovery order
//! 2. Walk the ancestry of the target head into a membership set
//! 3. Scan the first walk in discovery order and keep the common commit with
//!    the greatest depth; on equal depth the one discovered first wins
//!
//! # Limitations
//!
//! Maximum depth is a heuristic, not a true lowest common ancestor. In a
//! criss-cross history two common ancestors can be mutually unrelated and the
//! deeper one is not necessarily the better base:
//!
//! ```text
//!   A───B───D───F   (current)
//!    \   \ /
//!     \   X
//!      \ / \
//!       C───E───G   (target)
//! ```
//!
//! Both `B` and `C` are common ancestors here and whichever is deeper (or
//! discovered first on a tie) is chosen. This keeps merge results stable
//! with histories produced by earlier releases.

use crate::{CommitGraph, Oid};
use tracing::{debug, instrument};

/// Finds the split point of two commits.
#[derive(Debug)]
pub struct SplitPointFinder<'a> {
    graph: &'a CommitGraph,
}

impl<'a> SplitPointFinder<'a> {
    /// Create a finder over `graph`.
    pub fn new(graph: &'a CommitGraph) -> Self {
        Self { graph }
    }

    /// Split point of `current` and `target`.
    ///
    /// Every repository shares the root commit, so two heads of the same
    /// repository always have one. An error means a commit could not be read.
    #[instrument(level = "debug", skip(self))]
    pub async fn find(&self, current: &Oid, target: &Oid) -> anyhow::Result<Oid> {
        if current == target {
            return Ok(*current);
        }

        let ours = self.graph.ancestors(current).await?;
        let theirs = self.graph.ancestors(target).await?;

        let mut best: Option<(Oid, u32)> = None;
        for oid in ours.iter().filter(|oid| theirs.contains(oid)) {
            let depth = self.graph.read(oid).await?.depth;
            if best.is_none_or(|(_, best_depth)| depth > best_depth) {
                best = Some((*oid, depth));
            }
        }

        let (split, depth) = best.ok_or_else(|| {
            anyhow::anyhow!("commits {current} and {target} share no ancestor")
        })?;
        debug!(split = %split, depth, "found split point");
        Ok(split)
    }
}
