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

//! Three-way merge
//!
//! A merge runs in three steps:
//!
//! 1. [`MergeEngine::split_point`] finds the merge base of the two heads
//! 2. [`MergePlan::build`] classifies every path of the split, current and
//!    target snapshots. This step is pure and touches no storage.
//! 3. [`MergeEngine::stage`] records the plan in the staging area, and
//!    [`MergeEngine::commit`] turns the staging area into a two-parent commit
//!
//! The caller decides what to do with the special cases (target already
//! merged, fast-forward) before a plan is ever built.

use crate::conflict::{render_conflict, Conflict};
use crate::lca::SplitPointFinder;
use crate::{Commit, CommitGraph, ObjectKind, Oid, Snapshot, StagingArea};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};

/// What the merge does to one path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeAction {
    /// The current version (or its absence) stands
    KeepCurrent,
    /// Take the target's blob and stage it
    TakeTarget(Oid),
    /// The target deleted an unchanged file; stage its removal
    Delete,
    /// Both sides changed the path in incompatible ways
    Conflict(Conflict),
}

/// Classify one path from its blob at the split point and on each side.
///
/// ```
/// use sprig_versioning::{classify, MergeAction, Oid};
///
/// let base = Oid::hash(b"base");
/// let theirs = Oid::hash(b"theirs");
///
/// let action = classify("f", Some(&base), Some(&base), Some(&theirs));
/// assert_eq!(action, MergeAction::TakeTarget(theirs));
/// ```
pub fn classify(
    path: &str,
    split: Option<&Oid>,
    current: Option<&Oid>,
    target: Option<&Oid>,
) -> MergeAction {
    if current == target || target == split {
        // Same result on both sides, or the target left the path alone
        MergeAction::KeepCurrent
    } else if current == split {
        match target {
            Some(oid) => MergeAction::TakeTarget(*oid),
            None => MergeAction::Delete,
        }
    } else {
        MergeAction::Conflict(Conflict::new(
            path,
            split.copied(),
            current.copied(),
            target.copied(),
        ))
    }
}

/// The classified paths of one merge, sorted by path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergePlan {
    actions: Vec<(String, MergeAction)>,
}

impl MergePlan {
    /// Classify every path present in any of the three snapshots.
    pub fn build(split: &Snapshot, current: &Snapshot, target: &Snapshot) -> Self {
        let paths: BTreeSet<&String> = split
            .keys()
            .chain(current.keys())
            .chain(target.keys())
            .collect();

        let actions = paths
            .into_iter()
            .filter_map(|path| {
                match classify(path, split.get(path), current.get(path), target.get(path)) {
                    MergeAction::KeepCurrent => None,
                    action => Some((path.clone(), action)),
                }
            })
            .collect();

        Self { actions }
    }

    /// Paths that change, with what happens to them
    pub fn actions(&self) -> &[(String, MergeAction)] {
        &self.actions
    }

    /// Conflicting paths
    pub fn conflicts(&self) -> impl Iterator<Item = &Conflict> {
        self.actions.iter().filter_map(|(_, action)| match action {
            MergeAction::Conflict(conflict) => Some(conflict),
            _ => None,
        })
    }

    /// True when the merge changes nothing in the current snapshot
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

/// How a merge ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The target head is already in the current history
    AlreadyAncestor,
    /// The current branch moved forward to the target head
    FastForwarded {
        /// New head of the current branch
        to: Oid,
    },
    /// A merge commit was created
    Merged {
        /// The merge commit
        commit: Oid,
        /// Paths left with conflict markers, possibly none
        conflicts: Vec<Conflict>,
    },
}

impl MergeOutcome {
    /// True when conflict markers were written
    pub fn has_conflicts(&self) -> bool {
        matches!(self, MergeOutcome::Merged { conflicts, .. } if !conflicts.is_empty())
    }
}

/// Runs merges over a commit graph.
#[derive(Debug)]
pub struct MergeEngine<'a> {
    graph: &'a CommitGraph,
}

impl<'a> MergeEngine<'a> {
    /// Engine over `graph`
    pub fn new(graph: &'a CommitGraph) -> Self {
        Self { graph }
    }

    /// Merge base of the two heads.
    pub async fn split_point(&self, current: &Oid, target: &Oid) -> anyhow::Result<Oid> {
        SplitPointFinder::new(self.graph).find(current, target).await
    }

    /// Record `plan` in `staging`, which must be empty.
    ///
    /// Target content is staged as an addition, deletions as removals of the
    /// current content, and each conflict as an addition of its rendered
    /// conflict-marked content. Returns the conflicts in path order.
    #[instrument(level = "debug", skip_all, fields(paths = plan.actions().len()))]
    pub async fn stage(
        &self,
        plan: &MergePlan,
        current: &Snapshot,
        staging: &mut StagingArea,
    ) -> anyhow::Result<Vec<Conflict>> {
        let odb = self.graph.odb();
        let mut conflicts = Vec::new();

        for (path, action) in plan.actions() {
            let head_blob = current.get(path);
            match action {
                MergeAction::KeepCurrent => {}
                MergeAction::TakeTarget(oid) => {
                    let content = odb.get(ObjectKind::Blob, oid).await?;
                    staging.stage_addition(path, content, head_blob);
                }
                MergeAction::Delete => {
                    let content = match head_blob {
                        Some(oid) => Some(odb.get(ObjectKind::Blob, oid).await?),
                        None => None,
                    };
                    staging.stage_removal(path, content)?;
                }
                MergeAction::Conflict(conflict) => {
                    let ours = match conflict.ours {
                        Some(oid) => Some(odb.get(ObjectKind::Blob, &oid).await?),
                        None => None,
                    };
                    let theirs = match conflict.theirs {
                        Some(oid) => Some(odb.get(ObjectKind::Blob, &oid).await?),
                        None => None,
                    };
                    let rendered = render_conflict(ours.as_deref(), theirs.as_deref());
                    staging.stage_addition(path, rendered, head_blob);
                    debug!(path = %path, kind = ?conflict.conflict_type, "merge conflict");
                    conflicts.push(conflict.clone());
                }
            }
        }

        Ok(conflicts)
    }

    /// Create the merge commit of `current` and `target` from the staged changes.
    ///
    /// The commit is recorded on `current_branch` with depth one past the
    /// deeper parent and message `Merged <target_branch> into <current_branch>.`.
    /// The staging area is left untouched.
    #[instrument(level = "debug", skip(self, staging))]
    pub async fn commit(
        &self,
        current: &Oid,
        target: &Oid,
        current_branch: &str,
        target_branch: &str,
        staging: &StagingArea,
    ) -> anyhow::Result<(Oid, Commit)> {
        let ours = self.graph.read(current).await?;
        let theirs = self.graph.read(target).await?;

        let snapshot = staging.apply_to(&ours.snapshot, self.graph.odb()).await?;
        let depth = ours.depth.max(theirs.depth) + 1;
        let message = format!("Merged {target_branch} into {current_branch}.");

        let (oid, commit) = self
            .graph
            .create_merge_commit(&message, *current, *target, snapshot, current_branch, depth)
            .await?;
        info!(commit = %oid, target = %target_branch, "created merge commit");
        Ok((oid, commit))
    }
}
