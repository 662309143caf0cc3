// Copyright (C) 2026  Sprig Contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.
//! Repository scenario tests
//!
//! Drive a repository over an in-memory store and working tree through
//! realistic histories:
//! - Commit and log
//! - Conflicting and clean merges
//! - Fast-forward and already-merged branches
//! - Staging rules, checkout and reset

#![allow(clippy::unwrap_used)]

use sprig_storage::MockBackend;
use sprig_versioning::{
    AddOutcome, Commit, MemoryWorkTree, MergeOutcome, ObjectKind, Oid, RepoError, Repository,
    RepositoryOptions, WorkTree,
};
use std::sync::Arc;

struct Fixture {
    repo: Repository,
    tree: MemoryWorkTree,
    storage: MockBackend,
}

impl Fixture {
    async fn new() -> Self {
        let storage = MockBackend::new();
        let tree = MemoryWorkTree::new();
        let repo = Repository::init(
            Arc::new(storage.clone()),
            Arc::new(tree.clone()),
            RepositoryOptions::default(),
        )
        .await
        .unwrap();
        Self {
            repo,
            tree,
            storage,
        }
    }

    async fn write(&self, path: &str, content: &str) {
        self.tree.write(path, content.as_bytes()).await.unwrap();
    }

    async fn read(&self, path: &str) -> Option<String> {
        self.tree
            .read(path)
            .await
            .unwrap()
            .map(|bytes| String::from_utf8(bytes).unwrap())
    }

    async fn commit_file(&mut self, path: &str, content: &str, message: &str) -> Oid {
        self.write(path, content).await;
        self.repo.add(path).await.unwrap();
        self.repo.commit(message).await.unwrap()
    }
}

/// Scenario A
#[tokio::test]
async fn test_first_commit_shows_in_log() {
    let mut fx = Fixture::new().await;
    let first = fx.commit_file("a", "hello", "first").await;

    let log = fx.repo.log().await.unwrap();
    let messages: Vec<&str> = log.iter().map(|(_, c)| c.message.as_str()).collect();
    assert_eq!(messages, vec!["first", "initial commit"]);
    assert_eq!(log[0].0, first);

    let commit = fx.repo.graph().read(&first).await.unwrap();
    assert_eq!(commit.snapshot.len(), 1);
    assert_eq!(commit.blob("a"), Some(&Oid::hash(b"hello")));
    assert_eq!(commit.depth, 1);
}

#[tokio::test]
async fn test_root_commit_is_identical_across_repositories() {
    let one = Fixture::new().await;
    let two = Fixture::new().await;

    assert_eq!(one.repo.head().unwrap(), two.repo.head().unwrap());
    assert_eq!(one.repo.head().unwrap(), Commit::initial().id().unwrap());
}

/// Scenario B
///
/// ```text
///   root───first───m1      (master)
///              \
///               m2         (feat)
/// ```
#[tokio::test]
async fn test_diverging_edits_conflict() {
    let mut fx = Fixture::new().await;
    fx.commit_file("a", "hello", "first").await;
    fx.repo.create_branch("feat").await.unwrap();

    let m1 = fx.commit_file("a", "world", "m1").await;
    fx.repo.checkout_branch("feat").await.unwrap();
    assert_eq!(fx.read("a").await.as_deref(), Some("hello"));
    let m2 = fx.commit_file("a", "there", "m2").await;
    fx.repo.checkout_branch("master").await.unwrap();

    let outcome = fx.repo.merge("feat").await.unwrap();
    assert!(outcome.has_conflicts());
    assert_eq!(
        fx.read("a").await.as_deref(),
        Some("<<<<<<< HEAD\nworld=======\nthere>>>>>>>\n")
    );

    let MergeOutcome::Merged { commit, conflicts } = outcome else {
        panic!("expected a merge commit");
    };
    assert_eq!(conflicts.len(), 1);
    assert_eq!(fx.repo.head().unwrap(), commit);

    let merge = fx.repo.graph().read(&commit).await.unwrap();
    assert_eq!(merge.parents.first(), Some(m1));
    assert_eq!(merge.parents.second(), Some(m2));
    assert_eq!(merge.message, "Merged feat into master.");
    assert!(fx.repo.staging().is_empty());
}

/// ```text
///   root───base───ours          (master)
///             \
///              theirs           (topic)
/// ```
#[tokio::test]
async fn test_clean_merge_takes_target_changes() {
    let mut fx = Fixture::new().await;
    fx.write("keep", "k").await;
    fx.write("drop", "d").await;
    fx.write("edit", "e").await;
    for path in ["keep", "drop", "edit"] {
        fx.repo.add(path).await.unwrap();
    }
    fx.repo.commit("base").await.unwrap();
    fx.repo.create_branch("topic").await.unwrap();

    fx.commit_file("mine", "m", "ours").await;

    fx.repo.checkout_branch("topic").await.unwrap();
    fx.repo.remove("drop").await.unwrap();
    fx.write("edit", "edited").await;
    fx.repo.add("edit").await.unwrap();
    fx.write("new", "n").await;
    fx.repo.add("new").await.unwrap();
    fx.repo.commit("theirs").await.unwrap();

    fx.repo.checkout_branch("master").await.unwrap();
    let outcome = fx.repo.merge("topic").await.unwrap();
    assert!(!outcome.has_conflicts());

    assert_eq!(fx.read("drop").await, None);
    assert_eq!(fx.read("edit").await.as_deref(), Some("edited"));
    assert_eq!(fx.read("new").await.as_deref(), Some("n"));
    assert_eq!(fx.read("mine").await.as_deref(), Some("m"));

    let head = fx.repo.head_commit().await.unwrap();
    let tracked: Vec<&String> = head.snapshot.keys().collect();
    assert_eq!(tracked, vec!["edit", "keep", "mine", "new"]);
    assert_eq!(head.depth, 3);
}

#[tokio::test]
async fn test_merge_fast_forwards_behind_branch() {
    let mut fx = Fixture::new().await;
    fx.commit_file("a", "1", "one").await;
    fx.repo.create_branch("ahead").await.unwrap();
    fx.repo.checkout_branch("ahead").await.unwrap();
    let tip = fx.commit_file("b", "2", "two").await;
    fx.repo.checkout_branch("master").await.unwrap();
    assert_eq!(fx.read("b").await, None);

    let commits_before = fx.repo.graph().all().await.unwrap().len();
    let outcome = fx.repo.merge("ahead").await.unwrap();

    assert_eq!(outcome, MergeOutcome::FastForwarded { to: tip });
    assert_eq!(fx.repo.current_branch(), "master");
    assert_eq!(fx.repo.head().unwrap(), tip);
    assert_eq!(fx.read("b").await.as_deref(), Some("2"));
    assert_eq!(fx.repo.graph().all().await.unwrap().len(), commits_before);
}

#[tokio::test]
async fn test_merge_of_ancestor_changes_nothing() {
    let mut fx = Fixture::new().await;
    fx.repo.create_branch("old").await.unwrap();
    let head = fx.commit_file("a", "1", "one").await;

    let outcome = fx.repo.merge("old").await.unwrap();
    assert_eq!(outcome, MergeOutcome::AlreadyAncestor);
    assert_eq!(fx.repo.head().unwrap(), head);
}

#[tokio::test]
async fn test_merge_preconditions_in_order() {
    let mut fx = Fixture::new().await;
    fx.commit_file("a", "1", "one").await;
    fx.repo.create_branch("other").await.unwrap();
    fx.repo.checkout_branch("other").await.unwrap();
    fx.commit_file("b", "theirs", "add b").await;
    fx.repo.checkout_branch("master").await.unwrap();
    fx.commit_file("c", "3", "add c").await;

    assert!(matches!(fx.repo.merge("master").await, Err(RepoError::MergeWithSelf)));
    assert!(matches!(fx.repo.merge("nope").await, Err(RepoError::BranchNotFound)));

    // untracked wins over staged changes
    fx.write("b", "mine").await;
    fx.write("a", "2").await;
    fx.repo.add("a").await.unwrap();
    assert!(matches!(fx.repo.merge("other").await, Err(RepoError::UntrackedConflict)));

    fx.tree.remove("b").await.unwrap();
    assert!(matches!(fx.repo.merge("other").await, Err(RepoError::UncommittedChanges)));
    assert!(fx.repo.staging().is_staged_for_addition("a"));
}

/// Scenario C
#[tokio::test]
async fn test_removing_unknown_file_changes_nothing() {
    let mut fx = Fixture::new().await;
    let writes = fx.storage.write_count().await;

    let err = fx.repo.remove("nonexistent.txt").await.unwrap_err();
    assert!(matches!(err, RepoError::NothingToRemove));
    assert_eq!(err.to_string(), "No reason to remove the file.");
    assert_eq!(fx.storage.write_count().await, writes);
    assert!(fx.repo.staging().is_empty());
}

#[tokio::test]
async fn test_remove_tracked_file_stages_removal_and_deletes_it() {
    let mut fx = Fixture::new().await;
    fx.commit_file("a", "hello", "first").await;

    fx.repo.remove("a").await.unwrap();
    assert!(fx.repo.staging().is_staged_for_removal("a"));
    assert_eq!(fx.read("a").await, None);

    fx.repo.commit("drop a").await.unwrap();
    assert!(!fx.repo.head_commit().await.unwrap().tracks("a"));
}

#[tokio::test]
async fn test_adding_unchanged_file_unstages_it() {
    let mut fx = Fixture::new().await;
    fx.commit_file("a", "hello", "first").await;

    fx.write("a", "changed").await;
    assert_eq!(fx.repo.add("a").await.unwrap(), AddOutcome::Staged);
    fx.write("a", "hello").await;
    assert_eq!(fx.repo.add("a").await.unwrap(), AddOutcome::Unchanged);
    assert!(fx.repo.staging().is_empty());
}

#[tokio::test]
async fn test_checkout_file_round_trips_committed_bytes() {
    let mut fx = Fixture::new().await;
    let first = fx.commit_file("a", "version one", "one").await;
    fx.commit_file("a", "version two", "two").await;

    let prefix = first.short(8);
    fx.repo.checkout_file(Some(&prefix), "a").await.unwrap();
    assert_eq!(fx.read("a").await.as_deref(), Some("version one"));

    fx.repo.checkout_file(None, "a").await.unwrap();
    assert_eq!(fx.read("a").await.as_deref(), Some("version two"));

    assert!(matches!(
        fx.repo.checkout_file(Some(&prefix), "missing").await,
        Err(RepoError::FileNotInCommit)
    ));
    assert!(matches!(
        fx.repo.checkout_file(Some("0000000000"), "a").await,
        Err(RepoError::CommitNotFound)
    ));
}

#[tokio::test]
async fn test_reset_moves_branch_and_working_files() {
    let mut fx = Fixture::new().await;
    let first = fx.commit_file("a", "1", "one").await;
    fx.commit_file("b", "2", "two").await;
    fx.write("c", "staged").await;
    fx.repo.add("c").await.unwrap();

    fx.repo.reset(&first.to_hex()).await.unwrap();

    assert_eq!(fx.repo.head().unwrap(), first);
    assert_eq!(fx.read("b").await, None);
    assert_eq!(fx.read("a").await.as_deref(), Some("1"));
    assert!(fx.repo.staging().is_empty());
    // no longer staged, so it stays as an untracked file
    assert_eq!(fx.read("c").await.as_deref(), Some("staged"));
}

#[tokio::test]
async fn test_find_and_global_log() {
    let mut fx = Fixture::new().await;
    let one = fx.commit_file("a", "1", "same message").await;
    let two = fx.commit_file("a", "2", "same message").await;

    let mut expected = vec![one, two];
    expected.sort();
    assert_eq!(fx.repo.find("same message").await.unwrap(), expected);
    assert!(matches!(fx.repo.find("absent").await, Err(RepoError::NoMatchingCommit)));

    let all = fx.repo.global_log().await.unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|w| w[0].0 < w[1].0));
}

#[tokio::test]
async fn test_branch_rules() {
    let mut fx = Fixture::new().await;
    fx.repo.create_branch("b").await.unwrap();
    assert!(matches!(fx.repo.create_branch("b").await, Err(RepoError::BranchExists)));
    assert!(matches!(
        fx.repo.remove_branch("master").await,
        Err(RepoError::CannotRemoveCurrentBranch)
    ));
    assert!(matches!(fx.repo.checkout_branch("master").await, Err(RepoError::AlreadyOnBranch)));
    assert!(matches!(fx.repo.checkout_branch("zzz").await, Err(RepoError::NoSuchBranch)));

    fx.repo.remove_branch("b").await.unwrap();
    assert!(matches!(fx.repo.remove_branch("b").await, Err(RepoError::BranchNotFound)));
}

#[tokio::test]
async fn test_committed_objects_are_immutable() {
    let mut fx = Fixture::new().await;
    let first = fx.commit_file("a", "1", "one").await;
    let before = fx
        .repo
        .odb()
        .get(ObjectKind::Commit, &first)
        .await
        .unwrap();

    fx.commit_file("a", "2", "two").await;
    fx.repo.create_branch("side").await.unwrap();
    fx.repo.reset(&first.to_hex()).await.unwrap();

    let after = fx
        .repo
        .odb()
        .get(ObjectKind::Commit, &first)
        .await
        .unwrap();
    assert_eq!(before, after);
}
