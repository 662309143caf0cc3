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
//! Property-based tests for the object database and commit identity
//!
//! - Writing the same bytes twice yields one id and one stored copy
//! - Reads return exactly what was written
//! - A commit's id depends only on its fields

#![allow(clippy::unwrap_used)]

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use sprig_storage::MockBackend;
use sprig_versioning::{Commit, ObjectDatabase, ObjectKind, Oid, Parents, Snapshot};
use std::sync::Arc;

fn arb_binary_data() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..4096)
}

fn arb_commit() -> impl Strategy<Value = Commit> {
    (
        "[a-z ]{0,24}",
        0i64..4_000_000_000,
        prop::option::of(any::<[u8; 20]>()),
        prop::collection::btree_map("[a-z]{1,8}", any::<[u8; 20]>(), 0..6),
        0u32..1000,
    )
        .prop_map(|(message, secs, parent, files, depth)| Commit {
            message,
            timestamp: DateTime::<Utc>::from_timestamp(secs, 0).unwrap(),
            parents: parent.map_or(Parents::Root, |p| Parents::Single(Oid::from(p))),
            snapshot: files
                .into_iter()
                .map(|(k, v)| (k, Oid::from(v)))
                .collect::<Snapshot>(),
            branch: "master".to_string(),
            depth,
        })
}

#[test]
fn proptest_put_is_idempotent() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&arb_binary_data(), |data| {
            tokio::runtime::Runtime::new().unwrap().block_on(async {
                let storage = MockBackend::new();
                let odb = ObjectDatabase::new(Arc::new(storage.clone()), 16);

                let first = odb.put(ObjectKind::Blob, &data).await.unwrap();
                let second = odb.put(ObjectKind::Blob, &data).await.unwrap();

                prop_assert_eq!(first, second);
                prop_assert_eq!(first, Oid::hash(&data));
                prop_assert_eq!(storage.len().await, 1);
                prop_assert_eq!(storage.write_count().await, 1);
                Ok(())
            })
        })
        .unwrap();
}

#[test]
fn proptest_get_returns_written_bytes() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&arb_binary_data(), |data| {
            tokio::runtime::Runtime::new().unwrap().block_on(async {
                let odb = ObjectDatabase::new(Arc::new(MockBackend::new()), 16);
                let oid = odb.put(ObjectKind::Blob, &data).await.unwrap();

                odb.clear_cache().await;
                prop_assert_eq!(odb.get(ObjectKind::Blob, &oid).await.unwrap(), data);
                Ok(())
            })
        })
        .unwrap();
}

proptest! {
    #[test]
    fn proptest_commit_id_is_deterministic(commit in arb_commit()) {
        let decoded = Commit::deserialize(&commit.serialize().unwrap()).unwrap();
        prop_assert_eq!(commit.id().unwrap(), decoded.id().unwrap());
        prop_assert_eq!(&decoded, &commit);
    }

    #[test]
    fn proptest_message_changes_id(commit in arb_commit(), suffix in "[a-z]{1,4}") {
        let mut other = commit.clone();
        other.message.push_str(&suffix);
        prop_assert_ne!(commit.id().unwrap(), other.id().unwrap());
    }
}
