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

//! Repository error types
//!
//! The `Display` text of every non-fatal variant is the exact diagnostic the
//! command line prints, so callers can report errors with `{}` and nothing else.

use thiserror::Error;

/// Result type alias for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Broad classes of failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed request: wrong operands, empty message
    Usage,
    /// Unknown commit, branch, remote or file
    NotFound,
    /// Well-formed request blocked by repository state
    State,
    /// Storage failure or corrupted record
    Fatal,
}

/// Errors produced by repository operations.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("Please enter a commit message.")]
    EmptyMessage,

    #[error("Incorrect operands.")]
    IncorrectOperands,

    #[error("No commit with that id exists.")]
    CommitNotFound,

    #[error("Commit id prefix is ambiguous.")]
    AmbiguousCommit,

    #[error("No such branch exists.")]
    NoSuchBranch,

    #[error("A branch with that name does not exist.")]
    BranchNotFound,

    #[error("File does not exist.")]
    FileNotFound,

    #[error("File does not exist in that commit.")]
    FileNotInCommit,

    #[error("A remote with that name does not exist.")]
    RemoteNotFound,

    #[error("Remote directory not found.")]
    RemoteUnreachable,

    #[error("That remote does not have that branch.")]
    RemoteBranchNotFound,

    #[error("Found no commit with that message.")]
    NoMatchingCommit,

    #[error("Not in an initialized Sprig directory.")]
    NotInitialized,

    #[error("No changes added to the commit.")]
    NoChanges,

    #[error("No reason to remove the file.")]
    NothingToRemove,

    #[error("You have uncommitted changes.")]
    UncommittedChanges,

    #[error("There is an untracked file in the way; delete it, or add and commit it first.")]
    UntrackedConflict,

    #[error("Please pull down remote changes before pushing.")]
    NonFastForward,

    #[error("A branch with that name already exists.")]
    BranchExists,

    #[error("Cannot remove the current branch.")]
    CannotRemoveCurrentBranch,

    #[error("Cannot merge a branch with itself.")]
    MergeWithSelf,

    #[error("No need to checkout the current branch.")]
    AlreadyOnBranch,

    #[error("A remote with that name already exists.")]
    RemoteExists,

    #[error("Cannot fetch into the current branch.")]
    FetchIntoCurrentBranch,

    #[error("A Sprig version-control system already exists in the current directory.")]
    AlreadyInitialized,

    #[error("Timed out waiting for {0}.")]
    Timeout(String),

    #[error(transparent)]
    Fatal(#[from] anyhow::Error),
}

impl RepoError {
    /// Classify this error.
    pub fn category(&self) -> ErrorCategory {
        use RepoError::*;
        match self {
            EmptyMessage | IncorrectOperands => ErrorCategory::Usage,
            CommitNotFound | AmbiguousCommit | NoSuchBranch | BranchNotFound | FileNotFound
            | FileNotInCommit | RemoteNotFound | RemoteUnreachable | RemoteBranchNotFound
            | NoMatchingCommit | NotInitialized => ErrorCategory::NotFound,
            NoChanges | NothingToRemove | UncommittedChanges | UntrackedConflict
            | NonFastForward | BranchExists | CannotRemoveCurrentBranch | MergeWithSelf
            | AlreadyOnBranch | RemoteExists | FetchIntoCurrentBranch | AlreadyInitialized => {
                ErrorCategory::State
            }
            Timeout(_) | Fatal(_) => ErrorCategory::Fatal,
        }
    }

    /// True for storage or corruption failures.
    pub fn is_fatal(&self) -> bool {
        self.category() == ErrorCategory::Fatal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_the_user_diagnostic() {
        assert_eq!(RepoError::NothingToRemove.to_string(), "No reason to remove the file.");
        assert_eq!(
            RepoError::NonFastForward.to_string(),
            "Please pull down remote changes before pushing."
        );
    }

    #[test]
    fn test_categories() {
        assert_eq!(RepoError::EmptyMessage.category(), ErrorCategory::Usage);
        assert_eq!(RepoError::CommitNotFound.category(), ErrorCategory::NotFound);
        assert_eq!(RepoError::UntrackedConflict.category(), ErrorCategory::State);
        assert_eq!(RepoError::FetchIntoCurrentBranch.category(), ErrorCategory::State);
        assert!(RepoError::Fatal(anyhow::anyhow!("disk full")).is_fatal());
        assert!(RepoError::Timeout("remote".into()).is_fatal());
        assert!(!RepoError::NoChanges.is_fatal());
    }

    #[test]
    fn test_fatal_keeps_context() {
        let err: RepoError = anyhow::anyhow!("io failure").context("writing state").into();
        assert_eq!(err.to_string(), "writing state");
    }
}
