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

use anyhow::Result;
use clap::Parser;
use sprig_versioning::{RepoError, Repository};

/// Restore a file or switch branches.
///
/// `checkout -- FILE` restores FILE from the current commit, and
/// `checkout COMMIT -- FILE` restores it from COMMIT (any unique id prefix).
/// Neither touches the staging area. `checkout BRANCH` replaces the working
/// files with the branch's snapshot and makes it the current branch.
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    sprig checkout -- notes.txt
    sprig checkout 3e8bf1d -- notes.txt
    sprig checkout feature")]
pub struct CheckoutCmd {
    /// Commit id or branch name
    #[arg(value_name = "COMMIT|BRANCH")]
    pub target: Option<String>,

    /// File to restore
    #[arg(last = true, value_name = "FILE")]
    pub file: Option<String>,
}

impl CheckoutCmd {
    pub async fn execute(&self, repo: &mut Repository) -> Result<()> {
        match (self.target.as_deref(), self.file.as_deref()) {
            (commit, Some(file)) => repo.checkout_file(commit, file).await?,
            (Some(branch), None) => repo.checkout_branch(branch).await?,
            (None, None) => return Err(RepoError::IncorrectOperands.into()),
        }
        Ok(())
    }
}
