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

//! Commands that exchange history with a remote.

use super::merge;
use anyhow::Result;
use clap::Parser;
use sprig_versioning::{tracking_branch, Repository};
use tracing::info;

/// Send the local head to a branch of a remote.
///
/// The remote branch must be in the first-parent history of the local head.
/// Missing commits and their files are copied oldest first, then the remote
/// branch is moved.
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    sprig push origin master")]
pub struct PushCmd {
    /// Name of the remote
    #[arg(value_name = "REMOTE")]
    pub remote: String,

    /// Remote branch to update
    #[arg(value_name = "BRANCH")]
    pub branch: String,
}

impl PushCmd {
    pub async fn execute(&self, repo: &Repository) -> Result<()> {
        let copied = repo.push(&self.remote, &self.branch).await?;
        info!(remote = %self.remote, branch = %self.branch, commits = copied, "pushed");
        Ok(())
    }
}

/// Copy a remote branch into the local branch `REMOTE/BRANCH`.
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    sprig fetch origin master
    sprig checkout origin/master")]
pub struct FetchCmd {
    /// Name of the remote
    #[arg(value_name = "REMOTE")]
    pub remote: String,

    /// Remote branch to fetch
    #[arg(value_name = "BRANCH")]
    pub branch: String,
}

impl FetchCmd {
    pub async fn execute(&self, repo: &mut Repository) -> Result<()> {
        let copied = repo.fetch(&self.remote, &self.branch).await?;
        info!(
            branch = %tracking_branch(&self.remote, &self.branch),
            commits = copied,
            "fetched"
        );
        Ok(())
    }
}

/// Fetch a remote branch, then merge `REMOTE/BRANCH` into the current branch.
#[derive(Parser, Debug)]
pub struct PullCmd {
    /// Name of the remote
    #[arg(value_name = "REMOTE")]
    pub remote: String,

    /// Remote branch to pull
    #[arg(value_name = "BRANCH")]
    pub branch: String,
}

impl PullCmd {
    pub async fn execute(&self, repo: &mut Repository) -> Result<()> {
        let outcome = repo.pull(&self.remote, &self.branch).await?;
        merge::report(&outcome);
        Ok(())
    }
}
