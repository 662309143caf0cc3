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
use sprig_versioning::Repository;
use tracing::info;

/// Create a branch pointing at the current commit.
///
/// The current branch does not change.
#[derive(Parser, Debug)]
pub struct BranchCmd {
    /// Name of the new branch
    #[arg(value_name = "NAME")]
    pub name: String,
}

impl BranchCmd {
    pub async fn execute(&self, repo: &mut Repository) -> Result<()> {
        repo.create_branch(&self.name).await?;
        info!(branch = %self.name, "created branch");
        Ok(())
    }
}

/// Delete a branch pointer. Its commits are kept.
#[derive(Parser, Debug)]
pub struct RmBranchCmd {
    /// Branch to delete
    #[arg(value_name = "NAME")]
    pub name: String,
}

impl RmBranchCmd {
    pub async fn execute(&self, repo: &mut Repository) -> Result<()> {
        repo.remove_branch(&self.name).await?;
        Ok(())
    }
}
