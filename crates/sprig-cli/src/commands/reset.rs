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

/// Check out every file of a commit and move the current branch to it.
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    sprig reset 3e8bf1d")]
pub struct ResetCmd {
    /// Commit id, or any unique prefix of one
    #[arg(value_name = "COMMIT")]
    pub commit: String,
}

impl ResetCmd {
    pub async fn execute(&self, repo: &mut Repository) -> Result<()> {
        let oid = repo.reset(&self.commit).await?;
        info!(commit = %oid, branch = %repo.current_branch(), "reset");
        Ok(())
    }
}
