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

/// Record the staged changes as a new commit on the current branch.
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    sprig commit \"Add chapter two\"")]
pub struct CommitCmd {
    /// Commit message
    #[arg(value_name = "MESSAGE", allow_hyphen_values = true)]
    pub message: Option<String>,
}

impl CommitCmd {
    pub async fn execute(&self, repo: &mut Repository) -> Result<()> {
        let message = self.message.as_deref().unwrap_or_default();
        let oid = repo.commit(message).await?;
        info!(commit = %oid, branch = %repo.current_branch(), "committed");
        Ok(())
    }
}
