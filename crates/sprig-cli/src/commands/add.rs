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
use sprig_versioning::{AddOutcome, Repository};
use tracing::info;

/// Stage a file for the next commit.
///
/// A file whose content matches the current commit is not staged, and any
/// earlier staged version of it is dropped. Adding a file also cancels a
/// pending removal of it.
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    sprig add notes.txt")]
pub struct AddCmd {
    /// File in the working directory
    #[arg(value_name = "FILE")]
    pub file: String,
}

impl AddCmd {
    pub async fn execute(&self, repo: &mut Repository) -> Result<()> {
        match repo.add(&self.file).await? {
            AddOutcome::Staged => info!(file = %self.file, "staged"),
            AddOutcome::Unchanged => info!(file = %self.file, "unchanged from HEAD"),
        }
        Ok(())
    }
}

/// Unstage a file, or stage the removal of a tracked file.
///
/// Removing a tracked file also deletes it from the working directory.
#[derive(Parser, Debug)]
pub struct RmCmd {
    /// File to unstage or remove
    #[arg(value_name = "FILE")]
    pub file: String,
}

impl RmCmd {
    pub async fn execute(&self, repo: &mut Repository) -> Result<()> {
        repo.remove(&self.file).await?;
        Ok(())
    }
}
