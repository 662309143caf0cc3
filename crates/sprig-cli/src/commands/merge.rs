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

use crate::output;
use anyhow::Result;
use clap::Parser;
use sprig_versioning::{MergeOutcome, Repository};
use tracing::info;

/// Merge a branch into the current branch.
///
/// Files changed on only one side since the split point take that side's
/// version. Files changed differently on both sides are written with
/// conflict markers and committed as they are.
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    sprig merge feature")]
pub struct MergeCmd {
    /// Branch to merge into the current branch
    #[arg(value_name = "BRANCH")]
    pub branch: String,
}

impl MergeCmd {
    pub async fn execute(&self, repo: &mut Repository) -> Result<()> {
        let outcome = repo.merge(&self.branch).await?;
        report(&outcome);
        Ok(())
    }
}

/// Log and print the result of a merge.
pub fn report(outcome: &MergeOutcome) {
    if let MergeOutcome::Merged { commit, conflicts } = outcome {
        info!(commit = %commit, conflicts = conflicts.len(), "merge commit created");
    }
    if let Some(msg) = output::merge_outcome(outcome) {
        output::message(msg);
    }
}
