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
use sprig_versioning::Repository;

/// Show the current branch's history, newest first.
///
/// Only first parents are followed, so commits merged in from other
/// branches appear in `global-log` but not here.
#[derive(Parser, Debug)]
pub struct LogCmd {}

impl LogCmd {
    pub async fn execute(&self, repo: &Repository) -> Result<()> {
        for (oid, commit) in repo.log().await? {
            print!("{}", output::log_entry(&oid, &commit));
        }
        Ok(())
    }
}

/// Show every commit in the repository, ordered by id.
#[derive(Parser, Debug)]
pub struct GlobalLogCmd {}

impl GlobalLogCmd {
    pub async fn execute(&self, repo: &Repository) -> Result<()> {
        for (oid, commit) in repo.global_log().await? {
            print!("{}", output::log_entry(&oid, &commit));
        }
        Ok(())
    }
}

/// Print the id of every commit with exactly the given message.
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    sprig find \"initial commit\"")]
pub struct FindCmd {
    /// Commit message to look for
    #[arg(value_name = "MESSAGE", allow_hyphen_values = true)]
    pub message: String,
}

impl FindCmd {
    pub async fn execute(&self, repo: &Repository) -> Result<()> {
        for oid in repo.find(&self.message).await? {
            output::message(&oid.to_hex());
        }
        Ok(())
    }
}
