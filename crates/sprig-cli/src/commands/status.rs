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

/// Show branches, staged changes and the state of the working directory.
#[derive(Parser, Debug)]
pub struct StatusCmd {}

impl StatusCmd {
    pub async fn execute(&self, repo: &Repository) -> Result<()> {
        let report = repo.status().await?;
        print!("{}", output::status(&report));
        Ok(())
    }
}
