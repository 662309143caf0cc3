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

/// Register a remote repository under a name.
///
/// The address is the path of the remote's `.sprig` directory, absolute or
/// relative to the current directory. It is not checked until used.
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    sprig add-remote origin ../shared/.sprig")]
pub struct AddRemoteCmd {
    /// Name of the remote
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Path to the remote `.sprig` directory
    #[arg(value_name = "ADDRESS")]
    pub address: String,
}

impl AddRemoteCmd {
    pub async fn execute(&self, repo: &mut Repository) -> Result<()> {
        repo.add_remote(&self.name, &self.address).await?;
        Ok(())
    }
}

/// Forget a remote repository.
#[derive(Parser, Debug)]
pub struct RmRemoteCmd {
    /// Name of the remote
    #[arg(value_name = "NAME")]
    pub name: String,
}

impl RmRemoteCmd {
    pub async fn execute(&self, repo: &mut Repository) -> Result<()> {
        repo.remove_remote(&self.name).await?;
        Ok(())
    }
}
