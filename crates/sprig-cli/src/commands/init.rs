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

use crate::repo::Session;
use anyhow::Result;
use clap::Parser;
use sprig_config::SprigConfig;
use std::path::Path;

/// Create an empty repository in the current directory.
///
/// The new repository has one commit, "initial commit", dated at the Unix
/// epoch, and a single branch `master` pointing at it. Every repository
/// starts from the same root commit, so histories can be exchanged between
/// any two of them.
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:
    sprig init

SEE ALSO:
    sprig-status(1), sprig-add(1)")]
pub struct InitCmd {}

impl InitCmd {
    pub async fn execute(&self, root: &Path, config: &SprigConfig) -> Result<()> {
        Session::init(root, config).await?;
        Ok(())
    }
}
