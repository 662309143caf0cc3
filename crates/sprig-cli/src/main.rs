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
use sprig_cli::cli::{self, Cli};
use sprig_cli::{output, repo};
use sprig_versioning::RepoError;
use std::ffi::OsString;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<OsString> = std::env::args_os().collect();
    let cli = match Cli::try_parse_from(&args) {
        Ok(cli) => cli,
        Err(err) => {
            match cli::usage_diagnostic(&args, err.kind()) {
                Some(diagnostic) => output::message(diagnostic),
                None => err.print()?,
            }
            return Ok(());
        }
    };

    let root = std::env::current_dir()?;
    let config = match repo::load_config(&root).await {
        Ok(config) => config,
        Err(e) => {
            output::error(&format!("{e:#}"));
            std::process::exit(1);
        }
    };

    // Logs go to stderr so the diagnostics on stdout stay exact
    cli::init_logging(&cli, &config);

    if let Err(e) = cli::run(cli.command, &root, &config).await {
        match e.downcast_ref::<RepoError>() {
            Some(err) if !err.is_fatal() => output::message(&err.to_string()),
            _ => {
                output::error(&format!("{e:#}"));
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
