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

//! Command line interface for Sprig
//!
//! The `sprig` binary is a thin layer over [`sprig_versioning::Repository`]:
//! [`cli`] parses arguments and dispatches, [`commands`] holds one handler per
//! subcommand, [`repo`] opens the repository in the current directory under
//! its lock, and [`output`] renders logs, status reports and diagnostics.

pub mod cli;
pub mod commands;
pub mod output;
pub mod repo;
