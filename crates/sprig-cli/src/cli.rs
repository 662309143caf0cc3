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

//! Argument parsing and dispatch.
//!
//! Parse failures never reach clap's own error printer: they are reduced to
//! one of three fixed diagnostics by [`usage_diagnostic`].

use crate::commands::*;
use crate::repo::Session;
use crate::output;
use anyhow::Result;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use sprig_config::SprigConfig;
use sprig_observability::{init_tracing_with_config, LogConfig, LogFormat};
use sprig_versioning::RepoError;
use std::ffi::OsString;
use std::path::Path;
use tracing::debug;

/// Printed when no subcommand is given
pub const NO_COMMAND: &str = "Please enter a command.";

/// Printed for an unknown subcommand
pub const NO_SUCH_COMMAND: &str = "No command with that name exists.";

/// Printed when a known subcommand gets the wrong operands
pub const INCORRECT_OPERANDS: &str = "Incorrect operands.";

#[derive(Parser, Debug)]
#[command(name = "sprig")]
#[command(version, about = "A small content-addressed version control system")]
#[command(propagate_version = true)]
#[command(author = "Sprig Contributors")]
#[command(arg_required_else_help = false)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Log debug events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable logging
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a repository in the current directory
    Init(InitCmd),

    /// Stage a file for the next commit
    Add(AddCmd),

    /// Record the staged changes
    Commit(CommitCmd),

    /// Unstage a file, or stage its removal if it is tracked
    Rm(RmCmd),

    /// Show the history of the current branch
    Log(LogCmd),

    /// Show every commit ever made
    GlobalLog(GlobalLogCmd),

    /// Print the ids of commits with a given message
    Find(FindCmd),

    /// Show branches, staged changes and working tree state
    Status(StatusCmd),

    /// Restore a file, or switch branches
    Checkout(CheckoutCmd),

    /// Create a branch at the current commit
    Branch(BranchCmd),

    /// Delete a branch pointer
    RmBranch(RmBranchCmd),

    /// Check out a commit and move the current branch to it
    Reset(ResetCmd),

    /// Merge a branch into the current branch
    Merge(MergeCmd),

    /// Register a remote repository
    AddRemote(AddRemoteCmd),

    /// Forget a remote repository
    RmRemote(RmRemoteCmd),

    /// Send a branch to a remote
    Push(PushCmd),

    /// Copy a remote branch into `<remote>/<branch>`
    Fetch(FetchCmd),

    /// Fetch a remote branch and merge it
    Pull(PullCmd),
}

/// Reduce a parse failure to the diagnostic the user sees.
///
/// Returns `None` for help and version requests, which clap prints itself.
pub fn usage_diagnostic(args: &[OsString], kind: ErrorKind) -> Option<&'static str> {
    if matches!(kind, ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        return None;
    }

    let name = args
        .iter()
        .skip(1)
        .map(|arg| arg.to_string_lossy())
        .find(|arg| !arg.starts_with('-'));

    Some(match name {
        None => NO_COMMAND,
        Some(name) if Cli::command().find_subcommand(&*name).is_none() => NO_SUCH_COMMAND,
        Some(_) => INCORRECT_OPERANDS,
    })
}

/// Install the tracing subscriber for this invocation.
pub fn init_logging(cli: &Cli, config: &SprigConfig) {
    if cli.quiet {
        return;
    }

    let format = config.log.format.parse::<LogFormat>().unwrap_or_default();
    let level = if cli.verbose {
        Some("debug".to_string())
    } else if std::env::var_os("RUST_LOG").is_some() {
        None
    } else {
        Some(config.log.level.clone())
    };

    let mut log_config = LogConfig::new()
        .with_format(format)
        .with_color(console::colors_enabled_stderr());
    log_config.level = level;

    // Ignore errors if already initialized
    init_tracing_with_config(log_config).ok();
}

/// Execute `command` against the repository whose working tree is `root`.
pub async fn run(command: Option<Commands>, root: &Path, config: &SprigConfig) -> Result<()> {
    let Some(command) = command else {
        output::message(NO_COMMAND);
        return Ok(());
    };
    debug!(?command, root = %root.display(), "dispatching");

    let mut session = match &command {
        Commands::Init(cmd) => return cmd.execute(root, config).await,
        _ => Session::open(root, config).await?,
    };
    let repo = session.repository_mut();

    match command {
        Commands::Init(_) => Err(RepoError::AlreadyInitialized.into()),
        Commands::Add(cmd) => cmd.execute(repo).await,
        Commands::Commit(cmd) => cmd.execute(repo).await,
        Commands::Rm(cmd) => cmd.execute(repo).await,
        Commands::Log(cmd) => cmd.execute(repo).await,
        Commands::GlobalLog(cmd) => cmd.execute(repo).await,
        Commands::Find(cmd) => cmd.execute(repo).await,
        Commands::Status(cmd) => cmd.execute(repo).await,
        Commands::Checkout(cmd) => cmd.execute(repo).await,
        Commands::Branch(cmd) => cmd.execute(repo).await,
        Commands::RmBranch(cmd) => cmd.execute(repo).await,
        Commands::Reset(cmd) => cmd.execute(repo).await,
        Commands::Merge(cmd) => cmd.execute(repo).await,
        Commands::AddRemote(cmd) => cmd.execute(repo).await,
        Commands::RmRemote(cmd) => cmd.execute(repo).await,
        Commands::Push(cmd) => cmd.execute(repo).await,
        Commands::Fetch(cmd) => cmd.execute(repo).await,
        Commands::Pull(cmd) => cmd.execute(repo).await,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    fn diagnose(list: &[&str]) -> Option<&'static str> {
        let args = args(list);
        let err = Cli::try_parse_from(&args).unwrap_err();
        usage_diagnostic(&args, err.kind())
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_command_parses() {
        let cli = Cli::try_parse_from(args(&["sprig"])).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_unknown_command() {
        assert_eq!(diagnose(&["sprig", "frobnicate"]), Some(NO_SUCH_COMMAND));
        assert_eq!(diagnose(&["sprig", "globallog"]), Some(NO_SUCH_COMMAND));
    }

    #[test]
    fn test_wrong_operand_counts() {
        assert_eq!(diagnose(&["sprig", "add"]), Some(INCORRECT_OPERANDS));
        assert_eq!(diagnose(&["sprig", "add", "a", "b"]), Some(INCORRECT_OPERANDS));
        assert_eq!(diagnose(&["sprig", "status", "x"]), Some(INCORRECT_OPERANDS));
        assert_eq!(diagnose(&["sprig", "push", "origin"]), Some(INCORRECT_OPERANDS));
        assert_eq!(diagnose(&["sprig", "checkout", "a", "b"]), Some(INCORRECT_OPERANDS));
    }

    #[test]
    fn test_help_is_left_to_clap() {
        assert_eq!(diagnose(&["sprig", "--help"]), None);
    }

    #[test]
    fn test_kebab_case_names() {
        let cli = Cli::try_parse_from(args(&["sprig", "global-log"])).unwrap();
        assert!(matches!(cli.command, Some(Commands::GlobalLog(_))));

        let cli = Cli::try_parse_from(args(&["sprig", "rm-branch", "b"])).unwrap();
        assert!(matches!(cli.command, Some(Commands::RmBranch(_))));

        let cli = Cli::try_parse_from(args(&["sprig", "add-remote", "r", "../r/.sprig"])).unwrap();
        assert!(matches!(cli.command, Some(Commands::AddRemote(_))));
    }

    #[test]
    fn test_checkout_forms() {
        let parse = |list: &[&str]| match Cli::try_parse_from(args(list)).unwrap().command {
            Some(Commands::Checkout(cmd)) => (cmd.target, cmd.file),
            other => panic!("unexpected {other:?}"),
        };

        assert_eq!(parse(&["sprig", "checkout", "--", "a.txt"]), (None, Some("a.txt".into())));
        assert_eq!(
            parse(&["sprig", "checkout", "abc123", "--", "a.txt"]),
            (Some("abc123".into()), Some("a.txt".into()))
        );
        assert_eq!(parse(&["sprig", "checkout", "feat"]), (Some("feat".into()), None));
    }

    #[test]
    fn test_commit_message_is_optional_at_parse_time() {
        let cli = Cli::try_parse_from(args(&["sprig", "commit"])).unwrap();
        match cli.command {
            Some(Commands::Commit(cmd)) => assert!(cmd.message.is_none()),
            other => panic!("unexpected {other:?}"),
        }
    }
}
