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

//! Output formatting for CLI commands.
//!
//! Everything a command reports goes to stdout as plain text, byte for byte
//! what scripts compare against. Only fatal failures use stderr, in red.

use chrono::{Local, TimeZone};
use console::style;
use sprig_versioning::{Commit, MergeOutcome, Oid, StatusReport};
use std::fmt::{self, Write};

/// Hex characters of each parent shown on a `Merge:` line
const SHORT_ID_LEN: usize = 7;

const DATE_FORMAT: &str = "%a %b %-d %H:%M:%S %Y %z";

/// Print a diagnostic or result line to stdout.
pub fn message(msg: &str) {
    println!("{msg}");
}

/// Print a fatal error to stderr.
pub fn error(msg: &str) {
    eprintln!("{} {}", style("error:").for_stderr().red().bold(), msg);
}

/// Render one `log` entry with dates in local time.
pub fn log_entry(oid: &Oid, commit: &Commit) -> String {
    log_entry_in(oid, commit, &Local)
}

/// Render one `log` entry with dates in `tz`.
///
/// ```text
/// ===
/// commit 3e8bf1d794ca2e9ef8a4007275acf3751c7170ff
/// Merge: 4975af1 2c1ead1
/// Date: Sat Nov 11 12:30:00 2017 -0800
/// Merged development into master.
///
/// ```
pub fn log_entry_in<Tz>(oid: &Oid, commit: &Commit, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let mut out = format!("===\ncommit {oid}\n");
    if let (Some(first), Some(second)) = (commit.parents.first(), commit.parents.second()) {
        let _ = writeln!(
            out,
            "Merge: {} {}",
            first.short(SHORT_ID_LEN),
            second.short(SHORT_ID_LEN)
        );
    }
    let date = commit.timestamp.with_timezone(tz).format(DATE_FORMAT);
    let _ = write!(out, "Date: {date}\n{}\n\n", commit.message);
    out
}

/// Render a status report, every section followed by a blank line.
pub fn status(report: &StatusReport) -> String {
    let mut out = String::from("=== Branches ===\n");
    for (name, current) in &report.branches {
        let marker = if *current { "*" } else { "" };
        let _ = writeln!(out, "{marker}{name}");
    }

    section(&mut out, "Staged Files", report.staged.iter());
    section(&mut out, "Removed Files", report.removed.iter());
    section(
        &mut out,
        "Modifications Not Staged For Commit",
        report
            .modified
            .iter()
            .map(|(path, change)| format!("{path} ({change})")),
    );
    section(&mut out, "Untracked Files", report.untracked.iter());
    out.push('\n');
    out
}

fn section<I>(out: &mut String, title: &str, lines: I)
where
    I: Iterator,
    I::Item: fmt::Display,
{
    let _ = write!(out, "\n=== {title} ===\n");
    for line in lines {
        let _ = writeln!(out, "{line}");
    }
}

/// What to print after a merge, if anything.
pub fn merge_outcome(outcome: &MergeOutcome) -> Option<&'static str> {
    match outcome {
        MergeOutcome::AlreadyAncestor => Some("Given branch is an ancestor of the current branch."),
        MergeOutcome::FastForwarded { .. } => Some("Current branch fast-forwarded."),
        MergeOutcome::Merged { .. } if outcome.has_conflicts() => {
            Some("Encountered a merge conflict.")
        }
        MergeOutcome::Merged { .. } => None,
    }
}
