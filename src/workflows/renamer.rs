use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::error::MatchError;

use super::planner::RenameAction;

/// Directory the original subtitles are moved into under --preserve.
pub const PRESERVE_DIRECTORY: &str = "(subs_match)old_subs";

const MAX_PROMPT_TRIES: usize = 10;

/// Asks the user to confirm the batch. Empty input counts as yes. A
/// declined prompt or `MAX_PROMPT_TRIES` invalid answers fail with
/// `Aborted` (the directory's batch is skipped); Ctrl-C / EOF fail with
/// `Interrupted`, which terminates the whole run.
pub fn confirm(action_name: &str, count: usize) -> Result<bool, MatchError> {
    let files = if count == 1 { "this file" } else { "these files" };
    let prompt = format!(
        "Do you wish to {action_name} {files}? [{}/{}] ",
        "Y".green(),
        "n".red()
    );

    let mut rl = DefaultEditor::new().map_err(|_| MatchError::Interrupted)?;
    ask(|| rl.readline(&prompt))
}

/// The prompt retry loop, separated from the terminal editor so the retry
/// and interrupt behavior can be exercised directly.
fn ask<F>(mut read_line: F) -> Result<bool, MatchError>
where
    F: FnMut() -> Result<String, ReadlineError>,
{
    for _ in 0..MAX_PROMPT_TRIES {
        let line = match read_line() {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                return Err(MatchError::Interrupted)
            }
            Err(_) => return Err(MatchError::Interrupted),
        };
        match parse_answer(&line) {
            Some(answer) => return Ok(answer),
            None => println!("{}", "Please type y or n.".yellow()),
        }
    }
    println!(
        "{} Exiting...",
        format!("Maximum of {MAX_PROMPT_TRIES} tries reached.").red()
    );
    Err(MatchError::Aborted)
}

/// Empty input defaults to yes.
fn parse_answer(line: &str) -> Option<bool> {
    match line.trim() {
        "" | "y" | "Y" => Some(true),
        "n" | "N" => Some(false),
        _ => None,
    }
}

/// Renames the planned subtitles in place, in batch order. Not
/// transactional: a failure leaves earlier renames in place, which the
/// per-file progress output makes visible.
pub fn rename_batch(dir: &Path, actions: &[RenameAction], show_progress: bool) -> Result<()> {
    for action in actions {
        if show_progress {
            println!(
                "Renaming {} -> {}",
                format!("\"{}\"", action.subtitle).red(),
                format!("\"{}\"", action.target).green()
            );
        }
        fs::rename(dir.join(&action.subtitle), dir.join(&action.target))
            .with_context(|| format!("failed to rename \"{}\"", action.subtitle))?;
    }
    if show_progress {
        println!(
            "Renamed {} file(s).",
            actions.len().to_string().cyan()
        );
    }
    Ok(())
}

/// Moves the original subtitles into a fresh sibling directory, then
/// copies them back out under the new names.
pub fn preserve_batch(dir: &Path, actions: &[RenameAction], show_progress: bool) -> Result<()> {
    let backup_dir = find_unique_preserve_dir(dir);
    fs::create_dir(&backup_dir)
        .with_context(|| format!("failed to create \"{}\"", backup_dir.display()))?;
    let backup_name = backup_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| PRESERVE_DIRECTORY.to_string());

    for action in actions {
        let moved = backup_dir.join(&action.subtitle);
        if show_progress {
            println!(
                "Moving {} -> {}",
                format!("\"{}\"", action.subtitle).red(),
                format!("\"{}\"", moved.display()).green()
            );
        }
        fs::rename(dir.join(&action.subtitle), &moved)
            .with_context(|| format!("failed to move \"{}\"", action.subtitle))?;
    }
    if show_progress {
        println!(
            "Moved {} file(s) to directory {}.",
            actions.len().to_string().cyan(),
            format!("\"{backup_name}\"").blue()
        );
    }

    for action in actions {
        let moved = backup_dir.join(&action.subtitle);
        if show_progress {
            println!(
                "Copying {} -> {}",
                format!("\"{}\"", moved.display()).red(),
                format!("\"{}\"", action.target).green()
            );
        }
        fs::copy(&moved, dir.join(&action.target))
            .with_context(|| format!("failed to copy \"{}\"", action.subtitle))?;
    }
    if show_progress {
        println!(
            "Copied {} file(s) from directory {}.",
            actions.len().to_string().cyan(),
            format!("\"{backup_name}\"").blue()
        );
    }
    Ok(())
}

/// First of `(subs_match)old_subs`, `(subs_match)old_subs1`, ... that does
/// not exist yet.
fn find_unique_preserve_dir(dir: &Path) -> PathBuf {
    let mut path = dir.join(PRESERVE_DIRECTORY);
    let mut counter = 1;
    while path.is_dir() {
        path = dir.join(format!("{PRESERVE_DIRECTORY}{counter}"));
        counter += 1;
    }
    path
}
