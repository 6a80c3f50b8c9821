mod cli;
mod config;
mod error;
mod output;
mod pattern;
mod workflows;

use anyhow::{bail, Context, Result};
use clap::Parser;
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};

use cli::Cli;
use error::MatchError;
use output::Reporter;
use pattern::PatternSet;
use workflows::{planner, renamer};

/// Containers recognized as video files.
const VIDEO_EXTENSIONS: &[&str] = &[
    "webm", "mkv", "flv", "vob", "ogv", "ogg", "rrc", "gifv", "mng", "mov", "avi", "qt", "wmv",
    "yuv", "rm", "asf", "amv", "mp4", "m4p", "m4v", "mpg", "mp2", "mpeg", "mpe", "mpv", "svi",
    "3gp", "3g2", "mxf", "roq", "nsv", "f4v", "f4p", "f4a", "f4b", "mod",
];

/// Subtitle formats eligible for renaming. "txt" is deliberately absent;
/// it is rare as a subtitle format and matches too many stray files.
const SUBTITLE_EXTENSIONS: &[&str] = &[
    "srt", "sub", "ass", "ssa", "vtt", "idx", "mpl", "dks", "lrc", "smi", "usf", "ttml", "xml",
];

/// Effective flags for a run, after merging CLI over config-file defaults.
#[derive(Debug, Clone, Copy)]
struct Options {
    force: bool,
    preserve: bool,
    recursive: bool,
    skip_season: bool,
    yes: bool,
}

impl Options {
    fn action_name(&self) -> &'static str {
        if self.preserve {
            "move and copy"
        } else {
            "rename"
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        if matches!(e.downcast_ref::<MatchError>(), Some(MatchError::Interrupted)) {
            println!("\nInterrupted. Exiting...");
            return;
        }
        eprintln!("{} {e}", "Error:".red());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let defaults = config::load_defaults()?;

    if cli.no_color || defaults.no_color {
        colored::control::set_override(false);
    }

    let opts = Options {
        force: cli.force,
        preserve: cli.preserve || defaults.preserve,
        recursive: cli.recursive || defaults.recursive,
        skip_season: cli.skip_season || defaults.skip_season,
        yes: cli.yes,
    };
    // An explicit CLI flag beats the opposite config default; clap already
    // rejects passing both flags at once.
    let reporter = Reporter {
        quiet: cli.quiet || (defaults.quiet && !cli.verbose),
        verbose: cli.verbose || (defaults.verbose && !cli.quiet),
    };
    if reporter.quiet && reporter.verbose {
        bail!("config file sets both quiet and verbose; they cannot be used simultaneously");
    }

    let dir = cli.path.unwrap_or_else(|| PathBuf::from("."));
    if !dir.is_dir() {
        bail!("\"{}\" is not a directory", dir.display());
    }

    match_directory(&dir, opts, &reporter)
}

/// Matches and renames within one directory. Subdirectories are visited
/// first (in filename order) under --recursive; files are only ever paired
/// with files of the same directory. Extraction failures, ambiguity under
/// --yes and prompt aborts skip the directory's batch; filesystem errors
/// propagate and halt the run.
fn match_directory(dir: &Path, opts: Options, reporter: &Reporter) -> Result<()> {
    let entries = list_directory(dir)?;

    if opts.recursive {
        for subdir in entries.iter().filter(|path| path.is_dir()) {
            match_directory(subdir, opts, reporter)?;
        }
    }

    if reporter.verbose {
        println!(
            "Matching in {}",
            format!("\"{}\"", dir.display()).blue()
        );
    } else if !reporter.quiet && opts.recursive {
        println!("{}:", format!("\"{}\"", dir.display()).blue());
    }

    let videos = filenames_with_extension(&entries, VIDEO_EXTENSIONS);
    let subtitles = filenames_with_extension(&entries, SUBTITLE_EXTENSIONS);

    if reporter.verbose {
        println!("{}", "----- Videos Found -----".magenta());
        for (i, name) in videos.iter().enumerate() {
            println!("{}\t{name}", format!("{}.", i + 1).cyan());
        }
    }
    reporter.info(format!(
        "Found {} video file(s).",
        videos.len().to_string().cyan()
    ));
    if reporter.verbose {
        println!("{}", "---- Subtitles Found ----".magenta());
        for (i, name) in subtitles.iter().enumerate() {
            println!("{}\t{name}", format!("{}.", i + 1).cyan());
        }
    }
    reporter.info(format!(
        "Found {} subtitle file(s).",
        subtitles.len().to_string().cyan()
    ));

    if videos.is_empty() || subtitles.is_empty() {
        reporter.info(format!("{} Exiting...", "No files to match.".yellow()));
        return Ok(());
    }

    let sets = PatternSet::build(&videos, opts.skip_season).and_then(|video_set| {
        PatternSet::build(&subtitles, opts.skip_season).map(|sub_set| (video_set, sub_set))
    });
    let (video_set, subtitle_set) = match sets {
        Ok(sets) => sets,
        Err(e) => {
            // Aborts this directory's batch only; siblings still run.
            reporter.error(e);
            return Ok(());
        }
    };

    let videos_ambiguous = !video_set.is_one_to_one();
    let subs_ambiguous = !subtitle_set.is_one_to_one();
    if (videos_ambiguous || subs_ambiguous) && opts.yes {
        // Unattended runs cannot adjudicate bucket collisions.
        reporter.error(MatchError::AmbiguousMatch {
            collection: if videos_ambiguous { "videos" } else { "subs" },
        });
        return Ok(());
    }

    if reporter.verbose || videos_ambiguous {
        print_parsed_set(&video_set, "----- Videos Parsed -----", "video");
    }
    if videos_ambiguous {
        reporter.warn("Couldn't do a 1 to 1 matching on videos. Taking the first option(s).");
    }
    if reporter.verbose || subs_ambiguous {
        print_parsed_set(&subtitle_set, "---- Subtitles Parsed ----", "subtitle");
    }
    if subs_ambiguous {
        reporter.warn("Couldn't do a 1 to 1 matching on subs. Taking the first option(s).");
    }

    if reporter.verbose {
        println!("{}", "---- Matching ----".magenta());
        println!("{}:", format!("\"{}\"", dir.display()).blue());
    }
    let pairs = video_set.pair_with(&subtitle_set);
    let plan = planner::plan(&pairs, dir, opts.force);

    if plan.already_named > 0 {
        reporter.info(format!(
            "{} file(s) are already with the correct name.",
            plan.already_named.to_string().cyan()
        ));
        if opts.force {
            reporter.info(
                format!("Forcing {} anyway.", opts.action_name()).yellow(),
            );
        }
    }
    if reporter.quiet && !plan.collisions.is_empty() {
        reporter
            .error("Not all new subtitle names are available. Please run without the --quiet flag.");
    }
    for target in &plan.collisions {
        println!(
            "{} \"{target}\"{}",
            "Filename".yellow(),
            " is not available. Removing it from matches.".yellow()
        );
    }

    // The listing is shown even under --quiet; the prompt needs it.
    if !(reporter.quiet && opts.yes) && !plan.actions.is_empty() {
        if reporter.quiet && opts.recursive {
            // Path printed for clarity during quiet recursive runs.
            println!("{}:", format!("\"{}\"", dir.display()).blue());
        }
        let width = plan
            .actions
            .iter()
            .map(|action| action.subtitle.chars().count())
            .max()
            .unwrap_or(0);
        for action in &plan.actions {
            println!(
                "{}{} -> {}",
                action.subtitle.red(),
                column_padding(&action.subtitle, width),
                action.target.green()
            );
        }
    }

    if plan.actions.is_empty() {
        reporter.info(format!("{} Exiting...", "No matches found.".yellow()));
        return Ok(());
    }
    reporter.info(format!(
        "{} match(es) found.",
        plan.actions.len().to_string().cyan()
    ));

    if !opts.yes {
        match renamer::confirm(opts.action_name(), plan.actions.len()) {
            Ok(true) => {}
            Ok(false) => return Ok(()),
            // Ctrl-C / EOF terminates the whole run, not just this directory.
            Err(e @ MatchError::Interrupted) => return Err(e.into()),
            // A decline or exhausted retries already printed its message;
            // sibling directories still run.
            Err(_) => return Ok(()),
        }
    }

    let show_progress = !(reporter.quiet && opts.yes);
    if opts.preserve {
        renamer::preserve_batch(dir, &plan.actions, show_progress)?;
    } else {
        renamer::rename_batch(dir, &plan.actions, show_progress)?;
    }

    Ok(())
}

/// Spaces padding a name out to the listing column, counting characters
/// rather than bytes so non-ASCII names stay aligned.
fn column_padding(name: &str, width: usize) -> String {
    " ".repeat(width.saturating_sub(name.chars().count()))
}

fn print_parsed_set(set: &PatternSet, title: &str, kind: &str) {
    println!("{}", title.magenta());
    for (id, names) in set.iter() {
        let header = id.to_string();
        for (i, name) in names.iter().enumerate() {
            if i == 0 {
                println!("{}:\t{name}", header.cyan());
            } else {
                println!("{}\t{name}", " ".repeat(header.len() + 1));
            }
        }
    }
    println!(
        "Parsed {} {kind} file(s).",
        set.file_count().to_string().cyan()
    );
}

/// Directory entries sorted by name, so scans and renames run in a stable
/// filename order.
fn list_directory(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut entries = Vec::new();
    for entry in
        fs::read_dir(dir).with_context(|| format!("failed to read directory \"{}\"", dir.display()))?
    {
        entries.push(entry?.path());
    }
    entries.sort();
    Ok(entries)
}

fn filenames_with_extension(entries: &[PathBuf], extensions: &[&str]) -> Vec<String> {
    entries
        .iter()
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(|ext| ext.to_str())
                .map_or(false, |ext| {
                    extensions.iter().any(|want| ext.eq_ignore_ascii_case(want))
                })
        })
        .filter_map(|path| path.file_name().and_then(|name| name.to_str()))
        .map(String::from)
        .collect()
}
