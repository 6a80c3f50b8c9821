use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "subs-match")]
#[command(about = "Matches the subtitle filenames to the video filenames of a directory")]
pub struct Cli {
    /// Directory containing the files; defaults to the current directory
    pub path: Option<PathBuf>,

    /// Rename/copy even files that already have the correct name
    #[arg(short, long)]
    pub force: bool,

    /// Disable ANSI color output
    #[arg(short = 'n', long = "no-color")]
    pub no_color: bool,

    /// Copy subtitles to the new names and move the originals into a sub-directory
    #[arg(short, long)]
    pub preserve: bool,

    /// Recurse into sub-directories (files are only matched within their own directory)
    #[arg(short, long)]
    pub recursive: bool,

    /// Ignore season numbers and match on episode number alone
    #[arg(short, long)]
    pub skip_season: bool,

    /// Only show errors and the confirmation prompt
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Also show the files found and the parsing results
    #[arg(short, long)]
    pub verbose: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from(["subs-match", "-r", "-s", "--yes", "/tmp/shows"]);
        assert!(cli.recursive);
        assert!(cli.skip_season);
        assert!(cli.yes);
        assert!(!cli.force);
        assert_eq!(cli.path, Some(PathBuf::from("/tmp/shows")));
    }

    #[test]
    fn test_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["subs-match", "-q", "-v"]).is_err());
    }
}
