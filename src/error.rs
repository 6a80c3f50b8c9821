use thiserror::Error;

/// Failures produced while matching one directory's files.
///
/// Filesystem errors (permissions, disk full) are not represented here;
/// they propagate as `anyhow::Error` and halt the remaining batch.
#[derive(Debug, Error)]
pub enum MatchError {
    /// A filename contains no recognizable episode number. This aborts
    /// identifier-set construction for the whole batch.
    #[error("\"{name}\" parsing failed. Couldn't extract an episode number.")]
    NoIdentifier { name: String },

    /// Two or more files in a collection resolved to the same identifier
    /// while running unattended (--yes), so nobody can adjudicate.
    #[error("Couldn't do a 1 to 1 matching on {collection}. Please run without the --yes flag.")]
    AmbiguousMatch { collection: &'static str },

    /// The user declined the confirmation prompt or exhausted the allowed
    /// number of invalid answers. Skips the directory's batch; sibling
    /// directories still run.
    #[error("aborted by user")]
    Aborted,

    /// Ctrl-C or EOF at the confirmation prompt. Terminates the whole run
    /// before any further mutation.
    #[error("interrupted")]
    Interrupted,
}
