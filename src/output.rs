use std::fmt::Display;

use colored::Colorize;

/// Console gating for a run. Errors always reach stderr; `info` respects
/// --quiet; the `verbose` flag gates the found/parsed listings at their
/// call sites. Coloring of individual fragments also happens at the call
/// sites; `--no-color` disables it globally through
/// `colored::control::set_override`.
#[derive(Debug, Clone, Copy)]
pub struct Reporter {
    pub quiet: bool,
    pub verbose: bool,
}

impl Reporter {
    pub fn error(&self, msg: impl Display) {
        eprintln!("{}", msg.to_string().red());
    }

    pub fn warn(&self, msg: impl Display) {
        println!("{}", msg.to_string().yellow());
    }

    pub fn info(&self, msg: impl Display) {
        if !self.quiet {
            println!("{msg}");
        }
    }
}
