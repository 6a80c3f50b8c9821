pub mod extract;
pub mod set;

pub use set::{MatchPair, PatternSet};

use std::fmt;

use crate::error::MatchError;

/// Season/episode identifier extracted from a filename, used as the join
/// key when matching subtitles to videos.
///
/// `season == None` means season matching is skipped for this run; every
/// identifier built with `skip_season` carries `None`, so the derived
/// ordering degenerates to episode-only, while normal runs order
/// season-major, episode-minor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EpisodeId {
    pub season: Option<u64>,
    pub episode: u64,
}

impl EpisodeId {
    pub fn new(season: Option<u64>, episode: u64) -> Self {
        EpisodeId { season, episode }
    }
}

impl fmt::Display for EpisodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.season {
            Some(season) => write!(f, "S{}E{}", season, self.episode),
            None => write!(f, "E{}", self.episode),
        }
    }
}

/// A filename bound to the identifier extracted from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternEntry {
    pub name: String,
    pub id: EpisodeId,
}

impl PatternEntry {
    pub fn parse(name: &str, skip_season: bool) -> Result<Self, MatchError> {
        let id = extract::extract(name, skip_season)?;
        Ok(PatternEntry {
            name: name.to_string(),
            id,
        })
    }
}
