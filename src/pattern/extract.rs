use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::MatchError;

use super::EpisodeId;

// Every pattern requires the number to sit on a word-ish boundary so that
// quality tags like "1080p" or "x264" never match. The regex crate has no
// lookaround, so the boundaries are consuming character classes; wherever a
// tag must be stripped from the filename afterwards, the tag itself sits in
// an inner capture group and only that range is removed, leaving the
// separators around it intact.

/// Combined season+episode tags, tried before anything else.
static IDENTIFIER_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        // S01E02, s1ep2, S01xE02
        Regex::new(r"(?:^|[^A-Za-z0-9])[Ss](\d{1,2})[Xx]?[Ee][Pp]?(\d{1,4})(?:[^0-9]|$)")
            .unwrap(),
        // 1x02
        Regex::new(r"(?:^|[^A-Za-z0-9])(\d{1,2})[Xx](\d{1,4})(?:[^A-Za-z0-9]|$)").unwrap(),
    ]
});

/// Standalone season tags; group 1 is the whole tag, group 2 the number.
static SEASON_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?:^|[^A-Za-z0-9])([Ss](\d{1,2}))(?:[^A-Za-z0-9]|$)").unwrap(),
        Regex::new(
            r"(?:^|[^A-Za-z0-9])([Ss][Ee][Aa][Ss][Oo][Nn][^A-Za-z0-9]?(\d{1,2}))(?:[^0-9]|$)",
        )
        .unwrap(),
    ]
});

/// Standalone episode tags.
static EPISODE_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?:^|[^A-Za-z0-9])[Ee][Pp]?(\d{1,4})(?:[^A-Za-z0-9]|$)").unwrap(),
        Regex::new(
            r"(?:^|[^A-Za-z0-9])[Ee][Pp][Ii][Ss][Oo][Dd][Ee][^A-Za-z0-9]?(\d{1,4})(?:[^0-9]|$)",
        )
        .unwrap(),
    ]
});

/// Bare-number fallback tiers: an episode-sized number first, else a year
/// (e.g. for movies), else whatever number appears at all.
static NUMBER_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?:^|[^A-Za-z0-9])(\d{1,3})(?:[^A-Za-z0-9]|$)").unwrap(),
        Regex::new(r"(?:^|[^A-Za-z0-9])(\d{4})(?:[^A-Za-z0-9]|$)").unwrap(),
        Regex::new(r"(?:^|[^A-Za-z0-9])(\d{5,})(?:[^A-Za-z0-9]|$)").unwrap(),
    ]
});

/// Extracts the season/episode identifier from a filename.
///
/// The cascade prefers explicit season+episode tags, then an episode-only
/// tag (with the season tag searched independently, defaulting to 1), and
/// finally the first bare number after the season tag has been stripped.
/// Each tier takes the first match in string order, not the longest.
pub fn extract(name: &str, skip_season: bool) -> Result<EpisodeId, MatchError> {
    for re in IDENTIFIER_RES.iter() {
        if let Some(caps) = re.captures(name) {
            if let (Some(season), Some(episode)) = (cap_num(&caps, 1), cap_num(&caps, 2)) {
                let season = if skip_season { None } else { Some(season) };
                return Ok(EpisodeId::new(season, episode));
            }
        }
    }

    let episode = EPISODE_RES
        .iter()
        .find_map(|re| re.captures(name).and_then(|caps| cap_num(&caps, 1)));
    if skip_season {
        if let Some(episode) = episode {
            return Ok(EpisodeId::new(None, episode));
        }
    }

    let season_match = SEASON_RES.iter().find_map(|re| {
        re.captures(name)
            .and_then(|caps| cap_num(&caps, 2))
            .map(|season| (re, season))
    });

    if !skip_season {
        if let Some(episode) = episode {
            let season = season_match.map_or(1, |(_, season)| season);
            return Ok(EpisodeId::new(Some(season), episode));
        }
    }

    // No explicit episode tag: strip the season tag so its digits are not
    // mistaken for the episode, then fall back to the first bare number.
    let stripped = match season_match {
        Some((re, _)) => strip_tag(re, name),
        None => name.to_string(),
    };
    let episode = NUMBER_RES
        .iter()
        .find_map(|re| re.captures(&stripped).and_then(|caps| cap_num(&caps, 1)));
    let Some(episode) = episode else {
        return Err(MatchError::NoIdentifier {
            name: name.to_string(),
        });
    };

    let season = if skip_season {
        None
    } else {
        Some(season_match.map_or(1, |(_, season)| season))
    };
    Ok(EpisodeId::new(season, episode))
}

// u64 keeps the 5+-digit catch-all tier from overflowing on long numeric
// runs (release dates, hashes of digits).
fn cap_num(caps: &regex::Captures<'_>, group: usize) -> Option<u64> {
    caps.get(group).and_then(|m| m.as_str().parse().ok())
}

/// Removes every occurrence of the tag (capture group 1) from the name.
fn strip_tag(re: &Regex, name: &str) -> String {
    let mut out = name.to_string();
    loop {
        let range = match re.captures(&out).and_then(|caps| caps.get(1)) {
            Some(tag) => tag.range(),
            None => break,
        };
        out.replace_range(range, "");
    }
    out
}
