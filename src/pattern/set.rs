use std::collections::BTreeMap;

use crate::error::MatchError;

use super::{EpisodeId, PatternEntry};

/// Identifier -> filenames mapping built for one file collection.
///
/// Buckets keep their insertion order, so when several files collide on the
/// same identifier the first one scanned stays first. Built once per
/// collection and read-only afterwards.
#[derive(Debug, Default)]
pub struct PatternSet {
    buckets: BTreeMap<EpisodeId, Vec<String>>,
    total: usize,
}

/// A subtitle joined to the video sharing its identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPair {
    pub subtitle: String,
    pub video: String,
}

impl PatternSet {
    /// Extracts an identifier from every filename. The first extraction
    /// failure aborts construction of the whole set.
    pub fn build<I, S>(names: I, skip_season: bool) -> Result<Self, MatchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = PatternSet::default();
        for name in names {
            let entry = PatternEntry::parse(name.as_ref(), skip_season)?;
            set.buckets.entry(entry.id).or_default().push(entry.name);
            set.total += 1;
        }
        Ok(set)
    }

    /// Number of filenames in the set.
    pub fn file_count(&self) -> usize {
        self.total
    }

    /// True when every identifier bucket holds exactly one filename.
    pub fn is_one_to_one(&self) -> bool {
        self.buckets.len() == self.total
    }

    /// Buckets in ascending identifier order.
    pub fn iter(&self) -> impl Iterator<Item = (&EpisodeId, &[String])> {
        self.buckets.iter().map(|(id, names)| (id, names.as_slice()))
    }

    /// Joins this video set against a subtitle set on identifier equality.
    ///
    /// Emits one pair per identifier present in both sets, taking the first
    /// filename recorded in each bucket, ascending by identifier
    /// (season-major, episode-minor; episode-only under skip-season).
    /// Identifiers present in only one set are dropped silently; those
    /// files are simply left untouched.
    pub fn pair_with(&self, subtitles: &PatternSet) -> Vec<MatchPair> {
        subtitles
            .buckets
            .iter()
            .filter_map(|(id, subs)| {
                self.buckets.get(id).map(|videos| MatchPair {
                    subtitle: subs[0].clone(),
                    video: videos[0].clone(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(names: &[&str], skip_season: bool) -> PatternSet {
        PatternSet::build(names.iter().copied(), skip_season).unwrap()
    }

    #[test]
    fn test_build_groups_by_identifier() {
        let set = build(&["Show.S01E01.mkv", "Show.S01E02.mkv"], false);
        assert_eq!(set.file_count(), 2);
        assert!(set.is_one_to_one());

        let ids: Vec<String> = set.iter().map(|(id, _)| id.to_string()).collect();
        assert_eq!(ids, vec!["S1E1", "S1E2"]);
    }

    #[test]
    fn test_collisions_break_one_to_one() {
        let set = build(&["EP01.srt", "E1.srt"], false);
        assert_eq!(set.file_count(), 2);
        assert!(!set.is_one_to_one());

        // The first file scanned stays first in its bucket.
        let (_, names) = set.iter().next().unwrap();
        assert_eq!(names, ["EP01.srt", "E1.srt"]);
    }

    #[test]
    fn test_build_fails_on_unparseable_name() {
        let err = PatternSet::build(["Show.S01E01.mkv", "extras.mkv"], false).unwrap_err();
        assert!(matches!(err, MatchError::NoIdentifier { ref name } if name.as_str() == "extras.mkv"));
    }

    #[test]
    fn test_pairs_sorted_season_major() {
        let videos = build(
            &["b.S02E01.mkv", "c.S01E02.mkv", "a.S01E01.mkv"],
            false,
        );
        let subs = build(
            &["y.S01E02.srt", "z.S02E01.srt", "x.S01E01.srt"],
            false,
        );

        let pairs = videos.pair_with(&subs);
        let got: Vec<(&str, &str)> = pairs
            .iter()
            .map(|p| (p.subtitle.as_str(), p.video.as_str()))
            .collect();
        assert_eq!(
            got,
            vec![
                ("x.S01E01.srt", "a.S01E01.mkv"),
                ("y.S01E02.srt", "c.S01E02.mkv"),
                ("z.S02E01.srt", "b.S02E01.mkv"),
            ]
        );
    }

    #[test]
    fn test_pairs_sorted_by_episode_when_skipping_seasons() {
        let videos = build(&["a - 10.mkv", "b - 2.mkv"], true);
        let subs = build(&["x - 10.srt", "y - 2.srt"], true);

        let pairs = videos.pair_with(&subs);
        let got: Vec<&str> = pairs.iter().map(|p| p.subtitle.as_str()).collect();
        assert_eq!(got, vec!["y - 2.srt", "x - 10.srt"]);
    }

    #[test]
    fn test_skip_season_matches_across_seasons() {
        let videos = build(&["Show.S02E05.mkv"], true);
        let subs = build(&["Show.E05.srt"], true);

        let pairs = videos.pair_with(&subs);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].video, "Show.S02E05.mkv");
    }

    #[test]
    fn test_unmatched_identifiers_are_dropped() {
        let videos = build(&["Show.S01E01.mkv", "Show.S01E03.mkv"], false);
        let subs = build(&["Show.S01E01.srt", "Show.S01E02.srt"], false);

        let pairs = videos.pair_with(&subs);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].subtitle, "Show.S01E01.srt");
    }

    #[test]
    fn test_collision_takes_first_filename() {
        let videos = build(&["Show.S01E01.mkv"], false);
        let subs = build(&["Show.S01E01.en.srt", "Show.S01E01.pt.srt"], false);

        let pairs = videos.pair_with(&subs);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].subtitle, "Show.S01E01.en.srt");
    }
}
