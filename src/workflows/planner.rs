use std::path::Path;

use crate::pattern::MatchPair;

/// One planned subtitle rename inside a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameAction {
    pub subtitle: String,
    pub target: String,
}

/// Outcome of planning a batch of matched pairs.
#[derive(Debug, Default)]
pub struct RenamePlan {
    pub actions: Vec<RenameAction>,
    /// Pairs whose subtitle already carries the target name.
    pub already_named: usize,
    /// Target names dropped because another file already owns them.
    pub collisions: Vec<String>,
}

/// The video's base name with the subtitle's own extension appended.
pub fn target_name(subtitle: &str, video: &str) -> String {
    let base = Path::new(video)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(video);
    match Path::new(subtitle).extension().and_then(|s| s.to_str()) {
        Some(ext) => format!("{base}.{ext}"),
        None => base.to_string(),
    }
}

/// Derives target names for the matched pairs, filtering out no-ops
/// (subtitle already named correctly, unless `force`) and pairs whose
/// target name is taken by an existing file. No-op pairs are exempt from
/// the collision check since their target is the subtitle itself.
pub fn plan(pairs: &[MatchPair], dir: &Path, force: bool) -> RenamePlan {
    let mut plan = RenamePlan::default();
    for pair in pairs {
        let target = target_name(&pair.subtitle, &pair.video);
        if pair.subtitle == target {
            plan.already_named += 1;
            if !force {
                continue;
            }
        } else if dir.join(&target).is_file() {
            plan.collisions.push(target);
            continue;
        }
        plan.actions.push(RenameAction {
            subtitle: pair.subtitle.clone(),
            target,
        });
    }
    plan
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn pair(subtitle: &str, video: &str) -> MatchPair {
        MatchPair {
            subtitle: subtitle.to_string(),
            video: video.to_string(),
        }
    }

    #[test]
    fn test_target_name_keeps_subtitle_extension() {
        assert_eq!(
            target_name("Show.S01E01.en.srt", "Show.S01E01.mkv"),
            "Show.S01E01.srt"
        );
        assert_eq!(target_name("old name.ass", "Show.1x02.mp4"), "Show.1x02.ass");
    }

    #[test]
    fn test_plan_derives_targets_in_order() {
        let temp_dir = TempDir::new().unwrap();
        let pairs = vec![
            pair("Show.S01E01.en.srt", "Show.S01E01.mkv"),
            pair("Show.S01E02.en.srt", "Show.S01E02.mkv"),
        ];

        let plan = plan(&pairs, temp_dir.path(), false);
        let targets: Vec<&str> = plan.actions.iter().map(|a| a.target.as_str()).collect();
        assert_eq!(targets, vec!["Show.S01E01.srt", "Show.S01E02.srt"]);
    }

    #[test]
    fn test_plan_is_idempotent_on_correct_names() {
        let temp_dir = TempDir::new().unwrap();
        let pairs = vec![
            pair("Show.S01E01.srt", "Show.S01E01.mkv"),
            pair("Show.S01E02.srt", "Show.S01E02.mkv"),
        ];

        let plan = plan(&pairs, temp_dir.path(), false);
        assert!(plan.actions.is_empty());
        assert_eq!(plan.already_named, 2);
    }

    #[test]
    fn test_force_keeps_already_named_pairs() {
        let temp_dir = TempDir::new().unwrap();
        let pairs = vec![pair("Show.S01E01.srt", "Show.S01E01.mkv")];

        let plan = plan(&pairs, temp_dir.path(), true);
        assert_eq!(plan.actions.len(), 1);
        assert_eq!(plan.already_named, 1);
    }

    #[test]
    fn test_existing_target_is_dropped_with_warning() {
        let temp_dir = TempDir::new().unwrap();
        File::create(temp_dir.path().join("Show.S01E01.srt")).unwrap();

        let pairs = vec![
            pair("Show.S01E01.en.srt", "Show.S01E01.mkv"),
            pair("Show.S01E02.en.srt", "Show.S01E02.mkv"),
        ];
        let plan = plan(&pairs, temp_dir.path(), false);

        assert_eq!(plan.collisions, vec!["Show.S01E01.srt".to_string()]);
        assert_eq!(plan.actions.len(), 1);
        assert_eq!(plan.actions[0].target, "Show.S01E02.srt");
    }
}
