use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classifier::RoleOverrides;
use crate::config::BuildConfig;
use crate::error::{Result, read_json};
use crate::index::CardIndex;

/// A commander/theme pairing found by synergy discovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeckCandidate {
    pub commander: String,
    pub theme: String,
    /// Number of owned cards on the theme's synergy list.
    #[serde(default)]
    pub score: usize,
    /// Owned synergy cards, best first.
    #[serde(default)]
    pub decklist: Vec<String>,
    /// Role hints from the ranking source, keyed by exact card name.
    #[serde(default)]
    pub role_map: RoleOverrides,
}

impl DeckCandidate {
    /// Scores a theme's synergy list against the owned pool.
    pub fn from_synergy<S: AsRef<str>>(
        commander: impl Into<String>,
        theme: impl Into<String>,
        synergy: &[S],
        role_map: RoleOverrides,
        index: &CardIndex,
    ) -> Self {
        let decklist = index.intersection(synergy);
        Self {
            commander: commander.into(),
            theme: theme.into(),
            score: decklist.len(),
            decklist,
            role_map,
        }
    }

    /// Reads a JSON array of candidates.
    pub fn load_all(path: impl AsRef<Path>) -> Result<Vec<DeckCandidate>> {
        let path = path.as_ref();
        let candidates: Vec<DeckCandidate> = read_json(path)?;
        debug!(path = %path.display(), candidates = candidates.len(), "loaded candidates");
        Ok(candidates)
    }

    /// True when the candidate clears the reporting threshold.
    pub fn is_viable(&self, config: &BuildConfig) -> bool {
        self.score >= config.min_scan_score
    }
}

/// Picks the candidates worth building: highest score first, at least the
/// victory threshold, at most `max_export_count` of them.
///
/// Equal scores keep their input order.
pub fn select_winners(mut candidates: Vec<DeckCandidate>, config: &BuildConfig) -> Vec<DeckCandidate> {
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates
        .into_iter()
        .filter(|c| c.score >= config.victory_threshold)
        .take(config.max_export_count)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardBuilder;
    use crate::error::DeckError;
    use crate::role::Role;

    fn candidate(theme: &str, score: usize) -> DeckCandidate {
        DeckCandidate {
            commander: "Niv-Mizzet, Parun".to_string(),
            theme: theme.to_string(),
            score,
            decklist: Vec::new(),
            role_map: RoleOverrides::new(),
        }
    }

    #[test]
    fn test_from_synergy_counts_owned_cards() {
        let index: CardIndex = ["Opt", "Ponder", "Brainstorm"]
            .into_iter()
            .map(|n| CardBuilder::new(n).build())
            .collect();
        let mut roles = RoleOverrides::new();
        roles.insert("Opt".to_string(), Role::Draw);
        let candidate = DeckCandidate::from_synergy(
            "Niv-Mizzet, Parun",
            "Spellslinger",
            &["ponder", "Counterspell", "Opt"],
            roles,
            &index,
        );
        assert_eq!(candidate.decklist, vec!["ponder".to_string(), "Opt".to_string()]);
        assert_eq!(candidate.score, 2);
        assert_eq!(candidate.role_map.get("Opt"), Some(&Role::Draw));
    }

    #[test]
    fn test_select_winners_filters_sorts_and_caps() {
        let config = BuildConfig {
            victory_threshold: 45,
            max_export_count: 2,
            ..BuildConfig::default()
        };
        let winners = select_winners(
            vec![
                candidate("Low", 30),
                candidate("Mid", 50),
                candidate("Top", 70),
                candidate("Also Mid", 50),
            ],
            &config,
        );
        let themes: Vec<&str> = winners.iter().map(|c| c.theme.as_str()).collect();
        assert_eq!(themes, vec!["Top", "Mid"]);
    }

    #[test]
    fn test_select_winners_can_be_empty() {
        let winners = select_winners(vec![candidate("Low", 44)], &BuildConfig::default());
        assert!(winners.is_empty());
    }

    #[test]
    fn test_candidate_json_role_map_is_optional() {
        let parsed: DeckCandidate = serde_json::from_str(
            r#"{"commander": "Kenrith, the Returned King", "theme": "Group Hug", "decklist": ["Howling Mine"]}"#,
        )
        .unwrap();
        assert_eq!(parsed.score, 0);
        assert!(parsed.role_map.is_empty());
        assert!(!parsed.is_viable(&BuildConfig::default()));
    }

    #[test]
    fn test_load_all_reads_candidate_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candidates.json");
        std::fs::write(
            &path,
            r#"[
                {"commander": "Niv-Mizzet, Parun", "theme": "Wheels", "score": 52, "decklist": ["Opt"]},
                {"commander": "Kenrith, the Returned King", "theme": "Group Hug", "role_map": {"Howling Mine": "Draw"}}
            ]"#,
        )
        .unwrap();

        let candidates = DeckCandidate::load_all(&path).unwrap();
        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].score, 52);
        assert_eq!(candidates[0].decklist, vec!["Opt".to_string()]);
        assert_eq!(candidates[1].role_map.get("Howling Mine"), Some(&Role::Draw));
    }

    #[test]
    fn test_load_all_reports_bad_json_with_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candidates.json");
        std::fs::write(&path, r#"{"commander": "not an array"}"#).unwrap();
        let err = DeckCandidate::load_all(&path).unwrap_err();
        assert!(matches!(err, DeckError::Json { .. }));
    }
}
