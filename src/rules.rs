//! Heuristic rule tables for role classification.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, read_json};
use crate::role::Role;

/// A text-matching rule that assigns a role.
///
/// The rule matches when the oracle text contains every `must_have` phrase
/// and none of the `must_not` phrases, compared case-insensitively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeuristicRule {
    pub role: Role,
    #[serde(alias = "mustHave", default)]
    pub must_have: Vec<String>,
    #[serde(alias = "mustNot", default, skip_serializing_if = "Option::is_none")]
    pub must_not: Option<Vec<String>>,
}

impl HeuristicRule {
    pub fn new<S: Into<String>>(role: Role, must_have: impl IntoIterator<Item = S>) -> Self {
        Self {
            role,
            must_have: must_have.into_iter().map(Into::into).collect(),
            must_not: None,
        }
    }

    pub fn excluding<S: Into<String>>(mut self, must_not: impl IntoIterator<Item = S>) -> Self {
        self.must_not = Some(must_not.into_iter().map(Into::into).collect());
        self
    }

    /// Checks the phrase conditions against already-lowercased text.
    pub fn matches_text(&self, lowered_text: &str) -> bool {
        let has_all = self
            .must_have
            .iter()
            .all(|phrase| lowered_text.contains(&phrase.to_lowercase()));
        if !has_all {
            return false;
        }
        !self
            .must_not
            .iter()
            .flatten()
            .any(|phrase| lowered_text.contains(&phrase.to_lowercase()))
    }
}

/// An ordered rule table. The first matching rule wins.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable {
    rules: Vec<HeuristicRule>,
}

impl RuleTable {
    pub fn new(rules: Vec<HeuristicRule>) -> Self {
        Self { rules }
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let table: RuleTable = read_json(path)?;
        debug!(path = %path.display(), rules = table.len(), "loaded heuristic rules");
        Ok(table)
    }

    pub fn rules(&self) -> &[HeuristicRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl From<Vec<HeuristicRule>> for RuleTable {
    fn from(rules: Vec<HeuristicRule>) -> Self {
        Self::new(rules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table_with_both_spellings() {
        let table = RuleTable::from_json_str(
            r#"[
                {"role": "Ramp", "must_have": ["search your library", "land"], "must_not": ["opponent"]},
                {"role": "Draw", "mustHave": ["draw"]},
                {"role": "Tribal", "must_have": ["elf"]}
            ]"#,
        )
        .unwrap();
        assert_eq!(table.len(), 3);
        let rules = table.rules();
        assert_eq!(rules[0].role, Role::Ramp);
        assert_eq!(rules[0].must_not.as_deref(), Some(&["opponent".to_string()][..]));
        assert_eq!(rules[1].must_have, vec!["draw".to_string()]);
        assert_eq!(rules[1].must_not, None);
        assert_eq!(rules[2].role, Role::Custom("Tribal".to_string()));
    }

    #[test]
    fn test_matches_text_requires_all_and_excludes_any() {
        let rule = HeuristicRule::new(Role::Removal, ["destroy", "target"])
            .excluding(["you control"]);
        assert!(rule.matches_text("destroy target creature."));
        assert!(!rule.matches_text("destroy all creatures."));
        assert!(!rule.matches_text("destroy target creature you control."));
    }

    #[test]
    fn test_phrases_compare_case_insensitively() {
        let rule = HeuristicRule::new(Role::Draw, ["Draw A Card"]);
        assert!(rule.matches_text("when this enters, draw a card."));
    }

    #[test]
    fn test_empty_must_have_matches_everything_not_excluded() {
        let rule = HeuristicRule::new(Role::General, Vec::<String>::new()).excluding(["flying"]);
        assert!(rule.matches_text("trample"));
        assert!(!rule.matches_text("flying"));
    }
}
