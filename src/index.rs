//! The owned card pool.

use std::collections::HashMap;
use std::path::Path;

use tracing::{debug, warn};

use crate::card::{Card, CardRow, contains_ignore_case};
use crate::error::{Result, read_json};

/// Immutable view of the player's card pool with case-insensitive lookup.
///
/// The raw sequence keeps every row in load order. When two rows share a
/// name, the later row is the one returned by [`CardIndex::get`].
#[derive(Debug, Clone, Default)]
pub struct CardIndex {
    cards: Vec<Card>,
    /// Lowercase name to position in `cards`
    by_name: HashMap<String, usize>,
}

impl CardIndex {
    pub fn new(cards: Vec<Card>) -> Self {
        let mut by_name = HashMap::with_capacity(cards.len());
        for (position, card) in cards.iter().enumerate() {
            by_name.insert(card.name.to_lowercase(), position);
        }
        Self { cards, by_name }
    }

    /// Builds the index from raw rows, skipping rows that carry no name.
    pub fn from_rows(rows: impl IntoIterator<Item = CardRow>) -> Self {
        let mut skipped = 0usize;
        let cards: Vec<Card> = rows
            .into_iter()
            .filter_map(|row| {
                let card = row.into_card();
                if card.is_none() {
                    skipped += 1;
                }
                card
            })
            .collect();
        if skipped > 0 {
            warn!(skipped, "ignored collection rows without a card name");
        }
        Self::new(cards)
    }

    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        let rows: Vec<CardRow> = serde_json::from_str(json)?;
        Ok(Self::from_rows(rows))
    }

    /// Loads a JSON array of collection rows.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let rows: Vec<CardRow> = read_json(path)?;
        let index = Self::from_rows(rows);
        debug!(path = %path.display(), cards = index.len(), "loaded card pool");
        Ok(index)
    }

    /// Looks a card up by name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&Card> {
        self.by_name
            .get(&name.to_lowercase())
            .map(|&position| &self.cards[position])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(&name.to_lowercase())
    }

    /// Every row in load order, duplicates included.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn lands(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.is_land())
    }

    /// Names from `names` that the player owns, in the given order.
    ///
    /// Matching ignores case; the returned spelling is the caller's.
    pub fn intersection<S: AsRef<str>>(&self, names: &[S]) -> Vec<String> {
        names
            .iter()
            .map(AsRef::as_ref)
            .filter(|name| self.contains(name))
            .map(str::to_string)
            .collect()
    }

    /// Cards that can lead a deck, sorted by name.
    pub fn commanders(&self) -> Vec<&Card> {
        let mut commanders: Vec<&Card> = self
            .cards
            .iter()
            .filter(|c| contains_ignore_case(&c.type_line, "legendary creature"))
            .collect();
        commanders.sort_by(|a, b| a.name.cmp(&b.name));
        commanders.dedup_by(|a, b| a.name.eq_ignore_ascii_case(&b.name));
        commanders
    }
}

impl FromIterator<Card> for CardIndex {
    fn from_iter<T: IntoIterator<Item = Card>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardBuilder;

    fn pool() -> CardIndex {
        CardIndex::new(vec![
            CardBuilder::new("Sol Ring").type_line("Artifact").rank(1).build(),
            CardBuilder::new("Niv-Mizzet, Parun")
                .type_line("Legendary Creature — Dragon Wizard")
                .build(),
            CardBuilder::new("Command Tower").type_line("Land").build(),
            CardBuilder::new("Alela, Cunning Conqueror")
                .type_line("Legendary Creature — Faerie Warlock")
                .build(),
        ])
    }

    #[test]
    fn test_lookup_ignores_case() {
        let index = pool();
        assert_eq!(index.get("sol ring").map(|c| c.name.as_str()), Some("Sol Ring"));
        assert!(index.contains("SOL RING"));
        assert!(index.get("Mana Crypt").is_none());
    }

    #[test]
    fn test_duplicate_rows_last_wins_but_sequence_keeps_all() {
        let index = CardIndex::new(vec![
            CardBuilder::new("Opt").rank(500).build(),
            CardBuilder::new("opt").rank(20).build(),
        ]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.get("Opt").map(|c| c.popularity_rank), Some(20));
    }

    #[test]
    fn test_from_json_skips_nameless_rows() {
        let index = CardIndex::from_json_str(
            r#"[{"Name": "Opt", "cmc": 1}, {"cmc": 3}, {"Name": "Ponder"}]"#,
        )
        .unwrap();
        assert_eq!(index.len(), 2);
        assert!(index.contains("ponder"));
    }

    #[test]
    fn test_intersection_keeps_input_order() {
        let index = pool();
        let owned = index.intersection(&["command tower", "Mana Crypt", "Sol Ring"]);
        assert_eq!(owned, vec!["command tower".to_string(), "Sol Ring".to_string()]);
    }

    #[test]
    fn test_commanders_sorted_by_name() {
        let index = pool();
        let names: Vec<&str> = index.commanders().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alela, Cunning Conqueror", "Niv-Mizzet, Parun"]);
    }

    #[test]
    fn test_lands_filter() {
        let index = pool();
        let lands: Vec<&str> = index.lands().map(|c| c.name.as_str()).collect();
        assert_eq!(lands, vec!["Command Tower"]);
    }
}
