use serde::Deserialize;

use crate::color::ColorSet;

/// Rank given to cards the popularity source has never ranked.
///
/// Always sorts after every real rank.
pub const UNRANKED: u32 = 99_999;

/// One distinct card in the player's pool.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub name: String,
    pub type_line: String,
    pub oracle_text: String,
    /// Mana value (converted mana cost), never negative.
    pub mana_value: f64,
    pub color_identity: ColorSet,
    /// Cost symbols as printed, e.g. `{2}{U}{R}`.
    pub mana_cost: String,
    /// Lower is more popular. [`UNRANKED`] when unknown.
    pub popularity_rank: u32,
    pub set_code: Option<String>,
    pub collector_number: Option<String>,
}

impl Card {
    /// Returns true if the type line mentions "land" in any case.
    pub fn is_land(&self) -> bool {
        contains_ignore_case(&self.type_line, "land")
    }

    /// Returns true if the type line mentions "basic" in any case.
    pub fn is_basic(&self) -> bool {
        contains_ignore_case(&self.type_line, "basic")
    }

    /// Returns true for land cards that are not basic lands.
    pub fn is_nonbasic_land(&self) -> bool {
        self.is_land() && !self.is_basic()
    }

    /// Oracle text folded to lowercase for phrase matching.
    pub fn oracle_lower(&self) -> String {
        self.oracle_text.to_lowercase()
    }

    /// Returns true if the card's color identity fits inside `identity`.
    pub fn fits_identity(&self, identity: ColorSet) -> bool {
        self.color_identity.is_subset_of(identity)
    }
}

pub(crate) fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Builder for constructing Card instances.
#[derive(Debug, Clone)]
pub struct CardBuilder {
    name: String,
    type_line: String,
    oracle_text: String,
    mana_value: f64,
    color_identity: ColorSet,
    mana_cost: String,
    popularity_rank: u32,
    set_code: Option<String>,
    collector_number: Option<String>,
}

impl CardBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_line: String::new(),
            oracle_text: String::new(),
            mana_value: 0.0,
            color_identity: ColorSet::COLORLESS,
            mana_cost: String::new(),
            popularity_rank: UNRANKED,
            set_code: None,
            collector_number: None,
        }
    }

    pub fn type_line(mut self, type_line: impl Into<String>) -> Self {
        self.type_line = type_line.into();
        self
    }

    pub fn oracle_text(mut self, text: impl Into<String>) -> Self {
        self.oracle_text = text.into();
        self
    }

    pub fn mana_value(mut self, mana_value: f64) -> Self {
        self.mana_value = mana_value.max(0.0);
        self
    }

    pub fn color_identity(mut self, identity: ColorSet) -> Self {
        self.color_identity = identity;
        self
    }

    pub fn mana_cost(mut self, cost: impl Into<String>) -> Self {
        self.mana_cost = cost.into();
        self
    }

    pub fn rank(mut self, rank: u32) -> Self {
        self.popularity_rank = rank;
        self
    }

    pub fn set_code(mut self, set_code: impl Into<String>) -> Self {
        self.set_code = Some(set_code.into());
        self
    }

    pub fn collector_number(mut self, number: impl Into<String>) -> Self {
        self.collector_number = Some(number.into());
        self
    }

    pub fn build(self) -> Card {
        Card {
            name: self.name,
            type_line: self.type_line,
            oracle_text: self.oracle_text,
            mana_value: self.mana_value,
            color_identity: self.color_identity,
            mana_cost: self.mana_cost,
            popularity_rank: self.popularity_rank,
            set_code: self.set_code,
            collector_number: self.collector_number,
        }
    }
}

/// A raw collection row as produced by the collection/enrichment collaborators.
///
/// Every field is optional. Both the Scryfall snake_case keys and their
/// camelCase spellings are accepted, and numbers may arrive as strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CardRow {
    #[serde(rename = "Name", alias = "name", default)]
    pub name: Option<String>,
    #[serde(alias = "typeLine", default)]
    pub type_line: Option<String>,
    #[serde(alias = "oracleText", default)]
    pub oracle_text: Option<String>,
    #[serde(alias = "manaValue", default)]
    pub cmc: Option<Lenient>,
    #[serde(alias = "colorIdentity", default)]
    pub color_identity: Option<ColorField>,
    #[serde(alias = "manaCost", default)]
    pub mana_cost: Option<String>,
    #[serde(alias = "edhrecRank", alias = "popularityRank", default)]
    pub edhrec_rank: Option<Lenient>,
    #[serde(rename = "Set code", alias = "set_code", alias = "setCode", default)]
    pub set_code: Option<String>,
    #[serde(
        rename = "Collector number",
        alias = "collector_number",
        alias = "collectorNumber",
        default
    )]
    pub collector_number: Option<String>,
}

/// A number that may have been exported as text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Lenient {
    Number(f64),
    Text(String),
}

impl Lenient {
    pub fn as_f64(&self) -> Option<f64> {
        let value = match self {
            Lenient::Number(n) => *n,
            Lenient::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// Color identity as either a list of codes or a single code string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ColorField {
    List(Vec<String>),
    Text(String),
}

impl ColorField {
    pub fn to_color_set(&self) -> ColorSet {
        match self {
            ColorField::List(codes) => codes.iter().map(|c| ColorSet::from_codes(c)).fold(
                ColorSet::COLORLESS,
                ColorSet::union,
            ),
            ColorField::Text(codes) => ColorSet::from_codes(codes),
        }
    }
}

impl CardRow {
    /// Converts the row into a card, or `None` when it carries no usable name.
    pub fn into_card(self) -> Option<Card> {
        let name = self.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())?;

        let mana_value = self
            .cmc
            .as_ref()
            .and_then(Lenient::as_f64)
            .unwrap_or(0.0)
            .max(0.0);
        let popularity_rank = self
            .edhrec_rank
            .as_ref()
            .and_then(Lenient::as_f64)
            .filter(|r| *r >= 1.0 && *r < f64::from(u32::MAX))
            .map_or(UNRANKED, |r| r.round() as u32);

        Some(Card {
            name,
            type_line: self.type_line.unwrap_or_default(),
            oracle_text: self.oracle_text.unwrap_or_default(),
            mana_value,
            color_identity: self
                .color_identity
                .as_ref()
                .map_or(ColorSet::COLORLESS, ColorField::to_color_set),
            mana_cost: self.mana_cost.unwrap_or_default(),
            popularity_rank,
            set_code: self.set_code.filter(|s| !s.trim().is_empty()),
            collector_number: self.collector_number.filter(|s| !s.trim().is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;

    fn row(json: &str) -> CardRow {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let card = row(r#"{"Name": "Sol Ring"}"#).into_card().unwrap();
        assert_eq!(card.name, "Sol Ring");
        assert_eq!(card.type_line, "");
        assert_eq!(card.mana_value, 0.0);
        assert!(card.color_identity.is_empty());
        assert_eq!(card.mana_cost, "");
        assert_eq!(card.popularity_rank, UNRANKED);
        assert_eq!(card.set_code, None);
    }

    #[test]
    fn test_scryfall_keys() {
        let card = row(
            r#"{
                "Name": "Izzet Charm",
                "type_line": "Instant",
                "oracle_text": "Choose one —",
                "cmc": 2.0,
                "color_identity": ["U", "R"],
                "mana_cost": "{U}{R}",
                "edhrec_rank": 412,
                "Set code": "GRN",
                "Collector number": "172"
            }"#,
        )
        .into_card()
        .unwrap();
        assert_eq!(card.mana_value, 2.0);
        assert_eq!(card.color_identity, ColorSet::BLUE.with(Color::Red));
        assert_eq!(card.popularity_rank, 412);
        assert_eq!(card.set_code.as_deref(), Some("GRN"));
        assert_eq!(card.collector_number.as_deref(), Some("172"));
    }

    #[test]
    fn test_camel_case_keys_and_text_numbers() {
        let card = row(
            r#"{
                "name": "Cultivate",
                "typeLine": "Sorcery",
                "oracleText": "Search your library",
                "cmc": "3",
                "colorIdentity": "G",
                "manaCost": "{2}{G}",
                "edhrecRank": "15"
            }"#,
        )
        .into_card()
        .unwrap();
        assert_eq!(card.type_line, "Sorcery");
        assert_eq!(card.mana_value, 3.0);
        assert_eq!(card.color_identity, ColorSet::GREEN);
        assert_eq!(card.popularity_rank, 15);
    }

    #[test]
    fn test_malformed_numbers_fall_back() {
        let card = row(r#"{"Name": "Odd", "cmc": "n/a", "edhrec_rank": null}"#)
            .into_card()
            .unwrap();
        assert_eq!(card.mana_value, 0.0);
        assert_eq!(card.popularity_rank, UNRANKED);
    }

    #[test]
    fn test_nameless_row_is_rejected() {
        assert!(row(r#"{"type_line": "Land"}"#).into_card().is_none());
        assert!(row(r#"{"Name": "   "}"#).into_card().is_none());
    }

    #[test]
    fn test_land_predicates() {
        let basic = CardBuilder::new("Island").type_line("Basic Land — Island").build();
        let dual = CardBuilder::new("Steam Vents").type_line("Land — Island Mountain").build();
        let dryad = CardBuilder::new("Dryad Arbor").type_line("LAND CREATURE — Forest Dryad").build();
        assert!(basic.is_land() && basic.is_basic());
        assert!(dual.is_nonbasic_land());
        assert!(dryad.is_land());
        assert!(!CardBuilder::new("Opt").type_line("Instant").build().is_land());
    }

    #[test]
    fn test_builder_clamps_negative_mana_value() {
        let card = CardBuilder::new("Weird").mana_value(-1.0).build();
        assert_eq!(card.mana_value, 0.0);
    }
}
