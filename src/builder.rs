//! End-to-end assembly of one candidate: curve, spells, lands.

use tracing::{info, warn};

use crate::candidate::DeckCandidate;
use crate::config::BuildConfig;
use crate::curve::{CurveWarning, analyze_curve_with, curve_health};
use crate::error::{DeckError, Result};
use crate::index::CardIndex;
use crate::lands::add_lands;
use crate::optimizer::optimize_deck;
use crate::role::Role;
use crate::rules::RuleTable;

/// A finished deck and the statistics gathered while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltDeck {
    pub commander: String,
    pub theme: String,
    pub score: usize,
    /// Spells then lands; the commander is not included.
    pub decklist: Vec<String>,
    pub target_lands: u32,
    pub average_mana_value: f64,
    pub spell_count: usize,
    pub non_basics: Vec<String>,
    pub basics: Vec<(String, usize)>,
    pub staples_added: Vec<(String, Role)>,
    pub trimmed: Vec<String>,
    pub curve_warnings: Vec<CurveWarning>,
}

impl BuiltDeck {
    /// Cards including the commander.
    pub fn total_cards(&self) -> usize {
        self.decklist.len() + 1
    }

    pub fn land_count(&self) -> usize {
        self.non_basics.len() + self.basics.iter().map(|(_, qty)| qty).sum::<usize>()
    }
}

/// Builds the full decklist for `candidate`.
///
/// The land target comes from the curve of the incoming synergy list.
pub fn build_deck(
    candidate: &DeckCandidate,
    index: &CardIndex,
    rules: &RuleTable,
    config: &BuildConfig,
) -> Result<BuiltDeck> {
    let commander = index
        .get(&candidate.commander)
        .ok_or_else(|| DeckError::UnknownCommander(candidate.commander.clone()))?;
    info!(commander = %commander.name, theme = %candidate.theme, "assembling deck");

    let curve = analyze_curve_with(&candidate.decklist, index, &config.curve);
    let spells = optimize_deck(candidate, index, curve.target_lands, rules, config)?;

    let health = curve_health(&spells.spells, index);
    for warning in &health.warnings {
        warn!(commander = %commander.name, "{warning}");
    }

    let spell_count = spells.spells.len();
    let mana_base = add_lands(
        spells.spells,
        index,
        curve.target_lands as usize,
        commander,
        config,
    );

    let deck = BuiltDeck {
        commander: commander.name.clone(),
        theme: candidate.theme.clone(),
        score: candidate.score,
        decklist: mana_base.decklist,
        target_lands: curve.target_lands,
        average_mana_value: curve.average_mana_value,
        spell_count,
        non_basics: mana_base.non_basics,
        basics: mana_base.basics,
        staples_added: spells.staples_added,
        trimmed: spells.trimmed,
        curve_warnings: health.warnings,
    };

    info!(
        commander = %deck.commander,
        theme = %deck.theme,
        total = deck.total_cards(),
        lands = deck.target_lands,
        avg_mana_value = deck.average_mana_value,
        "deck complete"
    );
    Ok(deck)
}
