//! Quota-driven spell selection.
//!
//! Turns a candidate's synergy list into a spell list of exactly
//! `deck_size - target_lands` cards: top up each quota role from the owned
//! pool, pad with the most popular remaining cards, then trim the least
//! popular excess.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::candidate::DeckCandidate;
use crate::card::{Card, UNRANKED};
use crate::classifier::classify;
use crate::color::{Color, ColorSet};
use crate::config::BuildConfig;
use crate::error::{DeckError, Result};
use crate::index::CardIndex;
use crate::role::{Role, RoleTally};
use crate::rules::RuleTable;

/// The finished non-land portion of a deck.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OptimizedSpells {
    /// Spell names in working-set order.
    pub spells: Vec<String>,
    /// Quota-role counts of the incoming decklist.
    pub tally: RoleTally,
    /// Cards added to meet quotas, with the role they filled.
    pub staples_added: Vec<(String, Role)>,
    /// Cards added to reach the target size.
    pub padded: Vec<String>,
    /// Cards dropped because the list ran over size.
    pub trimmed: Vec<String>,
}

/// Insertion-ordered name set with case-insensitive membership.
#[derive(Debug, Default)]
struct WorkingSet {
    names: Vec<String>,
    keys: HashSet<String>,
}

impl WorkingSet {
    fn contains(&self, name: &str) -> bool {
        self.keys.contains(&name.to_lowercase())
    }

    fn insert(&mut self, name: &str) -> bool {
        if self.keys.insert(name.to_lowercase()) {
            self.names.push(name.to_string());
            true
        } else {
            false
        }
    }

    fn len(&self) -> usize {
        self.names.len()
    }
}

/// Rules-text phrases that only pay off in colors outside `identity`.
///
/// Three phrases per missing color, generated in WUBRG order.
pub fn banned_phrases(identity: ColorSet) -> Vec<String> {
    identity
        .complement()
        .iter()
        .flat_map(|color: Color| {
            let name = color.name();
            [
                format!("{name} spells you cast"),
                format!("{name} spells cost"),
                format!("{name} creatures you control"),
            ]
        })
        .collect()
}

fn mentions_banned_phrase(card: &Card, banned: &[String]) -> bool {
    let text = card.oracle_lower();
    banned.iter().any(|phrase| text.contains(phrase.as_str()))
}

/// Owned, legal, non-land cards not yet in the deck, most popular first.
///
/// Each name appears once, resolved through the index so repeated rows use
/// the same data as every other lookup. The sort is stable, so equal ranks
/// keep collection order.
fn candidate_pool<'a>(
    index: &'a CardIndex,
    commander: &Card,
    deck: &WorkingSet,
    banned: &[String],
) -> Vec<&'a Card> {
    let mut seen = HashSet::new();
    let mut pool: Vec<&Card> = index
        .iter()
        .filter(|card| seen.insert(card.name.to_lowercase()))
        .filter_map(|card| index.get(&card.name))
        .filter(|card| !card.is_land())
        .filter(|card| !card.name.eq_ignore_ascii_case(&commander.name))
        .filter(|card| !deck.contains(&card.name))
        .filter(|card| card.fits_identity(commander.color_identity))
        .filter(|card| !mentions_banned_phrase(card, banned))
        .collect();
    pool.sort_by_key(|card| card.popularity_rank);
    pool
}

/// Builds the spell list for `candidate`.
///
/// Returns fewer than `deck_size - target_lands` spells when the pool runs
/// dry; that is logged, not an error. Fails only when the commander is not
/// in the index.
pub fn optimize_deck(
    candidate: &DeckCandidate,
    index: &CardIndex,
    target_lands: u32,
    rules: &RuleTable,
    config: &BuildConfig,
) -> Result<OptimizedSpells> {
    let commander = index
        .get(&candidate.commander)
        .ok_or_else(|| DeckError::UnknownCommander(candidate.commander.clone()))?;
    let overrides = &candidate.role_map;
    let max_non_lands = config.non_land_slots(target_lands);

    let mut deck = WorkingSet::default();
    for name in &candidate.decklist {
        let resolved = index.get(name);
        if let Some(card) = resolved
            && (card.is_land() || card.name.eq_ignore_ascii_case(&commander.name))
        {
            debug!(card = %card.name, "dropping land or commander from spell list");
            continue;
        }
        let canonical = resolved.map_or(name.as_str(), |card| card.name.as_str());
        deck.insert(canonical);
    }

    let banned = banned_phrases(commander.color_identity);

    let mut tally = RoleTally::default();
    for card in deck.names.iter().filter_map(|name| index.get(name)) {
        tally.record(&classify(card, rules, overrides));
    }
    info!(
        commander = %commander.name,
        ramp = tally.ramp,
        draw = tally.draw,
        removal = tally.removal,
        wipe = tally.wipe,
        recursion = tally.recursion,
        "classified synergy list"
    );

    let pool = candidate_pool(index, commander, &deck, &banned);

    let mut staples_added = Vec::new();
    for (role, quota) in config.quotas.entries() {
        let have = tally.get(&role);
        if have >= quota {
            continue;
        }
        let needed = (quota - have) as usize;
        let mut filled = 0usize;
        for card in &pool {
            if filled >= needed {
                break;
            }
            if deck.contains(&card.name) {
                continue;
            }
            if classify(card, rules, overrides) == role && deck.insert(&card.name) {
                staples_added.push((card.name.clone(), role.clone()));
                filled += 1;
            }
        }
        if filled < needed {
            debug!(%role, filled, needed, "quota not fully met from pool");
        }
    }
    if !staples_added.is_empty() {
        info!(count = staples_added.len(), "added staples");
        for (name, role) in staples_added.iter().take(5) {
            debug!(card = %name, %role, "staple");
        }
    }

    let mut padded = Vec::new();
    for card in &pool {
        if deck.len() >= max_non_lands {
            break;
        }
        if deck.insert(&card.name) {
            padded.push(card.name.clone());
        }
    }

    let mut trimmed = Vec::new();
    let spells = if deck.len() > max_non_lands {
        let excess = deck.len() - max_non_lands;
        let mut by_rank: Vec<(usize, u32)> = deck
            .names
            .iter()
            .enumerate()
            .map(|(position, name)| {
                let rank = index.get(name).map_or(UNRANKED, |c| c.popularity_rank);
                (position, rank)
            })
            .collect();
        // Worst rank first; equal ranks keep deck order.
        by_rank.sort_by(|a, b| b.1.cmp(&a.1));
        let dropped: HashSet<usize> = by_rank.iter().take(excess).map(|(p, _)| *p).collect();

        let mut kept = Vec::with_capacity(max_non_lands);
        for (position, name) in deck.names.into_iter().enumerate() {
            if dropped.contains(&position) {
                trimmed.push(name);
            } else {
                kept.push(name);
            }
        }
        info!(count = trimmed.len(), "trimmed excess cards");
        kept
    } else {
        deck.names
    };

    if spells.len() < max_non_lands {
        warn!(
            commander = %commander.name,
            have = spells.len(),
            want = max_non_lands,
            "candidate pool exhausted before the spell list was full"
        );
    }

    Ok(OptimizedSpells {
        spells,
        tally,
        staples_added,
        padded,
        trimmed,
    })
}
