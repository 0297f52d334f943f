//! Mana base construction.
//!
//! Lands are added in two phases. Non-basic lands from the pool go in first,
//! most popular first, subject to color-identity and off-color fetch checks.
//! Whatever slots remain are split among basic lands in proportion to the
//! colored pips of the spells.

use std::collections::HashSet;

use tracing::{debug, info};

use crate::card::Card;
use crate::color::{COLORLESS_BASIC, Color, ColorSet};
use crate::config::{BuildConfig, FetchDetection};
use crate::index::CardIndex;
use crate::mana::PipCounts;

/// A deck with its lands appended.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ManaBase {
    /// Spells followed by non-basics followed by basics.
    pub decklist: Vec<String>,
    pub non_basics: Vec<String>,
    /// Basic land name and quantity, in the order they were added.
    pub basics: Vec<(String, usize)>,
}

impl ManaBase {
    pub fn non_basics_added(&self) -> usize {
        self.non_basics.len()
    }

    pub fn basics_added(&self) -> usize {
        self.basics.iter().map(|(_, qty)| qty).sum()
    }

    pub fn lands_added(&self) -> usize {
        self.non_basics_added() + self.basics_added()
    }

    /// Quantity of a given basic land.
    pub fn basic_count(&self, name: &str) -> usize {
        self.basics
            .iter()
            .filter(|(basic, _)| basic == name)
            .map(|(_, qty)| qty)
            .sum()
    }
}

/// Appends `total_lands_needed` lands to `spells`.
///
/// Never adds more than requested. With an empty pool of non-basics every
/// slot goes to basics, so the total is always met.
pub fn add_lands(
    spells: Vec<String>,
    index: &CardIndex,
    total_lands_needed: usize,
    commander: &Card,
    config: &BuildConfig,
) -> ManaBase {
    info!(slots = total_lands_needed, "building mana base");
    let mut decklist = spells;

    let non_basics = add_non_basics(&mut decklist, index, total_lands_needed, commander, config);
    let remaining = total_lands_needed.saturating_sub(non_basics.len());
    let basics = fill_basics(&mut decklist, index, remaining, commander);

    ManaBase {
        decklist,
        non_basics,
        basics,
    }
}

/// Colors a land's text refers to, as a stand-in for the basic land types it
/// can fetch.
pub fn mentioned_colors(lowered_text: &str, detection: FetchDetection) -> ColorSet {
    Color::ALL
        .into_iter()
        .filter(|color| match detection {
            FetchDetection::LandTypes => lowered_text.contains(color.land_type()),
            FetchDetection::ColorCodes => {
                lowered_text.contains(color.code().to_ascii_lowercase())
            }
        })
        .collect()
}

/// Phase one: the best non-basic lands the commander can legally play.
///
/// A land whose text mentions colors is skipped when none of them are ours.
/// When it also mentions an off-color, it is kept only if its rank is within
/// `off_color_rank_limit`.
pub fn add_non_basics(
    deck: &mut Vec<String>,
    index: &CardIndex,
    slots_available: usize,
    commander: &Card,
    config: &BuildConfig,
) -> Vec<String> {
    let identity = commander.color_identity;
    let in_deck: HashSet<String> = deck.iter().map(|name| name.to_lowercase()).collect();

    let mut candidates: Vec<&Card> = index
        .iter()
        .filter(|card| card.is_nonbasic_land())
        .filter(|card| !in_deck.contains(&card.name.to_lowercase()))
        .filter(|card| !card.name.eq_ignore_ascii_case(&commander.name))
        .filter(|card| card.fits_identity(identity))
        .filter(|card| {
            let mentioned = mentioned_colors(&card.oracle_lower(), config.fetch_detection);
            if mentioned.is_empty() {
                return true;
            }
            if mentioned.intersection(identity).is_empty() {
                debug!(card = %card.name, "skipping land that fetches none of our colors");
                return false;
            }
            let off_color = mentioned.difference(identity);
            if !off_color.is_empty() && card.popularity_rank > config.off_color_rank_limit {
                debug!(
                    card = %card.name,
                    rank = card.popularity_rank,
                    off_color = %off_color,
                    "skipping low-ranked off-color fetch"
                );
                return false;
            }
            true
        })
        .collect();
    candidates.sort_by_key(|card| card.popularity_rank);

    let mut seen = HashSet::new();
    let mut added = Vec::new();
    for card in candidates {
        if added.len() >= slots_available {
            break;
        }
        if seen.insert(card.name.to_lowercase()) {
            deck.push(card.name.clone());
            added.push(card.name.clone());
        }
    }

    if !added.is_empty() {
        info!(count = added.len(), "added non-basic lands");
        for name in added.iter().take(3) {
            debug!(card = %name, "non-basic");
        }
    }
    added
}

/// Colored pips across the deck's non-land cards, excluding the commander.
///
/// Only colors inside `identity` are counted.
pub fn count_pips(deck: &[String], index: &CardIndex, commander: &Card) -> PipCounts {
    let mut pips = PipCounts::new();
    for card in deck
        .iter()
        .filter(|name| !name.eq_ignore_ascii_case(&commander.name))
        .filter_map(|name| index.get(name))
        .filter(|card| !card.is_land())
    {
        pips += PipCounts::from_mana_cost(&card.mana_cost);
    }

    let mut in_identity = PipCounts::new();
    for color in commander.color_identity.iter() {
        in_identity.add(color, pips.get(color));
    }
    in_identity
}

fn push_basic(deck: &mut Vec<String>, basics: &mut Vec<(String, usize)>, name: &str, qty: usize) {
    if qty == 0 {
        return;
    }
    deck.extend(std::iter::repeat_n(name.to_string(), qty));
    match basics.iter_mut().find(|(basic, _)| basic == name) {
        Some((_, existing)) => *existing += qty,
        None => basics.push((name.to_string(), qty)),
    }
}

/// Phase two: fill `slots_needed` with basic lands weighted by pip count.
pub fn fill_basics(
    deck: &mut Vec<String>,
    index: &CardIndex,
    slots_needed: usize,
    commander: &Card,
) -> Vec<(String, usize)> {
    let mut basics = Vec::new();
    if slots_needed == 0 {
        return basics;
    }

    let identity = commander.color_identity;
    let pips = count_pips(deck, index, commander);
    let total_pips = pips.total() as usize;

    if total_pips == 0 {
        let Some(first) = identity.first() else {
            push_basic(deck, &mut basics, COLORLESS_BASIC, slots_needed);
            info!(qty = slots_needed, "colorless commander, filled with Wastes");
            return basics;
        };

        let colors = identity.count() as usize;
        let per_color = slots_needed / colors;
        let remainder = slots_needed % colors;
        for color in identity.iter() {
            let extra = if color == first { remainder } else { 0 };
            push_basic(deck, &mut basics, color.basic_land(), per_color + extra);
        }
        info!(qty = slots_needed, colors = %identity, "no pips, split basics evenly");
        return basics;
    }

    let ranked = pips.ranked();
    let mut assigned = 0usize;
    for &(color, count) in &ranked {
        let mut qty = slots_needed * count as usize / total_pips;
        if qty == 0 {
            qty = 1;
        }
        qty = qty.min(slots_needed - assigned);
        push_basic(deck, &mut basics, color.basic_land(), qty);
        assigned += qty;
        debug!(land = color.basic_land(), qty, pips = count, "basic allocation");
    }

    let remainder = slots_needed - assigned;
    if remainder > 0
        && let Some(&(primary, _)) = ranked.first()
    {
        push_basic(deck, &mut basics, primary.basic_land(), remainder);
        debug!(land = primary.basic_land(), qty = remainder, "rounding remainder");
    }

    info!(qty = slots_needed, "added basic lands");
    basics
}
