//! Plain-text decklist export in the format deck-building sites import.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use tracing::info;

use crate::builder::BuiltDeck;
use crate::card::{Card, contains_ignore_case};
use crate::error::{DeckError, Result};
use crate::index::CardIndex;

fn is_basic_land(card: &Card) -> bool {
    contains_ignore_case(&card.type_line, "basic land")
}

/// Renders one line per unique card, commander first.
///
/// Remaining cards are grouped by name and sorted. Set codes and collector
/// numbers are written when known, except for basic lands.
pub fn render_decklist(deck: &BuiltDeck, index: &CardIndex) -> String {
    let mut out = String::new();

    let _ = write!(out, "1x {}", deck.commander);
    if let Some(set) = index.get(&deck.commander).and_then(|c| c.set_code.as_deref()) {
        let _ = write!(out, " ({set})");
    }
    out.push_str(" [Commander{top}]\n");

    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for name in deck
        .decklist
        .iter()
        .filter(|name| !name.eq_ignore_ascii_case(&deck.commander))
    {
        *counts.entry(name.as_str()).or_insert(0) += 1;
    }

    for (name, qty) in counts {
        let _ = write!(out, "{qty}x {name}");
        if let Some(card) = index.get(name).filter(|c| !is_basic_land(c)) {
            if let Some(set) = &card.set_code {
                let _ = write!(out, " ({set})");
            }
            if let Some(number) = &card.collector_number {
                let _ = write!(out, " {number}");
            }
        }
        out.push('\n');
    }
    out
}

/// File name for an exported deck: `Commander_Name_Theme.txt`.
pub fn export_file_name(commander: &str, theme: &str) -> String {
    let commander = commander.replace(' ', "_").replace(',', "");
    let theme = theme.replace(' ', "_");
    format!("{commander}_{theme}.txt")
}

pub fn export_decklist(path: impl AsRef<Path>, deck: &BuiltDeck, index: &CardIndex) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, render_decklist(deck, index)).map_err(|err| DeckError::io(path, err))?;
    info!(path = %path.display(), "exported decklist");
    Ok(())
}
