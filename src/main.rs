//! Deckforge - Commander deck builder
//!
//! Builds decklists for the strongest commander/theme candidates using only
//! cards from an owned collection.
//!
//! ## Usage
//!
//! ```text
//! deckforge --collection cards.json --rules heuristics.json --candidates candidates.json
//!
//! Options:
//!   --config <FILE>     Build settings (quotas, land curve, thresholds)
//!   --out-dir <DIR>     Where exported decklists are written [default: .]
//!   --dry-run           Build and report without writing files
//! ```
//!
//! Set `RUST_LOG` to adjust log output, e.g. `RUST_LOG=deckforge=debug`.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use deckforge::{
    BuildConfig, CardIndex, DeckCandidate, RuleTable, build_deck, export_decklist,
    export_file_name, select_winners,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "deckforge", about = "Assemble Commander decks from an owned card pool")]
struct Args {
    /// Card collection export (JSON array of card rows).
    #[arg(long)]
    collection: PathBuf,

    /// Role heuristics table.
    #[arg(long)]
    rules: PathBuf,

    /// Scored commander/theme candidates.
    #[arg(long)]
    candidates: PathBuf,

    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("deckforge=info,warn")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => BuildConfig::load(path).context("loading build config")?,
        None => BuildConfig::default(),
    };
    let index = CardIndex::load(&args.collection).context("loading collection")?;
    let rules = RuleTable::load(&args.rules).context("loading heuristic rules")?;
    let candidates = DeckCandidate::load_all(&args.candidates).context("loading candidates")?;
    info!(
        cards = index.len(),
        rules = rules.len(),
        candidates = candidates.len(),
        "inputs loaded"
    );

    let winners = select_winners(candidates, &config);
    if winners.is_empty() {
        warn!(
            threshold = config.victory_threshold,
            "no candidate reached the victory threshold"
        );
        return Ok(());
    }

    if !args.dry_run {
        fs::create_dir_all(&args.out_dir)
            .with_context(|| format!("creating {}", args.out_dir.display()))?;
    }

    for candidate in &winners {
        let deck = match build_deck(candidate, &index, &rules, &config) {
            Ok(deck) => deck,
            Err(err) => {
                warn!(commander = %candidate.commander, "skipping candidate: {err}");
                continue;
            }
        };

        println!(
            "{} / {}: {} cards, {} lands, avg mana value {:.2}",
            deck.commander,
            deck.theme,
            deck.total_cards(),
            deck.land_count(),
            deck.average_mana_value
        );

        if args.dry_run {
            continue;
        }
        let path = args.out_dir.join(export_file_name(&deck.commander, &deck.theme));
        export_decklist(&path, &deck, &index)?;
        println!("  wrote {}", path.display());
    }

    Ok(())
}
