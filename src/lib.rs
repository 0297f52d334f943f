//! Deckforge - Commander deck assembly from an owned card pool.
//!
//! Takes a collection export, a table of role heuristics and a set of
//! commander/theme candidates, and produces complete 100-card decklists.

pub mod builder;
pub mod candidate;
pub mod card;
pub mod classifier;
pub mod color;
pub mod config;
pub mod curve;
pub mod error;
pub mod export;
pub mod index;
pub mod lands;
pub mod mana;
pub mod optimizer;
pub mod role;
pub mod rules;

pub use builder::{BuiltDeck, build_deck};
pub use candidate::{DeckCandidate, select_winners};
pub use card::{Card, CardBuilder, CardRow, UNRANKED};
pub use classifier::{RoleOverrides, classify};
pub use color::{COLORLESS_BASIC, Color, ColorSet};
pub use config::{BuildConfig, CurveThresholds, FetchDetection, Quotas};
pub use curve::{CurveHealth, CurveSummary, CurveWarning, analyze_curve, analyze_curve_with, curve_health};
pub use error::{DeckError, Result};
pub use export::{export_decklist, export_file_name, render_decklist};
pub use index::CardIndex;
pub use lands::{ManaBase, add_lands, add_non_basics, count_pips, fill_basics, mentioned_colors};
pub use mana::PipCounts;
pub use optimizer::{OptimizedSpells, banned_phrases, optimize_deck};
pub use role::{Role, RoleTally};
pub use rules::{HeuristicRule, RuleTable};
