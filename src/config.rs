//! Tunable constants for deck assembly.
//!
//! Every field has a default matching the standard Commander build, so a
//! config file only needs to name what it changes.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, read_json};
use crate::role::Role;

/// Minimum counts per quota role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Quotas {
    pub ramp: u32,
    pub draw: u32,
    pub removal: u32,
    pub wipe: u32,
    pub recursion: u32,
}

impl Default for Quotas {
    fn default() -> Self {
        Self {
            ramp: 12,
            draw: 10,
            removal: 12,
            wipe: 2,
            recursion: 2,
        }
    }
}

impl Quotas {
    /// Quota entries in fill order: Ramp, Draw, Removal, Wipe, Recursion.
    pub fn entries(&self) -> [(Role, u32); 5] {
        [
            (Role::Ramp, self.ramp),
            (Role::Draw, self.draw),
            (Role::Removal, self.removal),
            (Role::Wipe, self.wipe),
            (Role::Recursion, self.recursion),
        ]
    }
}

/// Average-mana-value thresholds that pick a land count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveThresholds {
    pub default_lands: u32,
    pub heavy_above: f64,
    pub heavy_lands: u32,
    pub elevated_above: f64,
    pub elevated_lands: u32,
    pub very_lean_below: f64,
    pub very_lean_lands: u32,
    pub lean_below: f64,
    pub lean_lands: u32,
}

impl Default for CurveThresholds {
    fn default() -> Self {
        Self {
            default_lands: 37,
            heavy_above: 3.8,
            heavy_lands: 40,
            elevated_above: 3.4,
            elevated_lands: 38,
            very_lean_below: 2.0,
            very_lean_lands: 33,
            lean_below: 2.4,
            lean_lands: 35,
        }
    }
}

impl CurveThresholds {
    /// Land count for an average mana value.
    ///
    /// High thresholds are checked top-down, then low thresholds bottom-up,
    /// so the leanest band is reachable.
    pub fn target_lands(&self, average: f64) -> u32 {
        if average > self.heavy_above {
            self.heavy_lands
        } else if average > self.elevated_above {
            self.elevated_lands
        } else if average < self.very_lean_below {
            self.very_lean_lands
        } else if average < self.lean_below {
            self.lean_lands
        } else {
            self.default_lands
        }
    }
}

/// How a non-basic land's text is scanned for the colors it fetches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchDetection {
    /// Look for basic land type names ("island", "swamp", ...).
    #[default]
    LandTypes,
    /// Look for the lowercase color letter (`w`, `u`, `b`, `r`, `g`) anywhere
    /// in the lowercased text.
    ///
    /// Letters inside ordinary words count, so the "w" in "swamp" reads as
    /// white and nearly every land with rules text mentions several colors.
    ColorCodes,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Cards in the deck besides the commander.
    pub deck_size: u32,
    pub quotas: Quotas,
    pub curve: CurveThresholds,
    /// Worst rank at which an off-color fetch land is still included.
    pub off_color_rank_limit: u32,
    pub fetch_detection: FetchDetection,
    /// Candidates below this synergy score are not reported.
    pub min_scan_score: usize,
    /// Candidates below this synergy score are not built.
    pub victory_threshold: usize,
    pub max_export_count: usize,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            deck_size: 99,
            quotas: Quotas::default(),
            curve: CurveThresholds::default(),
            off_color_rank_limit: 600,
            fetch_detection: FetchDetection::default(),
            min_scan_score: 25,
            victory_threshold: 45,
            max_export_count: 5,
        }
    }
}

impl BuildConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }

    /// Spell slots left after reserving `target_lands`.
    pub fn non_land_slots(&self, target_lands: u32) -> usize {
        self.deck_size.saturating_sub(target_lands) as usize
    }
}
