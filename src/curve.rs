//! Mana curve analysis.

use std::fmt;

use crate::config::CurveThresholds;
use crate::index::CardIndex;

/// Land target and average mana value for a list of cards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSummary {
    pub target_lands: u32,
    pub average_mana_value: f64,
}

/// Picks a land count from the average mana value of `names`.
///
/// Names missing from the index are skipped. With nothing to measure the
/// result is the default land count and an average of zero.
pub fn analyze_curve<S: AsRef<str>>(names: &[S], index: &CardIndex) -> CurveSummary {
    analyze_curve_with(names, index, &CurveThresholds::default())
}

pub fn analyze_curve_with<S: AsRef<str>>(
    names: &[S],
    index: &CardIndex,
    thresholds: &CurveThresholds,
) -> CurveSummary {
    let (total, matched) = names
        .iter()
        .filter_map(|name| index.get(name.as_ref()))
        .fold((0.0f64, 0usize), |(total, count), card| {
            (total + card.mana_value, count + 1)
        });

    if matched == 0 {
        return CurveSummary {
            target_lands: thresholds.default_lands,
            average_mana_value: 0.0,
        };
    }

    let average = total / matched as f64;
    CurveSummary {
        target_lands: thresholds.target_lands(average),
        average_mana_value: average,
    }
}

/// Something off about the shape of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveWarning {
    FewTwoDrops(u32),
    BloatedFourDrops(u32),
    TopHeavy(u32),
}

impl fmt::Display for CurveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveWarning::FewTwoDrops(n) => write!(f, "low on 2-drops: {n} (target ~18)"),
            CurveWarning::BloatedFourDrops(n) => write!(f, "bloated 4-drop slot: {n} (target ~10)"),
            CurveWarning::TopHeavy(n) => write!(f, "too many 6+ drops: {n} (target ~5)"),
        }
    }
}

/// Non-land spells bucketed by mana value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CurveHealth {
    /// Index 0 holds 1-drops, index 5 holds everything at 6 or more.
    /// Zero-cost spells are not bucketed.
    pub buckets: [u32; 6],
    pub warnings: Vec<CurveWarning>,
}

impl CurveHealth {
    /// Spells at exactly `mana_value`, or at 6+ for any value of 6 or more.
    pub fn at(&self, mana_value: u32) -> u32 {
        match mana_value {
            0 => 0,
            1..=5 => self.buckets[mana_value as usize - 1],
            _ => self.buckets[5],
        }
    }
}

pub fn curve_health<S: AsRef<str>>(names: &[S], index: &CardIndex) -> CurveHealth {
    let mut health = CurveHealth::default();
    for card in names
        .iter()
        .filter_map(|name| index.get(name.as_ref()))
        .filter(|card| !card.is_land())
    {
        let mana_value = card.mana_value.floor() as u32;
        match mana_value {
            0 => {}
            1..=5 => health.buckets[mana_value as usize - 1] += 1,
            _ => health.buckets[5] += 1,
        }
    }

    if health.at(2) < 12 {
        health.warnings.push(CurveWarning::FewTwoDrops(health.at(2)));
    }
    if health.at(4) > 12 {
        health.warnings.push(CurveWarning::BloatedFourDrops(health.at(4)));
    }
    if health.at(6) > 6 {
        health.warnings.push(CurveWarning::TopHeavy(health.at(6)));
    }
    health
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::CardBuilder;
    use approx::assert_relative_eq;

    fn index_with(values: &[(&str, f64)]) -> CardIndex {
        values
            .iter()
            .map(|(name, mv)| CardBuilder::new(*name).type_line("Creature").mana_value(*mv).build())
            .collect()
    }

    #[test]
    fn test_empty_list_defaults() {
        let index = CardIndex::default();
        let summary = analyze_curve::<&str>(&[], &index);
        assert_eq!(summary.target_lands, 37);
        assert_eq!(summary.average_mana_value, 0.0);
    }

    #[test]
    fn test_unmatched_names_are_skipped() {
        let index = index_with(&[("A", 4.0), ("B", 4.0)]);
        let summary = analyze_curve(&["A", "Missing", "b"], &index);
        assert_relative_eq!(summary.average_mana_value, 4.0);
        assert_eq!(summary.target_lands, 40);
    }

    #[test]
    fn test_only_unmatched_names_defaults() {
        let index = index_with(&[("A", 4.0)]);
        let summary = analyze_curve(&["Nope"], &index);
        assert_eq!(summary.target_lands, 37);
        assert_eq!(summary.average_mana_value, 0.0);
    }

    #[test]
    fn test_threshold_examples() {
        let index = index_with(&[("3", 3.0), ("4", 4.0), ("2", 2.0), ("1", 1.0), ("5", 5.0)]);
        let elevated = analyze_curve(&["3", "4"], &index);
        assert_relative_eq!(elevated.average_mana_value, 3.5);
        assert_eq!(elevated.target_lands, 38);
        assert_eq!(analyze_curve(&["3"], &index).target_lands, 37);
        assert_eq!(analyze_curve(&["4"], &index).target_lands, 40);
        assert_eq!(analyze_curve(&["2", "3", "1", "3"], &index).target_lands, 35);
        assert_eq!(analyze_curve(&["2", "1"], &index).target_lands, 33);
    }

    #[test]
    fn test_custom_thresholds() {
        let index = index_with(&[("A", 5.0)]);
        let thresholds = CurveThresholds {
            heavy_lands: 42,
            ..CurveThresholds::default()
        };
        assert_eq!(analyze_curve_with(&["A"], &index, &thresholds).target_lands, 42);
    }

    #[test]
    fn test_curve_health_buckets_and_warnings() {
        let mut cards = Vec::new();
        for i in 0..13 {
            cards.push(CardBuilder::new(format!("Four {i}")).mana_value(4.0).build());
        }
        for i in 0..7 {
            cards.push(CardBuilder::new(format!("Big {i}")).mana_value(7.0 + i as f64).build());
        }
        cards.push(CardBuilder::new("Two").mana_value(2.0).build());
        cards.push(CardBuilder::new("Free").mana_value(0.0).build());
        cards.push(CardBuilder::new("Land").type_line("Land").mana_value(3.0).build());
        let names: Vec<String> = cards.iter().map(|c| c.name.clone()).collect();
        let index: CardIndex = cards.into_iter().collect();

        let health = curve_health(&names, &index);
        assert_eq!(health.at(4), 13);
        assert_eq!(health.at(6), 7);
        assert_eq!(health.at(2), 1);
        assert_eq!(health.at(3), 0);
        assert_eq!(
            health.warnings,
            vec![
                CurveWarning::FewTwoDrops(1),
                CurveWarning::BloatedFourDrops(13),
                CurveWarning::TopHeavy(7),
            ]
        );
    }
}
