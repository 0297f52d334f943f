use crate::color::Color;

/// Colored pip totals, one slot per color in WUBRG order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PipCounts([u32; 5]);

impl PipCounts {
    pub const fn new() -> Self {
        Self([0; 5])
    }

    /// Counts literal color-code characters in a mana cost string.
    ///
    /// `{2}{U}{U}` yields two blue pips; hybrid `{W/U}` counts once for each
    /// color. Lowercase letters are not pips.
    pub fn from_mana_cost(cost: &str) -> Self {
        let mut counts = Self::new();
        counts.add_mana_cost(cost);
        counts
    }

    pub fn add_mana_cost(&mut self, cost: &str) {
        for color in Color::ALL {
            let code = color.code();
            self.0[color.index()] += cost.chars().filter(|c| *c == code).count() as u32;
        }
    }

    pub fn get(&self, color: Color) -> u32 {
        self.0[color.index()]
    }

    pub fn add(&mut self, color: Color, amount: u32) {
        self.0[color.index()] += amount;
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Colors with at least one pip, most pips first.
    ///
    /// The sort is stable over WUBRG, so ties keep that order.
    pub fn ranked(&self) -> Vec<(Color, u32)> {
        let mut ranked: Vec<(Color, u32)> = Color::ALL
            .into_iter()
            .map(|c| (c, self.get(c)))
            .filter(|(_, n)| *n > 0)
            .collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked
    }
}

impl std::ops::AddAssign for PipCounts {
    fn add_assign(&mut self, other: Self) {
        for (mine, theirs) in self.0.iter_mut().zip(other.0) {
            *mine += theirs;
        }
    }
}
