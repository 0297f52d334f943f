//! Rule-based role classification.

use std::collections::HashMap;

use crate::card::Card;
use crate::role::Role;
use crate::rules::RuleTable;

/// Role hints keyed by exact card name.
///
/// Unlike every other name lookup in the crate, override keys are matched
/// case-sensitively.
pub type RoleOverrides = HashMap<String, Role>;

/// Assigns a single role to `card`.
///
/// Precedence: an exact-name override, then land type, then the first rule
/// in table order whose mana-value cap and phrase conditions pass, then
/// [`Role::General`].
pub fn classify(card: &Card, rules: &RuleTable, overrides: &RoleOverrides) -> Role {
    if let Some(role) = overrides.get(&card.name) {
        return role.clone();
    }

    if card.is_land() {
        return Role::Land;
    }

    let text = card.oracle_lower();
    rules
        .rules()
        .iter()
        .filter(|rule| {
            rule.role
                .mana_value_cap()
                .is_none_or(|cap| card.mana_value < cap)
        })
        .find(|rule| rule.matches_text(&text))
        .map_or(Role::General, |rule| rule.role.clone())
}
