use std::fmt;

use serde::{Deserialize, Serialize};

/// Functional role of a card in a deck.
///
/// Labels outside the known set (e.g. "Synergy" from a ranking source) are
/// carried as [`Role::Custom`]; they never count toward a quota.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    Land,
    Ramp,
    Draw,
    Removal,
    Wipe,
    Recursion,
    General,
    Custom(String),
}

impl Role {
    /// Roles that are tracked against minimum counts, in fill order.
    pub const QUOTA_ROLES: [Role; 5] = [
        Role::Ramp,
        Role::Draw,
        Role::Removal,
        Role::Wipe,
        Role::Recursion,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Role::Land => "Land",
            Role::Ramp => "Ramp",
            Role::Draw => "Draw",
            Role::Removal => "Removal",
            Role::Wipe => "Wipe",
            Role::Recursion => "Recursion",
            Role::General => "General",
            Role::Custom(label) => label,
        }
    }

    pub fn is_quota_role(&self) -> bool {
        Self::QUOTA_ROLES.contains(self)
    }

    /// Mana value at or above which a rule for this role is not considered.
    pub fn mana_value_cap(&self) -> Option<f64> {
        match self {
            Role::Ramp => Some(5.0),
            Role::Removal | Role::Draw | Role::Recursion => Some(6.0),
            _ => None,
        }
    }
}

impl From<String> for Role {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Land" => Role::Land,
            "Ramp" => Role::Ramp,
            "Draw" => Role::Draw,
            "Removal" => Role::Removal,
            "Wipe" => Role::Wipe,
            "Recursion" => Role::Recursion,
            "General" => Role::General,
            _ => Role::Custom(label),
        }
    }
}

impl From<&str> for Role {
    fn from(label: &str) -> Self {
        Role::from(label.to_string())
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::Custom(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-role counts for the five quota roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoleTally {
    pub ramp: u32,
    pub draw: u32,
    pub removal: u32,
    pub wipe: u32,
    pub recursion: u32,
}

impl RoleTally {
    /// Counts `role` if it is a quota role; other roles are ignored.
    pub fn record(&mut self, role: &Role) {
        if let Some(slot) = self.slot_mut(role) {
            *slot += 1;
        }
    }

    /// Count for `role`, zero for non-quota roles.
    pub fn get(&self, role: &Role) -> u32 {
        match role {
            Role::Ramp => self.ramp,
            Role::Draw => self.draw,
            Role::Removal => self.removal,
            Role::Wipe => self.wipe,
            Role::Recursion => self.recursion,
            _ => 0,
        }
    }

    fn slot_mut(&mut self, role: &Role) -> Option<&mut u32> {
        match role {
            Role::Ramp => Some(&mut self.ramp),
            Role::Draw => Some(&mut self.draw),
            Role::Removal => Some(&mut self.removal),
            Role::Wipe => Some(&mut self.wipe),
            Role::Recursion => Some(&mut self.recursion),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_labels_parse_to_variants() {
        assert_eq!(Role::from("Ramp"), Role::Ramp);
        assert_eq!(Role::from("Wipe"), Role::Wipe);
        assert_eq!(Role::from("General"), Role::General);
    }

    #[test]
    fn test_unknown_labels_are_opaque() {
        let role = Role::from("Synergy");
        assert_eq!(role, Role::Custom("Synergy".to_string()));
        assert!(!role.is_quota_role());
        assert_eq!(role.to_string(), "Synergy");
        // Labels are case-sensitive.
        assert_eq!(Role::from("ramp"), Role::Custom("ramp".to_string()));
    }

    #[test]
    fn test_serde_uses_plain_labels() {
        let roles: Vec<Role> = serde_json::from_str(r#"["Draw", "Creature"]"#).unwrap();
        assert_eq!(roles, vec![Role::Draw, Role::Custom("Creature".to_string())]);
        assert_eq!(serde_json::to_string(&Role::Removal).unwrap(), r#""Removal""#);
    }

    #[test]
    fn test_mana_value_caps() {
        assert_eq!(Role::Ramp.mana_value_cap(), Some(5.0));
        assert_eq!(Role::Draw.mana_value_cap(), Some(6.0));
        assert_eq!(Role::Removal.mana_value_cap(), Some(6.0));
        assert_eq!(Role::Recursion.mana_value_cap(), Some(6.0));
        assert_eq!(Role::Wipe.mana_value_cap(), None);
        assert_eq!(Role::General.mana_value_cap(), None);
    }

    #[test]
    fn test_tally_ignores_non_quota_roles() {
        let mut tally = RoleTally::default();
        for role in [Role::Ramp, Role::Ramp, Role::Land, Role::General, Role::Wipe] {
            tally.record(&role);
        }
        assert_eq!(tally.get(&Role::Ramp), 2);
        assert_eq!(tally.get(&Role::Wipe), 1);
        assert_eq!(tally.get(&Role::Land), 0);
    }
}
