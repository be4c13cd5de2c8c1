//! Combatants as seen across the collaborator boundary.
//!
//! The engine never owns the encounter; it reads combatant data through
//! [`CombatState`](super::CombatState) and asks the collaborator to
//! mutate it. These types define the shape both sides agree on.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};

use crate::core::{Ability, AbilityScores, CombatantId};

/// Which side of the encounter a combatant fights on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Player,
    Monster,
}

/// A map position, in feet from the encounter origin.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// A condition currently affecting a combatant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveCondition {
    pub name: String,
    /// Remaining duration in rounds; `None` lasts until removed.
    pub duration: Option<u32>,
}

/// A participant in the encounter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Combatant {
    pub id: CombatantId,
    pub name: String,
    pub side: Side,
    pub hp: i64,
    pub max_hp: i64,
    #[serde(default)]
    pub abilities: AbilityScores,
    /// Explicit saving-throw bonuses; abilities not listed here fall
    /// back to the ability modifier.
    #[serde(default)]
    pub saving_throws: FxHashMap<Ability, i64>,
    #[serde(default)]
    pub conditions: Vec<ActiveCondition>,
    #[serde(default)]
    pub position: Option<Position>,
    #[serde(default)]
    pub resistances: FxHashSet<String>,
    #[serde(default)]
    pub immunities: FxHashSet<String>,
    #[serde(default)]
    pub vulnerabilities: FxHashSet<String>,
}

impl Combatant {
    /// Create a combatant at full hit points.
    #[must_use]
    pub fn new(
        id: impl Into<CombatantId>,
        name: impl Into<String>,
        side: Side,
        max_hp: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            side,
            hp: max_hp,
            max_hp,
            abilities: AbilityScores::default(),
            saving_throws: FxHashMap::default(),
            conditions: Vec::new(),
            position: None,
            resistances: FxHashSet::default(),
            immunities: FxHashSet::default(),
            vulnerabilities: FxHashSet::default(),
        }
    }

    /// Set ability scores (builder pattern).
    #[must_use]
    pub fn with_abilities(mut self, abilities: AbilityScores) -> Self {
        self.abilities = abilities;
        self
    }

    /// Add an explicit saving-throw bonus (builder pattern).
    #[must_use]
    pub fn with_saving_throw(mut self, ability: Ability, bonus: i64) -> Self {
        self.saving_throws.insert(ability, bonus);
        self
    }

    /// Set a position (builder pattern).
    #[must_use]
    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    /// Add a damage resistance (builder pattern).
    #[must_use]
    pub fn with_resistance(mut self, damage_type: impl Into<String>) -> Self {
        self.resistances.insert(damage_type.into());
        self
    }

    /// Add a damage immunity (builder pattern).
    #[must_use]
    pub fn with_immunity(mut self, damage_type: impl Into<String>) -> Self {
        self.immunities.insert(damage_type.into());
        self
    }

    /// Add a damage vulnerability (builder pattern).
    #[must_use]
    pub fn with_vulnerability(mut self, damage_type: impl Into<String>) -> Self {
        self.vulnerabilities.insert(damage_type.into());
        self
    }

    /// Saving-throw bonus: explicit override, else the ability modifier.
    #[must_use]
    pub fn save_bonus(&self, ability: Ability) -> i64 {
        self.saving_throws
            .get(&ability)
            .copied()
            .unwrap_or_else(|| self.abilities.modifier(ability))
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    #[must_use]
    pub fn has_condition(&self, name: &str) -> bool {
        self.conditions.iter().any(|c| c.name == name)
    }
}
