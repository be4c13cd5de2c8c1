//! Actions and reaction triggers.
//!
//! An action binds an economy ([`ActionKind`]) to an ordered list of
//! effects. Reactions additionally declare what they are waiting for
//! ([`ReactionTrigger`]), matched against the encounter's current
//! [`TriggerEvent`].

use serde::{Deserialize, Serialize};

use crate::core::ActionId;
use crate::effects::Effect;

/// The action economies a boss action can belong to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Spends from the per-round legendary pool.
    Legendary,
    /// Spends from the mythic pool; only legal while the mythic phase
    /// is active.
    Mythic,
    /// Tied to the environment; always available.
    Lair,
    /// One per round, gated on a matching trigger event.
    Reaction,
    /// One per round, only on the creature's own turn.
    BonusAction,
    /// Once per round for climactic antagonists.
    VillainAction,
    /// Unlocked once any paragon phase has started.
    ParagonAction,
    /// Usable only while its recharge die is charged.
    Recharge,
}

impl ActionKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ActionKind::Legendary => "legendary",
            ActionKind::Mythic => "mythic",
            ActionKind::Lair => "lair",
            ActionKind::Reaction => "reaction",
            ActionKind::BonusAction => "bonus action",
            ActionKind::VillainAction => "villain action",
            ActionKind::ParagonAction => "paragon action",
            ActionKind::Recharge => "recharge",
        }
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What a reaction is waiting for.
///
/// Comparator fields left unset match any event of the right kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ReactionTrigger {
    /// An attack against the creature, optionally only from within
    /// `range` feet.
    Attacked {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        range: Option<u32>,
    },
    /// Incoming damage, optionally only of the given type.
    Damaged {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        damage_type: Option<String>,
    },
    /// A spell cast at or above `min_level`.
    SpellCast {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_level: Option<u32>,
    },
    /// Movement of at least `min_distance` feet.
    Movement {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min_distance: Option<u32>,
    },
}

/// The event a reaction may respond to, published by the combat state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TriggerEvent {
    Attacked { range: u32 },
    Damaged { damage_type: String },
    SpellCast { level: u32 },
    Movement { distance: u32 },
}

impl ReactionTrigger {
    /// Whether `event` satisfies this trigger.
    #[must_use]
    pub fn matches(&self, event: &TriggerEvent) -> bool {
        match (self, event) {
            (ReactionTrigger::Attacked { range }, TriggerEvent::Attacked { range: actual }) => {
                range.map_or(true, |declared| *actual <= declared)
            }
            (
                ReactionTrigger::Damaged { damage_type },
                TriggerEvent::Damaged {
                    damage_type: actual,
                },
            ) => damage_type.as_deref().map_or(true, |declared| actual == declared),
            (
                ReactionTrigger::SpellCast { min_level },
                TriggerEvent::SpellCast { level },
            ) => min_level.map_or(true, |declared| *level >= declared),
            (
                ReactionTrigger::Movement { min_distance },
                TriggerEvent::Movement { distance },
            ) => min_distance.map_or(true, |declared| *distance >= declared),
            _ => false,
        }
    }
}

fn default_cost() -> u32 {
    1
}

/// One entry in a creature's action catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: ActionId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type")]
    pub kind: ActionKind,
    /// Pool cost for economies with a shared pool; meaningless for the
    /// rest.
    #[serde(default = "default_cost")]
    pub cost: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<ReactionTrigger>,
    #[serde(default)]
    pub effects: Vec<Effect>,
}

impl Action {
    /// Create an action with cost 1 and no effects.
    #[must_use]
    pub fn new(id: impl Into<ActionId>, name: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            kind,
            cost: 1,
            trigger: None,
            effects: Vec::new(),
        }
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the pool cost (builder pattern).
    #[must_use]
    pub fn with_cost(mut self, cost: u32) -> Self {
        self.cost = cost;
        self
    }

    /// Set the reaction trigger (builder pattern).
    #[must_use]
    pub fn with_trigger(mut self, trigger: ReactionTrigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// Append an effect (builder pattern).
    #[must_use]
    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attacked_trigger_range() {
        let trigger = ReactionTrigger::Attacked { range: Some(10) };
        assert!(trigger.matches(&TriggerEvent::Attacked { range: 5 }));
        assert!(trigger.matches(&TriggerEvent::Attacked { range: 10 }));
        assert!(!trigger.matches(&TriggerEvent::Attacked { range: 30 }));

        let any = ReactionTrigger::Attacked { range: None };
        assert!(any.matches(&TriggerEvent::Attacked { range: 120 }));
    }

    #[test]
    fn test_damaged_trigger_type_match() {
        let trigger = ReactionTrigger::Damaged {
            damage_type: Some("fire".to_string()),
        };
        assert!(trigger.matches(&TriggerEvent::Damaged {
            damage_type: "fire".to_string()
        }));
        assert!(!trigger.matches(&TriggerEvent::Damaged {
            damage_type: "cold".to_string()
        }));
    }

    #[test]
    fn test_spell_cast_trigger_min_level() {
        let trigger = ReactionTrigger::SpellCast { min_level: Some(3) };
        assert!(!trigger.matches(&TriggerEvent::SpellCast { level: 2 }));
        assert!(trigger.matches(&TriggerEvent::SpellCast { level: 3 }));
        assert!(trigger.matches(&TriggerEvent::SpellCast { level: 9 }));
    }

    #[test]
    fn test_movement_trigger_min_distance() {
        let trigger = ReactionTrigger::Movement {
            min_distance: Some(10),
        };
        assert!(!trigger.matches(&TriggerEvent::Movement { distance: 5 }));
        assert!(trigger.matches(&TriggerEvent::Movement { distance: 15 }));
    }

    #[test]
    fn test_mismatched_kinds_never_match() {
        let trigger = ReactionTrigger::Attacked { range: None };
        assert!(!trigger.matches(&TriggerEvent::SpellCast { level: 1 }));
        assert!(!trigger.matches(&TriggerEvent::Movement { distance: 100 }));
    }

    #[test]
    fn test_action_kind_wire_tags() {
        assert_eq!(
            serde_json::to_string(&ActionKind::VillainAction).unwrap(),
            "\"villain_action\""
        );
        assert_eq!(
            serde_json::to_string(&ActionKind::BonusAction).unwrap(),
            "\"bonus_action\""
        );
    }

    #[test]
    fn test_action_cost_defaults_to_one() {
        let json = r#"{"id": "swipe", "name": "Swipe", "type": "legendary"}"#;
        let action: Action = serde_json::from_str(json).unwrap();
        assert_eq!(action.cost, 1);
        assert!(action.effects.is_empty());
    }

    #[test]
    fn test_trigger_wire_shape() {
        let json = r#"{"type": "spell_cast", "min_level": 4}"#;
        let trigger: ReactionTrigger = serde_json::from_str(json).unwrap();
        assert_eq!(trigger, ReactionTrigger::SpellCast { min_level: Some(4) });
    }
}
