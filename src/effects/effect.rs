//! Effect definitions.
//!
//! Effects are the atomic pieces an action is built from, composed into
//! trees: an `aoe` effect re-targets its children to whoever is in the
//! area, and a `save` effect branches per target on the saving-throw
//! outcome. The interpreter gives them meaning; these types only
//! describe intent.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::combat::{Position, Side};
use crate::core::{Ability, Amount};

use super::targeting::TargetSpec;

/// Shape of an area of effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AreaShape {
    Sphere,
    Cube,
    Cone,
    Line,
    Cylinder,
}

/// A spatial region. The engine never interprets geometry itself; the
/// combat state decides who is inside.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AreaSpec {
    pub shape: AreaShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Position>,
    /// Radius, edge, or length in feet, per shape.
    pub size: u32,
}

impl AreaSpec {
    #[must_use]
    pub fn sphere(size: u32) -> Self {
        Self {
            shape: AreaShape::Sphere,
            origin: None,
            size,
        }
    }

    #[must_use]
    pub fn cone(size: u32) -> Self {
        Self {
            shape: AreaShape::Cone,
            origin: None,
            size,
        }
    }

    /// Set the origin (builder pattern).
    #[must_use]
    pub fn at(mut self, origin: Position) -> Self {
        self.origin = Some(origin);
        self
    }
}

/// A saving throw against a DC, with outcome modifiers.
///
/// The flags only apply where they make sense: `negate_on_success` and
/// `half_duration_on_success` gate conditions, `half_distance_on_success`
/// gates movement, `half_on_success` halves damage.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveSpec {
    pub ability: Ability,
    pub dc: i64,
    #[serde(default)]
    pub advantage: bool,
    #[serde(default)]
    pub disadvantage: bool,
    #[serde(default)]
    pub half_on_success: bool,
    #[serde(default)]
    pub negate_on_success: bool,
    #[serde(default)]
    pub half_duration_on_success: bool,
    #[serde(default)]
    pub half_distance_on_success: bool,
}

impl SaveSpec {
    #[must_use]
    pub fn new(ability: Ability, dc: i64) -> Self {
        Self {
            ability,
            dc,
            advantage: false,
            disadvantage: false,
            half_on_success: false,
            negate_on_success: false,
            half_duration_on_success: false,
            half_distance_on_success: false,
        }
    }

    /// Roll with advantage (builder pattern).
    #[must_use]
    pub fn with_advantage(mut self) -> Self {
        self.advantage = true;
        self
    }

    /// Roll with disadvantage (builder pattern).
    #[must_use]
    pub fn with_disadvantage(mut self) -> Self {
        self.disadvantage = true;
        self
    }

    /// Half damage on a successful save (builder pattern).
    #[must_use]
    pub fn half_on_success(mut self) -> Self {
        self.half_on_success = true;
        self
    }

    /// No effect on a successful save (builder pattern).
    #[must_use]
    pub fn negate_on_success(mut self) -> Self {
        self.negate_on_success = true;
        self
    }

    /// Half duration on a successful save (builder pattern).
    #[must_use]
    pub fn half_duration_on_success(mut self) -> Self {
        self.half_duration_on_success = true;
        self
    }

    /// Half distance on a successful save (builder pattern).
    #[must_use]
    pub fn half_distance_on_success(mut self) -> Self {
        self.half_distance_on_success = true;
        self
    }
}

fn default_side() -> Side {
    Side::Monster
}

/// What a summon effect brings into the fight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummonSpec {
    pub name: String,
    pub max_hp: i64,
    #[serde(default = "default_side")]
    pub side: Side,
}

fn default_count() -> u32 {
    1
}

/// One node of an action's effect tree.
///
/// Every variant that acts on combatants carries an optional
/// [`TargetSpec`]; without one, the caller's explicitly selected targets
/// are used. Nested effects under `aoe` and `save` are re-targeted by
/// the interpreter, so their own `targets` are ignored there.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Effect {
    Damage {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        targets: Option<TargetSpec>,
        amount: Amount,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        damage_type: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        save: Option<SaveSpec>,
    },
    Healing {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        targets: Option<TargetSpec>,
        amount: Amount,
    },
    Condition {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        targets: Option<TargetSpec>,
        condition: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        duration: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        save: Option<SaveSpec>,
    },
    Movement {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        targets: Option<TargetSpec>,
        distance: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        direction: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        save: Option<SaveSpec>,
    },
    Summon {
        creature: SummonSpec,
        #[serde(default = "default_count")]
        count: u32,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        position: Option<Position>,
    },
    Aoe {
        area: AreaSpec,
        effects: Vec<Effect>,
    },
    Save {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        targets: Option<TargetSpec>,
        #[serde(flatten)]
        save: SaveSpec,
        #[serde(default, deserialize_with = "one_or_many")]
        on_success: Vec<Effect>,
        #[serde(default, deserialize_with = "one_or_many")]
        on_failure: Vec<Effect>,
    },
    /// Opaque payload handed back to the caller untouched.
    Custom {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        targets: Option<TargetSpec>,
        payload: Value,
    },
}

/// Accept a single effect object where a list is expected.
fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<Effect>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(Box<Effect>),
        Many(Vec<Effect>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(effect) => vec![*effect],
        OneOrMany::Many(effects) => effects,
    })
}

impl Effect {
    /// Untyped damage.
    #[must_use]
    pub fn damage(targets: TargetSpec, amount: impl Into<Amount>) -> Self {
        Self::Damage {
            targets: Some(targets),
            amount: amount.into(),
            damage_type: None,
            save: None,
        }
    }

    /// Damage of a specific type.
    #[must_use]
    pub fn typed_damage(
        targets: TargetSpec,
        amount: impl Into<Amount>,
        damage_type: impl Into<String>,
    ) -> Self {
        Self::Damage {
            targets: Some(targets),
            amount: amount.into(),
            damage_type: Some(damage_type.into()),
            save: None,
        }
    }

    #[must_use]
    pub fn healing(targets: TargetSpec, amount: impl Into<Amount>) -> Self {
        Self::Healing {
            targets: Some(targets),
            amount: amount.into(),
        }
    }

    #[must_use]
    pub fn condition(
        targets: TargetSpec,
        condition: impl Into<String>,
        duration: Option<u32>,
    ) -> Self {
        Self::Condition {
            targets: Some(targets),
            condition: condition.into(),
            duration,
            save: None,
        }
    }

    #[must_use]
    pub fn aoe(area: AreaSpec, effects: impl IntoIterator<Item = Effect>) -> Self {
        Self::Aoe {
            area,
            effects: effects.into_iter().collect(),
        }
    }

    /// Attach a save gate to a damage, condition, or movement effect.
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn with_save(mut self, spec: SaveSpec) -> Self {
        match &mut self {
            Effect::Damage { save, .. }
            | Effect::Condition { save, .. }
            | Effect::Movement { save, .. } => *save = Some(spec),
            _ => {}
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::DiceExpr;

    #[test]
    fn test_damage_wire_shape() {
        let json = r#"{
            "type": "damage",
            "targets": {"type": "enemies"},
            "amount": "2d8+4",
            "damage_type": "slashing"
        }"#;
        let effect: Effect = serde_json::from_str(json).unwrap();
        assert_eq!(
            effect,
            Effect::typed_damage(TargetSpec::Enemies, DiceExpr::new(2, 8, 4), "slashing")
        );
    }

    #[test]
    fn test_fixed_amount_wire_shape() {
        let json = r#"{"type": "healing", "targets": {"type": "self"}, "amount": 15}"#;
        let effect: Effect = serde_json::from_str(json).unwrap();
        assert_eq!(effect, Effect::healing(TargetSpec::Actor, 15));
    }

    #[test]
    fn test_save_branches_accept_single_object() {
        let json = r#"{
            "type": "save",
            "ability": "dexterity",
            "dc": 18,
            "on_failure": {"type": "damage", "amount": "8d6", "damage_type": "fire"}
        }"#;
        let effect: Effect = serde_json::from_str(json).unwrap();
        match effect {
            Effect::Save {
                save,
                on_success,
                on_failure,
                ..
            } => {
                assert_eq!(save.ability, Ability::Dexterity);
                assert_eq!(save.dc, 18);
                assert!(on_success.is_empty());
                assert_eq!(on_failure.len(), 1);
            }
            other => panic!("expected save effect, got {other:?}"),
        }
    }

    #[test]
    fn test_save_branches_accept_list() {
        let json = r#"{
            "type": "save",
            "ability": "constitution",
            "dc": 15,
            "on_failure": [
                {"type": "damage", "amount": 10},
                {"type": "condition", "condition": "poisoned", "duration": 3}
            ]
        }"#;
        let effect: Effect = serde_json::from_str(json).unwrap();
        match effect {
            Effect::Save { on_failure, .. } => assert_eq!(on_failure.len(), 2),
            other => panic!("expected save effect, got {other:?}"),
        }
    }

    #[test]
    fn test_aoe_nests_effects() {
        let json = r#"{
            "type": "aoe",
            "area": {"shape": "cone", "size": 60},
            "effects": [{"type": "damage", "amount": "13d6", "damage_type": "fire"}]
        }"#;
        let effect: Effect = serde_json::from_str(json).unwrap();
        match effect {
            Effect::Aoe { area, effects } => {
                assert_eq!(area, AreaSpec::cone(60));
                assert_eq!(effects.len(), 1);
            }
            other => panic!("expected aoe effect, got {other:?}"),
        }
    }

    #[test]
    fn test_summon_count_defaults_to_one() {
        let json = r#"{
            "type": "summon",
            "creature": {"name": "Shadow", "max_hp": 16}
        }"#;
        let effect: Effect = serde_json::from_str(json).unwrap();
        match effect {
            Effect::Summon {
                count, creature, ..
            } => {
                assert_eq!(count, 1);
                assert_eq!(creature.side, Side::Monster);
            }
            other => panic!("expected summon effect, got {other:?}"),
        }
    }

    #[test]
    fn test_custom_payload_round_trips() {
        let json = r#"{"type": "custom", "payload": {"ritual": "dark-pact", "stage": 2}}"#;
        let effect: Effect = serde_json::from_str(json).unwrap();
        let back = serde_json::to_value(&effect).unwrap();
        assert_eq!(back["payload"]["ritual"], "dark-pact");
    }

    #[test]
    fn test_unknown_effect_type_is_rejected() {
        let json = r#"{"type": "polymorph", "amount": 1}"#;
        assert!(serde_json::from_str::<Effect>(json).is_err());
    }

    #[test]
    fn test_effect_round_trip() {
        let effect = Effect::aoe(
            AreaSpec::sphere(20),
            [
                Effect::typed_damage(TargetSpec::Enemies, DiceExpr::new(8, 6, 0), "fire")
                    .with_save(SaveSpec::new(Ability::Dexterity, 16).half_on_success()),
            ],
        );
        let json = serde_json::to_string(&effect).unwrap();
        let back: Effect = serde_json::from_str(&json).unwrap();
        assert_eq!(back, effect);
    }
}
