//! The combat-state collaborator boundary.
//!
//! Everything the engine needs from the encounter (who is present,
//! whose turn it is, what event reactions may respond to) and every
//! mutation it wants made goes through this trait. Applications
//! implement it against their own encounter model;
//! [`LocalCombatState`](super::LocalCombatState) is the default adapter
//! carrying the documented local fallbacks.
//!
//! The engine only reads and calls; it never clones the state and never
//! assumes exclusive access beyond the duration of one call.

use serde::{Deserialize, Serialize};

use crate::actions::TriggerEvent;
use crate::core::{CombatantId, DiceExpr};
use crate::effects::{AreaSpec, SummonSpec};

use super::{Combatant, Position};

/// What happened when the collaborator applied damage.
///
/// `damage` is the amount actually dealt, after any resistance,
/// immunity, or vulnerability adjustment the collaborator made.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageOutcome {
    pub damage: i64,
    pub resistance_applied: bool,
    pub immunity_applied: bool,
    pub vulnerability_applied: bool,
}

/// What happened when the collaborator applied healing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealingOutcome {
    pub healing: i64,
}

/// What happened when the collaborator moved a combatant.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveOutcome {
    pub moved: bool,
    pub new_position: Option<Position>,
}

/// What happened when the collaborator summoned a creature.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummonOutcome {
    pub success: bool,
    pub id: Option<CombatantId>,
}

/// The external combat state the engine resolves actions against.
pub trait CombatState {
    /// Every combatant currently in the encounter.
    fn combatants(&self) -> &[Combatant];

    /// Look up one combatant by id.
    fn combatant(&self, id: &CombatantId) -> Option<&Combatant> {
        self.combatants().iter().find(|c| &c.id == id)
    }

    /// Current round number.
    fn round(&self) -> u32;

    /// Whether it is currently `id`'s turn.
    fn is_turn_of(&self, id: &CombatantId) -> bool;

    fn used_reaction(&self) -> bool;
    fn set_reaction_used(&mut self, used: bool);

    fn used_bonus_action(&self) -> bool;
    fn set_bonus_action_used(&mut self, used: bool);

    /// The event currently triggering reactions, if any.
    fn trigger(&self) -> Option<&TriggerEvent>;

    /// Deal damage, applying any resistance/immunity/vulnerability
    /// adjustments the encounter model knows about.
    fn apply_damage(
        &mut self,
        target: &CombatantId,
        amount: i64,
        damage_type: Option<&str>,
    ) -> DamageOutcome;

    /// Heal, reporting the amount actually restored.
    fn apply_healing(&mut self, target: &CombatantId, amount: i64) -> HealingOutcome;

    /// Apply a condition; returns whether it took effect.
    fn apply_condition(
        &mut self,
        target: &CombatantId,
        condition: &str,
        duration: Option<u32>,
    ) -> bool;

    /// Move a combatant. `None` means this state has no spatial model
    /// and cannot move anyone; the effect is then recorded as failed.
    fn move_combatant(
        &mut self,
        target: &CombatantId,
        distance: u32,
        direction: Option<&str>,
    ) -> Option<MoveOutcome>;

    /// Bring a new creature into the encounter.
    fn summon(&mut self, spec: &SummonSpec, position: Option<Position>) -> SummonOutcome;

    /// Combatants inside a spatial region.
    fn combatants_in_area(&self, area: &AreaSpec) -> Vec<CombatantId>;

    /// Roll a dice expression.
    fn roll_dice(&mut self, dice: &DiceExpr) -> i64;

    /// Roll a d20.
    fn roll_d20(&mut self) -> i64;

    /// Roll a d6.
    fn roll_d6(&mut self) -> i64;
}
