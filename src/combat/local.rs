//! Default combat-state adapter.
//!
//! Collects every documented local fallback in one place so the effect
//! interpreter stays free of capability checks: damage and healing clamp
//! hit points, conditions append to the combatant's list, area queries
//! coarsely return everyone, and movement reports "unsupported" (there
//! is no spatial model to move anyone in). Real applications implement
//! [`CombatState`] against their own encounter model instead.

use crate::actions::TriggerEvent;
use crate::core::{CombatantId, DiceExpr, EngineRng};
use crate::effects::{AreaSpec, SummonSpec};

use super::{
    ActiveCondition, Combatant, CombatState, DamageOutcome, HealingOutcome, MoveOutcome,
    Position, SummonOutcome,
};

/// In-memory combat state with local fallback behavior.
#[derive(Debug)]
pub struct LocalCombatState {
    combatants: Vec<Combatant>,
    round: u32,
    active: Option<CombatantId>,
    used_reaction: bool,
    used_bonus_action: bool,
    trigger: Option<TriggerEvent>,
    rng: EngineRng,
    summon_counter: u32,
}

impl LocalCombatState {
    #[must_use]
    pub fn new() -> Self {
        Self::with_rng(EngineRng::from_entropy())
    }

    /// Deterministic state for replays and tests.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(EngineRng::new(seed))
    }

    fn with_rng(rng: EngineRng) -> Self {
        Self {
            combatants: Vec::new(),
            round: 1,
            active: None,
            used_reaction: false,
            used_bonus_action: false,
            trigger: None,
            rng,
            summon_counter: 0,
        }
    }

    /// Add a combatant (builder pattern).
    #[must_use]
    pub fn with_combatant(mut self, combatant: Combatant) -> Self {
        self.combatants.push(combatant);
        self
    }

    pub fn add_combatant(&mut self, combatant: Combatant) {
        self.combatants.push(combatant);
    }

    pub fn combatant_mut(&mut self, id: &CombatantId) -> Option<&mut Combatant> {
        self.combatants.iter_mut().find(|c| &c.id == id)
    }

    /// Advance to the next round and clear the per-round economy flags.
    pub fn begin_round(&mut self) {
        self.round += 1;
        self.used_reaction = false;
        self.used_bonus_action = false;
    }

    pub fn set_round(&mut self, round: u32) {
        self.round = round;
    }

    /// Mark whose turn it is (`None` between turns).
    pub fn set_active(&mut self, id: Option<CombatantId>) {
        self.active = id;
    }

    /// Publish the event reactions may respond to.
    pub fn set_trigger(&mut self, trigger: Option<TriggerEvent>) {
        self.trigger = trigger;
    }
}

impl Default for LocalCombatState {
    fn default() -> Self {
        Self::new()
    }
}

impl CombatState for LocalCombatState {
    fn combatants(&self) -> &[Combatant] {
        &self.combatants
    }

    fn round(&self) -> u32 {
        self.round
    }

    fn is_turn_of(&self, id: &CombatantId) -> bool {
        self.active.as_ref() == Some(id)
    }

    fn used_reaction(&self) -> bool {
        self.used_reaction
    }

    fn set_reaction_used(&mut self, used: bool) {
        self.used_reaction = used;
    }

    fn used_bonus_action(&self) -> bool {
        self.used_bonus_action
    }

    fn set_bonus_action_used(&mut self, used: bool) {
        self.used_bonus_action = used;
    }

    fn trigger(&self) -> Option<&TriggerEvent> {
        self.trigger.as_ref()
    }

    fn apply_damage(
        &mut self,
        target: &CombatantId,
        amount: i64,
        damage_type: Option<&str>,
    ) -> DamageOutcome {
        let Some(combatant) = self.combatant_mut(target) else {
            return DamageOutcome::default();
        };

        let mut outcome = DamageOutcome {
            damage: amount,
            ..DamageOutcome::default()
        };

        // Adjustment order: immunity zeroes, resistance halves (floor),
        // vulnerability doubles.
        if let Some(damage_type) = damage_type {
            if combatant.immunities.contains(damage_type) {
                outcome.damage = 0;
                outcome.immunity_applied = true;
            } else {
                if combatant.resistances.contains(damage_type) {
                    outcome.damage /= 2;
                    outcome.resistance_applied = true;
                }
                if combatant.vulnerabilities.contains(damage_type) {
                    outcome.damage *= 2;
                    outcome.vulnerability_applied = true;
                }
            }
        }

        combatant.hp = (combatant.hp - outcome.damage).clamp(0, combatant.max_hp);
        outcome
    }

    fn apply_healing(&mut self, target: &CombatantId, amount: i64) -> HealingOutcome {
        let Some(combatant) = self.combatant_mut(target) else {
            return HealingOutcome::default();
        };

        let before = combatant.hp;
        combatant.hp = (combatant.hp + amount).clamp(0, combatant.max_hp);
        HealingOutcome {
            healing: combatant.hp - before,
        }
    }

    fn apply_condition(
        &mut self,
        target: &CombatantId,
        condition: &str,
        duration: Option<u32>,
    ) -> bool {
        let Some(combatant) = self.combatant_mut(target) else {
            return false;
        };

        if let Some(existing) = combatant
            .conditions
            .iter_mut()
            .find(|c| c.name == condition)
        {
            existing.duration = duration;
        } else {
            combatant.conditions.push(ActiveCondition {
                name: condition.to_string(),
                duration,
            });
        }
        true
    }

    fn move_combatant(
        &mut self,
        _target: &CombatantId,
        _distance: u32,
        _direction: Option<&str>,
    ) -> Option<MoveOutcome> {
        // No spatial model here.
        None
    }

    fn summon(&mut self, spec: &SummonSpec, position: Option<Position>) -> SummonOutcome {
        self.summon_counter += 1;
        let slug = spec.name.to_lowercase().replace(' ', "-");
        let id = CombatantId::new(format!("{}-{}", slug, self.summon_counter));

        let mut summoned = Combatant::new(id.clone(), spec.name.clone(), spec.side, spec.max_hp);
        summoned.position = position;
        self.combatants.push(summoned);

        SummonOutcome {
            success: true,
            id: Some(id),
        }
    }

    fn combatants_in_area(&self, _area: &AreaSpec) -> Vec<CombatantId> {
        // Coarse fallback: everyone is in the area.
        self.combatants.iter().map(|c| c.id.clone()).collect()
    }

    fn roll_dice(&mut self, dice: &DiceExpr) -> i64 {
        self.rng.roll(dice)
    }

    fn roll_d20(&mut self) -> i64 {
        self.rng.d20()
    }

    fn roll_d6(&mut self) -> i64 {
        self.rng.d6()
    }
}
