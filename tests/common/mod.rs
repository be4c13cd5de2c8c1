//! Shared test fixtures.
#![allow(dead_code)] // each test binary uses its own subset

use std::collections::VecDeque;

use boss_engine::{
    AreaSpec, Combatant, CombatantId, CombatState, DamageOutcome, DiceExpr, HealingOutcome,
    LocalCombatState, MoveOutcome, Position, SummonOutcome, SummonSpec, TriggerEvent,
};

/// Wraps [`LocalCombatState`], serving d20 and d6 rolls from scripts
/// before falling back to the inner RNG.
pub struct ScriptedState {
    pub inner: LocalCombatState,
    pub d20s: VecDeque<i64>,
    pub d6s: VecDeque<i64>,
}

impl ScriptedState {
    pub fn new(inner: LocalCombatState) -> Self {
        Self {
            inner,
            d20s: VecDeque::new(),
            d6s: VecDeque::new(),
        }
    }

    pub fn script_d20s(mut self, rolls: impl IntoIterator<Item = i64>) -> Self {
        self.d20s.extend(rolls);
        self
    }

    pub fn script_d6s(mut self, rolls: impl IntoIterator<Item = i64>) -> Self {
        self.d6s.extend(rolls);
        self
    }
}

impl CombatState for ScriptedState {
    fn combatants(&self) -> &[Combatant] {
        self.inner.combatants()
    }

    fn round(&self) -> u32 {
        self.inner.round()
    }

    fn is_turn_of(&self, id: &CombatantId) -> bool {
        self.inner.is_turn_of(id)
    }

    fn used_reaction(&self) -> bool {
        self.inner.used_reaction()
    }

    fn set_reaction_used(&mut self, used: bool) {
        self.inner.set_reaction_used(used);
    }

    fn used_bonus_action(&self) -> bool {
        self.inner.used_bonus_action()
    }

    fn set_bonus_action_used(&mut self, used: bool) {
        self.inner.set_bonus_action_used(used);
    }

    fn trigger(&self) -> Option<&TriggerEvent> {
        self.inner.trigger()
    }

    fn apply_damage(
        &mut self,
        target: &CombatantId,
        amount: i64,
        damage_type: Option<&str>,
    ) -> DamageOutcome {
        self.inner.apply_damage(target, amount, damage_type)
    }

    fn apply_healing(&mut self, target: &CombatantId, amount: i64) -> HealingOutcome {
        self.inner.apply_healing(target, amount)
    }

    fn apply_condition(
        &mut self,
        target: &CombatantId,
        condition: &str,
        duration: Option<u32>,
    ) -> bool {
        self.inner.apply_condition(target, condition, duration)
    }

    fn move_combatant(
        &mut self,
        target: &CombatantId,
        distance: u32,
        direction: Option<&str>,
    ) -> Option<MoveOutcome> {
        self.inner.move_combatant(target, distance, direction)
    }

    fn summon(&mut self, spec: &SummonSpec, position: Option<Position>) -> SummonOutcome {
        self.inner.summon(spec, position)
    }

    fn combatants_in_area(&self, area: &AreaSpec) -> Vec<CombatantId> {
        self.inner.combatants_in_area(area)
    }

    fn roll_dice(&mut self, dice: &DiceExpr) -> i64 {
        self.inner.roll_dice(dice)
    }

    fn roll_d20(&mut self) -> i64 {
        match self.d20s.pop_front() {
            Some(roll) => roll,
            None => self.inner.roll_d20(),
        }
    }

    fn roll_d6(&mut self) -> i64 {
        match self.d6s.pop_front() {
            Some(roll) => roll,
            None => self.inner.roll_d6(),
        }
    }
}
