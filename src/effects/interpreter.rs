//! Effect interpretation.
//!
//! Walks an action's effect list in order, resolving targets and saving
//! throws and delegating every world mutation to the [`CombatState`]
//! collaborator. Effects are fault-isolated: a failed effect marks the
//! action unsuccessful but never stops the effects after it, and
//! resource deduction on the creature proceeds regardless.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::actions::Action;
use crate::combat::{CombatState, Position};
use crate::core::{ActionId, CombatantId, EngineRng};

use super::saves::{check_save, SaveOutcome};
use super::targeting::{resolve_targets, TargetOptions, TargetSpec};
use super::{AreaSpec, Effect};

/// Result of resolving one action: one outcome per effect, in order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ActionResult {
    pub action_id: ActionId,
    /// False if any effect in the tree failed.
    pub success: bool,
    pub effects: Vec<EffectOutcome>,
}

/// Damage dealt to one target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageReport {
    pub target: CombatantId,
    /// Amount actually dealt, after collaborator adjustments.
    pub damage: i64,
    pub resistance_applied: bool,
    pub immunity_applied: bool,
    pub vulnerability_applied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save: Option<SaveOutcome>,
}

/// Healing restored to one target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealingReport {
    pub target: CombatantId,
    pub healing: i64,
}

/// A condition applied (or resisted) by one target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionReport {
    pub target: CombatantId,
    pub applied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save: Option<SaveOutcome>,
}

/// Forced movement of one target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveReport {
    pub target: CombatantId,
    pub moved: bool,
    /// Distance after any save reduction.
    pub distance: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub save: Option<SaveOutcome>,
}

/// One target's saving throw and the branch it resolved to.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveReport {
    pub target: CombatantId,
    pub outcome: SaveOutcome,
    pub effects: Vec<EffectOutcome>,
}

/// What one effect did.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EffectOutcome {
    Damage {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        damage_type: Option<String>,
        /// Sum of per-target damage after adjustments.
        total: i64,
        targets: Vec<DamageReport>,
    },
    Healing {
        total: i64,
        targets: Vec<HealingReport>,
    },
    Condition {
        condition: String,
        targets: Vec<ConditionReport>,
    },
    Movement {
        targets: Vec<MoveReport>,
    },
    Summon {
        requested: u32,
        summoned: Vec<CombatantId>,
    },
    Area {
        area: AreaSpec,
        targets: Vec<CombatantId>,
        effects: Vec<EffectOutcome>,
    },
    Save {
        targets: Vec<SaveReport>,
    },
    Custom {
        targets: Vec<CombatantId>,
        payload: Value,
    },
    Failed {
        reason: String,
    },
}

impl EffectOutcome {
    /// Whether this outcome, or any outcome nested under it, failed.
    #[must_use]
    pub fn is_failure(&self) -> bool {
        match self {
            EffectOutcome::Failed { .. } => true,
            EffectOutcome::Area { effects, .. } => effects.iter().any(Self::is_failure),
            EffectOutcome::Save { targets } => targets
                .iter()
                .any(|report| report.effects.iter().any(Self::is_failure)),
            _ => false,
        }
    }
}

/// Applies effect trees to the encounter.
///
/// Owns the RNG used for random target selection; dice rolls go through
/// the combat state so callers control them.
#[derive(Debug)]
pub struct Interpreter {
    rng: EngineRng,
}

impl Interpreter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: EngineRng::from_entropy(),
        }
    }

    /// Deterministic interpreter for replays and tests.
    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: EngineRng::new(seed),
        }
    }

    /// Apply every effect of `action`, in order.
    pub fn apply_action(
        &mut self,
        action: &Action,
        actor: &CombatantId,
        state: &mut dyn CombatState,
        options: &TargetOptions,
    ) -> ActionResult {
        let mut success = true;
        let mut effects = Vec::with_capacity(action.effects.len());

        for effect in &action.effects {
            let outcome = self.apply_effect(effect, actor, state, options, None, false);
            if outcome.is_failure() {
                success = false;
            }
            effects.push(outcome);
        }

        ActionResult {
            action_id: action.id.clone(),
            success,
            effects,
        }
    }

    /// Apply one effect. `override_targets` replaces the effect's own
    /// spec (AOE and save re-targeting); `halve_damage` carries a
    /// successful half-damage save down to nested damage.
    fn apply_effect(
        &mut self,
        effect: &Effect,
        actor: &CombatantId,
        state: &mut dyn CombatState,
        options: &TargetOptions,
        override_targets: Option<&[CombatantId]>,
        halve_damage: bool,
    ) -> EffectOutcome {
        match effect {
            Effect::Damage {
                targets,
                amount,
                damage_type,
                save,
            } => {
                let ids = self.targets_for(targets.as_ref(), actor, state, options, override_targets);
                let mut rolled = amount.resolve(|dice| state.roll_dice(dice));
                if halve_damage {
                    rolled /= 2;
                }

                let mut reports = Vec::with_capacity(ids.len());
                let mut total = 0;
                for id in ids {
                    let target_data = state.combatant(&id).cloned();
                    let save_outcome = match (save.as_ref(), target_data) {
                        (Some(spec), Some(combatant)) => {
                            Some(check_save(&combatant, spec, state))
                        }
                        _ => None,
                    };

                    let mut amount_for_target = rolled;
                    if let (Some(spec), Some(outcome)) = (save.as_ref(), save_outcome.as_ref()) {
                        if outcome.saved {
                            if spec.negate_on_success {
                                amount_for_target = 0;
                            } else if spec.half_on_success {
                                amount_for_target /= 2;
                            }
                        }
                    }

                    let dealt = state.apply_damage(&id, amount_for_target, damage_type.as_deref());
                    total += dealt.damage;
                    reports.push(DamageReport {
                        target: id,
                        damage: dealt.damage,
                        resistance_applied: dealt.resistance_applied,
                        immunity_applied: dealt.immunity_applied,
                        vulnerability_applied: dealt.vulnerability_applied,
                        save: save_outcome,
                    });
                }

                EffectOutcome::Damage {
                    damage_type: damage_type.clone(),
                    total,
                    targets: reports,
                }
            }

            Effect::Healing { targets, amount } => {
                let ids = self.targets_for(targets.as_ref(), actor, state, options, override_targets);
                let rolled = amount.resolve(|dice| state.roll_dice(dice));

                let mut reports = Vec::with_capacity(ids.len());
                let mut total = 0;
                for id in ids {
                    let healed = state.apply_healing(&id, rolled);
                    total += healed.healing;
                    reports.push(HealingReport {
                        target: id,
                        healing: healed.healing,
                    });
                }

                EffectOutcome::Healing {
                    total,
                    targets: reports,
                }
            }

            Effect::Condition {
                targets,
                condition,
                duration,
                save,
            } => {
                let ids = self.targets_for(targets.as_ref(), actor, state, options, override_targets);

                let mut reports = Vec::with_capacity(ids.len());
                for id in ids {
                    let target_data = state.combatant(&id).cloned();
                    let save_outcome = match (save.as_ref(), target_data) {
                        (Some(spec), Some(combatant)) => {
                            Some(check_save(&combatant, spec, state))
                        }
                        _ => None,
                    };

                    let mut duration_for_target = *duration;
                    let mut negated = false;
                    if let (Some(spec), Some(outcome)) = (save.as_ref(), save_outcome.as_ref()) {
                        if outcome.saved {
                            if spec.negate_on_success {
                                negated = true;
                            } else if spec.half_duration_on_success {
                                duration_for_target = duration_for_target.map(|d| d.div_ceil(2));
                            }
                        }
                    }

                    let applied = if negated {
                        false
                    } else {
                        state.apply_condition(&id, condition, duration_for_target)
                    };
                    reports.push(ConditionReport {
                        target: id,
                        applied,
                        duration: duration_for_target,
                        save: save_outcome,
                    });
                }

                EffectOutcome::Condition {
                    condition: condition.clone(),
                    targets: reports,
                }
            }

            Effect::Movement {
                targets,
                distance,
                direction,
                save,
            } => {
                let ids = self.targets_for(targets.as_ref(), actor, state, options, override_targets);

                let mut reports = Vec::with_capacity(ids.len());
                for id in ids {
                    let target_data = state.combatant(&id).cloned();
                    let save_outcome = match (save.as_ref(), target_data) {
                        (Some(spec), Some(combatant)) => {
                            Some(check_save(&combatant, spec, state))
                        }
                        _ => None,
                    };

                    let mut distance_for_target = *distance;
                    let mut negated = false;
                    if let (Some(spec), Some(outcome)) = (save.as_ref(), save_outcome.as_ref()) {
                        if outcome.saved {
                            if spec.negate_on_success {
                                negated = true;
                            } else if spec.half_distance_on_success {
                                distance_for_target /= 2;
                            }
                        }
                    }

                    if negated {
                        reports.push(MoveReport {
                            target: id,
                            moved: false,
                            distance: 0,
                            new_position: None,
                            save: save_outcome,
                        });
                        continue;
                    }

                    match state.move_combatant(&id, distance_for_target, direction.as_deref()) {
                        Some(outcome) => reports.push(MoveReport {
                            target: id,
                            moved: outcome.moved,
                            distance: distance_for_target,
                            new_position: outcome.new_position,
                            save: save_outcome,
                        }),
                        None => {
                            warn!("combat state has no movement support");
                            return EffectOutcome::Failed {
                                reason: "combat state has no movement support".to_string(),
                            };
                        }
                    }
                }

                EffectOutcome::Movement { targets: reports }
            }

            Effect::Summon {
                creature,
                count,
                position,
            } => {
                let mut summoned = Vec::new();
                for _ in 0..*count {
                    let outcome = state.summon(creature, *position);
                    if outcome.success {
                        if let Some(id) = outcome.id {
                            summoned.push(id);
                        }
                    }
                }
                EffectOutcome::Summon {
                    requested: *count,
                    summoned,
                }
            }

            Effect::Aoe { area, effects } => {
                let ids = state.combatants_in_area(area);
                let results = effects
                    .iter()
                    .map(|sub| {
                        self.apply_effect(sub, actor, state, options, Some(&ids), halve_damage)
                    })
                    .collect();
                EffectOutcome::Area {
                    area: area.clone(),
                    targets: ids,
                    effects: results,
                }
            }

            Effect::Save {
                targets,
                save,
                on_success,
                on_failure,
            } => {
                let ids = self.targets_for(targets.as_ref(), actor, state, options, override_targets);

                let mut reports = Vec::with_capacity(ids.len());
                for id in ids {
                    let Some(combatant) = state.combatant(&id).cloned() else {
                        warn!(target = %id, "save target not in encounter");
                        continue;
                    };
                    let outcome = check_save(&combatant, save, state);

                    // Half-on-success runs the failure branch at half
                    // damage instead of the success branch.
                    let (branch, halve) = if outcome.saved {
                        if save.half_on_success {
                            (on_failure, true)
                        } else {
                            (on_success, false)
                        }
                    } else {
                        (on_failure, false)
                    };

                    let single = [id.clone()];
                    let effects_out = branch
                        .iter()
                        .map(|sub| {
                            self.apply_effect(sub, actor, state, options, Some(&single), halve)
                        })
                        .collect();

                    reports.push(SaveReport {
                        target: id,
                        outcome,
                        effects: effects_out,
                    });
                }

                EffectOutcome::Save { targets: reports }
            }

            Effect::Custom { targets, payload } => {
                let ids = self.targets_for(targets.as_ref(), actor, state, options, override_targets);
                EffectOutcome::Custom {
                    targets: ids,
                    payload: payload.clone(),
                }
            }
        }
    }

    fn targets_for(
        &mut self,
        spec: Option<&TargetSpec>,
        actor: &CombatantId,
        state: &dyn CombatState,
        options: &TargetOptions,
        override_targets: Option<&[CombatantId]>,
    ) -> Vec<CombatantId> {
        match override_targets {
            Some(ids) => ids.to_vec(),
            None => resolve_targets(spec, actor, state, options, &mut self.rng),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
